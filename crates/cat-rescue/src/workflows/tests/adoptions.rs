use super::common::*;
use crate::workflows::adoptions::{
    AdoptionApplication, AdoptionDecision, AdoptionRequestId, AdoptionStatus, Pet, PetId,
    PetStatus,
};
use crate::workflows::{ErrorKind, WorkflowError};

fn application(pet: &Pet, adopter: &str) -> AdoptionApplication {
    AdoptionApplication {
        user_id: user(adopter),
        pet_id: pet.id.clone(),
        reason: "Rumah kami tenang dan ada halaman".to_string(),
        contact: "0812-3456-7890".to_string(),
        has_yard: true,
        has_other_pets: false,
    }
}

#[test]
fn new_request_is_pending_and_pet_stays_available() {
    let services = services();
    let shelter = shelter(&services.catalog, 5, 0);
    let pet = pet(&services.catalog, &shelter, "Oyen");

    let request = services
        .adoptions
        .create_request(application(&pet, "adopter-1"))
        .expect("request");

    assert_eq!(request.status, AdoptionStatus::Pending);
    assert!(request.has_yard);
    assert_eq!(
        services.catalog.pet(&pet.id).expect("pet").status,
        PetStatus::Available
    );
    assert_eq!(
        services
            .adoptions
            .list_for_user(&user("adopter-1"))
            .expect("list"),
        vec![request]
    );
}

#[test]
fn request_for_unknown_pet_is_not_found() {
    let services = services();
    let shelter = shelter(&services.catalog, 5, 0);
    let pet = pet(&services.catalog, &shelter, "Oyen");
    let mut orphan = application(&pet, "adopter-1");
    orphan.pet_id = PetId("pet-404".to_string());

    assert_eq!(
        services
            .adoptions
            .create_request(orphan)
            .expect_err("missing pet")
            .kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn application_needs_reason_and_contact() {
    let services = services();
    let shelter = shelter(&services.catalog, 5, 0);
    let pet = pet(&services.catalog, &shelter, "Oyen");
    let mut incomplete = application(&pet, "adopter-1");
    incomplete.contact = " ".to_string();

    assert!(matches!(
        services.adoptions.create_request(incomplete),
        Err(WorkflowError::Validation(_))
    ));
}

#[test]
fn duplicate_pending_request_is_a_conflict() {
    let services = services();
    let shelter = shelter(&services.catalog, 5, 0);
    let pet = pet(&services.catalog, &shelter, "Oyen");
    let first = services
        .adoptions
        .create_request(application(&pet, "adopter-1"))
        .expect("first request");

    let error = services
        .adoptions
        .create_request(application(&pet, "adopter-1"))
        .expect_err("duplicate");
    assert_eq!(error.kind(), ErrorKind::Conflict);

    services
        .adoptions
        .create_request(application(&pet, "adopter-2"))
        .expect("another adopter may apply");

    services
        .adoptions
        .update_status(&first.id, AdoptionDecision::to(AdoptionStatus::Rejected))
        .expect("rejected");
    services
        .adoptions
        .create_request(application(&pet, "adopter-1"))
        .expect("re-apply after rejection");
}

#[test]
fn approval_reserves_pet_and_blocks_new_requests() {
    let services = services();
    let shelter = shelter(&services.catalog, 5, 0);
    let pet = pet(&services.catalog, &shelter, "Oyen");
    let request = services
        .adoptions
        .create_request(application(&pet, "adopter-1"))
        .expect("request");

    let outcome = services
        .adoptions
        .update_status(&request.id, AdoptionDecision::to(AdoptionStatus::Approved))
        .expect("approved");
    assert_eq!(outcome.pet.status, PetStatus::Pending);

    let error = services
        .adoptions
        .create_request(application(&pet, "adopter-2"))
        .expect_err("pet reserved");
    assert_eq!(error.kind(), ErrorKind::InvalidState);
}

#[test]
fn cancelling_an_approved_request_releases_the_pet() {
    let services = services();
    let shelter = shelter(&services.catalog, 5, 0);
    let pet = pet(&services.catalog, &shelter, "Oyen");
    let request = services
        .adoptions
        .create_request(application(&pet, "adopter-1"))
        .expect("request");
    services
        .adoptions
        .update_status(&request.id, AdoptionDecision::to(AdoptionStatus::Approved))
        .expect("approved");

    let outcome = services
        .adoptions
        .update_status(&request.id, AdoptionDecision::to(AdoptionStatus::Cancelled))
        .expect("cancelled");

    assert_eq!(outcome.pet.status, PetStatus::Available);
    services
        .adoptions
        .create_request(application(&pet, "adopter-2"))
        .expect("pet open again");
}

#[test]
fn completion_adopts_pet_and_closes_competing_requests() {
    let services = services();
    let shelter = shelter(&services.catalog, 5, 0);
    let pet = pet(&services.catalog, &shelter, "Oyen");
    let winner = services
        .adoptions
        .create_request(application(&pet, "adopter-1"))
        .expect("winner");
    let competitor = services
        .adoptions
        .create_request(application(&pet, "adopter-2"))
        .expect("competitor");

    services
        .adoptions
        .update_status(&winner.id, AdoptionDecision::to(AdoptionStatus::Approved))
        .expect("approved");
    let outcome = services
        .adoptions
        .update_status(
            &winner.id,
            AdoptionDecision {
                status: AdoptionStatus::Completed,
                admin_note: Some("Serah terima hari Sabtu".to_string()),
            },
        )
        .expect("completed");

    assert_eq!(outcome.pet.status, PetStatus::Adopted);
    assert_eq!(
        outcome.request.admin_note.as_deref(),
        Some("Serah terima hari Sabtu")
    );
    assert_eq!(outcome.superseded.len(), 1);
    assert_eq!(outcome.superseded[0].id, competitor.id);

    let closed = services.adoptions.get(&competitor.id).expect("competitor");
    assert_eq!(closed.status, AdoptionStatus::Rejected);
    assert!(closed.admin_note.is_some());

    let inbox = services
        .notifications
        .list_for_user(&user("adopter-2"))
        .expect("inbox");
    assert_eq!(inbox.len(), 2);
    assert!(inbox[0].message.contains("ditolak"));
}

#[test]
fn adopted_pet_never_returns_to_the_pool() {
    let services = services();
    let shelter = shelter(&services.catalog, 5, 0);
    let pet = pet(&services.catalog, &shelter, "Oyen");
    let request = services
        .adoptions
        .create_request(application(&pet, "adopter-1"))
        .expect("request");
    services
        .adoptions
        .update_status(&request.id, AdoptionDecision::to(AdoptionStatus::Completed))
        .expect("permissive policy allows direct completion");

    for status in [
        AdoptionStatus::Pending,
        AdoptionStatus::Approved,
        AdoptionStatus::Cancelled,
    ] {
        let error = services
            .adoptions
            .update_status(&request.id, AdoptionDecision::to(status))
            .expect_err("completed is final");
        assert_eq!(error.kind(), ErrorKind::InvalidState);
    }

    assert_eq!(
        services.catalog.pet(&pet.id).expect("pet").status,
        PetStatus::Adopted
    );
    assert_eq!(
        services
            .adoptions
            .create_request(application(&pet, "adopter-3"))
            .expect_err("adopted pet")
            .kind(),
        ErrorKind::InvalidState
    );
}

#[test]
fn strict_policy_requires_approval_before_completion() {
    let services = strict_services();
    let shelter = shelter(&services.catalog, 5, 0);
    let pet = pet(&services.catalog, &shelter, "Oyen");
    let request = services
        .adoptions
        .create_request(application(&pet, "adopter-1"))
        .expect("request");

    let error = services
        .adoptions
        .update_status(&request.id, AdoptionDecision::to(AdoptionStatus::Completed))
        .expect_err("unapproved completion");

    assert_eq!(error.kind(), ErrorKind::InvalidState);
    assert_eq!(
        services.catalog.pet(&pet.id).expect("pet").status,
        PetStatus::Available
    );
}

#[test]
fn unknown_request_is_not_found() {
    let services = services();

    assert_eq!(
        services
            .adoptions
            .update_status(
                &AdoptionRequestId("adp-404".to_string()),
                AdoptionDecision::to(AdoptionStatus::Approved),
            )
            .expect_err("missing request")
            .kind(),
        ErrorKind::NotFound
    );
}
