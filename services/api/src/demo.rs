use cat_rescue::config::WorkflowConfig;
use cat_rescue::error::AppError;
use cat_rescue::workflows::adoptions::{
    AdoptionApplication, AdoptionDecision, AdoptionStatus, PetId, PetRegistration,
};
use cat_rescue::workflows::catalog::{ShelterRegistration, UserId};
use cat_rescue::workflows::donations::{CampaignDraft, DonationStatus, DonationSubmission};
use cat_rescue::workflows::notifications::{NotificationPoller, NotificationRepository};
use cat_rescue::workflows::reports::{
    ReportCondition, ReportStatus, ReportSubmission, StatusChange, TimelineNote,
};
use cat_rescue::workflows::store::RescueStore;
use cat_rescue::workflows::{RescueServices, TransitionPolicy};
use clap::Args;
use rust_decimal::Decimal;

const REPORTER: &str = "warga-demo";
const DONOR: &str = "donatur-demo";
const ADOPTER: &str = "adopter-demo";
const SECOND_ADOPTER: &str = "adopter-kedua";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Transition policy for reports and adoptions (permissive or strict)
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) policy: Option<TransitionPolicy>,
    /// Campaign target in rupiah. Defaults to 100000.
    #[arg(long)]
    pub(crate) target: Option<Decimal>,
    /// Skip the adoption portion of the demo.
    #[arg(long)]
    pub(crate) skip_adoption: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        policy,
        target,
        skip_adoption,
    } = args;

    let config = WorkflowConfig {
        transition_policy: policy.unwrap_or_default(),
        ..WorkflowConfig::default()
    };
    let target = target.unwrap_or_else(|| Decimal::new(100_000, 0));
    let services = RescueServices::in_memory(&config);

    println!(
        "Cat rescue workflow demo (policy: {})",
        config.transition_policy.label()
    );
    let shelter = services.catalog.register_shelter(ShelterRegistration {
        name: "Rumah Kucing Yogyakarta".to_string(),
        capacity: 12,
        current_occupancy: 11,
    })?;
    println!(
        "- Shelter {} ({}) at {}/{}",
        shelter.name, shelter.id.0, shelter.current_occupancy, shelter.capacity
    );

    println!("\nReport lifecycle");
    let mut poller = NotificationPoller::new(services.notifications.clone(), user(REPORTER));
    let report = services.reports.create_report(ReportSubmission {
        user_id: user(REPORTER),
        shelter_id: shelter.id.clone(),
        condition: ReportCondition::Terluka,
        description: "Kucing oranye pincang di parkiran kampus".to_string(),
        image_ref: "uploads/reports/kampus.jpg".to_string(),
    })?;
    println!("- Filed report {} -> {}", report.id.0, report.status.label());
    announce(&mut poller);

    services.reports.advance_status(
        &report.id,
        StatusChange {
            status: ReportStatus::Processing,
            activity: Some("Tim Penjemput Berangkat".to_string()),
            description: Some("Relawan menuju lokasi".to_string()),
        },
    )?;
    announce(&mut poller);
    services.reports.append_timeline_entry(
        &report.id,
        TimelineNote {
            activity: "Pemeriksaan Dokter".to_string(),
            description: Some("Kaki dibalut, perlu istirahat dua minggu".to_string()),
            icon: Some("medical_services".to_string()),
        },
    )?;
    announce(&mut poller);
    services
        .reports
        .advance_status(&report.id, StatusChange::to(ReportStatus::Completed))?;
    announce(&mut poller);

    println!("  Timeline (newest first):");
    for entry in services.reports.timeline(&report.id)? {
        match &entry.description {
            Some(description) => println!("    - {}: {}", entry.activity, description),
            None => println!("    - {}", entry.activity),
        }
    }
    let shelter = services.catalog.shelter(&shelter.id)?;
    println!(
        "  Shelter occupancy now {}/{}{}",
        shelter.current_occupancy,
        shelter.capacity,
        if shelter.is_available() { "" } else { " (full)" }
    );

    println!("\nCampaign funding");
    let campaign = services.catalog.open_campaign(CampaignDraft {
        shelter_id: shelter.id.clone(),
        title: "Biaya Operasi Kaki".to_string(),
        target_amount: target,
        is_urgent: true,
    })?;
    println!(
        "- Opened {} '{}' with target Rp{}",
        campaign.id.0, campaign.title, campaign.target_amount
    );
    let portions = [
        target * Decimal::new(6, 1),
        target * Decimal::new(5, 1),
    ];
    for amount in portions {
        let donation = services.donations.create_donation(DonationSubmission {
            user_id: user(DONOR),
            campaign_id: campaign.id.clone(),
            amount,
            proof_ref: "uploads/proofs/transfer.png".to_string(),
        })?;
        let transition = services
            .donations
            .update_status(&donation.id, DonationStatus::Verified)?;
        println!(
            "  Verified {} Rp{} -> campaign Rp{} / Rp{} ({})",
            transition.donation.id.0,
            transition.donation.amount,
            transition.campaign.current_amount,
            transition.campaign.target_amount,
            transition.campaign.status.label()
        );

        if let Err(err) = services
            .donations
            .update_status(&donation.id, DonationStatus::Verified)
        {
            println!("  Repeat verification refused: {err}");
        }
    }

    if skip_adoption {
        return summarize(&services);
    }

    println!("\nAdoption");
    let pet = services.catalog.register_pet(PetRegistration {
        shelter_id: shelter.id.clone(),
        name: "Jingga".to_string(),
    })?;
    let winner = services
        .adoptions
        .create_request(application(ADOPTER, &pet.id, "Rumah dengan halaman luas"))?;
    let competitor = services
        .adoptions
        .create_request(application(SECOND_ADOPTER, &pet.id, "Sudah lama ingin kucing"))?;
    println!(
        "- {} has requests {} and {}",
        pet.name, winner.id.0, competitor.id.0
    );

    let approved = services
        .adoptions
        .update_status(&winner.id, AdoptionDecision::to(AdoptionStatus::Approved))?;
    println!("  Approved {} -> pet {}", winner.id.0, approved.pet.status.label());
    let completed = services.adoptions.update_status(
        &winner.id,
        AdoptionDecision {
            status: AdoptionStatus::Completed,
            admin_note: Some("Serah terima selesai".to_string()),
        },
    )?;
    println!(
        "  Completed {} -> pet {}",
        winner.id.0,
        completed.pet.status.label()
    );
    for closed in &completed.superseded {
        println!(
            "  Closed competing request {} -> {}",
            closed.id.0,
            closed.status.label()
        );
    }

    summarize(&services)
}

fn summarize<S, N>(services: &RescueServices<S, N>) -> Result<(), AppError>
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    println!("\nNotification inboxes");
    for owner in [REPORTER, DONOR, ADOPTER, SECOND_ADOPTER] {
        let inbox = services.notifications.inbox(&user(owner))?;
        if inbox.items.is_empty() {
            continue;
        }
        println!("- {owner}: {} unread", inbox.unread_count);
        for item in &inbox.items {
            println!("    - [{}] {}", item.id.0, item.title);
        }
    }
    Ok(())
}

/// Prints whatever the client poller would surface right now.
fn announce<N>(poller: &mut NotificationPoller<N>)
where
    N: NotificationRepository + 'static,
{
    match poller.poll_once() {
        Ok(Some(notification)) => {
            println!("  [poll] {}: {}", notification.title, notification.message)
        }
        Ok(None) => {}
        Err(err) => println!("  [poll] unavailable: {err}"),
    }
}

fn application(adopter: &str, pet_id: &PetId, reason: &str) -> AdoptionApplication {
    AdoptionApplication {
        user_id: user(adopter),
        pet_id: pet_id.clone(),
        reason: reason.to_string(),
        contact: format!("{adopter}@contoh.id"),
        has_yard: true,
        has_other_pets: false,
    }
}

fn user(name: &str) -> UserId {
    UserId(name.to_string())
}
