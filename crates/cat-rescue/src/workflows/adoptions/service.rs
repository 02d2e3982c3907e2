use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    AdoptionApplication, AdoptionDecision, AdoptionOutcome, AdoptionRequest, AdoptionRequestId,
    AdoptionStatus, PetStatus,
};
use crate::workflows::catalog::UserId;
use crate::workflows::error::WorkflowError;
use crate::workflows::notifications::{
    NotificationDispatcher, NotificationDraft, NotificationKind, NotificationRepository,
};
use crate::workflows::policy::TransitionPolicy;
use crate::workflows::store::{RescueState, RescueStore};

const SUPERSEDED_NOTE: &str = "Kucing ini telah diadopsi melalui permintaan lain.";

/// Owns adoption request state and flips pet availability as requests progress.
///
/// Approving a request reserves the pet (PENDING); leaving APPROVED without completing
/// releases it. Completing marks the pet ADOPTED, which never reverts, and closes every
/// competing open request for that pet.
pub struct AdoptionRequestManager<S, N> {
    store: Arc<S>,
    notifications: Arc<NotificationDispatcher<N>>,
    policy: TransitionPolicy,
}

impl<S, N> AdoptionRequestManager<S, N>
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    pub fn new(
        store: Arc<S>,
        notifications: Arc<NotificationDispatcher<N>>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            store,
            notifications,
            policy,
        }
    }

    pub fn create_request(
        &self,
        application: AdoptionApplication,
    ) -> Result<AdoptionRequest, WorkflowError> {
        if application.user_id.is_blank() {
            return Err(WorkflowError::Validation(
                "adopter id must not be empty".to_string(),
            ));
        }
        let reason = application.reason.trim().to_string();
        let contact = application.contact.trim().to_string();
        if reason.is_empty() || contact.is_empty() {
            return Err(WorkflowError::Validation(
                "reason and contact are required".to_string(),
            ));
        }

        let (request, pet_name) = self.store.transaction(|state| -> Result<_, WorkflowError> {
            let pet = state.pet(&application.pet_id).ok_or_else(|| {
                WorkflowError::not_found("pet", application.pet_id.0.clone())
            })?;
            if pet.status != PetStatus::Available {
                return Err(WorkflowError::InvalidState(format!(
                    "pet {} is {} and not open for adoption",
                    pet.id.0,
                    pet.status.label()
                )));
            }
            let pet_name = pet.name.clone();

            let duplicate = state.adoptions.values().any(|existing| {
                existing.user_id == application.user_id
                    && existing.pet_id == application.pet_id
                    && existing.status == AdoptionStatus::Pending
            });
            if duplicate {
                return Err(WorkflowError::Conflict(format!(
                    "user {} already has a pending request for pet {}",
                    application.user_id.0, application.pet_id.0
                )));
            }

            let now = Utc::now();
            let request = AdoptionRequest {
                id: AdoptionRequestId(state.next_id("adp")),
                user_id: application.user_id,
                pet_id: application.pet_id,
                reason,
                contact,
                has_yard: application.has_yard,
                has_other_pets: application.has_other_pets,
                status: AdoptionStatus::Pending,
                admin_note: None,
                created_at: now,
                updated_at: now,
            };
            state.adoptions.insert(request.id.clone(), request.clone());
            Ok((request, pet_name))
        })?;

        info!(
            request_id = %request.id.0,
            pet_id = %request.pet_id.0,
            user_id = %request.user_id.0,
            "adoption request submitted"
        );

        self.notifications.notify_best_effort(NotificationDraft::new(
            request.user_id.clone(),
            NotificationKind::Adoption,
            "Permintaan Adopsi Dikirim",
            format!("Permintaan adopsi untuk {pet_name} sedang ditinjau oleh shelter."),
        ));

        Ok(request)
    }

    pub fn update_status(
        &self,
        request_id: &AdoptionRequestId,
        decision: AdoptionDecision,
    ) -> Result<AdoptionOutcome, WorkflowError> {
        let AdoptionDecision { status, admin_note } = decision;
        let admin_note = admin_note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty());

        let (previous, outcome) = self.store.transaction(|state| -> Result<_, WorkflowError> {
            let request = state.adoption(request_id).cloned().ok_or_else(|| {
                WorkflowError::not_found("adoption request", request_id.0.clone())
            })?;
            self.policy
                .check("adoption request", request.status, status)?;

            let pet = state.pet_mut(&request.pet_id)?;
            pet.status = next_pet_status(request.status, status, pet.status, &pet.id.0)?;
            let pet = pet.clone();

            let now = Utc::now();
            let stored = state.adoption_mut(request_id)?;
            stored.status = status;
            if admin_note.is_some() {
                stored.admin_note = admin_note;
            }
            stored.updated_at = now;
            let updated = stored.clone();

            let superseded = if status == AdoptionStatus::Completed {
                close_competing_requests(state, &updated)
            } else {
                Vec::new()
            };

            Ok((
                request.status,
                AdoptionOutcome {
                    request: updated,
                    pet,
                    superseded,
                },
            ))
        })?;

        info!(
            request_id = %outcome.request.id.0,
            from = previous.label(),
            to = outcome.request.status.label(),
            pet_id = %outcome.pet.id.0,
            pet_status = outcome.pet.status.label(),
            superseded = outcome.superseded.len(),
            "adoption request updated"
        );

        let request = &outcome.request;
        let message = match &request.admin_note {
            Some(note) => format!(
                "Permintaan adopsi untuk {} kini {}. Catatan: {note}",
                outcome.pet.name,
                request.status.label()
            ),
            None => format!(
                "Permintaan adopsi untuk {} kini {}.",
                outcome.pet.name,
                request.status.label()
            ),
        };
        self.notifications.notify_best_effort(NotificationDraft::new(
            request.user_id.clone(),
            NotificationKind::Adoption,
            "Status Adopsi Diperbarui",
            message,
        ));
        for closed in &outcome.superseded {
            self.notifications.notify_best_effort(NotificationDraft::new(
                closed.user_id.clone(),
                NotificationKind::Adoption,
                "Status Adopsi Diperbarui",
                format!(
                    "Permintaan adopsi untuk {} ditolak. {SUPERSEDED_NOTE}",
                    outcome.pet.name
                ),
            ));
        }

        Ok(outcome)
    }

    pub fn get(&self, request_id: &AdoptionRequestId) -> Result<AdoptionRequest, WorkflowError> {
        self.store
            .read(|state| state.adoption(request_id).cloned())?
            .ok_or_else(|| WorkflowError::not_found("adoption request", request_id.0.clone()))
    }

    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<AdoptionRequest>, WorkflowError> {
        let mut requests: Vec<AdoptionRequest> = self.store.read(|state| {
            state
                .adoptions
                .values()
                .filter(|request| &request.user_id == user_id)
                .cloned()
                .collect()
        })?;
        requests.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(requests)
    }
}

/// Pet status implied by moving a request from `from` to `to`.
fn next_pet_status(
    from: AdoptionStatus,
    to: AdoptionStatus,
    pet: PetStatus,
    pet_id: &str,
) -> Result<PetStatus, WorkflowError> {
    match to {
        AdoptionStatus::Completed if pet == PetStatus::Adopted => {
            Err(WorkflowError::InvalidState(format!(
                "pet {pet_id} has already been adopted"
            )))
        }
        AdoptionStatus::Completed => Ok(PetStatus::Adopted),
        AdoptionStatus::Approved if from != AdoptionStatus::Approved => {
            if pet != PetStatus::Available {
                return Err(WorkflowError::InvalidState(format!(
                    "pet {pet_id} is {} and cannot be reserved",
                    pet.label()
                )));
            }
            Ok(PetStatus::Pending)
        }
        _ if from == AdoptionStatus::Approved
            && to != AdoptionStatus::Approved
            && pet == PetStatus::Pending =>
        {
            Ok(PetStatus::Available)
        }
        _ => Ok(pet),
    }
}

/// Rejects every other open request for the adopted pet.
fn close_competing_requests(
    state: &mut RescueState,
    completed: &AdoptionRequest,
) -> Vec<AdoptionRequest> {
    let now = Utc::now();
    state
        .adoptions
        .values_mut()
        .filter(|request| {
            request.pet_id == completed.pet_id
                && request.id != completed.id
                && matches!(
                    request.status,
                    AdoptionStatus::Pending | AdoptionStatus::Approved
                )
        })
        .map(|request| {
            request.status = AdoptionStatus::Rejected;
            request.admin_note = Some(SUPERSEDED_NOTE.to_string());
            request.updated_at = now;
            request.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_reserves_and_cancellation_releases() {
        assert_eq!(
            next_pet_status(
                AdoptionStatus::Pending,
                AdoptionStatus::Approved,
                PetStatus::Available,
                "pet-1"
            ),
            Ok(PetStatus::Pending)
        );
        assert_eq!(
            next_pet_status(
                AdoptionStatus::Approved,
                AdoptionStatus::Cancelled,
                PetStatus::Pending,
                "pet-1"
            ),
            Ok(PetStatus::Available)
        );
    }

    #[test]
    fn rejecting_a_pending_request_leaves_the_reservation_alone() {
        assert_eq!(
            next_pet_status(
                AdoptionStatus::Pending,
                AdoptionStatus::Rejected,
                PetStatus::Pending,
                "pet-1"
            ),
            Ok(PetStatus::Pending)
        );
    }

    #[test]
    fn adopted_pets_cannot_be_adopted_twice() {
        assert!(matches!(
            next_pet_status(
                AdoptionStatus::Approved,
                AdoptionStatus::Completed,
                PetStatus::Adopted,
                "pet-1"
            ),
            Err(WorkflowError::InvalidState(_))
        ));
    }
}
