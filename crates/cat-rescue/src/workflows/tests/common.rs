use std::sync::Arc;

use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::WorkflowConfig;
use crate::workflows::adoptions::{Pet, PetRegistration};
use crate::workflows::catalog::{CatalogService, Shelter, ShelterRegistration, UserId};
use crate::workflows::donations::{
    Campaign, CampaignDraft, DonationStatus, DonationSubmission, DonationVerificationManager,
};
use crate::workflows::notifications::{
    Notification, NotificationDraft, NotificationId, NotificationRepository,
};
use crate::workflows::reports::{ReportCondition, ReportSubmission};
use crate::workflows::store::{InMemoryRescueStore, RepositoryError, RescueState, RescueStore};
use crate::workflows::{RescueServices, TransitionPolicy};

pub(super) type MemoryServices = RescueServices<InMemoryRescueStore, InMemoryRescueStore>;

pub(super) fn services() -> MemoryServices {
    RescueServices::in_memory(&WorkflowConfig::default())
}

pub(super) fn strict_services() -> MemoryServices {
    RescueServices::in_memory(&WorkflowConfig {
        transition_policy: TransitionPolicy::Strict,
        ..WorkflowConfig::default()
    })
}

/// Workflow rows stay in memory while every notification write fails.
pub(super) fn services_without_notifications(
) -> RescueServices<InMemoryRescueStore, UnavailableNotifications> {
    RescueServices::new(
        Arc::new(InMemoryRescueStore::new()),
        Arc::new(UnavailableNotifications),
        &WorkflowConfig::default(),
    )
}

pub(super) fn user(name: &str) -> UserId {
    UserId(name.to_string())
}

pub(super) fn shelter<S>(catalog: &CatalogService<S>, capacity: u32, occupancy: u32) -> Shelter
where
    S: RescueStore + 'static,
{
    catalog
        .register_shelter(ShelterRegistration {
            name: "Rumah Kucing Bandung".to_string(),
            capacity,
            current_occupancy: occupancy,
        })
        .expect("shelter registers")
}

pub(super) fn pet<S>(catalog: &CatalogService<S>, shelter: &Shelter, name: &str) -> Pet
where
    S: RescueStore + 'static,
{
    catalog
        .register_pet(PetRegistration {
            shelter_id: shelter.id.clone(),
            name: name.to_string(),
        })
        .expect("pet registers")
}

pub(super) fn campaign<S>(catalog: &CatalogService<S>, shelter: &Shelter, target: Decimal) -> Campaign
where
    S: RescueStore + 'static,
{
    catalog
        .open_campaign(CampaignDraft {
            shelter_id: shelter.id.clone(),
            title: "Operasi Steril Massal".to_string(),
            target_amount: target,
            is_urgent: true,
        })
        .expect("campaign opens")
}

pub(super) fn report_submission(shelter: &Shelter, reporter: &str) -> ReportSubmission {
    ReportSubmission {
        user_id: user(reporter),
        shelter_id: shelter.id.clone(),
        condition: ReportCondition::Terluka,
        description: "Kaki belakang pincang, di dekat pasar".to_string(),
        image_ref: "uploads/reports/kucing-pasar.jpg".to_string(),
    }
}

pub(super) fn donation_submission(campaign: &Campaign, donor: &str, amount: Decimal) -> DonationSubmission {
    DonationSubmission {
        user_id: user(donor),
        campaign_id: campaign.id.clone(),
        amount,
        proof_ref: "uploads/proofs/transfer.png".to_string(),
    }
}

/// Brings a campaign's verified total up by `amount` through the regular donation path.
pub(super) fn fund<S, N>(
    donations: &DonationVerificationManager<S, N>,
    campaign: &Campaign,
    amount: Decimal,
) -> Campaign
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    let donation = donations
        .create_donation(donation_submission(campaign, "seed-donor", amount))
        .expect("seed donation recorded");
    donations
        .update_status(&donation.id, DonationStatus::Verified)
        .expect("seed donation verified")
        .campaign
}

pub(super) struct UnavailableNotifications;

impl NotificationRepository for UnavailableNotifications {
    fn insert(&self, _draft: NotificationDraft) -> Result<Notification, RepositoryError> {
        Err(RepositoryError::Unavailable(
            "notification table offline".to_string(),
        ))
    }

    fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<Notification>, RepositoryError> {
        Err(RepositoryError::Unavailable(
            "notification table offline".to_string(),
        ))
    }

    fn mark_read(&self, _id: &NotificationId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable(
            "notification table offline".to_string(),
        ))
    }

    fn mark_all_read(&self, _user_id: &UserId) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable(
            "notification table offline".to_string(),
        ))
    }

    fn delete(&self, _id: &NotificationId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable(
            "notification table offline".to_string(),
        ))
    }
}

pub(super) struct UnavailableStore;

impl RescueStore for UnavailableStore {
    fn read<T>(&self, _view: impl FnOnce(&RescueState) -> T) -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn transaction<T, E>(
        &self,
        _work: impl FnOnce(&mut RescueState) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<RepositoryError>,
    {
        Err(RepositoryError::Unavailable("database offline".to_string()).into())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
