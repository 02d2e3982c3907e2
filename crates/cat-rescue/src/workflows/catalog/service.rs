use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use super::domain::{Shelter, ShelterCorrection, ShelterId, ShelterRegistration};
use crate::workflows::adoptions::{Pet, PetId, PetRegistration, PetStatus};
use crate::workflows::donations::{Campaign, CampaignDraft, CampaignId, CampaignStatus};
use crate::workflows::error::WorkflowError;
use crate::workflows::store::RescueStore;

/// Administrative seeding and correction of shelters, pets, and campaigns.
pub struct CatalogService<S> {
    store: Arc<S>,
}

impl<S> CatalogService<S>
where
    S: RescueStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn register_shelter(
        &self,
        registration: ShelterRegistration,
    ) -> Result<Shelter, WorkflowError> {
        let name = registration.name.trim().to_string();
        if name.is_empty() {
            return Err(WorkflowError::Validation(
                "shelter name must not be empty".to_string(),
            ));
        }
        check_occupancy(registration.capacity, registration.current_occupancy)?;

        let shelter = self
            .store
            .transaction(|state| -> Result<Shelter, WorkflowError> {
                let shelter = Shelter {
                    id: ShelterId(state.next_id("shl")),
                    name,
                    capacity: registration.capacity,
                    current_occupancy: registration.current_occupancy,
                };
                state.shelters.insert(shelter.id.clone(), shelter.clone());
                Ok(shelter)
            })?;

        info!(shelter_id = %shelter.id.0, capacity = shelter.capacity, "shelter registered");
        Ok(shelter)
    }

    /// The only path that can lower occupancy; the corrected counters must stay consistent.
    pub fn correct_shelter(
        &self,
        shelter_id: &ShelterId,
        correction: ShelterCorrection,
    ) -> Result<Shelter, WorkflowError> {
        let shelter = self
            .store
            .transaction(|state| -> Result<Shelter, WorkflowError> {
                let shelter = state.shelter_mut(shelter_id)?;
                let capacity = correction.capacity.unwrap_or(shelter.capacity);
                let occupancy = correction
                    .current_occupancy
                    .unwrap_or(shelter.current_occupancy);
                check_occupancy(capacity, occupancy)?;

                shelter.capacity = capacity;
                shelter.current_occupancy = occupancy;
                Ok(shelter.clone())
            })?;

        info!(
            shelter_id = %shelter.id.0,
            capacity = shelter.capacity,
            occupancy = shelter.current_occupancy,
            "shelter counters corrected"
        );
        Ok(shelter)
    }

    pub fn register_pet(&self, registration: PetRegistration) -> Result<Pet, WorkflowError> {
        let name = registration.name.trim().to_string();
        if name.is_empty() {
            return Err(WorkflowError::Validation(
                "pet name must not be empty".to_string(),
            ));
        }

        let pet = self.store.transaction(|state| -> Result<Pet, WorkflowError> {
            if state.shelter(&registration.shelter_id).is_none() {
                return Err(WorkflowError::not_found(
                    "shelter",
                    registration.shelter_id.0.clone(),
                ));
            }
            let pet = Pet {
                id: PetId(state.next_id("pet")),
                shelter_id: registration.shelter_id.clone(),
                name,
                status: PetStatus::Available,
            };
            state.pets.insert(pet.id.clone(), pet.clone());
            Ok(pet)
        })?;

        info!(pet_id = %pet.id.0, shelter_id = %pet.shelter_id.0, "pet registered");
        Ok(pet)
    }

    /// Opens a campaign. A zero target is already met, so it opens as completed.
    pub fn open_campaign(&self, draft: CampaignDraft) -> Result<Campaign, WorkflowError> {
        if draft.target_amount < Decimal::ZERO {
            return Err(WorkflowError::Validation(format!(
                "campaign target must not be negative (got {})",
                draft.target_amount
            )));
        }
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(WorkflowError::Validation(
                "campaign title must not be empty".to_string(),
            ));
        }

        let campaign = self
            .store
            .transaction(|state| -> Result<Campaign, WorkflowError> {
                if state.shelter(&draft.shelter_id).is_none() {
                    return Err(WorkflowError::not_found(
                        "shelter",
                        draft.shelter_id.0.clone(),
                    ));
                }
                let status = if draft.target_amount <= Decimal::ZERO {
                    CampaignStatus::Completed
                } else {
                    CampaignStatus::Active
                };
                let campaign = Campaign {
                    id: CampaignId(state.next_id("cmp")),
                    shelter_id: draft.shelter_id.clone(),
                    title,
                    target_amount: draft.target_amount,
                    current_amount: Decimal::ZERO,
                    status,
                    is_urgent: draft.is_urgent,
                    created_at: Utc::now(),
                };
                state.campaigns.insert(campaign.id.clone(), campaign.clone());
                Ok(campaign)
            })?;

        info!(
            campaign_id = %campaign.id.0,
            target = %campaign.target_amount,
            urgent = campaign.is_urgent,
            "campaign opened"
        );
        Ok(campaign)
    }

    pub fn cancel_campaign(&self, campaign_id: &CampaignId) -> Result<Campaign, WorkflowError> {
        let campaign = self
            .store
            .transaction(|state| -> Result<Campaign, WorkflowError> {
                let campaign = state.campaign_mut(campaign_id)?;
                if campaign.status != CampaignStatus::Active {
                    return Err(WorkflowError::InvalidState(format!(
                        "campaign {} is {} and cannot be cancelled",
                        campaign.id.0,
                        campaign.status.label()
                    )));
                }
                campaign.status = CampaignStatus::Cancelled;
                Ok(campaign.clone())
            })?;

        info!(campaign_id = %campaign.id.0, "campaign cancelled");
        Ok(campaign)
    }

    pub fn shelter(&self, shelter_id: &ShelterId) -> Result<Shelter, WorkflowError> {
        self.store
            .read(|state| state.shelter(shelter_id).cloned())?
            .ok_or_else(|| WorkflowError::not_found("shelter", shelter_id.0.clone()))
    }

    pub fn pet(&self, pet_id: &PetId) -> Result<Pet, WorkflowError> {
        self.store
            .read(|state| state.pet(pet_id).cloned())?
            .ok_or_else(|| WorkflowError::not_found("pet", pet_id.0.clone()))
    }

    pub fn campaign(&self, campaign_id: &CampaignId) -> Result<Campaign, WorkflowError> {
        self.store
            .read(|state| state.campaign(campaign_id).cloned())?
            .ok_or_else(|| WorkflowError::not_found("campaign", campaign_id.0.clone()))
    }

    pub fn campaigns_for_shelter(
        &self,
        shelter_id: &ShelterId,
    ) -> Result<Vec<Campaign>, WorkflowError> {
        let campaigns: Vec<Campaign> = self.store.read(|state| {
            state
                .campaigns
                .values()
                .filter(|campaign| &campaign.shelter_id == shelter_id)
                .cloned()
                .collect()
        })?;
        Ok(campaigns)
    }
}

fn check_occupancy(capacity: u32, occupancy: u32) -> Result<(), WorkflowError> {
    if occupancy > capacity {
        return Err(WorkflowError::Validation(format!(
            "occupancy {occupancy} exceeds capacity {capacity}"
        )));
    }
    Ok(())
}
