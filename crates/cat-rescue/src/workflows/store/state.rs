use std::collections::BTreeMap;

use crate::workflows::adoptions::{AdoptionRequest, AdoptionRequestId, Pet, PetId};
use crate::workflows::catalog::{Shelter, ShelterId};
use crate::workflows::donations::{Campaign, CampaignId, Donation, DonationId};
use crate::workflows::error::WorkflowError;
use crate::workflows::reports::{Report, ReportId};

/// Row state held by a store. Ids are allocated from one sequence so they sort by creation.
#[derive(Debug, Clone, Default)]
pub struct RescueState {
    sequence: u64,
    pub(crate) shelters: BTreeMap<ShelterId, Shelter>,
    pub(crate) pets: BTreeMap<PetId, Pet>,
    pub(crate) reports: BTreeMap<ReportId, Report>,
    pub(crate) campaigns: BTreeMap<CampaignId, Campaign>,
    pub(crate) donations: BTreeMap<DonationId, Donation>,
    pub(crate) adoptions: BTreeMap<AdoptionRequestId, AdoptionRequest>,
}

/// Digits of `u64::MAX`; padding to this width keeps string ids in sequence order.
const ID_WIDTH: usize = 20;

impl RescueState {
    pub(crate) fn next_id(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        format!("{prefix}-{:0width$}", self.sequence, width = ID_WIDTH)
    }

    #[cfg(test)]
    pub(crate) fn advance_sequence_to(&mut self, value: u64) {
        self.sequence = value;
    }

    pub fn shelter(&self, id: &ShelterId) -> Option<&Shelter> {
        self.shelters.get(id)
    }

    pub fn pet(&self, id: &PetId) -> Option<&Pet> {
        self.pets.get(id)
    }

    pub fn report(&self, id: &ReportId) -> Option<&Report> {
        self.reports.get(id)
    }

    pub fn campaign(&self, id: &CampaignId) -> Option<&Campaign> {
        self.campaigns.get(id)
    }

    pub fn donation(&self, id: &DonationId) -> Option<&Donation> {
        self.donations.get(id)
    }

    pub fn adoption(&self, id: &AdoptionRequestId) -> Option<&AdoptionRequest> {
        self.adoptions.get(id)
    }

    pub(crate) fn shelter_mut(&mut self, id: &ShelterId) -> Result<&mut Shelter, WorkflowError> {
        self.shelters
            .get_mut(id)
            .ok_or_else(|| WorkflowError::not_found("shelter", id.0.clone()))
    }

    pub(crate) fn pet_mut(&mut self, id: &PetId) -> Result<&mut Pet, WorkflowError> {
        self.pets
            .get_mut(id)
            .ok_or_else(|| WorkflowError::not_found("pet", id.0.clone()))
    }

    pub(crate) fn report_mut(&mut self, id: &ReportId) -> Result<&mut Report, WorkflowError> {
        self.reports
            .get_mut(id)
            .ok_or_else(|| WorkflowError::not_found("report", id.0.clone()))
    }

    pub(crate) fn campaign_mut(
        &mut self,
        id: &CampaignId,
    ) -> Result<&mut Campaign, WorkflowError> {
        self.campaigns
            .get_mut(id)
            .ok_or_else(|| WorkflowError::not_found("campaign", id.0.clone()))
    }

    pub(crate) fn donation_mut(
        &mut self,
        id: &DonationId,
    ) -> Result<&mut Donation, WorkflowError> {
        self.donations
            .get_mut(id)
            .ok_or_else(|| WorkflowError::not_found("donation", id.0.clone()))
    }

    pub(crate) fn adoption_mut(
        &mut self,
        id: &AdoptionRequestId,
    ) -> Result<&mut AdoptionRequest, WorkflowError> {
        self.adoptions
            .get_mut(id)
            .ok_or_else(|| WorkflowError::not_found("adoption request", id.0.clone()))
    }
}
