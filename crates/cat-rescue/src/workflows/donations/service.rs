use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use super::domain::{
    CampaignId, CampaignStatus, Donation, DonationId, DonationStatus, DonationSubmission,
    DonationTransition,
};
use crate::workflows::error::WorkflowError;
use crate::workflows::notifications::{
    NotificationDispatcher, NotificationDraft, NotificationKind, NotificationRepository,
};
use crate::workflows::store::RescueStore;

/// Owns donation state and the verified totals of each campaign.
///
/// A donation contributes to its campaign exactly once, on the PENDING to VERIFIED edge. The
/// status check and the campaign increment share one transaction, so of two concurrent
/// verifications only one can observe PENDING.
pub struct DonationVerificationManager<S, N> {
    store: Arc<S>,
    notifications: Arc<NotificationDispatcher<N>>,
}

impl<S, N> DonationVerificationManager<S, N>
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    pub fn new(store: Arc<S>, notifications: Arc<NotificationDispatcher<N>>) -> Self {
        Self {
            store,
            notifications,
        }
    }

    /// Records a pending donation. Campaign totals are untouched until verification.
    pub fn create_donation(
        &self,
        submission: DonationSubmission,
    ) -> Result<Donation, WorkflowError> {
        if submission.user_id.is_blank() {
            return Err(WorkflowError::Validation(
                "donor id must not be empty".to_string(),
            ));
        }
        if submission.amount <= Decimal::ZERO {
            return Err(WorkflowError::Validation(format!(
                "donation amount must be positive (got {})",
                submission.amount
            )));
        }
        if submission.proof_ref.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "a transfer proof reference is required".to_string(),
            ));
        }

        let (donation, campaign_title) =
            self.store.transaction(|state| -> Result<_, WorkflowError> {
                let campaign = state.campaign(&submission.campaign_id).ok_or_else(|| {
                    WorkflowError::not_found("campaign", submission.campaign_id.0.clone())
                })?;
                if campaign.status == CampaignStatus::Cancelled {
                    return Err(WorkflowError::InvalidState(format!(
                        "campaign {} is cancelled and no longer accepts donations",
                        campaign.id.0
                    )));
                }
                if campaign.total_after(submission.amount).is_none() {
                    return Err(WorkflowError::Validation(format!(
                        "donation amount {} exceeds what campaign {} can still record",
                        submission.amount, campaign.id.0
                    )));
                }
                let title = campaign.title.clone();

                let donation = Donation {
                    id: DonationId(state.next_id("don")),
                    user_id: submission.user_id,
                    campaign_id: submission.campaign_id,
                    amount: submission.amount,
                    proof_ref: submission.proof_ref.trim().to_string(),
                    status: DonationStatus::Pending,
                    created_at: Utc::now(),
                    verified_at: None,
                };
                state.donations.insert(donation.id.clone(), donation.clone());
                Ok((donation, title))
            })?;

        info!(
            donation_id = %donation.id.0,
            campaign_id = %donation.campaign_id.0,
            amount = %donation.amount,
            "donation recorded"
        );

        self.notifications.notify_best_effort(NotificationDraft::new(
            donation.user_id.clone(),
            NotificationKind::Donation,
            "Donasi Diterima",
            format!(
                "Donasi Rp{} untuk kampanye {} sedang menunggu verifikasi.",
                donation.amount, campaign_title
            ),
        ));

        Ok(donation)
    }

    /// Verifies or rejects a pending donation.
    ///
    /// Verifying twice is a conflict. A verified donation cannot be rejected afterwards, as
    /// its amount is already part of the campaign total; rejected donations are final.
    pub fn update_status(
        &self,
        donation_id: &DonationId,
        next: DonationStatus,
    ) -> Result<DonationTransition, WorkflowError> {
        let transition = self
            .store
            .transaction(|state| -> Result<DonationTransition, WorkflowError> {
                let donation = state
                    .donation(donation_id)
                    .cloned()
                    .ok_or_else(|| WorkflowError::not_found("donation", donation_id.0.clone()))?;

                match (donation.status, next) {
                    (DonationStatus::Verified, DonationStatus::Verified) => {
                        return Err(WorkflowError::Conflict(format!(
                            "donation {} has already been verified",
                            donation.id.0
                        )));
                    }
                    (DonationStatus::Pending, DonationStatus::Verified) => {
                        let campaign = state.campaign_mut(&donation.campaign_id)?;
                        if campaign.status == CampaignStatus::Cancelled {
                            return Err(WorkflowError::InvalidState(format!(
                                "campaign {} is cancelled; donation {} cannot be counted",
                                campaign.id.0, donation.id.0
                            )));
                        }
                        campaign.record_contribution(donation.amount)?;
                    }
                    (DonationStatus::Pending, DonationStatus::Rejected) => {}
                    (current, requested) => {
                        return Err(WorkflowError::InvalidState(format!(
                            "donation {} cannot move from {} to {}",
                            donation.id.0,
                            current.label(),
                            requested.label()
                        )));
                    }
                }

                let stored = state.donation_mut(donation_id)?;
                stored.status = next;
                if next == DonationStatus::Verified {
                    stored.verified_at = Some(Utc::now());
                }
                let donation = stored.clone();
                let campaign = state
                    .campaign(&donation.campaign_id)
                    .cloned()
                    .ok_or_else(|| {
                        WorkflowError::not_found("campaign", donation.campaign_id.0.clone())
                    })?;

                Ok(DonationTransition { donation, campaign })
            })?;

        let DonationTransition { donation, campaign } = &transition;
        info!(
            donation_id = %donation.id.0,
            status = donation.status.label(),
            campaign_id = %campaign.id.0,
            campaign_total = %campaign.current_amount,
            campaign_status = campaign.status.label(),
            "donation reviewed"
        );

        let draft = match donation.status {
            DonationStatus::Verified => NotificationDraft::new(
                donation.user_id.clone(),
                NotificationKind::Donation,
                "Donasi Terverifikasi",
                format!(
                    "Terima kasih! Donasi Rp{} untuk kampanye {} telah diverifikasi.",
                    donation.amount, campaign.title
                ),
            ),
            _ => NotificationDraft::new(
                donation.user_id.clone(),
                NotificationKind::Donation,
                "Donasi Ditolak",
                format!(
                    "Bukti transfer donasi Rp{} untuk kampanye {} tidak dapat diverifikasi.",
                    donation.amount, campaign.title
                ),
            ),
        };
        self.notifications.notify_best_effort(draft);

        Ok(transition)
    }

    pub fn get(&self, donation_id: &DonationId) -> Result<Donation, WorkflowError> {
        self.store
            .read(|state| state.donation(donation_id).cloned())?
            .ok_or_else(|| WorkflowError::not_found("donation", donation_id.0.clone()))
    }

    pub fn list_for_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<Donation>, WorkflowError> {
        let donations: Vec<Donation> = self.store.read(|state| {
            state
                .donations
                .values()
                .filter(|donation| &donation.campaign_id == campaign_id)
                .cloned()
                .collect()
        })?;
        Ok(donations)
    }
}
