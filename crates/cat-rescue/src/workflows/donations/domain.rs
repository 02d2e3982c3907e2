use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflows::catalog::{ShelterId, UserId};
use crate::workflows::error::WorkflowError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonationId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Completed,
    Cancelled,
}

impl CampaignStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Completed => "COMPLETED",
            CampaignStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Fundraising goal for a shelter. `is_urgent` is a display flag, not a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub shelter_id: ShelterId,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub status: CampaignStatus,
    pub is_urgent: bool,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn is_funded(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Verified total after adding `amount`, or `None` when it no longer fits a `Decimal`.
    pub fn total_after(&self, amount: Decimal) -> Option<Decimal> {
        self.current_amount.checked_add(amount)
    }

    /// Adds a verified contribution and completes the campaign once the target is met.
    pub(crate) fn record_contribution(&mut self, amount: Decimal) -> Result<(), WorkflowError> {
        self.current_amount = self.total_after(amount).ok_or_else(|| {
            WorkflowError::InvalidState(format!(
                "campaign {} total {} cannot absorb a further {amount}",
                self.id.0, self.current_amount
            ))
        })?;
        if self.status == CampaignStatus::Active && self.is_funded() {
            self.status = CampaignStatus::Completed;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub shelter_id: ShelterId,
    pub title: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub is_urgent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    Pending,
    Verified,
    Rejected,
}

impl DonationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DonationStatus::Pending => "PENDING",
            DonationStatus::Verified => "VERIFIED",
            DonationStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: DonationId,
    pub user_id: UserId,
    pub campaign_id: CampaignId,
    pub amount: Decimal,
    pub proof_ref: String,
    pub status: DonationStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationSubmission {
    pub user_id: UserId,
    pub campaign_id: CampaignId,
    pub amount: Decimal,
    pub proof_ref: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationReview {
    pub status: DonationStatus,
}

/// Result of a verification decision: the donation and the campaign as committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationTransition {
    pub donation: Donation,
    pub campaign: Campaign,
}
