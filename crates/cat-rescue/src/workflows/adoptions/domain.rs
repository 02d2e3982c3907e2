use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::catalog::{ShelterId, UserId};
use crate::workflows::policy::Lifecycle;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdoptionRequestId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PetStatus {
    Available,
    Pending,
    Adopted,
}

impl PetStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PetStatus::Available => "AVAILABLE",
            PetStatus::Pending => "PENDING",
            PetStatus::Adopted => "ADOPTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub shelter_id: ShelterId,
    pub name: String,
    pub status: PetStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRegistration {
    pub shelter_id: ShelterId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdoptionStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl AdoptionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AdoptionStatus::Pending => "PENDING",
            AdoptionStatus::Approved => "APPROVED",
            AdoptionStatus::Rejected => "REJECTED",
            AdoptionStatus::Completed => "COMPLETED",
            AdoptionStatus::Cancelled => "CANCELLED",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            AdoptionStatus::Rejected | AdoptionStatus::Completed | AdoptionStatus::Cancelled
        )
    }
}

impl Lifecycle for AdoptionStatus {
    fn is_terminal(self) -> bool {
        AdoptionStatus::is_terminal(self)
    }

    fn allows(self, next: Self) -> bool {
        use AdoptionStatus::*;
        matches!(
            (self, next),
            (Pending, Approved | Rejected | Cancelled) | (Approved, Completed | Cancelled)
        )
    }

    fn status_label(self) -> &'static str {
        self.label()
    }
}

/// Adoption form as filled in by the prospective adopter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionApplication {
    pub user_id: UserId,
    pub pet_id: PetId,
    pub reason: String,
    pub contact: String,
    #[serde(default)]
    pub has_yard: bool,
    #[serde(default)]
    pub has_other_pets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionRequest {
    pub id: AdoptionRequestId,
    pub user_id: UserId,
    pub pet_id: PetId,
    pub reason: String,
    pub contact: String,
    pub has_yard: bool,
    pub has_other_pets: bool,
    pub status: AdoptionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionDecision {
    pub status: AdoptionStatus,
    #[serde(default)]
    pub admin_note: Option<String>,
}

impl AdoptionDecision {
    pub fn to(status: AdoptionStatus) -> Self {
        Self {
            status,
            admin_note: None,
        }
    }
}

/// Committed result of an adoption status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionOutcome {
    pub request: AdoptionRequest,
    pub pet: Pet,
    /// Competing requests closed because the pet found a home.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub superseded: Vec<AdoptionRequest>,
}
