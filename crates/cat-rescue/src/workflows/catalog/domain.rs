use serde::{Deserialize, Serialize};

/// Authenticated user identifier supplied by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShelterId(pub String);

/// A shelter and its physical intake counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelter {
    pub id: ShelterId,
    pub name: String,
    pub capacity: u32,
    pub current_occupancy: u32,
}

impl Shelter {
    /// Derived flag: there is still room for another intake.
    pub fn is_available(&self) -> bool {
        self.current_occupancy < self.capacity
    }

    pub fn is_over_capacity(&self) -> bool {
        self.current_occupancy > self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelterRegistration {
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub current_occupancy: u32,
}

/// Administrative correction of shelter counters. Omitted fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelterCorrection {
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub current_occupancy: Option<u32>,
}
