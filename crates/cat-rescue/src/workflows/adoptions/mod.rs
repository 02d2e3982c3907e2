//! Adoption requests and the pet availability they control.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    AdoptionApplication, AdoptionDecision, AdoptionOutcome, AdoptionRequest, AdoptionRequestId,
    AdoptionStatus, Pet, PetId, PetRegistration, PetStatus,
};
pub use router::adoption_router;
pub use service::AdoptionRequestManager;
