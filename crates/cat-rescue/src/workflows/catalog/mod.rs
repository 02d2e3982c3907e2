//! Shelters, pets, and campaigns: the records the workflows act upon.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{Shelter, ShelterCorrection, ShelterId, ShelterRegistration, UserId};
pub use router::catalog_router;
pub use service::CatalogService;
