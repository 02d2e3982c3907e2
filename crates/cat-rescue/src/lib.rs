//! Workflow engine behind the community cat-rescue platform.
//!
//! Reports, donations, and adoption requests each move through their own state machine. Every
//! transition commits as one store transaction together with the aggregate it touches (shelter
//! occupancy, campaign totals, pet availability) and then fans out a best-effort notification.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
