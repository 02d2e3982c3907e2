//! Report, donation, and adoption lifecycles plus their notification fan-out.
//!
//! Each manager validates input up front, performs the multi-row mutation inside a single
//! [`store::RescueStore::transaction`], and only then dispatches notifications. A failed
//! notification is logged and never undoes the committed transition.

pub mod adoptions;
pub mod catalog;
pub mod donations;
mod error;
pub mod notifications;
mod policy;
pub mod reports;
mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, WorkflowError};
pub use policy::TransitionPolicy;
pub use router::{rescue_router, RescueServices};
