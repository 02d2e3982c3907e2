//! Persistence seam for the workflow engine.
//!
//! Managers never mutate state outside [`RescueStore::transaction`]; a closure that returns
//! `Err` leaves no trace in the store.

mod memory;
mod state;

pub use memory::InMemoryRescueStore;
pub use state::RescueState;

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Transactional access to shelters, pets, reports, campaigns, donations, and adoptions.
///
/// Implementations must serialize transactions: two concurrent closures never observe each
/// other's uncommitted writes, and a read-check-write inside one closure is atomic.
pub trait RescueStore: Send + Sync {
    fn read<T>(&self, view: impl FnOnce(&RescueState) -> T) -> Result<T, RepositoryError>;

    fn transaction<T, E>(
        &self,
        work: impl FnOnce(&mut RescueState) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<RepositoryError>;
}
