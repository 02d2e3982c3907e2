use super::domain::{Notification, NotificationDraft, NotificationId};
use crate::workflows::catalog::UserId;
use crate::workflows::store::RepositoryError;

/// Storage abstraction for notification rows so delivery can fail independently of the
/// transition that triggered it.
pub trait NotificationRepository: Send + Sync {
    fn insert(&self, draft: NotificationDraft) -> Result<Notification, RepositoryError>;
    /// Newest first.
    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, RepositoryError>;
    /// Returns whether the row changed; unknown ids are not an error.
    fn mark_read(&self, id: &NotificationId) -> Result<bool, RepositoryError>;
    /// Returns the number of rows flipped to read.
    fn mark_all_read(&self, user_id: &UserId) -> Result<usize, RepositoryError>;
    fn delete(&self, id: &NotificationId) -> Result<bool, RepositoryError>;
}
