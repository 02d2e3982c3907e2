use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::{RepositoryError, RescueState, RescueStore};
use crate::workflows::catalog::UserId;
use crate::workflows::notifications::{
    Notification, NotificationDraft, NotificationId, NotificationRepository,
};

/// Mutex-guarded store used by the service binary, the demo, and tests.
///
/// A transaction works on a copy of the workflow rows and swaps it in only on success, so a
/// failed closure rolls back every row it touched, including id allocations. Notifications are
/// written after commit and live outside the copied rows.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRescueStore {
    state: Arc<Mutex<RescueState>>,
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryRescueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed state is only replaced after a closure succeeds, so a guard poisoned by a
    /// panicking closure still holds the last committed rows.
    fn lock(&self) -> MutexGuard<'_, RescueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Chronological; readers reverse for newest-first.
    fn notification_log(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl RescueStore for InMemoryRescueStore {
    fn read<T>(&self, view: impl FnOnce(&RescueState) -> T) -> Result<T, RepositoryError> {
        let guard = self.lock();
        Ok(view(&guard))
    }

    fn transaction<T, E>(
        &self,
        work: impl FnOnce(&mut RescueState) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<RepositoryError>,
    {
        let mut guard = self.lock();
        let mut working = guard.clone();
        let outcome = work(&mut working)?;
        *guard = working;
        Ok(outcome)
    }
}

impl NotificationRepository for InMemoryRescueStore {
    fn insert(&self, draft: NotificationDraft) -> Result<Notification, RepositoryError> {
        let mut state = self.lock();
        let notification = Notification {
            id: NotificationId(state.next_id("ntf")),
            user_id: draft.user_id,
            title: draft.title,
            message: draft.message,
            kind: draft.kind,
            is_read: false,
            created_at: Utc::now(),
        };
        // Pushed while the sequence is held so the log stays in id order.
        self.notification_log().push(notification.clone());
        Ok(notification)
    }

    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, RepositoryError> {
        let log = self.notification_log();
        Ok(log
            .iter()
            .rev()
            .filter(|notification| &notification.user_id == user_id)
            .cloned()
            .collect())
    }

    fn mark_read(&self, id: &NotificationId) -> Result<bool, RepositoryError> {
        let mut log = self.notification_log();
        let changed = log
            .iter_mut()
            .find(|notification| &notification.id == id)
            .map(|notification| !std::mem::replace(&mut notification.is_read, true))
            .unwrap_or(false);
        Ok(changed)
    }

    fn mark_all_read(&self, user_id: &UserId) -> Result<usize, RepositoryError> {
        let mut log = self.notification_log();
        let mut updated = 0;
        for notification in log
            .iter_mut()
            .filter(|notification| &notification.user_id == user_id && !notification.is_read)
        {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    fn delete(&self, id: &NotificationId) -> Result<bool, RepositoryError> {
        let mut log = self.notification_log();
        let before = log.len();
        log.retain(|notification| &notification.id != id);
        Ok(log.len() != before)
    }
}
