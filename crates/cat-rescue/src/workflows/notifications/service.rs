use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{Notification, NotificationDraft, NotificationId, NotificationKind};
use super::repository::NotificationRepository;
use crate::workflows::catalog::UserId;
use crate::workflows::error::WorkflowError;

/// Creates notification rows and serves the read/unread/delete operations clients use.
pub struct NotificationDispatcher<N> {
    repository: Arc<N>,
}

/// A user's notifications together with the derived unread count.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationInbox {
    pub user_id: UserId,
    pub unread_count: usize,
    pub items: Vec<Notification>,
}

impl<N> NotificationDispatcher<N>
where
    N: NotificationRepository + 'static,
{
    pub fn new(repository: Arc<N>) -> Self {
        Self { repository }
    }

    pub fn notify(
        &self,
        user_id: &UserId,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Result<Notification, WorkflowError> {
        let draft = NotificationDraft::new(user_id.clone(), kind, title, message);
        Ok(self.repository.insert(draft)?)
    }

    /// Delivery used by the managers after their transaction committed. Failures are logged
    /// and swallowed so they never surface to the caller of the transition.
    pub(crate) fn notify_best_effort(&self, draft: NotificationDraft) -> Option<Notification> {
        let user_id = draft.user_id.0.clone();
        match self.repository.insert(draft) {
            Ok(notification) => {
                debug!(notification_id = %notification.id.0, %user_id, "notification stored");
                Some(notification)
            }
            Err(error) => {
                warn!(%error, %user_id, "notification dropped after committed transition");
                None
            }
        }
    }

    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, WorkflowError> {
        Ok(self.repository.list_for_user(user_id)?)
    }

    pub fn unread_count(&self, user_id: &UserId) -> Result<usize, WorkflowError> {
        let unread = self
            .repository
            .list_for_user(user_id)?
            .iter()
            .filter(|notification| !notification.is_read)
            .count();
        Ok(unread)
    }

    pub fn inbox(&self, user_id: &UserId) -> Result<NotificationInbox, WorkflowError> {
        let items = self.repository.list_for_user(user_id)?;
        let unread_count = items.iter().filter(|item| !item.is_read).count();
        Ok(NotificationInbox {
            user_id: user_id.clone(),
            unread_count,
            items,
        })
    }

    pub fn mark_read(&self, id: &NotificationId) -> Result<(), WorkflowError> {
        self.repository.mark_read(id)?;
        Ok(())
    }

    pub fn mark_all_read(&self, user_id: &UserId) -> Result<usize, WorkflowError> {
        Ok(self.repository.mark_all_read(user_id)?)
    }

    pub fn delete(&self, id: &NotificationId) -> Result<(), WorkflowError> {
        self.repository.delete(id)?;
        Ok(())
    }
}
