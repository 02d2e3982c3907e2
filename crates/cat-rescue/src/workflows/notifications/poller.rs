use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::domain::{Notification, NotificationId};
use super::repository::NotificationRepository;
use super::service::NotificationDispatcher;
use crate::workflows::catalog::UserId;
use crate::workflows::error::WorkflowError;

/// Pull-based client channel: re-fetches unread notifications and surfaces the freshest one
/// only when it is newer than anything already shown.
pub struct NotificationPoller<N> {
    dispatcher: Arc<NotificationDispatcher<N>>,
    user_id: UserId,
    last_seen: Option<NotificationId>,
}

impl<N> NotificationPoller<N>
where
    N: NotificationRepository + 'static,
{
    pub fn new(dispatcher: Arc<NotificationDispatcher<N>>, user_id: UserId) -> Self {
        Self {
            dispatcher,
            user_id,
            last_seen: None,
        }
    }

    pub fn last_seen(&self) -> Option<&NotificationId> {
        self.last_seen.as_ref()
    }

    /// Ids sort by creation, so anything at or below the watermark was already shown.
    pub fn poll_once(&mut self) -> Result<Option<Notification>, WorkflowError> {
        let freshest = self
            .dispatcher
            .list_for_user(&self.user_id)?
            .into_iter()
            .find(|notification| !notification.is_read);

        match freshest {
            Some(notification)
                if self
                    .last_seen
                    .as_ref()
                    .map_or(true, |seen| notification.id > *seen) =>
            {
                self.last_seen = Some(notification.id.clone());
                Ok(Some(notification))
            }
            _ => Ok(None),
        }
    }

    /// Polls on a fixed period until `on_new` breaks. Fetch errors are logged and retried on
    /// the next tick.
    pub async fn run<F>(mut self, period: Duration, mut on_new: F)
    where
        F: FnMut(Notification) -> ControlFlow<()>,
    {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match self.poll_once() {
                Ok(Some(notification)) => {
                    if on_new(notification).is_break() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(%error, user_id = %self.user_id.0, "notification poll failed");
                }
            }
        }
    }
}
