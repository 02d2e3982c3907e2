//! Notification records created as side effects of workflow transitions.

pub mod domain;
pub mod poller;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Notification, NotificationDraft, NotificationId, NotificationKind};
pub use poller::NotificationPoller;
pub use repository::NotificationRepository;
pub use router::notification_router;
pub use service::{NotificationDispatcher, NotificationInbox};
