use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::config::WorkflowConfig;
use crate::workflows::notifications::{
    NotificationDispatcher, NotificationId, NotificationKind, NotificationPoller,
};
use crate::workflows::store::{InMemoryRescueStore, RescueStore};
use crate::workflows::{ErrorKind, RescueServices, WorkflowError};

#[test]
fn inbox_lists_newest_first_with_unread_count() {
    let services = services();
    let owner = user("warga-1");
    for title in ["Pertama", "Kedua", "Ketiga"] {
        services
            .notifications
            .notify(&owner, title, "isi pesan", NotificationKind::System)
            .expect("stored");
    }
    services
        .notifications
        .notify(&user("warga-2"), "Lain", "isi pesan", NotificationKind::System)
        .expect("stored");

    let inbox = services.notifications.inbox(&owner).expect("inbox");

    assert_eq!(inbox.unread_count, 3);
    let titles: Vec<_> = inbox.items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["Ketiga", "Kedua", "Pertama"]);
}

#[test]
fn mark_read_and_delete_are_idempotent() {
    let services = services();
    let owner = user("warga-1");
    let first = services
        .notifications
        .notify(&owner, "Pertama", "isi", NotificationKind::Report)
        .expect("stored");
    services
        .notifications
        .notify(&owner, "Kedua", "isi", NotificationKind::Report)
        .expect("stored");

    services.notifications.mark_read(&first.id).expect("mark");
    services.notifications.mark_read(&first.id).expect("mark again");
    assert_eq!(services.notifications.unread_count(&owner).expect("count"), 1);

    services.notifications.delete(&first.id).expect("delete");
    services.notifications.delete(&first.id).expect("delete again");
    services
        .notifications
        .mark_read(&NotificationId("ntf-404".to_string()))
        .expect("unknown id is a no-op");
    assert_eq!(
        services
            .notifications
            .list_for_user(&owner)
            .expect("list")
            .len(),
        1
    );
}

#[test]
fn mark_all_read_twice_leaves_nothing_unread() {
    let services = services();
    let owner = user("warga-1");
    for title in ["Pertama", "Kedua"] {
        services
            .notifications
            .notify(&owner, title, "isi", NotificationKind::Donation)
            .expect("stored");
    }

    assert_eq!(services.notifications.mark_all_read(&owner).expect("mark"), 2);
    assert_eq!(services.notifications.unread_count(&owner).expect("count"), 0);
    assert_eq!(services.notifications.mark_all_read(&owner).expect("mark"), 0);
    assert_eq!(services.notifications.unread_count(&owner).expect("count"), 0);
}

#[test]
fn explicit_notify_reports_repository_failures() {
    let dispatcher = NotificationDispatcher::new(Arc::new(UnavailableNotifications));

    let error = dispatcher
        .notify(&user("warga-1"), "Halo", "isi", NotificationKind::System)
        .expect_err("repository offline");

    assert_eq!(error.kind(), ErrorKind::Unavailable);
}

#[test]
fn poller_surfaces_only_newer_unread_items() {
    let services = services();
    let owner = user("warga-1");
    let mut poller = NotificationPoller::new(services.notifications.clone(), owner.clone());

    assert_eq!(poller.poll_once().expect("poll"), None);

    let first = services
        .notifications
        .notify(&owner, "Pertama", "isi", NotificationKind::Report)
        .expect("stored");
    assert_eq!(poller.poll_once().expect("poll"), Some(first.clone()));
    assert_eq!(poller.poll_once().expect("poll"), None);
    assert_eq!(poller.last_seen(), Some(&first.id));

    let second = services
        .notifications
        .notify(&owner, "Kedua", "isi", NotificationKind::Report)
        .expect("stored");
    services.notifications.mark_read(&second.id).expect("read");
    assert_eq!(
        poller.poll_once().expect("poll"),
        None,
        "read items and older unread items are not surfaced again"
    );

    let third = services
        .notifications
        .notify(&owner, "Ketiga", "isi", NotificationKind::Report)
        .expect("stored");
    assert_eq!(poller.poll_once().expect("poll"), Some(third));
}

#[test]
fn poller_keeps_surfacing_items_past_a_million_ids() {
    let store = Arc::new(InMemoryRescueStore::new());
    store
        .transaction(|state| -> Result<(), WorkflowError> {
            state.advance_sequence_to(999_997);
            Ok(())
        })
        .expect("sequence advanced");
    let services = RescueServices::new(store.clone(), store, &WorkflowConfig::default());
    let owner = user("warga-1");
    let mut poller = NotificationPoller::new(services.notifications.clone(), owner.clone());

    for title in ["Pertama", "Kedua", "Ketiga"] {
        let sent = services
            .notifications
            .notify(&owner, title, "isi", NotificationKind::Report)
            .expect("stored");
        assert_eq!(poller.poll_once().expect("poll"), Some(sent), "{title}");
    }

    let inbox = services.notifications.inbox(&owner).expect("inbox");
    assert_eq!(inbox.items[0].title, "Ketiga");
}

#[tokio::test]
async fn poller_run_stops_when_callback_breaks() {
    let services = services();
    let owner = user("warga-1");
    let expected = services
        .notifications
        .notify(&owner, "Laporan Dibuat", "isi", NotificationKind::Report)
        .expect("stored");

    let poller = NotificationPoller::new(services.notifications.clone(), owner);
    let mut seen = Vec::new();
    poller
        .run(Duration::from_secs(10), |notification| {
            seen.push(notification);
            ControlFlow::Break(())
        })
        .await;

    assert_eq!(seen, vec![expected]);
}
