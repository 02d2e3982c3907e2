use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::NotificationId;
use super::repository::NotificationRepository;
use super::service::NotificationDispatcher;
use crate::workflows::catalog::UserId;

pub(crate) struct NotificationRoutes<N> {
    dispatcher: Arc<NotificationDispatcher<N>>,
    poll_interval: Duration,
}

/// Router builder exposing the client inbox. The poll interval is advertised so clients
/// schedule their re-fetch consistently.
pub fn notification_router<N>(
    dispatcher: Arc<NotificationDispatcher<N>>,
    poll_interval: Duration,
) -> Router
where
    N: NotificationRepository + 'static,
{
    let routes = Arc::new(NotificationRoutes {
        dispatcher,
        poll_interval,
    });

    Router::new()
        .route(
            "/api/v1/users/:user_id/notifications",
            get(inbox_handler::<N>),
        )
        .route(
            "/api/v1/users/:user_id/notifications/read",
            post(mark_all_read_handler::<N>),
        )
        .route(
            "/api/v1/notifications/:notification_id/read",
            post(mark_read_handler::<N>),
        )
        .route(
            "/api/v1/notifications/:notification_id",
            delete(delete_handler::<N>),
        )
        .with_state(routes)
}

pub(crate) async fn inbox_handler<N>(
    State(routes): State<Arc<NotificationRoutes<N>>>,
    Path(user_id): Path<String>,
) -> Response
where
    N: NotificationRepository + 'static,
{
    match routes.dispatcher.inbox(&UserId(user_id)) {
        Ok(inbox) => {
            let payload = json!({
                "user_id": inbox.user_id,
                "unread_count": inbox.unread_count,
                "poll_interval_secs": routes.poll_interval.as_secs(),
                "items": inbox.items,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn mark_all_read_handler<N>(
    State(routes): State<Arc<NotificationRoutes<N>>>,
    Path(user_id): Path<String>,
) -> Response
where
    N: NotificationRepository + 'static,
{
    let user_id = UserId(user_id);
    let updated = match routes.dispatcher.mark_all_read(&user_id) {
        Ok(updated) => updated,
        Err(error) => return error.into_response(),
    };

    match routes.dispatcher.unread_count(&user_id) {
        Ok(unread_count) => {
            let payload = json!({ "updated": updated, "unread_count": unread_count });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn mark_read_handler<N>(
    State(routes): State<Arc<NotificationRoutes<N>>>,
    Path(notification_id): Path<String>,
) -> Response
where
    N: NotificationRepository + 'static,
{
    match routes
        .dispatcher
        .mark_read(&NotificationId(notification_id))
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn delete_handler<N>(
    State(routes): State<Arc<NotificationRoutes<N>>>,
    Path(notification_id): Path<String>,
) -> Response
where
    N: NotificationRepository + 'static,
{
    match routes.dispatcher.delete(&NotificationId(notification_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}
