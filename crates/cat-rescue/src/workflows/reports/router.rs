use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::domain::{ReportId, ReportSubmission, StatusChange, TimelineNote};
use super::service::ReportLifecycleManager;
use crate::workflows::catalog::UserId;
use crate::workflows::notifications::NotificationRepository;
use crate::workflows::store::RescueStore;

/// Router builder exposing report intake, status changes, and timeline notes.
pub fn report_router<S, N>(manager: Arc<ReportLifecycleManager<S, N>>) -> Router
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    Router::new()
        .route("/api/v1/reports", post(create_handler::<S, N>))
        .route("/api/v1/reports/:report_id", get(fetch_handler::<S, N>))
        .route(
            "/api/v1/reports/:report_id/status",
            post(status_handler::<S, N>),
        )
        .route(
            "/api/v1/reports/:report_id/timeline",
            get(timeline_handler::<S, N>).post(append_handler::<S, N>),
        )
        .route(
            "/api/v1/users/:user_id/reports",
            get(user_reports_handler::<S, N>),
        )
        .with_state(manager)
}

pub(crate) async fn create_handler<S, N>(
    State(manager): State<Arc<ReportLifecycleManager<S, N>>>,
    Json(submission): Json<ReportSubmission>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.create_report(submission) {
        Ok(report) => (StatusCode::CREATED, Json(report)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn fetch_handler<S, N>(
    State(manager): State<Arc<ReportLifecycleManager<S, N>>>,
    Path(report_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.get(&ReportId(report_id)) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn status_handler<S, N>(
    State(manager): State<Arc<ReportLifecycleManager<S, N>>>,
    Path(report_id): Path<String>,
    Json(change): Json<StatusChange>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.advance_status(&ReportId(report_id), change) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn timeline_handler<S, N>(
    State(manager): State<Arc<ReportLifecycleManager<S, N>>>,
    Path(report_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.timeline(&ReportId(report_id)) {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn append_handler<S, N>(
    State(manager): State<Arc<ReportLifecycleManager<S, N>>>,
    Path(report_id): Path<String>,
    Json(note): Json<TimelineNote>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.append_timeline_entry(&ReportId(report_id), note) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn user_reports_handler<S, N>(
    State(manager): State<Arc<ReportLifecycleManager<S, N>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.list_for_user(&UserId(user_id)) {
        Ok(reports) => (StatusCode::OK, Json(reports)).into_response(),
        Err(error) => error.into_response(),
    }
}
