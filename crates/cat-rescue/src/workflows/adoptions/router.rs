use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::domain::{AdoptionApplication, AdoptionDecision, AdoptionRequestId};
use super::service::AdoptionRequestManager;
use crate::workflows::catalog::UserId;
use crate::workflows::notifications::NotificationRepository;
use crate::workflows::store::RescueStore;

/// Router builder exposing adoption intake and the admin decision endpoint.
pub fn adoption_router<S, N>(manager: Arc<AdoptionRequestManager<S, N>>) -> Router
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    Router::new()
        .route("/api/v1/adoptions", post(create_handler::<S, N>))
        .route("/api/v1/adoptions/:request_id", get(fetch_handler::<S, N>))
        .route(
            "/api/v1/adoptions/:request_id/status",
            post(decision_handler::<S, N>),
        )
        .route(
            "/api/v1/users/:user_id/adoptions",
            get(user_requests_handler::<S, N>),
        )
        .with_state(manager)
}

pub(crate) async fn create_handler<S, N>(
    State(manager): State<Arc<AdoptionRequestManager<S, N>>>,
    Json(application): Json<AdoptionApplication>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.create_request(application) {
        Ok(request) => (StatusCode::CREATED, Json(request)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn fetch_handler<S, N>(
    State(manager): State<Arc<AdoptionRequestManager<S, N>>>,
    Path(request_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.get(&AdoptionRequestId(request_id)) {
        Ok(request) => (StatusCode::OK, Json(request)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn decision_handler<S, N>(
    State(manager): State<Arc<AdoptionRequestManager<S, N>>>,
    Path(request_id): Path<String>,
    Json(decision): Json<AdoptionDecision>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.update_status(&AdoptionRequestId(request_id), decision) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn user_requests_handler<S, N>(
    State(manager): State<Arc<AdoptionRequestManager<S, N>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.list_for_user(&UserId(user_id)) {
        Ok(requests) => (StatusCode::OK, Json(requests)).into_response(),
        Err(error) => error.into_response(),
    }
}
