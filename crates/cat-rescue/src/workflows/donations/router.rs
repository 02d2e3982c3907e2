use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::domain::{CampaignId, DonationId, DonationReview, DonationSubmission};
use super::service::DonationVerificationManager;
use crate::workflows::notifications::NotificationRepository;
use crate::workflows::store::RescueStore;

/// Router builder exposing donation intake and the admin verification endpoint.
pub fn donation_router<S, N>(manager: Arc<DonationVerificationManager<S, N>>) -> Router
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    Router::new()
        .route("/api/v1/donations", post(create_handler::<S, N>))
        .route("/api/v1/donations/:donation_id", get(fetch_handler::<S, N>))
        .route(
            "/api/v1/donations/:donation_id/status",
            post(review_handler::<S, N>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/donations",
            get(campaign_donations_handler::<S, N>),
        )
        .with_state(manager)
}

pub(crate) async fn create_handler<S, N>(
    State(manager): State<Arc<DonationVerificationManager<S, N>>>,
    Json(submission): Json<DonationSubmission>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.create_donation(submission) {
        Ok(donation) => (StatusCode::CREATED, Json(donation)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn fetch_handler<S, N>(
    State(manager): State<Arc<DonationVerificationManager<S, N>>>,
    Path(donation_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.get(&DonationId(donation_id)) {
        Ok(donation) => (StatusCode::OK, Json(donation)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn review_handler<S, N>(
    State(manager): State<Arc<DonationVerificationManager<S, N>>>,
    Path(donation_id): Path<String>,
    Json(review): Json<DonationReview>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.update_status(&DonationId(donation_id), review.status) {
        Ok(transition) => (StatusCode::OK, Json(transition)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn campaign_donations_handler<S, N>(
    State(manager): State<Arc<DonationVerificationManager<S, N>>>,
    Path(campaign_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    match manager.list_for_campaign(&CampaignId(campaign_id)) {
        Ok(donations) => (StatusCode::OK, Json(donations)).into_response(),
        Err(error) => error.into_response(),
    }
}
