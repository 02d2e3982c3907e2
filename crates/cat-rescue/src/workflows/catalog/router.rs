use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::domain::{ShelterCorrection, ShelterId, ShelterRegistration};
use super::service::CatalogService;
use crate::workflows::adoptions::PetRegistration;
use crate::workflows::donations::{CampaignDraft, CampaignId};
use crate::workflows::store::RescueStore;

/// Router builder for the administrative catalog endpoints.
pub fn catalog_router<S>(service: Arc<CatalogService<S>>) -> Router
where
    S: RescueStore + 'static,
{
    Router::new()
        .route("/api/v1/shelters", post(register_shelter_handler::<S>))
        .route("/api/v1/shelters/:shelter_id", get(shelter_handler::<S>))
        .route(
            "/api/v1/shelters/:shelter_id/corrections",
            post(correct_shelter_handler::<S>),
        )
        .route("/api/v1/pets", post(register_pet_handler::<S>))
        .route("/api/v1/campaigns", post(open_campaign_handler::<S>))
        .route("/api/v1/campaigns/:campaign_id", get(campaign_handler::<S>))
        .route(
            "/api/v1/campaigns/:campaign_id/cancel",
            post(cancel_campaign_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn register_shelter_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Json(registration): Json<ShelterRegistration>,
) -> Response
where
    S: RescueStore + 'static,
{
    match service.register_shelter(registration) {
        Ok(shelter) => (StatusCode::CREATED, Json(shelter)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn shelter_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(shelter_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
{
    match service.shelter(&ShelterId(shelter_id)) {
        Ok(shelter) => {
            let available = shelter.is_available();
            let payload = serde_json::json!({
                "shelter": shelter,
                "is_available": available,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn correct_shelter_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(shelter_id): Path<String>,
    Json(correction): Json<ShelterCorrection>,
) -> Response
where
    S: RescueStore + 'static,
{
    match service.correct_shelter(&ShelterId(shelter_id), correction) {
        Ok(shelter) => (StatusCode::OK, Json(shelter)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn register_pet_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Json(registration): Json<PetRegistration>,
) -> Response
where
    S: RescueStore + 'static,
{
    match service.register_pet(registration) {
        Ok(pet) => (StatusCode::CREATED, Json(pet)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn open_campaign_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Json(draft): Json<CampaignDraft>,
) -> Response
where
    S: RescueStore + 'static,
{
    match service.open_campaign(draft) {
        Ok(campaign) => (StatusCode::CREATED, Json(campaign)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn campaign_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(campaign_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
{
    match service.campaign(&CampaignId(campaign_id)) {
        Ok(campaign) => (StatusCode::OK, Json(campaign)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn cancel_campaign_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(campaign_id): Path<String>,
) -> Response
where
    S: RescueStore + 'static,
{
    match service.cancel_campaign(&CampaignId(campaign_id)) {
        Ok(campaign) => (StatusCode::OK, Json(campaign)).into_response(),
        Err(error) => error.into_response(),
    }
}
