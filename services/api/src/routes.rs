use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use cat_rescue::workflows::notifications::NotificationRepository;
use cat_rescue::workflows::store::RescueStore;
use cat_rescue::workflows::{rescue_router, RescueServices};
use serde_json::json;

/// Workflow API plus the operational probes.
pub(crate) fn with_rescue_routes<S, N>(services: &RescueServices<S, N>) -> axum::Router
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    rescue_router(services)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use cat_rescue::config::WorkflowConfig;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let services = RescueServices::in_memory(&WorkflowConfig::default());
        (with_rescue_routes(&services).layer(Extension(state)), readiness)
    }

    async fn get(router: &axum::Router, uri: &str) -> axum::response::Response {
        router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds")
    }

    #[tokio::test]
    async fn readiness_follows_the_listener_flag() {
        let (router, readiness) = app(false);
        assert_eq!(
            get(&router, "/ready").await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        readiness.store(true, Ordering::Release);
        assert_eq!(get(&router, "/ready").await.status(), StatusCode::OK);
        assert_eq!(get(&router, "/health").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn probes_share_the_router_with_workflow_routes() {
        let (router, _) = app(true);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/shelters")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "name": "Rumah Kucing Malang", "capacity": 8 }).to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CREATED);

        let missing = get(&router, "/api/v1/shelters/shl-404").await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let metrics = get(&router, "/metrics").await;
        assert_eq!(metrics.status(), StatusCode::OK);
        assert_eq!(
            metrics.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
