use axum::body::Body;
use axum::http::{Request, StatusCode};
use cat_rescue::config::WorkflowConfig;
use cat_rescue::workflows::{rescue_router, RescueServices};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn post(router: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");
    let response = router.clone().oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body");
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json payload")
    };
    (status, payload)
}

#[tokio::test]
async fn campaign_reaches_target_over_http() {
    let services = RescueServices::in_memory(&WorkflowConfig::default());
    let router = rescue_router(&services);

    let (status, shelter) = post(
        &router,
        "/api/v1/shelters",
        json!({ "name": "Rumah Kucing Depok", "capacity": 20 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(shelter["current_occupancy"], 0);

    let (status, campaign) = post(
        &router,
        "/api/v1/campaigns",
        json!({
            "shelter_id": shelter["id"],
            "title": "Vaksin Rabies",
            "target_amount": "100000",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(campaign["status"], "ACTIVE");

    let mut last = Value::Null;
    for amount in ["60000", "50000"] {
        let (status, donation) = post(
            &router,
            "/api/v1/donations",
            json!({
                "user_id": "donatur-1",
                "campaign_id": campaign["id"],
                "amount": amount,
                "proof_ref": "uploads/proofs/bri.png",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let donation_id = donation["id"].as_str().expect("donation id");
        let (status, transition) = post(
            &router,
            &format!("/api/v1/donations/{donation_id}/status"),
            json!({ "status": "VERIFIED" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        last = transition;
    }

    assert_eq!(last["campaign"]["current_amount"], "110000");
    assert_eq!(last["campaign"]["status"], "COMPLETED");

    let (status, error) = post(
        &router,
        &format!(
            "/api/v1/campaigns/{}/cancel",
            campaign["id"].as_str().expect("campaign id")
        ),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "invalid_state");
}
