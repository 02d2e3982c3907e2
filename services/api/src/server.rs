use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_rescue_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cat_rescue::config::AppConfig;
use cat_rescue::error::AppError;
use cat_rescue::telemetry;
use cat_rescue::workflows::RescueServices;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(policy) = args.policy.take() {
        config.workflow.transition_policy = policy;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let services = RescueServices::in_memory(&config.workflow);

    let app = with_rescue_routes(&services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        policy = config.workflow.transition_policy.label(),
        poll_secs = config.workflow.notification_poll_interval.as_secs(),
        "cat rescue workflow service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
