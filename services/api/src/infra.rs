use cat_rescue::workflows::TransitionPolicy;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_policy(raw: &str) -> Result<TransitionPolicy, String> {
    TransitionPolicy::parse(raw)
        .ok_or_else(|| format!("unknown transition policy '{raw}' (expected permissive or strict)"))
}
