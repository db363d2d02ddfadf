use cloud_advisor::config::EnhancerConfig;
use cloud_advisor::recommend::{ExplanationEnhancer, GeminiEnhancer, PassthroughEnhancer};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Pick the enhancer implementation from configuration: the Gemini client
/// when enabled and configured, otherwise the passthrough.
pub(crate) fn build_enhancer(config: &EnhancerConfig) -> Arc<dyn ExplanationEnhancer> {
    match GeminiEnhancer::from_config(config) {
        Some(enhancer) => {
            info!("AI explanation enhancement enabled");
            Arc::new(enhancer)
        }
        None => {
            info!("AI explanation enhancement disabled; serving deterministic explanations");
            Arc::new(PassthroughEnhancer)
        }
    }
}
