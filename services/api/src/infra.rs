use metrics_exporter_prometheus::PrometheusHandle;
use property_eval::market::MarketGateway;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) gateway: Arc<MarketGateway>,
}
