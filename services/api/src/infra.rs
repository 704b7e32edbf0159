use club_grouper::config::KeywordRules;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Per-process state shared by every handler. The keyword rules are
/// read-only, so concurrent uploads share them without locking.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) rules: Arc<KeywordRules>,
}

impl AppState {
    pub(crate) fn new(rules: KeywordRules, metrics: PrometheusHandle) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            rules: Arc::new(rules),
        }
    }
}
