use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use club_grouper::config::AppConfig;
use club_grouper::error::AppError;
use club_grouper::telemetry;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // Keyword tables are required; the server does not start without them.
    let rules = config.keywords.load_rules()?;
    info!(keywords = %config.keywords.path.display(), "keyword tables loaded");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(rules, prometheus_handle);
    let readiness_flag = app_state.readiness.clone();

    let app = router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "team grouping service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
