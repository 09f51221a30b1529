use crate::cli::ServeArgs;
use crate::infra::{load_signal_store, AppState, PlanningState};
use crate::routes::planning_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dialogue::config::AppConfig;
use dialogue::error::AppError;
use dialogue::planning::ScoringEngine;
use dialogue::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = ScoringEngine::standard()?;
    let config_version = engine.config().version;
    let pack_count = engine.catalog().len();
    let store = load_signal_store(&config.signals)?;
    let planning = PlanningState::new(engine, store);

    let app = planning_router(planning)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        config_version,
        packs = pack_count,
        "dialogue planning service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
