use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use model_risk::config::AppConfig;
use model_risk::error::AppError;
use model_risk::registry::RegistrationService;
use model_risk::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{scoring_engine, AppState, InMemoryInventory};
use crate::routes::with_service_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.scoring_config.take() {
        config.scoring_config_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = scoring_engine(&config)?;
    info!(
        scoring_version = engine.scoring_version(),
        "scoring configuration loaded"
    );

    let inventory = Arc::new(InMemoryInventory::default());
    let service = Arc::new(RegistrationService::new(inventory, engine));

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "model risk intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
