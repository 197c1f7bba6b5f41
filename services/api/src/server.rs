use crate::cli::ServeArgs;
use crate::infra::{build_mapper, AppState, InMemoryCaseStore};
use crate::routes::oby_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use oby_mapper::config::AppConfig;
use oby_mapper::error::AppError;
use oby_mapper::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed) = args.seed.take() {
        config.mapping.seed_path = Some(seed);
    }

    telemetry::init(&config.telemetry)?;

    let store = match &config.mapping.seed_path {
        Some(path) => InMemoryCaseStore::load(path)?,
        None => {
            warn!("no seed file configured; case store starts empty");
            InMemoryCaseStore::default()
        }
    };
    let mapper = Arc::new(build_mapper(store, &config.mapping)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        mapper,
    };

    let app = oby_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "OBY mapping service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
