use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use topping_match::config::AppConfig;
use topping_match::conversation::{
    ConversationService, ExactMatchResolver, GeminiResolver, OptionResolver,
};
use topping_match::error::AppError;
use topping_match::matching::{QuestionBank, UniformPicker};
use topping_match::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore};
use crate::routes::with_chat_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let bank = Arc::new(QuestionBank::standard()?);
    let store = Arc::new(InMemorySessionStore::default());

    match config.gemini.clone() {
        Some(gemini) => {
            let resolver = Arc::new(GeminiResolver::new(gemini));
            serve(config, bank, store, resolver).await
        }
        None => {
            warn!("GEMINI_API_KEY is not set; free-text answers fall back to literal option matching");
            serve(config, bank, store, Arc::new(ExactMatchResolver)).await
        }
    }
}

async fn serve<R>(
    config: AppConfig,
    bank: Arc<QuestionBank>,
    store: Arc<InMemorySessionStore>,
    resolver: Arc<R>,
) -> Result<(), AppError>
where
    R: OptionResolver + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(ConversationService::new(
        bank,
        store,
        resolver,
        Arc::new(UniformPicker),
        config.session.idle_timeout(),
    ));

    // The kiosk front end is served from a separate origin.
    let app = with_chat_routes(service)
        .layer(Extension(app_state))
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "topping matching kiosk ready");

    axum::serve(listener, app).await?;
    Ok(())
}
