use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vca_core::config::LayeredConfig;
use vca_retrieval::PipelineOrchestrator;

use vca_api::config::ApiConfig;
use vca_api::router::create_router;
use vca_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vca_api=info,vca_retrieval=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();
    let config = LayeredConfig::load(None).context("Failed to load configuration")?;
    let pipeline = PipelineOrchestrator::from_config(&config).context("Failed to build pipeline")?;

    let backends = pipeline.backends();
    tracing::info!(
        port = api_config.port,
        classification = backends.classification,
        legal_search = %backends.legal_search,
        generation = backends.generation,
        speech = backends.speech,
        timeout_secs = config.request_timeout_secs.value,
        "Starting Virtual CA API server"
    );

    let cors = cors_layer(&api_config)?;
    let addr = api_config.bind_address();
    let state = Arc::new(AppState::new(pipeline, api_config));

    let app = create_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn cors_layer(config: &ApiConfig) -> anyhow::Result<CorsLayer> {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origin = config
            .cors_origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid VCA_CORS_ORIGIN '{}'", config.cors_origin))?;
        AllowOrigin::exact(origin)
    };

    tracing::info!("CORS enabled for {}", config.cors_origin);

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}
