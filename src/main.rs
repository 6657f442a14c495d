// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::fetch_orchestrator::FetchOrchestrator;
use crate::application::renderer::Renderer;
use crate::application::wind_service::WindService;
use crate::infrastructure::config::load_wind_config;
use crate::infrastructure::http_source::HttpDocumentSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, wind_page};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_wind_config()?;
    let plan = config.fetch_plan();
    tracing::info!(
        station = %config.station.key.value,
        speed = %plan.speed,
        gust = plan.gust.is_some(),
        history = plan.history.is_some(),
        strategy = ?plan.strategy,
        "Configured wind sources"
    );

    // Create document source (infrastructure layer)
    let source = Arc::new(HttpDocumentSource::new(reqwest::Client::new()));

    // Create service (application layer)
    let wind_service = WindService::new(
        FetchOrchestrator::new(source, plan),
        config.station.key.clone(),
        config.station.value_path.clone(),
        Renderer::new(config.locale()?),
    );

    let state = Arc::new(AppState {
        wind_service,
        title: config.page.title.clone(),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(wind_page))
        .route("/healthz", get(health_check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .with_context(|| format!("Invalid server address '{}'", config.server.address))?;
    tracing::info!("Starting windrow on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
