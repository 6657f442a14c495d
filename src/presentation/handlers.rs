// HTTP request handlers
use crate::application::fetch_orchestrator::error_chain;
use crate::domain::page::Page;
use crate::infrastructure::html_response::page_response;
use crate::presentation::app_state::AppState;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Wind page. Each request is one page load: a fresh template, one pipeline run.
/// Failures are only logged; the page is served with whatever was written.
pub async fn wind_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut page = Page::wind_template(state.title.clone());

    match state.wind_service.load(&mut page).await {
        Ok(summary) => {
            tracing::info!(
                speed = summary.speed_rendered,
                gust = summary.gust_rendered,
                history_rows = summary.history_rows,
                "Rendered wind page"
            );
        }
        Err(e) => {
            tracing::error!(error = %error_chain(&e), "Failed to load wind data");
        }
    }

    match page_response(&page) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
