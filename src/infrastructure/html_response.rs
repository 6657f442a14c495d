// HTTP response utilities for the rendered page
use crate::domain::page::Page;
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};

/// Serialize the page to HTML. Caching is disabled because every load runs the pipeline.
pub fn page_response(page: &Page) -> Result<Response<Body>, StatusCode> {
    let html = page.to_html();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"))
        .header(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
        .header(header::CONTENT_LENGTH, html.len())
        .body(Body::from(html))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
