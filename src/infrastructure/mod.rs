// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod html_response;
pub mod http_source;
