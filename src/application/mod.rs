// Application layer - Use cases and the ports they depend on
pub mod document_source;
pub mod extractor;
pub mod fetch_orchestrator;
pub mod renderer;
pub mod wind_service;
