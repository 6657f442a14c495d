// Application state for HTTP handlers
use crate::application::wind_service::WindService;

#[derive(Clone)]
pub struct AppState {
    pub wind_service: WindService,
    pub title: String,
}
