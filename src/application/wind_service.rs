// Wind service - Fetch, extract and render one page load
use crate::application::document_source::FetchError;
use crate::application::extractor::{find_record, find_series, resolve_path};
use crate::application::fetch_orchestrator::FetchOrchestrator;
use crate::application::renderer::{RenderError, Renderer};
use crate::domain::page::{Page, CURRENT_GUST_ID, CURRENT_SPEED_ID, HISTORY_BODY_SELECTOR};
use crate::domain::reading::Reading;
use crate::domain::series::{last_window, TimeSeriesPoint};
use crate::domain::station::{StationKey, ValuePath};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Mandatory speed source failed")]
    Fetch(#[from] FetchError),

    #[error("Page markup is incomplete")]
    Render(#[from] RenderError),
}

/// What a completed run wrote into the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub speed_rendered: bool,
    pub gust_rendered: bool,
    pub history_rows: usize,
}

#[derive(Clone)]
pub struct WindService {
    orchestrator: FetchOrchestrator,
    station: StationKey,
    value_path: ValuePath,
    renderer: Renderer,
}

impl WindService {
    pub fn new(
        orchestrator: FetchOrchestrator,
        station: StationKey,
        value_path: ValuePath,
        renderer: Renderer,
    ) -> Self {
        Self {
            orchestrator,
            station,
            value_path,
            renderer,
        }
    }

    /// Runs Fetching → Extracting → Rendering once against `page`.
    /// On error the page keeps whatever was written before the failure.
    pub async fn load(&self, page: &mut Page) -> Result<RenderSummary, PipelineError> {
        tracing::debug!(phase = "fetching", station = %self.station.value, "Loading wind data");
        let documents = self.orchestrator.fetch_all().await?;

        tracing::debug!(phase = "extracting", "Locating station records");
        let speed = self.current_reading(&documents.speed);
        let gust = self.current_reading(&documents.gust);
        let points: Vec<TimeSeriesPoint> = last_window(find_series(&documents.history))
            .iter()
            .map(TimeSeriesPoint::from_json)
            .collect();

        tracing::debug!(phase = "rendering", history_points = points.len(), "Writing page");
        let mut summary = RenderSummary::default();
        if let Some(reading) = speed {
            self.renderer.update_row(page, CURRENT_SPEED_ID, &reading)?;
            summary.speed_rendered = true;
        }
        if let Some(reading) = gust {
            self.renderer.update_row(page, CURRENT_GUST_ID, &reading)?;
            summary.gust_rendered = true;
        }
        summary.history_rows = self
            .renderer
            .append_history(page, HISTORY_BODY_SELECTOR, &points)?;

        tracing::debug!(phase = "done", ?summary, "Wind data rendered");
        Ok(summary)
    }

    fn current_reading(&self, document: &serde_json::Value) -> Option<Reading> {
        let record = find_record(document, &self.station)?;
        resolve_path(record, &self.value_path).map(Reading::from_json)
    }
}
