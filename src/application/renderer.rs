// Renderer - Writes readings into the page, append-only
use crate::domain::page::{Page, TableRow};
use crate::domain::reading::Reading;
use crate::domain::series::{PointTime, TimeSeriesPoint};
use chrono::{DateTime, Local, Locale};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Page has no element '{0}'")]
    MissingElement(String),
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    locale: Locale,
}

impl Renderer {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Writes the reading's text and indicator into a display row.
    pub fn update_row(&self, page: &mut Page, id: &str, reading: &Reading) -> Result<(), RenderError> {
        let row = page
            .display_mut(id)
            .ok_or_else(|| RenderError::MissingElement(id.to_string()))?;
        row.value = reading.text.clone();
        row.indicator.mark(reading.indicator());
        Ok(())
    }

    /// Appends one row per point in the order given. Returns the number of rows added.
    pub fn append_history(
        &self,
        page: &mut Page,
        selector: &str,
        points: &[TimeSeriesPoint],
    ) -> Result<usize, RenderError> {
        let body = page
            .table_mut(selector)
            .ok_or_else(|| RenderError::MissingElement(selector.to_string()))?;

        for point in points {
            let mut row = TableRow {
                time: self.format_time(&point.time),
                value: point.reading.text.clone(),
                indicator: Default::default(),
            };
            row.indicator.mark(point.reading.indicator());
            body.append(row);
        }

        Ok(points.len())
    }

    fn format_time(&self, time: &PointTime) -> String {
        match time {
            PointTime::Epoch(seconds) => self.format_timestamp(*seconds),
            PointTime::Raw(text) => text.clone(),
        }
    }

    pub fn format_timestamp(&self, timestamp: i64) -> String {
        match DateTime::from_timestamp(timestamp, 0) {
            Some(utc) => utc
                .with_timezone(&Local)
                .format_localized("%x %X", self.locale)
                .to_string(),
            None => timestamp.to_string(),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Locale::de_CH)
    }
}
