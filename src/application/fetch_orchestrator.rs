// Fetch orchestrator - One mandatory source, up to two optional ones
use crate::application::document_source::{DocumentSource, FetchError, SourceLocation};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    #[default]
    Concurrent,
    Sequential,
}

/// The resolved locations of a run.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    pub speed: SourceLocation,
    pub gust: Option<SourceLocation>,
    pub history: Option<SourceLocation>,
    pub strategy: FetchStrategy,
}

/// Raw documents of a run. Optional sources that failed or were not
/// configured hold an empty object.
#[derive(Debug, Clone)]
pub struct FetchedDocuments {
    pub speed: Value,
    pub gust: Value,
    pub history: Value,
}

#[derive(Clone)]
pub struct FetchOrchestrator {
    source: Arc<dyn DocumentSource>,
    plan: FetchPlan,
}

impl FetchOrchestrator {
    pub fn new(source: Arc<dyn DocumentSource>, plan: FetchPlan) -> Self {
        Self { source, plan }
    }

    /// Fails only when the mandatory speed source fails.
    pub async fn fetch_all(&self) -> Result<FetchedDocuments, FetchError> {
        let speed = self.source.fetch_json(&self.plan.speed);
        let gust = self.fetch_optional("gust", self.plan.gust.as_ref());
        let history = self.fetch_optional("history", self.plan.history.as_ref());

        let (speed, gust, history) = match self.plan.strategy {
            FetchStrategy::Concurrent => futures::future::join3(speed, gust, history).await,
            FetchStrategy::Sequential => {
                let speed = speed.await?;
                (Ok(speed), gust.await, history.await)
            }
        };

        Ok(FetchedDocuments {
            speed: speed?,
            gust,
            history,
        })
    }

    async fn fetch_optional(&self, name: &str, location: Option<&SourceLocation>) -> Value {
        let Some(location) = location else {
            return empty_document();
        };

        match self.source.fetch_json(location).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(source = name, error = %error_chain(&e), "Failed to fetch {} data", name);
                empty_document()
            }
        }
    }
}

fn empty_document() -> Value {
    Value::Object(Map::new())
}

/// Renders an error and its sources on one line.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
