use crate::application::document_source::SourceLocation;
use crate::application::fetch_orchestrator::{FetchPlan, FetchStrategy};
use crate::domain::station::{StationKey, ValuePath};
use anyhow::Context;
use chrono::Locale;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct WindConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub page: PageSettings,
    pub station: StationSettings,
    pub sources: SourcesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageSettings {
    pub title: String,
    pub locale: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: "Wind".to_string(),
            locale: "de_CH".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StationSettings {
    #[serde(flatten)]
    pub key: StationKey,
    #[serde(default)]
    pub value_path: ValuePath,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    #[serde(default)]
    pub strategy: FetchStrategy,
    /// CORS relay prefix; the target URL is appended url-encoded
    pub proxy: Option<String>,
    pub speed: SourceConfig,
    pub gust: Option<SourceConfig>,
    pub history: Option<SourceConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub location: String,
    #[serde(default)]
    pub proxied: bool,
}

impl WindConfig {
    pub fn fetch_plan(&self) -> FetchPlan {
        let proxy = self.sources.proxy.as_deref();
        FetchPlan {
            speed: resolve_location(&self.sources.speed, proxy),
            gust: self.sources.gust.as_ref().map(|s| resolve_location(s, proxy)),
            history: self.sources.history.as_ref().map(|s| resolve_location(s, proxy)),
            strategy: self.sources.strategy,
        }
    }

    pub fn locale(&self) -> anyhow::Result<Locale> {
        Locale::try_from(self.page.locale.as_str())
            .map_err(|_| anyhow::anyhow!("Unknown locale '{}'", self.page.locale))
    }
}

pub fn load_wind_config() -> anyhow::Result<WindConfig> {
    load_wind_config_from(Path::new("config/wind"))
}

/// Reads the given file (extension optional) with `WINDROW__` environment overrides.
pub fn load_wind_config_from(path: &Path) -> anyhow::Result<WindConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("WINDROW").separator("__"))
        .build()
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    Ok(settings.try_deserialize()?)
}

/// Remote when the location has an http(s) scheme, a local file otherwise.
pub fn resolve_location(source: &SourceConfig, proxy: Option<&str>) -> SourceLocation {
    let location = source.location.trim();
    if !(location.starts_with("http://") || location.starts_with("https://")) {
        return SourceLocation::File(PathBuf::from(location));
    }

    match proxy {
        Some(prefix) if source.proxied => {
            SourceLocation::Remote(format!("{}{}", prefix, urlencoding::encode(location)))
        }
        _ => SourceLocation::Remote(location.to_string()),
    }
}
