//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor: runtime configuration, the schema registry, and the
//! Prometheus handle when metrics are enabled.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use fitbyte_validator::{SchemaError, SchemaRegistry};
use metrics_exporter_prometheus::PrometheusHandle;
use thiserror::Error;

/// Default request body ceiling: 1 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// An environment variable was present but could not be parsed.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid value for {name}: {value:?} ({reason})")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PORT`.
    pub port: u16,
    /// `FITBYTE_SCHEMA_DIR`: extra schema documents loaded next to the built-ins.
    pub schema_dir: Option<PathBuf>,
    /// `FITBYTE_BODY_LIMIT`: maximum buffered request body, in bytes.
    pub body_limit: usize,
    /// `FITBYTE_METRICS_ENABLED`.
    pub metrics_enabled: bool,
    /// `FITBYTE_LOG_JSON`: emit logs as JSON lines.
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            schema_dir: None,
            body_limit: DEFAULT_BODY_LIMIT,
            metrics_enabled: true,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Absent variables fall back to defaults; present but unparseable ones
    /// are an error rather than being silently ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            schema_dir: lookup("FITBYTE_SCHEMA_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            body_limit: parse_var(&lookup, "FITBYTE_BODY_LIMIT")?.unwrap_or(defaults.body_limit),
            metrics_enabled: parse_flag(&lookup, "FITBYTE_METRICS_ENABLED")?
                .unwrap_or(defaults.metrics_enabled),
            log_json: parse_flag(&lookup, "FITBYTE_LOG_JSON")?.unwrap_or(defaults.log_json),
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    raw.trim().parse().map(Some).map_err(|e: T::Err| ConfigError {
        name,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<bool>, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError {
            name,
            value: raw,
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<SchemaRegistry>,
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("schemas", &self.registry.names())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// State with default configuration and only the built-in schemas.
    pub fn new() -> Self {
        Self {
            config: Arc::new(AppConfig::default()),
            registry: Arc::new(SchemaRegistry::builtin()),
            metrics: None,
        }
    }

    /// Build state from configuration, loading `schema_dir` on top of the
    /// built-in schemas.
    pub fn with_config(config: AppConfig) -> Result<Self, SchemaError> {
        let mut registry = SchemaRegistry::builtin();
        if let Some(dir) = &config.schema_dir {
            let added = registry.load_dir(dir)?;
            tracing::info!(dir = %dir.display(), added, "loaded schema documents");
        }
        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            metrics: None,
        })
    }

    /// Attach a Prometheus handle, enabling `GET /metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
