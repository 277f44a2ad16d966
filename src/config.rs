//! Endpoint configuration.
//!
//! Loaded once at startup from an optional YAML file, then overridden by
//! environment variables (a `.env` file is honoured). The result is
//! validated as a whole before any client is built from it.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::widget::WidgetKind;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

pub const ENV_CONFIG_PATH: &str = "PREDICTION_CONFIG";
pub const ENV_BASE_URL: &str = "PREDICTION_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "PREDICTION_TIMEOUT_SECS";
pub const ENV_ENFORCE_RANGES: &str = "PREDICTION_ENFORCE_RANGES";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Field '{field}' has invalid value '{value}': {reason}")]
    InvalidField {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Where each widget sends its requests, plus client-wide knobs.
///
/// ```yaml
/// base_url: http://localhost:5000
/// timeout_secs: 30
/// enforce_ranges: false
/// endpoints:
///   diabetes: /api/diabetes/predict
///   bitcoin: http://btc-host:8000/api/bitcoin/predict
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-widget overrides; relative paths join onto `base_url`, absolute
    /// URLs replace it.
    pub endpoints: BTreeMap<WidgetKind, String>,
    /// Unset means the transport's own default.
    pub timeout_secs: Option<u64>,
    /// Reject values outside the field's range hint before submitting.
    pub enforce_ranges: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: BTreeMap::new(),
            timeout_secs: None,
            enforce_ranges: false,
        }
    }
}

impl ClientConfig {
    /// Full startup path: `.env`, YAML file (explicit path, else
    /// `PREDICTION_CONFIG`, else defaults), environment overrides, validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!(path = %env_file.display(), "loaded .env");
        }

        let env_path = std::env::var(ENV_CONFIG_PATH).ok();
        let mut config = match path.map(Path::to_path_buf).or(env_path.map(Into::into)) {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.check()?;
        info!(base_url = %config.base_url, "configuration loaded");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            file: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    pub fn from_yaml_str(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            file: source_name.to_string(),
            source: e,
        })
    }

    /// Applies environment-style overrides. `lookup` returns the value of a
    /// variable, or `None` when it is unset.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidField {
                field: ENV_TIMEOUT_SECS.into(),
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            self.timeout_secs = Some(secs);
        }
        if let Some(raw) = lookup(ENV_ENFORCE_RANGES) {
            self.enforce_ranges = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidField {
                        field: ENV_ENFORCE_RANGES.into(),
                        value: raw,
                        reason: "expected true or false".into(),
                    });
                }
            };
        }
        Ok(())
    }

    /// Configured endpoint for `kind`, falling back to the widget default.
    pub fn endpoint(&self, kind: WidgetKind) -> &str {
        self.endpoints
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_endpoint())
    }

    pub fn resolve(&self, kind: WidgetKind) -> Result<Url, ConfigError> {
        self.join(self.endpoint(kind), &format!("endpoints.{kind}"))
    }

    /// URL of the service health check.
    pub fn info_url(&self) -> Result<Url, ConfigError> {
        self.join("/info", "base_url")
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parsed `base_url`, its path always ending in `/` so that a gateway
    /// prefix such as `/ml` survives joining.
    fn base(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidField {
            field: "base_url".into(),
            value: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Relative endpoints are joined under the base path, with or without a
    /// leading `/`. Absolute URLs replace the base.
    fn join(&self, endpoint: &str, field: &str) -> Result<Url, ConfigError> {
        let relative = endpoint.trim_start_matches('/');
        self.base()?.join(relative).map_err(|e| ConfigError::InvalidField {
            field: field.into(),
            value: endpoint.into(),
            reason: e.to_string(),
        })
    }

    /// Collects every semantic problem before returning.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        match self.base() {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                errors.push(ConfigError::InvalidField {
                    field: "base_url".into(),
                    value: self.base_url.clone(),
                    reason: "scheme must be http or https".into(),
                });
            }
            Ok(_) => {
                for kind in WidgetKind::ALL {
                    if let Err(e) = self.resolve(kind) {
                        errors.push(e);
                    }
                }
            }
            Err(e) => errors.push(e),
        }

        if self.timeout_secs == Some(0) {
            errors.push(ConfigError::InvalidField {
                field: "timeout_secs".into(),
                value: "0".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn check(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|errors| {
            ConfigError::Validation(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        })
    }
}
