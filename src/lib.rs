pub mod chart;
pub mod client;
pub mod config;
pub mod contract;
pub mod dashboard;
pub mod field;
pub mod form;
pub mod input;
pub mod prediction;
pub mod render;
pub mod validation;
pub mod widget;

pub use client::{PredictionClient, ServiceInfo, SubmitError};
pub use config::{ClientConfig, ConfigError};
pub use dashboard::Dashboard;
pub use field::FieldSpec;
pub use form::{DisplayMode, FormEffect, FormEvent, PredictionForm, Resolution, Ticket};
pub use prediction::{Prediction, Tone};
pub use render::View;
pub use widget::WidgetKind;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Failure to install the global tracing subscriber.
#[derive(Error, Debug)]
pub enum TracingError {
    #[error("tracing init failed: {0}")]
    AlreadyInstalled(String),
}

/// Installs the global tracing subscriber on stderr.
///
/// `LOG_FORMAT=json` switches to JSON lines; anything else is the
/// human-readable format. Filtering follows `RUST_LOG` and defaults to
/// `warn`. Fails if a subscriber is already installed.
pub fn init_tracing() -> Result<(), TracingError> {
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = match format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| TracingError::AlreadyInstalled(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_typed_error() {
        // A global subscriber can only be installed once per process.
        let _ = init_tracing();
        let err = init_tracing().unwrap_err();
        assert!(matches!(err, TracingError::AlreadyInstalled(_)));
        assert!(err.to_string().starts_with("tracing init failed: "));
    }
}
