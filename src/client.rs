use std::collections::BTreeMap;

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, ConfigError};
use crate::contract::ResponseContract;
use crate::form::{Resolution, Ticket};
use crate::prediction::Prediction;
use crate::validation::{FieldError, summarize};
use crate::widget::WidgetKind;

/// Everything that can end a submission without a prediction. The
/// `Display` text is what the form shows to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("Server Error: {}", .status.as_u16())]
    Server { status: StatusCode, detail: Option<String> },
    #[error("{0}")]
    Transport(String),
    #[error("Invalid response from prediction service")]
    Malformed { detail: String },
    #[error("{}", summarize(.0))]
    Rejected(Vec<FieldError>),
}

/// Body of the service health check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceInfo {
    pub status: String,
    #[serde(default)]
    pub models: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to the prediction service. Cheap to clone; all clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoints: BTreeMap<WidgetKind, Url>,
    info_url: Url,
}

impl PredictionClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ConfigError::Validation(format!("HTTP client: {e}")))?;

        let mut endpoints = BTreeMap::new();
        for kind in WidgetKind::ALL {
            endpoints.insert(kind, config.resolve(kind)?);
        }

        Ok(Self {
            http,
            endpoints,
            info_url: config.info_url()?,
        })
    }

    pub fn endpoint(&self, kind: WidgetKind) -> &Url {
        // `new` fills every widget.
        &self.endpoints[&kind]
    }

    /// POSTs `payload` to the widget's endpoint and decodes the answer.
    pub async fn predict(&self, kind: WidgetKind, payload: &Map<String, Value>) -> Result<Prediction, SubmitError> {
        let url = self.endpoint(kind).clone();
        info!(widget = %kind, %url, "submitting prediction request");

        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(widget = %kind, error = %e, "prediction request failed");
                SubmitError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.error);
            warn!(widget = %kind, %status, ?detail, "prediction service returned an error");
            return Err(SubmitError::Server { status, detail });
        }

        let body: Value = response.json().await.map_err(|e| malformed(kind, e.to_string()))?;
        ResponseContract::for_widget(kind)
            .check(&body)
            .map_err(|detail| malformed(kind, detail))?;
        let prediction = Prediction::decode(kind, body).map_err(|detail| malformed(kind, detail))?;

        debug!(widget = %kind, ?prediction, "prediction decoded");
        Ok(prediction)
    }

    /// Runs the request a form handed out and tags the outcome with the
    /// ticket's sequence number.
    pub async fn dispatch(&self, ticket: Ticket) -> Resolution {
        let outcome = self.predict(ticket.kind, &ticket.payload).await;
        Resolution {
            seq: ticket.seq,
            outcome,
        }
    }

    /// GET `/info` on the service.
    pub async fn info(&self) -> Result<ServiceInfo, SubmitError> {
        let response = self
            .http
            .get(self.info_url.clone())
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Server { status, detail: None });
        }
        response.json().await.map_err(|e| SubmitError::Malformed {
            detail: format!("info response could not be decoded: {e}"),
        })
    }
}

fn malformed(kind: WidgetKind, detail: String) -> SubmitError {
    warn!(widget = %kind, %detail, "malformed prediction response");
    SubmitError::Malformed { detail }
}
