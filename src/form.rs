//! Per-widget state container.
//!
//! A [`PredictionForm`] owns the field values and the display mode of one
//! widget and changes only through [`PredictionForm::update`]. The network
//! call happens outside: a submit hands out a [`Ticket`], whoever runs it
//! feeds the [`Resolution`] back in. Every submit, accepted or rejected,
//! advances a sequence number. Only the resolution carrying the latest one
//! is applied, so a slow response to an older submit can never overwrite
//! whatever the newest submit left on screen.

use serde_json::{Map, Value};
use tracing::debug;

use crate::client::SubmitError;
use crate::input::InputState;
use crate::prediction::Prediction;
use crate::validation::{self, FieldError};
use crate::widget::WidgetKind;

/// What the widget currently shows. Exactly one of these at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayMode {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success(Prediction),
}

/// A validated request waiting to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub seq: u64,
    pub kind: WidgetKind,
    pub payload: Map<String, Value>,
}

/// The outcome of a ticket, tagged with that ticket's sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub seq: u64,
    pub outcome: Result<Prediction, SubmitError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Edit { key: String, value: String },
    Submit,
    Resolved(Resolution),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEffect {
    None,
    /// Send this request, then feed the result back as `FormEvent::Resolved`.
    Dispatch(Ticket),
    /// The event was refused; the state is unchanged unless it was a submit.
    Rejected(Vec<FieldError>),
    /// A resolution for a superseded ticket was dropped.
    Stale { seq: u64, latest: u64 },
}

#[derive(Debug, Clone)]
pub struct PredictionForm {
    inputs: InputState,
    mode: DisplayMode,
    latest_seq: u64,
    enforce_ranges: bool,
}

impl PredictionForm {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            inputs: InputState::new(kind),
            mode: DisplayMode::Idle,
            latest_seq: 0,
            enforce_ranges: false,
        }
    }

    pub fn with_enforced_ranges(mut self, enforce: bool) -> Self {
        self.enforce_ranges = enforce;
        self
    }

    pub fn kind(&self) -> WidgetKind {
        self.inputs.kind()
    }

    pub fn inputs(&self) -> &InputState {
        &self.inputs
    }

    pub fn mode(&self) -> &DisplayMode {
        &self.mode
    }

    /// Sequence number of the most recent submit, 0 before any. Rejected
    /// submits count too.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn update(&mut self, event: FormEvent) -> FormEffect {
        match event {
            FormEvent::Edit { key, value } => {
                if self.inputs.set(&key, value) {
                    FormEffect::None
                } else {
                    FormEffect::Rejected(vec![FieldError::UnknownField { key }])
                }
            }
            FormEvent::Submit => {
                self.latest_seq += 1;
                match validation::validate(&self.inputs, self.enforce_ranges) {
                    Ok(()) => {
                        self.mode = DisplayMode::Loading;
                        debug!(widget = %self.kind(), seq = self.latest_seq, "submit accepted");
                        FormEffect::Dispatch(Ticket {
                            seq: self.latest_seq,
                            kind: self.kind(),
                            payload: self.inputs.payload(),
                        })
                    }
                    Err(errors) => {
                        debug!(
                            widget = %self.kind(),
                            seq = self.latest_seq,
                            count = errors.len(),
                            "submit rejected by validation"
                        );
                        self.mode = DisplayMode::Error(SubmitError::Rejected(errors.clone()).to_string());
                        FormEffect::Rejected(errors)
                    }
                }
            }
            FormEvent::Resolved(resolution) => {
                if resolution.seq != self.latest_seq {
                    debug!(
                        widget = %self.kind(),
                        seq = resolution.seq,
                        latest = self.latest_seq,
                        "discarding stale response"
                    );
                    return FormEffect::Stale {
                        seq: resolution.seq,
                        latest: self.latest_seq,
                    };
                }
                self.mode = match resolution.outcome {
                    Ok(prediction) => DisplayMode::Success(prediction),
                    Err(e) => DisplayMode::Error(e.to_string()),
                };
                FormEffect::None
            }
        }
    }

    /// Convenience for drivers that set several fields at once.
    pub fn fill<'a>(&mut self, values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<FieldError> {
        values
            .into_iter()
            .filter_map(|(key, value)| match self.update(FormEvent::Edit {
                key: key.to_string(),
                value: value.to_string(),
            }) {
                FormEffect::Rejected(errors) => Some(errors),
                _ => None,
            })
            .flatten()
            .collect()
    }
}
