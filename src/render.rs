use crate::chart;
use crate::form::DisplayMode;
use crate::prediction::{Prediction, Tone, Trend};

/// Cells used by a full-width importance bar.
pub const CHART_WIDTH: usize = 40;

/// The single block a widget shows for its current mode. `Idle` shows
/// nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Empty,
    Loading,
    Error(String),
    Result(Vec<String>),
}

impl View {
    pub fn of(mode: &DisplayMode) -> Self {
        match mode {
            DisplayMode::Idle => View::Empty,
            DisplayMode::Loading => View::Loading,
            DisplayMode::Error(message) => View::Error(message.clone()),
            DisplayMode::Success(prediction) => View::Result(result_lines(prediction)),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            View::Empty => Vec::new(),
            View::Loading => vec!["Loading...".to_string()],
            View::Error(message) => vec![format!("Error: {message}")],
            View::Result(lines) => lines.clone(),
        }
    }
}

fn marker(tone: Tone) -> char {
    match tone {
        Tone::Positive => '✔',
        Tone::Negative => '✘',
    }
}

/// Result block for a prediction. Diagnosis and authenticity headlines
/// carry a ✔/✘ marker; the bitcoin change line carries ▲/▼.
pub fn result_lines(prediction: &Prediction) -> Vec<String> {
    match prediction {
        Prediction::Diabetes(p) => vec![format!("Predicted disease progression: {}", p.display())],
        Prediction::BreastCancer(p) => {
            let mut lines = vec![
                format!("Diagnosis: {} {}", marker(p.tone()), p.prediction_label),
                format!("Confidence: {}", p.confidence_text()),
            ];
            if !p.feature_importance.is_empty() {
                lines.push("Feature importance:".to_string());
                lines.extend(chart::render(&p.feature_importance, CHART_WIDTH));
            }
            lines
        }
        Prediction::BankNote(p) => {
            let mut lines = vec![format!("{} {}", marker(p.tone()), p.label())];
            if let Some(confidence) = p.confidence_text() {
                lines.push(format!("Confidence: {confidence}"));
            }
            lines
        }
        Prediction::Bitcoin(p) => {
            let change = p.change_line();
            let arrow = match change.trend {
                Trend::Up => '▲',
                Trend::Down => '▼',
            };
            let mut lines = vec![
                format!("Current Price: ${}", p.current_price),
                format!("Predicted Price: ${}", p.predicted_price),
                format!("Change: {arrow} {}", change.text),
            ];
            if let Some(timeframe) = &p.prediction_timeframe {
                lines.push(format!("Timeframe: {timeframe}"));
            }
            lines
        }
    }
}
