//! Typed success payloads, one per widget, and the display fields derived
//! from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::FeatureImportance;
use crate::widget::WidgetKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesPrediction {
    pub prediction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreastCancerPrediction {
    pub prediction_label: String,
    pub confidence: f64,
    #[serde(default)]
    pub feature_importance: Vec<FeatureImportance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankNotePrediction {
    pub prediction: u8,
    pub probability: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitcoinPrediction {
    pub current_price: f64,
    pub predicted_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    #[serde(default)]
    pub prediction_timeframe: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Diabetes(DiabetesPrediction),
    BreastCancer(BreastCancerPrediction),
    BankNote(BankNotePrediction),
    Bitcoin(BitcoinPrediction),
}

/// Direction of the predicted price move. `Up` is rendered in the
/// positive style and covers a zero change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// Whether an outcome is shown in the favourable or the alarming style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

impl From<Trend> for Tone {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Up => Tone::Positive,
            Trend::Down => Tone::Negative,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeLine {
    pub text: String,
    pub trend: Trend,
}

impl Prediction {
    /// Decodes a contract-checked body into the widget's payload type.
    pub fn decode(kind: WidgetKind, body: Value) -> Result<Self, String> {
        let decoded = match kind {
            WidgetKind::Diabetes => serde_json::from_value(body).map(Prediction::Diabetes),
            WidgetKind::BreastCancer => serde_json::from_value(body).map(Prediction::BreastCancer),
            WidgetKind::BankNote => serde_json::from_value(body).map(Prediction::BankNote),
            WidgetKind::Bitcoin => serde_json::from_value(body).map(Prediction::Bitcoin),
        }
        .map_err(|e| format!("{kind} response could not be decoded: {e}"))?;

        if let Prediction::BankNote(note) = &decoded {
            if note.confidence().is_none() {
                return Err(format!(
                    "banknote probability has no entry for class {}",
                    note.prediction
                ));
            }
        }
        Ok(decoded)
    }

    /// Display tone of the headline. Diabetes has none.
    pub fn tone(&self) -> Option<Tone> {
        match self {
            Prediction::Diabetes(_) => None,
            Prediction::BreastCancer(p) => Some(p.tone()),
            Prediction::BankNote(p) => Some(p.tone()),
            Prediction::Bitcoin(p) => Some(p.change_line().trend.into()),
        }
    }
}

impl DiabetesPrediction {
    pub fn display(&self) -> String {
        two_decimals(self.prediction)
    }
}

impl BreastCancerPrediction {
    pub fn confidence_text(&self) -> String {
        format!("{}%", two_decimals(self.confidence))
    }

    /// Only an exact "Benign" label is positive.
    pub fn tone(&self) -> Tone {
        if self.prediction_label == "Benign" { Tone::Positive } else { Tone::Negative }
    }
}

impl BankNotePrediction {
    pub fn label(&self) -> &'static str {
        if self.prediction == 1 { "Authentic Note" } else { "Fake Note" }
    }

    pub fn tone(&self) -> Tone {
        if self.prediction == 1 { Tone::Positive } else { Tone::Negative }
    }

    /// Probability of the predicted class, in `[0, 1]`.
    pub fn confidence(&self) -> Option<f64> {
        self.probability.first()?.get(usize::from(self.prediction)).copied()
    }

    pub fn confidence_text(&self) -> Option<String> {
        self.confidence().map(|p| format!("{}%", two_decimals(p * 100.0)))
    }
}

impl BitcoinPrediction {
    pub fn change_line(&self) -> ChangeLine {
        // Adding 0.0 turns -0.0 into 0.0, which would otherwise print as "+-0".
        let change = self.price_change + 0.0;
        let percent = self.price_change_percent + 0.0;
        let trend = if change >= 0.0 { Trend::Up } else { Trend::Down };
        let text = format!("{}{change} ({}{percent}%)", sign(change), sign(percent));
        ChangeLine { text, trend }
    }
}

fn sign(value: f64) -> &'static str {
    if value >= 0.0 { "+" } else { "" }
}

/// Two decimals, halves rounded away from zero (87.345 -> "87.35").
pub(crate) fn two_decimals(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}
