use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::{BANKNOTE_FIELDS, BITCOIN_FIELDS, BREAST_CANCER_FIELDS, DIABETES_FIELDS, FieldSpec};

/// The four prediction forms. Each one owns a static field table and talks
/// to exactly one backend endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "diabetes")]
    Diabetes,
    #[serde(rename = "breastcancer")]
    BreastCancer,
    #[serde(rename = "banknote")]
    BankNote,
    #[serde(rename = "bitcoin")]
    Bitcoin,
}

impl WidgetKind {
    /// Dashboard order.
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Diabetes,
        WidgetKind::BreastCancer,
        WidgetKind::BankNote,
        WidgetKind::Bitcoin,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            WidgetKind::Diabetes => "diabetes",
            WidgetKind::BreastCancer => "breastcancer",
            WidgetKind::BankNote => "banknote",
            WidgetKind::Bitcoin => "bitcoin",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WidgetKind::Diabetes => "Diabetes Progression",
            WidgetKind::BreastCancer => "Breast Cancer Diagnosis",
            WidgetKind::BankNote => "Bank Note Authentication",
            WidgetKind::Bitcoin => "Bitcoin Price Prediction",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            WidgetKind::Diabetes => DIABETES_FIELDS,
            WidgetKind::BreastCancer => BREAST_CANCER_FIELDS,
            WidgetKind::BankNote => BANKNOTE_FIELDS,
            WidgetKind::Bitcoin => BITCOIN_FIELDS,
        }
    }

    /// Keys that go on the wire. Always a subset of `fields()`.
    pub fn payload_keys(self) -> impl Iterator<Item = &'static str> {
        self.fields().iter().map(|f| f.key)
    }

    /// Endpoint used when the configuration does not name one.
    /// Relative paths are joined onto the configured base URL.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            WidgetKind::Diabetes => "/api/diabetes/predict",
            WidgetKind::BreastCancer => "/api/breastcancer/predict",
            WidgetKind::BankNote => "/api/banknote/authenticate",
            WidgetKind::Bitcoin => "/api/bitcoin/predict",
        }
    }

    /// Where the first browser version of this form posted, when that
    /// differs from [`Self::default_endpoint`]. The old diabetes form used a
    /// bare `/predict` that the current backend does not serve.
    pub fn legacy_endpoint(self) -> Option<&'static str> {
        match self {
            WidgetKind::Diabetes => Some("http://localhost:5000/predict"),
            _ => None,
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown widget '{0}' (expected one of: diabetes, breastcancer, banknote, bitcoin)")]
pub struct UnknownWidget(pub String);

impl FromStr for WidgetKind {
    type Err = UnknownWidget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "diabetes" => Ok(WidgetKind::Diabetes),
            "breastcancer" => Ok(WidgetKind::BreastCancer),
            "banknote" => Ok(WidgetKind::BankNote),
            "bitcoin" => Ok(WidgetKind::Bitcoin),
            _ => Err(UnknownWidget(s.to_string())),
        }
    }
}
