use serde_json::{Value, json};

use crate::widget::WidgetKind;

/// The JSON Schema a widget's response body must satisfy before it is
/// decoded.
#[derive(Debug, Clone)]
pub struct ResponseContract {
    pub kind: WidgetKind,
    pub schema: Value,
}

impl ResponseContract {
    pub fn for_widget(kind: WidgetKind) -> Self {
        let schema = match kind {
            WidgetKind::Diabetes => json!({
                "type": "object",
                "required": ["prediction"],
                "properties": { "prediction": { "type": "number" } }
            }),
            WidgetKind::BreastCancer => json!({
                "type": "object",
                "required": ["prediction_label", "confidence"],
                "properties": {
                    "prediction_label": { "type": "string" },
                    "confidence": { "type": "number" },
                    "feature_importance": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["feature", "label", "importance"],
                            "properties": {
                                "feature": { "type": "string" },
                                "label": { "type": "string" },
                                "importance": { "type": "number" }
                            }
                        }
                    }
                }
            }),
            WidgetKind::BankNote => json!({
                "type": "object",
                "required": ["prediction", "probability"],
                "properties": {
                    "prediction": { "enum": [0, 1] },
                    "probability": {
                        "type": "array",
                        "minItems": 1,
                        "items": {
                            "type": "array",
                            "minItems": 2,
                            "items": { "type": "number" }
                        }
                    }
                }
            }),
            WidgetKind::Bitcoin => json!({
                "type": "object",
                "required": ["current_price", "predicted_price", "price_change", "price_change_percent"],
                "properties": {
                    "current_price": { "type": "number" },
                    "predicted_price": { "type": "number" },
                    "price_change": { "type": "number" },
                    "price_change_percent": { "type": "number" },
                    "prediction_timeframe": { "type": "string" }
                }
            }),
        };
        Self { kind, schema }
    }

    /// Returns the first violation as text when `body` breaks the contract.
    pub fn check(&self, body: &Value) -> Result<(), String> {
        let validator = jsonschema::validator_for(&self.schema)
            .map_err(|e| format!("{} contract schema is invalid: {e}", self.kind))?;
        validator
            .validate(body)
            .map_err(|e| format!("{} response violated its contract: {e}", self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_contract_compiles() {
        for kind in WidgetKind::ALL {
            let contract = ResponseContract::for_widget(kind);
            assert!(jsonschema::validator_for(&contract.schema).is_ok(), "{kind}");
        }
    }

    #[test]
    fn banknote_contract_rejects_out_of_set_predictions() {
        let contract = ResponseContract::for_widget(WidgetKind::BankNote);
        assert!(contract.check(&json!({"prediction": 1, "probability": [[0.1, 0.9]]})).is_ok());
        assert!(contract.check(&json!({"prediction": 2, "probability": [[0.1, 0.9]]})).is_err());
        assert!(contract.check(&json!({"prediction": 1, "probability": []})).is_err());
    }

    #[test]
    fn missing_fields_are_reported() {
        let contract = ResponseContract::for_widget(WidgetKind::Bitcoin);
        let err = contract
            .check(&json!({"current_price": 1.0, "predicted_price": 2.0, "price_change": 1.0}))
            .unwrap_err();
        assert!(err.contains("price_change_percent"), "{err}");
    }

    #[test]
    fn feature_importance_is_optional() {
        let contract = ResponseContract::for_widget(WidgetKind::BreastCancer);
        assert!(contract.check(&json!({"prediction_label": "Benign", "confidence": 91.0})).is_ok());
    }
}
