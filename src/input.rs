use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::widget::WidgetKind;

/// Live field values of one form. Every declared key is present from
/// construction; values start empty and are never cleared by a submit.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    kind: WidgetKind,
    values: BTreeMap<&'static str, String>,
}

impl InputState {
    pub fn new(kind: WidgetKind) -> Self {
        let values = kind.fields().iter().map(|f| (f.key, String::new())).collect();
        Self { kind, values }
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Stores a raw value. Returns `false` when the key is not one of the
    /// widget's fields, in which case nothing changes.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Request body: the payload keys mapped to the raw strings, untouched.
    pub fn payload(&self) -> Map<String, Value> {
        self.kind
            .payload_keys()
            .map(|key| {
                let raw = self.values.get(key).cloned().unwrap_or_default();
                (key.to_string(), Value::String(raw))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_every_field_empty() {
        let state = InputState::new(WidgetKind::BankNote);
        for key in ["var", "skew", "curt", "entr"] {
            assert_eq!(state.get(key), Some(""));
        }
    }

    #[test]
    fn unknown_keys_are_refused() {
        let mut state = InputState::new(WidgetKind::Bitcoin);
        assert!(!state.set("volume", "12"));
        assert_eq!(state.get("volume"), None);
    }

    #[test]
    fn payload_sends_raw_strings_under_declared_keys() {
        let mut state = InputState::new(WidgetKind::BankNote);
        state.set("var", "3.6216");
        state.set("skew", " 8.6661");
        state.set("curt", "-2.8073");
        state.set("entr", "-0.44699");

        let payload = state.payload();
        assert_eq!(payload.len(), 4);
        assert_eq!(payload["var"], "3.6216");
        assert_eq!(payload["skew"], " 8.6661");
        assert_eq!(payload["entr"], "-0.44699");
    }
}
