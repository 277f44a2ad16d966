use thiserror::Error;

use crate::input::InputState;

/// A single field rejected before submission.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{label} is required")]
    Missing { key: String, label: String },
    #[error("{label} must be a number, got '{value}'")]
    NotNumeric { key: String, label: String, value: String },
    #[error("{label} must be within {range}, got {value}")]
    OutOfRange { key: String, label: String, range: String, value: f64 },
    #[error("'{key}' is not a field of this form")]
    UnknownField { key: String },
}

impl FieldError {
    pub fn key(&self) -> &str {
        match self {
            FieldError::Missing { key, .. }
            | FieldError::NotNumeric { key, .. }
            | FieldError::OutOfRange { key, .. }
            | FieldError::UnknownField { key } => key,
        }
    }
}

/// Checks every field of the form and returns all violations at once.
///
/// A field passes when it is non-empty and parses as a finite number. With
/// `enforce_ranges`, the number must also sit inside the declared range
/// hint; fields whose hint is not numeric are never range-checked.
pub fn validate(input: &InputState, enforce_ranges: bool) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    for field in input.kind().fields() {
        let raw = input.get(field.key).unwrap_or_default().trim();
        if raw.is_empty() {
            errors.push(FieldError::Missing {
                key: field.key.into(),
                label: field.label.into(),
            });
            continue;
        }

        let value = match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                errors.push(FieldError::NotNumeric {
                    key: field.key.into(),
                    label: field.label.into(),
                    value: raw.into(),
                });
                continue;
            }
        };

        if !enforce_ranges {
            continue;
        }
        if let Some(bounds) = field.bounds() {
            if !bounds.contains(value) {
                errors.push(FieldError::OutOfRange {
                    key: field.key.into(),
                    label: field.label.into(),
                    range: field.range.into(),
                    value,
                });
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// One line summary used as the form's error message.
pub fn summarize(errors: &[FieldError]) -> String {
    let details = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
    format!("Invalid input: {details}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetKind;

    fn banknote(values: [&str; 4]) -> InputState {
        let mut state = InputState::new(WidgetKind::BankNote);
        for (key, value) in ["var", "skew", "curt", "entr"].into_iter().zip(values) {
            state.set(key, value);
        }
        state
    }

    #[test]
    fn accepts_well_formed_numbers() {
        assert_eq!(validate(&banknote(["3.6", "8.6", "-2.8", "-0.4"]), true), Ok(()));
    }

    #[test]
    fn collects_every_violation() {
        let errors = validate(&banknote(["", "abc", "1", "NaN"]), false).unwrap_err();
        let keys: Vec<_> = errors.iter().map(FieldError::key).collect();
        assert_eq!(keys, ["var", "skew", "entr"]);
        assert!(matches!(errors[0], FieldError::Missing { .. }));
        assert!(matches!(errors[1], FieldError::NotNumeric { .. }));
        assert!(matches!(errors[2], FieldError::NotNumeric { .. }));
    }

    #[test]
    fn range_hints_are_advisory_unless_enforced() {
        let state = banknote(["100", "0", "0", "0"]);
        assert_eq!(validate(&state, false), Ok(()));

        let errors = validate(&state, true).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            FieldError::OutOfRange { key, value, .. } if key == "var" && *value == 100.0
        ));
    }

    #[test]
    fn summary_lists_each_problem() {
        let errors = validate(&banknote(["", "1", "1", "1"]), false).unwrap_err();
        assert_eq!(
            summarize(&errors),
            "Invalid input: Surface Texture Quality is required"
        );
    }
}
