//! Error types for calibration parameter handling.
//!
//! Two blocking kinds exist:
//! - [`ParseError`]: a field's text is not the expected numeric type
//! - [`RangeError`]: every field parsed, but the test's bounds or ordering are violated
//!
//! [`CalibWarning`] is advisory only and never blocks a hand-off.

use crate::params::CalibMode;
use serde::Serialize;
use thiserror::Error;

/// Numeric type a form field is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericKind {
    /// Floating-point value
    Float,
    /// Non-negative whole number
    Unsigned,
}

impl std::fmt::Display for NumericKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float => write!(f, "a number"),
            Self::Unsigned => write!(f, "a whole number"),
        }
    }
}

/// A field's text could not be interpreted as the expected numeric type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for '{field}': '{input}' is not {expected}")]
pub struct ParseError {
    /// The field being parsed.
    pub field: &'static str,
    /// The raw text as entered.
    pub input: String,
    /// The numeric type the field requires.
    pub expected: NumericKind,
}

impl ParseError {
    pub fn new(field: &'static str, input: &str, expected: NumericKind) -> Self {
        Self {
            field,
            input: input.to_string(),
            expected,
        }
    }
}

/// Which kind of policy predicate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintClass {
    /// A single value lies outside its domain bounds.
    Range,
    /// Two values are not in the required order or spacing.
    Ordering,
}

impl std::fmt::Display for ConstraintClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Range => write!(f, "range"),
            Self::Ordering => write!(f, "ordering"),
        }
    }
}

/// All fields parsed but the record violates its test's policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{mode}: {class} check failed ({constraint}). Please input valid values: {expected}")]
pub struct RangeError {
    /// The test being configured.
    pub mode: CalibMode,
    /// Whether a bound or an ordering failed.
    pub class: ConstraintClass,
    /// The predicate that failed, e.g. `start >= 0`.
    pub constraint: &'static str,
    /// User-facing description of the accepted values.
    pub expected: &'static str,
}

/// Errors that abort a confirm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalibError {
    /// A field failed to parse; range predicates were not consulted.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The parsed record violates its test's policy.
    #[error("Validation error: {0}")]
    Range(#[from] RangeError),
}

impl CalibError {
    /// The user-facing description of accepted values, when the policy was consulted.
    pub fn expected(&self) -> Option<&'static str> {
        match self {
            Self::Parse(_) => None,
            Self::Range(e) => Some(e.expected),
        }
    }

    /// The failed constraint class, `None` for parse failures.
    pub fn class(&self) -> Option<ConstraintClass> {
        match self {
            Self::Parse(_) => None,
            Self::Range(e) => Some(e.class),
        }
    }
}

/// Advisory notices shown to the user without blocking submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CalibWarning {
    /// Junction deviation end above the layer-shift threshold.
    HighJunctionDeviation { end: f64 },
    /// A temperature entry was pulled back into the supported range.
    TemperatureClamped { entered: u32, clamped: u32 },
}

impl std::fmt::Display for CalibWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighJunctionDeviation { end } => {
                write!(f, "NOTE: High values may cause layer shift (end = {end})")
            }
            Self::TemperatureClamped { entered, clamped } => write!(
                f,
                "Supported range: 170\u{2103} - 350\u{2103} ({entered} adjusted to {clamped})"
            ),
        }
    }
}

/// Result type alias for calibration operations.
pub type CalibResult<T> = Result<T, CalibError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("start", "abc", NumericKind::Float);
        assert_eq!(
            err.to_string(),
            "Invalid value for 'start': 'abc' is not a number"
        );

        let err = ParseError::new("end", "-3", NumericKind::Unsigned);
        assert_eq!(
            err.to_string(),
            "Invalid value for 'end': '-3' is not a whole number"
        );
    }

    #[test]
    fn test_range_error_display() {
        let err = RangeError {
            mode: CalibMode::RetractionTower,
            class: ConstraintClass::Ordering,
            constraint: "end >= start + step",
            expected: "end > start + step",
        };
        assert_eq!(
            err.to_string(),
            "Retraction tower: ordering check failed (end >= start + step). Please input valid values: end > start + step"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: CalibError = ParseError::new("step", "", NumericKind::Float).into();
        assert!(matches!(err, CalibError::Parse(_)));
        assert_eq!(err.class(), None);
        assert_eq!(err.expected(), None);

        let err: CalibError = RangeError {
            mode: CalibMode::VfaTower,
            class: ConstraintClass::Range,
            constraint: "start > 10",
            expected: "start > 10",
        }
        .into();
        assert_eq!(err.class(), Some(ConstraintClass::Range));
        assert_eq!(err.expected(), Some("start > 10"));
    }

    #[test]
    fn test_warning_display() {
        let w = CalibWarning::TemperatureClamped {
            entered: 400,
            clamped: 350,
        };
        assert!(w.to_string().contains("400 adjusted to 350"));

        let w = CalibWarning::HighJunctionDeviation { end: 0.35 };
        assert!(w.to_string().starts_with("NOTE: High values may cause layer shift"));
    }
}
