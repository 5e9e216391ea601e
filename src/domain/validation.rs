//! Input validation for raw form values.
//!
//! Every rejection carries the offending field name so the caller can point
//! the user at it.

/// Raised when a submitted value cannot be turned into a scoring input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("{field}: '{value}' is not a valid number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field}: {value} is not a finite number")]
    NonFiniteNumber { field: &'static str, value: String },

    #[error("{field}: '{value}' is not one of [{allowed}]")]
    OutOfDomain {
        field: &'static str,
        value: String,
        allowed: String,
    },
}

impl InvalidInputError {
    /// Name of the field that failed validation.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidNumber { field, .. }
            | Self::NonFiniteNumber { field, .. }
            | Self::OutOfDomain { field, .. } => field,
        }
    }
}

/// Parse a numeric form value.
///
/// Surrounding whitespace is ignored. Empty input, garbage and the special
/// spellings `inf`/`NaN` are all rejected.
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, InvalidInputError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| InvalidInputError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
    require_finite(field, value)
}

/// Reject NaN and infinities.
pub fn require_finite(field: &'static str, value: f64) -> Result<f64, InvalidInputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInputError::NonFiniteNumber {
            field,
            value: value.to_string(),
        })
    }
}

/// Match `raw` exactly against a closed set of option labels.
pub fn parse_choice<T: Copy>(
    field: &'static str,
    raw: &str,
    choices: &[T],
    label: impl Fn(T) -> &'static str,
) -> Result<T, InvalidInputError> {
    choices
        .iter()
        .copied()
        .find(|choice| label(*choice) == raw)
        .ok_or_else(|| InvalidInputError::OutOfDomain {
            field,
            value: raw.to_string(),
            allowed: choices
                .iter()
                .map(|choice| label(*choice))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_trims() {
        assert_eq!(parse_number("age", " 67 ").expect("Should parse"), 67.0);
        assert_eq!(parse_number("bmi", "-3.5").expect("Should parse"), -3.5);
    }

    #[test]
    fn test_parse_number_rejects_empty_and_garbage() {
        let err = parse_number("age", "").unwrap_err();
        assert!(matches!(err, InvalidInputError::InvalidNumber { field: "age", .. }));

        let err = parse_number("bmi", "thirty").unwrap_err();
        assert_eq!(err.field(), "bmi");
    }

    #[test]
    fn test_parse_number_rejects_non_finite() {
        for raw in ["inf", "-inf", "NaN"] {
            let err = parse_number("avgGlucoseLevel", raw).unwrap_err();
            assert!(matches!(err, InvalidInputError::NonFiniteNumber { .. }), "{raw}");
        }
    }

    #[test]
    fn test_parse_choice_lists_allowed_values() {
        let err = parse_choice("flag", "2", &[false, true], |b| if b { "1" } else { "0" })
            .unwrap_err();
        assert_eq!(err.to_string(), "flag: '2' is not one of [0, 1]");
    }
}
