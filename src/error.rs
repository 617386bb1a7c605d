//! Error type shared by every calculator in the crate

use thiserror::Error;

/// Errors raised by the calculation engine and its loaders
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    /// Shorthand for an `InvalidInput` error
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

/// Reject NaN, infinite and negative amounts
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must not be negative (got {value})")));
    }
    Ok(())
}

/// Reject NaN and infinite values, allowing any sign
pub(crate) fn ensure_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid(field, "must be a finite number"))
    }
}

/// Reject percentages outside [0, 100]
pub(crate) fn ensure_percentage(field: &str, value: f64) -> CalcResult<()> {
    ensure_non_negative(field, value)?;
    if value > 100.0 {
        return Err(CalcError::invalid(field, format!("must be at most 100 (got {value})")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_helpers() {
        assert!(ensure_non_negative("price", 0.0).is_ok());
        assert!(ensure_non_negative("price", -1.0).is_err());
        assert!(ensure_non_negative("price", f64::NAN).is_err());
        assert!(ensure_finite("appreciation", -20.0).is_ok());
        assert!(ensure_finite("appreciation", f64::INFINITY).is_err());
        assert!(ensure_percentage("custom", 100.0).is_ok());
        assert!(ensure_percentage("custom", 100.5).is_err());
    }

    #[test]
    fn test_invalid_input_message() {
        let err = CalcError::invalid("term_years", "must be at least 1");
        assert_eq!(err.to_string(), "Invalid input: term_years - must be at least 1");
    }
}
