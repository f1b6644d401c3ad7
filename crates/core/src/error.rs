//! Forecasting error model.

use thiserror::Error;

/// Result type used across the forecasting layer.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Forecasting-level error.
///
/// Errors are scoped to a single item or scenario. Batch operations collect
/// them per item and keep going; they are never meant to abort a whole run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// A numeric or textual input was unusable (NaN price, negative cost, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An item reached the pipeline without an identifier.
    #[error("missing product id")]
    MissingId,

    /// A date could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Unexpected failure while computing a result.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ForecastError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn missing_id() -> Self {
        Self::MissingId
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = ForecastError::invalid_input("price must be finite");
        assert_eq!(err.to_string(), "invalid input: price must be finite");
        assert_eq!(ForecastError::missing_id().to_string(), "missing product id");
    }
}
