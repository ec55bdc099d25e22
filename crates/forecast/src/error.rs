//! Error types for the keeling-forecast crate.

use keeling_calendar::CalendarError;

/// Error type for all fallible operations in the keeling-forecast crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    /// Returned when there are too few observations to fit the model.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when the model cannot be fitted.
    #[error("model fit failed: {reason}")]
    ModelFit {
        /// Description of the failure.
        reason: String,
    },

    /// Returned when dates and values slices differ in length.
    #[error("length mismatch: dates has {dates_len} elements, values has {values_len}")]
    LengthMismatch {
        /// Length of the dates slice.
        dates_len: usize,
        /// Length of the values slice.
        values_len: usize,
    },

    /// Returned when input contains NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when a configuration parameter is out of range.
    #[error("invalid forecast configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when forecast dates cannot be generated.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the calendar failure.
        reason: String,
    },
}

impl From<CalendarError> for ForecastError {
    fn from(e: CalendarError) -> Self {
        ForecastError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let e = ForecastError::InsufficientData { n: 1, min: 2 };
        assert_eq!(
            e.to_string(),
            "insufficient data: got 1 observations, need at least 2"
        );
    }

    #[test]
    fn error_model_fit() {
        let e = ForecastError::ModelFit {
            reason: "normal equations are not positive definite".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "model fit failed: normal equations are not positive definite"
        );
    }

    #[test]
    fn error_length_mismatch() {
        let e = ForecastError::LengthMismatch {
            dates_len: 4,
            values_len: 3,
        };
        assert_eq!(
            e.to_string(),
            "length mismatch: dates has 4 elements, values has 3"
        );
    }

    #[test]
    fn error_invalid_config() {
        let e = ForecastError::InvalidConfig {
            reason: "interval_width must be in (0, 1)".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid forecast configuration: interval_width must be in (0, 1)"
        );
    }

    #[test]
    fn from_calendar_error() {
        let e: ForecastError = CalendarError::OutOfRange {
            reason: "too far".to_string(),
        }
        .into();
        assert!(matches!(e, ForecastError::Calendar { .. }));
        assert!(e.to_string().contains("too far"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ForecastError>();
    }
}
