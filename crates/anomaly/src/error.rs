//! Error types for the keeling-anomaly crate.

/// Error type for all fallible operations in the keeling-anomaly crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnomalyError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

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
    #[error("invalid anomaly configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_data() {
        assert_eq!(AnomalyError::EmptyData.to_string(), "input data is empty");
    }

    #[test]
    fn error_length_mismatch() {
        let e = AnomalyError::LengthMismatch {
            dates_len: 3,
            values_len: 4,
        };
        assert_eq!(
            e.to_string(),
            "length mismatch: dates has 3 elements, values has 4"
        );
    }

    #[test]
    fn error_non_finite_data() {
        assert_eq!(
            AnomalyError::NonFiniteData.to_string(),
            "input data contains non-finite values"
        );
    }

    #[test]
    fn error_invalid_config() {
        let e = AnomalyError::InvalidConfig {
            reason: "threshold must be positive".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid anomaly configuration: threshold must be positive"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<AnomalyError>();
    }
}
