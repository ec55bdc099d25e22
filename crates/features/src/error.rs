//! Error types for the keeling-features crate.

/// Error type for all fallible operations in the keeling-features crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
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

    /// Returned when a configuration parameter is out of range.
    #[error("invalid feature configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

/// Checks that `dates` and `values` are non-empty and aligned.
pub(crate) fn check_aligned<D>(dates: &[D], values: &[f64]) -> Result<(), FeatureError> {
    if dates.len() != values.len() {
        return Err(FeatureError::LengthMismatch {
            dates_len: dates.len(),
            values_len: values.len(),
        });
    }
    if dates.is_empty() {
        return Err(FeatureError::EmptyData);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_data() {
        assert_eq!(FeatureError::EmptyData.to_string(), "input data is empty");
    }

    #[test]
    fn error_length_mismatch() {
        let e = FeatureError::LengthMismatch {
            dates_len: 10,
            values_len: 9,
        };
        assert_eq!(
            e.to_string(),
            "length mismatch: dates has 10 elements, values has 9"
        );
    }

    #[test]
    fn error_invalid_config() {
        let e = FeatureError::InvalidConfig {
            reason: "short window must be positive".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid feature configuration: short window must be positive"
        );
    }

    #[test]
    fn check_aligned_cases() {
        assert!(check_aligned(&[1, 2], &[1.0, 2.0]).is_ok());
        assert_eq!(
            check_aligned::<i32>(&[], &[]),
            Err(FeatureError::EmptyData)
        );
        assert!(matches!(
            check_aligned(&[1], &[1.0, 2.0]),
            Err(FeatureError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<FeatureError>();
    }
}
