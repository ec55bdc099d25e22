//! Error types for the keeling-loess crate.

/// Error type for all fallible operations in the keeling-loess crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoessError {
    /// Returned when there are too few points to smooth.
    #[error("insufficient data: got {n} points, need at least {min}")]
    InsufficientData {
        /// Number of points provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when x or y contains NaN or infinity.
    #[error("input contains non-finite values")]
    NonFiniteInput,

    /// Returned when x and y slices differ in length.
    #[error("length mismatch: x has {x_len} elements, y has {y_len}")]
    LengthMismatch {
        /// Length of the x slice.
        x_len: usize,
        /// Length of the y slice.
        y_len: usize,
    },

    /// Returned when a smoother parameter is out of range.
    #[error("invalid smoother configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
