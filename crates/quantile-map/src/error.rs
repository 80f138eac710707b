//! Error types for the qshift-quantile-map crate.

use qshift_spline::SplineError;

/// Error type for all fallible operations in the qshift-quantile-map crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuantileMapError {
    /// Returned when a tail-linearization threshold is negative or not finite.
    #[error("linear interpolation threshold must be finite and >= 0, got {threshold}")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a spline cannot be loaded or looked up.
    #[error(transparent)]
    Spline(#[from] SplineError),
}
