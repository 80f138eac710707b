//! Configuration for quantile mapping.

use crate::error::QuantileMapError;

/// Number of halvings performed by the bisection fallback unless configured
/// otherwise. The final bracket is `1 / 2^5` of the initial one.
pub const DEFAULT_BISECT_STEPS: usize = 5;

/// Upper bound on `bisect_steps`; beyond this the bracket is below `f64`
/// resolution for any realistic knot spacing.
pub const MAX_BISECT_STEPS: usize = 64;

/// Configuration for inverting the target CDF spline.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use qshift_quantile_map::QmConfig;
///
/// let config = QmConfig::new()
///     .with_linear_interpolation_threshold(0.05)
///     .with_bisect_steps(8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QmConfig {
    use_bisect: bool,
    linear_interpolation_threshold: f64,
    bisect_steps: usize,
}

impl QmConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `use_bisect = false`, `linear_interpolation_threshold = 0.0`
    /// (tail-linearization disabled), `bisect_steps = 5`.
    pub fn new() -> Self {
        Self {
            use_bisect: false,
            linear_interpolation_threshold: 0.0,
            bisect_steps: DEFAULT_BISECT_STEPS,
        }
    }

    // --- Builder methods ---

    /// Sets whether inversion always bisects instead of using a Newton step.
    pub fn with_use_bisect(mut self, b: bool) -> Self {
        self.use_bisect = b;
        self
    }

    /// Sets the quantile distance from 0 and 1 below which the
    /// tail-linearization path is taken.
    pub fn with_linear_interpolation_threshold(mut self, t: f64) -> Self {
        self.linear_interpolation_threshold = t;
        self
    }

    /// Sets the number of bisection halvings.
    pub fn with_bisect_steps(mut self, n: usize) -> Self {
        self.bisect_steps = n;
        self
    }

    // --- Accessors ---

    /// Returns whether inversion always bisects.
    pub fn use_bisect(&self) -> bool {
        self.use_bisect
    }

    /// Returns the tail-linearization threshold.
    pub fn linear_interpolation_threshold(&self) -> f64 {
        self.linear_interpolation_threshold
    }

    /// Returns the number of bisection halvings.
    pub fn bisect_steps(&self) -> usize {
        self.bisect_steps
    }

    /// Validates this configuration.
    ///
    /// Checks that `linear_interpolation_threshold` is finite and
    /// non-negative and that `bisect_steps` does not exceed
    /// [`MAX_BISECT_STEPS`].
    pub fn validate(&self) -> Result<(), QuantileMapError> {
        validate_threshold(self.linear_interpolation_threshold)?;

        if self.bisect_steps > MAX_BISECT_STEPS {
            return Err(QuantileMapError::InvalidConfig {
                reason: format!(
                    "bisect_steps must be <= {MAX_BISECT_STEPS}, got {}",
                    self.bisect_steps
                ),
            });
        }

        Ok(())
    }
}

impl Default for QmConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), QuantileMapError> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(QuantileMapError::InvalidThreshold { threshold });
    }
    Ok(())
}
