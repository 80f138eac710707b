//! The quantile mapper: source CDF → quantile → target CDF inverse.

use std::sync::Arc;

use qshift_spline::{MonotoneSpline, SplineSet};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{QmConfig, validate_threshold};
use crate::error::QuantileMapError;
use crate::invert::{NewtonStep, bisect, find_bracket, newton_step};
use crate::result::{Inversion, Shifted};
use crate::tail::{in_tail, shift_linear};

/// Maps values from a source distribution onto a target distribution with
/// the same cumulative probability.
///
/// Both distributions are given as CDF splines. A mapper is immutable once
/// built and can be shared across threads; the splines themselves may be
/// shared between several mappers.
#[derive(Debug, Clone)]
pub struct QuantileMapper {
    source: Arc<MonotoneSpline>,
    target: Arc<MonotoneSpline>,
    config: QmConfig,
}

impl QuantileMapper {
    /// Binds a source and a target CDF spline.
    ///
    /// # Errors
    ///
    /// Returns [`QuantileMapError`] if `config` does not validate.
    pub fn new(
        source: impl Into<Arc<MonotoneSpline>>,
        target: impl Into<Arc<MonotoneSpline>>,
        config: QmConfig,
    ) -> Result<Self, QuantileMapError> {
        config.validate()?;
        let source = source.into();
        let target = target.into();
        debug!(
            source_knots = source.len(),
            target_knots = target.len(),
            use_bisect = config.use_bisect(),
            threshold = config.linear_interpolation_threshold(),
            "quantile mapper built"
        );
        Ok(Self {
            source,
            target,
            config,
        })
    }

    /// Binds the splines named `source` and `target` from `set`.
    pub fn from_set(
        set: &SplineSet,
        source: &str,
        target: &str,
        config: QmConfig,
    ) -> Result<Self, QuantileMapError> {
        Self::new(set.get_shared(source)?, set.get_shared(target)?, config)
    }

    /// The source CDF spline.
    pub fn source(&self) -> &MonotoneSpline {
        &self.source
    }

    /// The target CDF spline.
    pub fn target(&self) -> &MonotoneSpline {
        &self.target
    }

    /// The configuration in effect.
    pub fn config(&self) -> &QmConfig {
        &self.config
    }

    /// Maps `value` using the configured tail threshold.
    ///
    /// Values outside the source domain (and NaN) are returned unchanged.
    pub fn shift(&self, value: f64) -> f64 {
        self.map(value).value
    }

    /// Maps `value` with a per-call tail-linearization threshold.
    ///
    /// # Errors
    ///
    /// Returns [`QuantileMapError::InvalidThreshold`] if `threshold` is
    /// negative or not finite.
    pub fn shift_with_threshold(&self, value: f64, threshold: f64) -> Result<f64, QuantileMapError> {
        Ok(self.map_with_threshold(value, threshold)?.value)
    }

    /// Like [`shift`](Self::shift), also reporting the inversion path.
    pub fn map(&self, value: f64) -> Shifted {
        self.map_inner(value, self.config.linear_interpolation_threshold())
    }

    /// Like [`shift_with_threshold`](Self::shift_with_threshold), also
    /// reporting the inversion path.
    pub fn map_with_threshold(&self, value: f64, threshold: f64) -> Result<Shifted, QuantileMapError> {
        validate_threshold(threshold)?;
        Ok(self.map_inner(value, threshold))
    }

    /// Maps every value in parallel.
    #[tracing::instrument(skip_all, fields(n_values = values.len()))]
    pub fn shift_all(&self, values: &[f64]) -> Vec<f64> {
        values.par_iter().map(|&v| self.shift(v)).collect()
    }

    /// Maps every value in parallel, reporting inversion paths.
    #[tracing::instrument(skip_all, fields(n_values = values.len()))]
    pub fn map_all(&self, values: &[f64]) -> Vec<Shifted> {
        values.par_iter().map(|&v| self.map(v)).collect()
    }

    fn map_inner(&self, value: f64, threshold: f64) -> Shifted {
        let source = self.source.as_ref();
        let target = self.target.as_ref();

        if !source.contains(value) {
            let (x_min, x_max) = source.domain();
            warn!(value, x_min, x_max, "input out of range; no correction applied");
            return Shifted::new(value, Inversion::PassThrough);
        }

        let quantile = source.evaluate(value).clamp(0.0, 1.0);

        if in_tail(quantile, threshold) {
            return Shifted::new(shift_linear(source, target, value), Inversion::TailLinear);
        }

        let bracket = find_bracket(target, quantile);
        let steps = self.config.bisect_steps();

        if self.config.use_bisect() {
            return Shifted::new(bisect(target, quantile, &bracket, steps), Inversion::Bisection);
        }

        match newton_step(target, quantile, &bracket) {
            NewtonStep::Accepted(x) => Shifted::new(x, Inversion::Newton),
            NewtonStep::ZeroDerivative { guess } => {
                warn!(
                    value,
                    quantile, guess, "zero target derivative at initial guess; bisecting instead"
                );
                Shifted::new(
                    bisect(target, quantile, &bracket, steps),
                    Inversion::ZeroDerivativeFallback,
                )
            }
            NewtonStep::Rejected { guess, correction } => {
                warn!(
                    value,
                    quantile, guess, correction, "Newton correction too large; bisecting instead"
                );
                Shifted::new(
                    bisect(target, quantile, &bracket, steps),
                    Inversion::LargeCorrectionFallback,
                )
            }
        }
    }
}
