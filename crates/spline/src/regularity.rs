//! Sampled sanity check of a CDF spline.

use tracing::warn;

use crate::spline::MonotoneSpline;

/// Default number of sample points used by the regularity check.
pub const DEFAULT_REGULARITY_SAMPLES: usize = 1000;

/// Outcome of [`MonotoneSpline::check_regularity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegularityReport {
    /// Number of points sampled.
    pub samples: usize,
    /// Points whose value lies outside `[0, 1]`.
    pub out_of_range: usize,
    /// Points with a negative derivative.
    pub negative_derivative: usize,
}

impl RegularityReport {
    /// Returns `true` if no sampled point violated a CDF property.
    pub fn is_regular(&self) -> bool {
        self.out_of_range == 0 && self.negative_derivative == 0
    }
}

impl MonotoneSpline {
    /// Samples the spline at `samples` step midpoints across its domain and
    /// counts points that break the CDF contract.
    ///
    /// A warning is logged for each kind of violation found.
    pub fn check_regularity(&self, samples: usize) -> RegularityReport {
        let (lo, hi) = self.domain();
        let step = (hi - lo) / samples as f64;

        let mut report = RegularityReport {
            samples,
            out_of_range: 0,
            negative_derivative: 0,
        };
        for i in 0..samples {
            let x = lo + step * (i as f64 + 0.5);
            let y = self.evaluate(x);
            if !(0.0..=1.0).contains(&y) {
                report.out_of_range += 1;
            }
            if self.derivative(x) < 0.0 {
                report.negative_derivative += 1;
            }
        }

        if report.out_of_range > 0 {
            warn!(
                out_of_range = report.out_of_range,
                samples, "CDF spline leaves [0, 1]"
            );
        }
        if report.negative_derivative > 0 {
            warn!(
                negative_derivative = report.negative_derivative,
                samples, "CDF spline has negative derivative"
            );
        }
        report
    }
}
