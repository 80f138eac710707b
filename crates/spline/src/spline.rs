//! Monotone cubic Hermite spline over an ordered knot sequence.

use crate::error::SplineError;
use crate::knot::Knot;
use crate::pchip::fritsch_carlson_slopes;

/// A piecewise cubic interpolant in Hermite form, used to represent a CDF.
///
/// Each segment `[x_i, x_{i+1}]` is the cubic matching the knot values and
/// the per-knot slopes at both ends. Slopes are either computed with the
/// Fritsch–Carlson rule ([`MonotoneSpline::new`]) or taken from an
/// already-fitted spline ([`MonotoneSpline::with_slopes`]).
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MonotoneSpline {
    knots: Vec<Knot>,
    slopes: Vec<f64>,
}

impl MonotoneSpline {
    /// Builds a spline through `knots` with Fritsch–Carlson slopes.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError`] if there are fewer than 2 knots, a coordinate
    /// is not finite, x is not strictly increasing, or y decreases.
    pub fn new(knots: Vec<Knot>) -> Result<Self, SplineError> {
        validate_knots(&knots)?;
        let slopes = fritsch_carlson_slopes(&knots);
        Ok(Self { knots, slopes })
    }

    /// Builds a spline from knots plus one derivative value per knot.
    ///
    /// The slopes are used as given; use
    /// [`check_regularity`](Self::check_regularity) to detect fitted splines
    /// that are not actually monotone.
    ///
    /// # Errors
    ///
    /// Everything [`MonotoneSpline::new`] rejects, plus a slope count that
    /// differs from the knot count or a non-finite slope.
    pub fn with_slopes(knots: Vec<Knot>, slopes: Vec<f64>) -> Result<Self, SplineError> {
        validate_knots(&knots)?;
        if slopes.len() != knots.len() {
            return Err(SplineError::SlopeCountMismatch {
                knots: knots.len(),
                slopes: slopes.len(),
            });
        }
        if let Some((index, &slope)) = slopes.iter().enumerate().find(|(_, s)| !s.is_finite()) {
            return Err(SplineError::NonFiniteSlope { index, slope });
        }
        Ok(Self { knots, slopes })
    }

    /// Builds a spline from parallel x and y slices.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::LengthMismatch {
                x: xs.len(),
                y: ys.len(),
            });
        }
        let knots = xs.iter().zip(ys).map(|(&x, &y)| Knot::new(x, y)).collect();
        Self::new(knots)
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Always `false`; a spline has at least 2 knots.
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Returns knot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn knot(&self, index: usize) -> Knot {
        self.knots[index]
    }

    /// All knots in x order.
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Derivative value at each knot.
    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    /// First knot.
    pub fn first(&self) -> Knot {
        self.knots[0]
    }

    /// Last knot.
    pub fn last(&self) -> Knot {
        self.knots[self.knots.len() - 1]
    }

    /// The x-domain `(x_min, x_max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.first().x, self.last().x)
    }

    /// Returns `true` if `x` lies in the closed x-domain.
    pub fn contains(&self, x: f64) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }

    /// Evaluates the interpolant at `x`.
    ///
    /// Outside the domain the end segment's cubic is extrapolated.
    pub fn evaluate(&self, x: f64) -> f64 {
        let i = self.polynomial_index(x);
        let (k0, k1) = (self.knots[i], self.knots[i + 1]);
        let h = k1.x - k0.x;
        let t = (x - k0.x) / h;

        let h00 = (1.0 + 2.0 * t) * (1.0 - t) * (1.0 - t);
        let h10 = t * (1.0 - t) * (1.0 - t);
        let h01 = t * t * (3.0 - 2.0 * t);
        let h11 = t * t * (t - 1.0);

        h00 * k0.y + h10 * h * self.slopes[i] + h01 * k1.y + h11 * h * self.slopes[i + 1]
    }

    /// Analytic first derivative of the interpolant at `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        let i = self.polynomial_index(x);
        let (k0, k1) = (self.knots[i], self.knots[i + 1]);
        let h = k1.x - k0.x;
        let t = (x - k0.x) / h;

        let dh00 = 6.0 * t * t - 6.0 * t;
        let dh10 = 3.0 * t * t - 4.0 * t + 1.0;
        let dh01 = 6.0 * t - 6.0 * t * t;
        let dh11 = 3.0 * t * t - 2.0 * t;

        (dh00 * k0.y + dh01 * k1.y) / h + dh10 * self.slopes[i] + dh11 * self.slopes[i + 1]
    }

    /// Index of the knot segment containing `x`.
    ///
    /// Returns `i` with `x_i <= x < x_{i+1}` inside the domain, `0` for
    /// `x <= x_min` or NaN, and `len() - 1` for `x >= x_max`. The last value
    /// is not a valid segment; it marks an input at (or past) the upper
    /// boundary.
    pub fn segment_containing_x(&self, x: f64) -> usize {
        let n = self.knots.len();
        if x.is_nan() || x <= self.knots[0].x {
            return 0;
        }
        if x >= self.knots[n - 1].x {
            return n - 1;
        }
        // First knot with x_k > x; the segment starts one before it.
        self.knots.partition_point(|k| k.x <= x) - 1
    }

    /// Index `i` of the segment with `y_i < y <= y_{i+1}`.
    ///
    /// Binary search over knot y-values. When `y` ties several knots the
    /// lowest such segment wins; `y` below every knot gives `0` and `y` above
    /// every knot gives `len() - 2`.
    pub fn segment_containing_y(&self, y: f64) -> usize {
        let mut down = 0;
        let mut up = self.knots.len() - 1;
        while up - down > 1 {
            let half = (up + down) / 2;
            if self.knots[half].y < y {
                down = half;
            } else {
                up = half;
            }
        }
        down
    }

    /// Segment whose polynomial is used at `x`, always a valid segment index.
    fn polynomial_index(&self, x: f64) -> usize {
        self.segment_containing_x(x).min(self.knots.len() - 2)
    }
}

fn validate_knots(knots: &[Knot]) -> Result<(), SplineError> {
    if knots.len() < 2 {
        return Err(SplineError::TooFewKnots { n: knots.len() });
    }
    for (index, k) in knots.iter().enumerate() {
        if !k.is_finite() {
            return Err(SplineError::NonFiniteKnot {
                index,
                x: k.x,
                y: k.y,
            });
        }
    }
    for (i, w) in knots.windows(2).enumerate() {
        let index = i + 1;
        if w[1].x <= w[0].x {
            return Err(SplineError::NonIncreasingX {
                index,
                x: w[1].x,
                prev: w[0].x,
            });
        }
        if w[1].y < w[0].y {
            return Err(SplineError::DecreasingY {
                index,
                y: w[1].y,
                prev: w[0].y,
            });
        }
    }
    Ok(())
}
