//! Knot type shared by splines and cumulative histograms.

use serde::{Deserialize, Serialize};

/// A single `(x, y)` interpolation node.
///
/// For a CDF spline `y` is the cumulative probability at `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    /// Abscissa.
    pub x: f64,
    /// Ordinate (cumulative probability for CDF splines).
    pub y: f64,
}

impl Knot {
    /// Creates a knot at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Linear interpolation of `y` at `x` on the chord from `self` to `up`.
    ///
    /// Returns `self.y` when the chord is vertical.
    pub fn lerp_y(&self, up: &Knot, x: f64) -> f64 {
        let dx = up.x - self.x;
        if dx == 0.0 {
            return self.y;
        }
        self.y + (x - self.x) * (up.y - self.y) / dx
    }

    /// Inverse of [`lerp_y`](Self::lerp_y): the `x` at which the chord from
    /// `self` to `up` reaches `y`.
    ///
    /// Returns `self.x` when the chord is flat.
    pub fn lerp_x(&self, up: &Knot, y: f64) -> f64 {
        let dy = up.y - self.y;
        if dy == 0.0 {
            return self.x;
        }
        self.x + (y - self.y) / dy * (up.x - self.x)
    }
}

impl From<(f64, f64)> for Knot {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
