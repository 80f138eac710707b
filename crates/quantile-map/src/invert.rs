//! Inversion of the target CDF spline: bracket search, one-step Newton
//! correction, and fixed-depth bisection.

use qshift_spline::{Knot, MonotoneSpline};

/// Two adjacent target knots whose y-values straddle a quantile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bracket {
    pub(crate) down: Knot,
    pub(crate) up: Knot,
}

impl Bracket {
    pub(crate) fn width(&self) -> f64 {
        self.up.x - self.down.x
    }

    pub(crate) fn contains(&self, x: f64) -> bool {
        x >= self.down.x && x <= self.up.x
    }

    /// Chord interpolation of `quantile` inside the bracket.
    pub(crate) fn linear_guess(&self, quantile: f64) -> f64 {
        self.down.lerp_x(&self.up, quantile)
    }
}

/// Scans the target knots for the first segment with `y_up >= quantile`.
///
/// Segments ending at `y == 0` are skipped so a leading flat-at-zero region
/// is never chosen. If no segment qualifies the last one is used.
pub(crate) fn find_bracket(target: &MonotoneSpline, quantile: f64) -> Bracket {
    let knots = target.knots();
    let i = knots
        .windows(2)
        .position(|w| quantile <= w[1].y && w[1].y != 0.0)
        .unwrap_or(knots.len() - 2);
    Bracket {
        down: knots[i],
        up: knots[i + 1],
    }
}

/// Result of a single Newton correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NewtonStep {
    /// The corrected value, inside the bracket.
    Accepted(f64),
    /// The target derivative at the initial guess is zero.
    ZeroDerivative { guess: f64 },
    /// The correction exceeds half the bracket or leaves it.
    Rejected { guess: f64, correction: f64 },
}

/// Refines the chord guess by one Newton step on `target(x) = quantile`.
///
/// Not iterated. Steps the caller cannot use go to bisection.
pub(crate) fn newton_step(target: &MonotoneSpline, quantile: f64, bracket: &Bracket) -> NewtonStep {
    let guess = bracket.linear_guess(quantile);
    let derivative = target.derivative(guess);
    if derivative == 0.0 {
        return NewtonStep::ZeroDerivative { guess };
    }

    let correction = (quantile - target.evaluate(guess)) / derivative;
    let result = guess + correction;
    if correction.abs() > bracket.width() / 2.0 || !bracket.contains(result) {
        return NewtonStep::Rejected { guess, correction };
    }
    NewtonStep::Accepted(result)
}

/// Solves `target(x) = quantile` on the bracket with exactly `steps`
/// halvings followed by a chord interpolation on the final interval.
///
/// The midpoint test assumes `target` is non-decreasing: a midpoint value
/// below `quantile` keeps the upper half. The result is clamped to the final
/// interval, which only matters when the bracket does not actually contain
/// the quantile (e.g. a target CDF ending below 1).
pub(crate) fn bisect(target: &MonotoneSpline, quantile: f64, bracket: &Bracket, steps: usize) -> f64 {
    let mut down = bracket.down.x;
    let mut up = bracket.up.x;
    for _ in 0..steps {
        let middle = 0.5 * (up + down);
        if target.evaluate(middle) < quantile {
            down = middle;
        } else {
            up = middle;
        }
    }

    let lo = Knot::new(down, target.evaluate(down));
    let hi = Knot::new(up, target.evaluate(up));
    lo.lerp_x(&hi, quantile).clamp(down, up)
}
