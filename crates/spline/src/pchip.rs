//! Fritsch–Carlson slopes for shape-preserving cubic Hermite interpolation.
//!
//! Interior slopes are the weighted harmonic mean of the neighbouring secant
//! slopes, or zero at local extrema and flat secants. End slopes use the
//! one-sided three-point formula, limited so that monotone data stays
//! monotone.

use crate::knot::Knot;

/// Computes one derivative value per knot.
///
/// `knots` must already be validated (at least 2 knots, x strictly
/// increasing).
pub(crate) fn fritsch_carlson_slopes(knots: &[Knot]) -> Vec<f64> {
    let n = knots.len();
    let h: Vec<f64> = knots.windows(2).map(|w| w[1].x - w[0].x).collect();
    let delta: Vec<f64> = knots
        .windows(2)
        .zip(&h)
        .map(|(w, &hi)| (w[1].y - w[0].y) / hi)
        .collect();

    if n == 2 {
        return vec![delta[0]; 2];
    }

    let mut d = vec![0.0; n];

    for i in 1..n - 1 {
        let (del_prev, del_next) = (delta[i - 1], delta[i]);
        if del_prev == 0.0 || del_next == 0.0 || del_prev.signum() != del_next.signum() {
            d[i] = 0.0;
        } else {
            let w1 = 2.0 * h[i] + h[i - 1];
            let w2 = h[i] + 2.0 * h[i - 1];
            d[i] = (w1 + w2) / (w1 / del_prev + w2 / del_next);
        }
    }

    d[0] = end_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);

    d
}

/// One-sided three-point end slope, limited to keep the end segment monotone.
fn end_slope(h0: f64, h1: f64, del0: f64, del1: f64) -> f64 {
    if del0 == 0.0 {
        return 0.0;
    }
    let d = ((2.0 * h0 + h1) * del0 - h0 * del1) / (h0 + h1);
    if d.signum() != del0.signum() {
        0.0
    } else if del0.signum() != del1.signum() && d.abs() > 3.0 * del0.abs() {
        3.0 * del0
    } else {
        d
    }
}
