//! Tail-linearization: chord interpolation on both splines near the CDF
//! extremes, where inverting the cubic is unstable.

use qshift_spline::MonotoneSpline;

/// Returns `true` if `quantile` lies within `threshold` of 0 or 1.
///
/// Always `false` for a zero threshold.
pub(crate) fn in_tail(quantile: f64, threshold: f64) -> bool {
    threshold > 0.0 && (quantile < threshold || quantile > 1.0 - threshold)
}

/// Maps `value` by linear interpolation on the source and target knots.
///
/// `value` must lie inside the source domain. An input on the upper source
/// boundary maps to the upper target boundary.
pub(crate) fn shift_linear(source: &MonotoneSpline, target: &MonotoneSpline, value: f64) -> f64 {
    let seg = source.segment_containing_x(value);
    if seg >= source.len() - 1 {
        return target.last().x;
    }

    let quantile = source.knot(seg).lerp_y(&source.knot(seg + 1), value);

    let t = target.segment_containing_y(quantile);
    let (down, up) = (target.knot(t), target.knot(t + 1));
    down.lerp_x(&up, quantile).clamp(down.x, up.x)
}
