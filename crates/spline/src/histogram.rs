//! Cumulative knots from binned histogram contents.

use crate::error::SplineError;
use crate::knot::Knot;
use crate::spline::MonotoneSpline;

/// Converts a histogram into normalized cumulative knots.
///
/// `edges` holds the `counts.len() + 1` bin boundaries in increasing order.
/// The first knot is `(edges[0], 0)`; knot `i + 1` sits on the upper edge of
/// bin `i` with the cumulative fraction of all counts up to and including
/// that bin, so the last knot is exactly `(edges[n], 1)`.
///
/// # Errors
///
/// Returns [`SplineError::HistogramShape`] if the lengths do not line up and
/// [`SplineError::InvalidHistogram`] for non-increasing edges, negative or
/// non-finite counts, or an all-zero histogram.
pub fn cumulative_knots(edges: &[f64], counts: &[f64]) -> Result<Vec<Knot>, SplineError> {
    if counts.is_empty() || edges.len() != counts.len() + 1 {
        return Err(SplineError::HistogramShape {
            reason: format!(
                "expected {} edges for {} bins, got {}",
                counts.len() + 1,
                counts.len(),
                edges.len()
            ),
        });
    }
    if let Some(i) = edges
        .windows(2)
        .position(|w| !w[0].is_finite() || !w[1].is_finite() || w[1] <= w[0])
    {
        return Err(SplineError::InvalidHistogram {
            reason: format!("edges must be finite and increasing (bin {i})"),
        });
    }
    if let Some(i) = counts.iter().position(|c| !c.is_finite() || *c < 0.0) {
        return Err(SplineError::InvalidHistogram {
            reason: format!("bin {i} has invalid content {}", counts[i]),
        });
    }

    let total: f64 = counts.iter().sum();
    if total <= 0.0 {
        return Err(SplineError::InvalidHistogram {
            reason: "histogram is empty".to_string(),
        });
    }

    let mut knots = Vec::with_capacity(edges.len());
    knots.push(Knot::new(edges[0], 0.0));
    let mut running = 0.0;
    for (edge, count) in edges[1..].iter().zip(counts) {
        running += count;
        knots.push(Knot::new(*edge, running / total));
    }
    // Guard against rounding in the running sum.
    if let Some(last) = knots.last_mut() {
        last.y = 1.0;
    }
    Ok(knots)
}

impl MonotoneSpline {
    /// Builds a CDF spline from histogram bin edges and contents.
    ///
    /// See [`cumulative_knots`].
    pub fn from_histogram(edges: &[f64], counts: &[f64]) -> Result<Self, SplineError> {
        Self::new(cumulative_knots(edges, counts)?)
    }
}
