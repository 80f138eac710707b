//! Monotone cubic splines representing cumulative distribution functions.
//!
//! A [`MonotoneSpline`] is a piecewise cubic Hermite interpolant over an
//! ordered knot sequence whose y-values are non-decreasing cumulative
//! probabilities. It is the building block for quantile mapping: evaluating
//! it turns a value into a quantile, and its knot searches by x and by y
//! locate the segment to invert.
//!
//! # Glossary
//!
//! - **Knot**: an `(x, y)` node of the interpolant
//! - **Segment**: the interval between two adjacent knots
//! - **Fritsch–Carlson slopes**: derivative values that keep a cubic Hermite
//!   interpolant monotone on monotone data (PCHIP)
//!
//! # Quick Start
//!
//! ```
//! use qshift_spline::{Knot, MonotoneSpline};
//!
//! let cdf = MonotoneSpline::new(vec![
//!     Knot::new(0.0, 0.0),
//!     Knot::new(1.0, 0.5),
//!     Knot::new(2.0, 1.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(cdf.evaluate(1.0), 0.5);
//! assert_eq!(cdf.segment_containing_y(0.7), 1);
//! ```

mod error;
mod histogram;
mod knot;
pub(crate) mod pchip;
mod regularity;
mod set;
mod spline;

pub use error::SplineError;
pub use histogram::cumulative_knots;
pub use knot::Knot;
pub use regularity::{DEFAULT_REGULARITY_SAMPLES, RegularityReport};
pub use set::SplineSet;
pub use spline::MonotoneSpline;
