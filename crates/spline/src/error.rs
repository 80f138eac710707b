//! Error types for the qshift-spline crate.

/// Error type for all fallible operations in the qshift-spline crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplineError {
    /// Returned when fewer than two knots are supplied.
    #[error("a spline needs at least 2 knots, got {n}")]
    TooFewKnots {
        /// Number of knots supplied.
        n: usize,
    },

    /// Returned when a knot coordinate is NaN or infinite.
    #[error("knot {index} is not finite: ({x}, {y})")]
    NonFiniteKnot {
        /// Index of the offending knot.
        index: usize,
        /// Its x coordinate.
        x: f64,
        /// Its y coordinate.
        y: f64,
    },

    /// Returned when knot x-values are not strictly increasing.
    #[error("knot x-values must be strictly increasing: x[{index}] = {x} <= x[{prev_index}] = {prev}", prev_index = .index - 1)]
    NonIncreasingX {
        /// Index of the first knot that fails to increase.
        index: usize,
        /// Its x value.
        x: f64,
        /// The preceding x value.
        prev: f64,
    },

    /// Returned when knot y-values decrease.
    #[error("knot y-values must be non-decreasing: y[{index}] = {y} < y[{prev_index}] = {prev}", prev_index = .index - 1)]
    DecreasingY {
        /// Index of the first knot whose y decreases.
        index: usize,
        /// Its y value.
        y: f64,
        /// The preceding y value.
        prev: f64,
    },

    /// Returned when supplied slopes do not match the knot count.
    #[error("slope count mismatch: {knots} knots but {slopes} slopes")]
    SlopeCountMismatch {
        /// Number of knots.
        knots: usize,
        /// Number of slopes.
        slopes: usize,
    },

    /// Returned when a supplied slope is NaN or infinite.
    #[error("slope {index} is not finite: {slope}")]
    NonFiniteSlope {
        /// Index of the offending slope.
        index: usize,
        /// The slope value.
        slope: f64,
    },

    /// Returned when knot x and y sequences differ in length.
    #[error("knot length mismatch: {x} x-values but {y} y-values")]
    LengthMismatch {
        /// Number of x-values.
        x: usize,
        /// Number of y-values.
        y: usize,
    },

    /// Returned when histogram edges and counts have incompatible lengths.
    #[error("histogram shape mismatch: {reason}")]
    HistogramShape {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when histogram contents cannot form a CDF.
    #[error("invalid histogram: {reason}")]
    InvalidHistogram {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a named spline is not present in a set.
    #[error("unknown spline '{name}' (available: {available:?})")]
    UnknownSpline {
        /// The requested name.
        name: String,
        /// Names present in the set.
        available: Vec<String>,
    },

    /// Returned when a spline or histogram file cannot be parsed.
    ///
    /// The `message` field is a `String` because `serde_json::Error` does
    /// not implement `Clone`.
    #[error("failed to parse spline data: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },

    /// Returned when a spline file cannot be read or written.
    #[error("i/o error on '{path}': {message}")]
    Io {
        /// Path involved.
        path: String,
        /// Description of the failure.
        message: String,
    },
}
