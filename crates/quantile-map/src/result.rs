//! Per-value outcome of a quantile shift.

/// How a mapped value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inversion {
    /// Input outside the source domain; returned unchanged.
    PassThrough,
    /// Quantile in a tail; linear interpolation on both splines.
    TailLinear,
    /// Linear initial guess refined by one Newton step.
    Newton,
    /// Bisection requested by configuration.
    Bisection,
    /// Bisection after the target derivative vanished at the initial guess.
    ZeroDerivativeFallback,
    /// Bisection after the Newton step was too large or left the bracket.
    LargeCorrectionFallback,
}

impl Inversion {
    /// Returns `true` for the two paths that abandoned a Newton step.
    pub fn is_fallback(self) -> bool {
        matches!(
            self,
            Inversion::ZeroDerivativeFallback | Inversion::LargeCorrectionFallback
        )
    }
}

/// A mapped value together with the path that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shifted {
    /// The value in the target distribution.
    pub value: f64,
    /// How it was computed.
    pub inversion: Inversion,
}

impl Shifted {
    pub(crate) fn new(value: f64, inversion: Inversion) -> Self {
        Self { value, inversion }
    }
}

/// Tally of inversion paths over a batch of shifts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InversionCounts {
    /// Inputs outside the source domain.
    pub pass_through: usize,
    /// Tail-linearized inputs.
    pub tail_linear: usize,
    /// Newton-refined inputs.
    pub newton: usize,
    /// Inputs inverted by configured bisection.
    pub bisection: usize,
    /// Inputs that fell back to bisection.
    pub fallback: usize,
}

impl InversionCounts {
    /// Counts the paths in `shifted`.
    pub fn from_shifted(shifted: &[Shifted]) -> Self {
        let mut counts = Self::default();
        for s in shifted {
            counts.record(s.inversion);
        }
        counts
    }

    /// Adds one observation of `inversion`.
    pub fn record(&mut self, inversion: Inversion) {
        match inversion {
            Inversion::PassThrough => self.pass_through += 1,
            Inversion::TailLinear => self.tail_linear += 1,
            Inversion::Newton => self.newton += 1,
            Inversion::Bisection => self.bisection += 1,
            Inversion::ZeroDerivativeFallback | Inversion::LargeCorrectionFallback => {
                self.fallback += 1
            }
        }
    }

    /// Total number of recorded shifts.
    pub fn total(&self) -> usize {
        self.pass_through + self.tail_linear + self.newton + self.bisection + self.fallback
    }
}
