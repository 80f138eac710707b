//! Spline-based quantile mapping between two cumulative distributions.
//!
//! This crate corrects a measured quantity so that its distribution matches
//! a reference distribution while keeping each observation's rank. Both
//! distributions are given as monotone CDF splines.
//!
//! # Pipeline
//!
//! 1. **Domain check**: values outside the source spline's x-range pass
//!    through unchanged (with a warning)
//! 2. **Quantile**: evaluate the source CDF and clamp to \[0, 1\]
//! 3. **Invert** the target CDF at that quantile:
//!    - tail quantiles (within the configured threshold of 0 or 1) use chord
//!      interpolation on both splines
//!    - otherwise find the target bracket, take the chord guess, and refine
//!      it with one Newton step, bisecting when the step is unusable
//!
//! # Glossary
//!
//! - **Quantile**: cumulative probability of a value under a CDF
//! - **Bracket**: adjacent target knots whose y-values straddle the quantile
//! - **Tail-linearization**: chord interpolation instead of cubic inversion
//!   near the CDF extremes
//!
//! # Quick Start
//!
//! ```
//! use qshift_quantile_map::{QmConfig, QuantileMapper};
//! use qshift_spline::MonotoneSpline;
//!
//! let source = MonotoneSpline::from_xy(&[0.0, 1.0, 2.0], &[0.0, 0.5, 1.0]).unwrap();
//! let target = MonotoneSpline::from_xy(&[0.0, 1.0, 2.0], &[0.0, 0.3, 1.0]).unwrap();
//!
//! let mapper = QuantileMapper::new(source, target, QmConfig::new()).unwrap();
//! let corrected = mapper.shift(1.0);
//! assert!(corrected > 1.0 && corrected < 2.0);
//! ```

mod config;
mod error;
pub(crate) mod invert;
mod mapper;
mod result;
pub(crate) mod tail;

pub use config::{DEFAULT_BISECT_STEPS, MAX_BISECT_STEPS, QmConfig};
pub use error::QuantileMapError;
pub use mapper::QuantileMapper;
pub use result::{Inversion, InversionCounts, Shifted};
