//! Conversion from TOML config and CLI flags to library config types.

use anyhow::{Context, Result};
use qshift_quantile_map::QmConfig;

use crate::cli::ShiftArgs;
use crate::config::MappingToml;

/// Builds a [`QmConfig`] from the `[mapping]` table.
pub fn build_qm_config(mapping: &MappingToml) -> QmConfig {
    QmConfig::new()
        .with_use_bisect(mapping.use_bisect)
        .with_linear_interpolation_threshold(mapping.linear_interpolation_threshold)
        .with_bisect_steps(mapping.bisect_steps)
}

/// Applies `shift` flags on top of a file-derived config and validates it.
///
/// `--bisect` can only switch bisection on; the numeric flags replace the
/// file values when given.
pub fn apply_shift_overrides(mut cfg: QmConfig, args: &ShiftArgs) -> Result<QmConfig> {
    if args.bisect {
        cfg = cfg.with_use_bisect(true);
    }
    if let Some(t) = args.linear_threshold {
        cfg = cfg.with_linear_interpolation_threshold(t);
    }
    if let Some(n) = args.bisect_steps {
        cfg = cfg.with_bisect_steps(n);
    }
    cfg.validate().context("invalid mapping configuration")?;
    Ok(cfg)
}
