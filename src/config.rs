use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level qshift configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QshiftConfig {
    /// Quantile mapping settings.
    #[serde(default)]
    pub mapping: MappingToml,
}

impl QshiftConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingToml {
    #[serde(default)]
    pub use_bisect: bool,
    #[serde(default)]
    pub linear_interpolation_threshold: f64,
    #[serde(default = "default_bisect_steps")]
    pub bisect_steps: usize,
}

impl Default for MappingToml {
    fn default() -> Self {
        Self {
            use_bisect: false,
            linear_interpolation_threshold: 0.0,
            bisect_steps: default_bisect_steps(),
        }
    }
}

fn default_bisect_steps() -> usize {
    qshift_quantile_map::DEFAULT_BISECT_STEPS
}
