//! Build command: histograms in, CDF spline set out.

use anyhow::{Context, Result};
use qshift_spline::SplineSet;
use tracing::{debug, info, info_span};

use crate::cli::BuildArgs;

/// Run the spline builder.
pub fn run(args: BuildArgs) -> Result<()> {
    let _cmd = info_span!("build").entered();

    let json = std::fs::read_to_string(&args.histograms)
        .with_context(|| format!("failed to read histograms: {}", args.histograms.display()))?;
    let set = SplineSet::from_histogram_json(&json)
        .with_context(|| format!("failed to build splines from {}", args.histograms.display()))?;

    for (name, spline) in set.iter() {
        let (lo, hi) = spline.domain();
        debug!(name, knots = spline.len(), lo, hi, "spline built");
    }

    set.write_path(&args.output)
        .with_context(|| format!("failed to write splines: {}", args.output.display()))?;
    info!(n_splines = set.len(), path = %args.output.display(), "spline set written");
    Ok(())
}
