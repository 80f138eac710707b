//! Check command: sampled regularity check of every spline in a file.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use qshift_spline::{RegularityReport, SplineSet};
use tracing::{info, info_span};

use crate::cli::CheckArgs;

/// Run the regularity check.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();
    if args.samples == 0 {
        bail!("--samples must be at least 1");
    }

    let set = SplineSet::from_path(&args.splines)
        .with_context(|| format!("failed to load splines: {}", args.splines.display()))?;
    info!(n_splines = set.len(), samples = args.samples, "checking splines");

    let reports = check_all(&set, args.samples);
    let mut out = io::stdout().lock();
    for (name, report) in &reports {
        writeln!(out, "{}", describe(name, report)).context("failed to write to stdout")?;
    }

    let irregular = reports.iter().filter(|(_, r)| !r.is_regular()).count();
    if irregular > 0 {
        bail!("{irregular} of {} splines failed the regularity check", reports.len());
    }
    Ok(())
}

fn check_all(set: &SplineSet, samples: usize) -> Vec<(String, RegularityReport)> {
    set.iter()
        .map(|(name, spline)| (name.to_string(), spline.check_regularity(samples)))
        .collect()
}

fn describe(name: &str, report: &RegularityReport) -> String {
    if report.is_regular() {
        format!("{name}: ok ({} samples)", report.samples)
    } else {
        format!(
            "{name}: IRREGULAR ({} out of [0, 1], {} with negative derivative, {} samples)",
            report.out_of_range, report.negative_derivative, report.samples
        )
    }
}
