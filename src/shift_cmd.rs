//! Shift command: quantile-map a column of values.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use qshift_quantile_map::{InversionCounts, QuantileMapper};
use qshift_spline::SplineSet;
use tracing::{info, info_span};

use crate::cli::ShiftArgs;
use crate::config::QshiftConfig;
use crate::convert;

/// Run the shift command.
pub fn run(args: ShiftArgs) -> Result<()> {
    let _cmd = info_span!("shift").entered();

    // 1. Mapping config: TOML file first, flags on top
    let file_cfg = match args.config {
        Some(ref path) => QshiftConfig::from_path(path)?,
        None => QshiftConfig::default(),
    };
    let qm_cfg = convert::apply_shift_overrides(convert::build_qm_config(&file_cfg.mapping), &args)?;

    // 2. Splines
    let set = SplineSet::from_path(&args.splines)
        .with_context(|| format!("failed to load splines: {}", args.splines.display()))?;
    let mapper = QuantileMapper::from_set(&set, &args.source, &args.target, qm_cfg)
        .context("failed to build quantile mapper")?;

    // 3. Values
    let text = read_input(args.input.as_deref())?;
    let values = parse_values(&text)?;
    info!(n_values = values.len(), "values loaded");

    // 4. Map and write
    let shifted = mapper.map_all(&values);
    let counts = InversionCounts::from_shifted(&shifted);
    info!(
        total = counts.total(),
        pass_through = counts.pass_through,
        tail_linear = counts.tail_linear,
        newton = counts.newton,
        bisection = counts.bisection,
        fallback = counts.fallback,
        "mapping summary"
    );

    let mapped: Vec<f64> = shifted.iter().map(|s| s.value).collect();
    match args.output {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output: {}", path.display()))?;
            write_values(BufWriter::new(file), &mapped)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "mapped values written");
        }
        None => write_values(io::stdout().lock(), &mapped).context("failed to write to stdout")?,
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut text = String::new();
    match path {
        Some(p) => {
            text = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read input: {}", p.display()))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
        }
    }
    Ok(text)
}

/// Parses one value per line. Blank lines and lines starting with `#` are
/// skipped; anything else must parse as `f64`.
fn parse_values(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<f64>() {
            Ok(v) => values.push(v),
            Err(e) => bail!("line {}: cannot parse {line:?} as a number: {e}", i + 1),
        }
    }
    Ok(values)
}

fn write_values<W: Write>(mut out: W, values: &[f64]) -> io::Result<()> {
    for v in values {
        writeln!(out, "{v}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use approx::assert_relative_eq;
    use qshift_spline::MonotoneSpline;

    use super::*;

    #[test]
    fn parse_skips_blanks_and_comments() {
        let values = parse_values("# measured\n0.5\n\n  1.25 \n# end\n-3e-2\n").unwrap();
        assert_eq!(values, vec![0.5, 1.25, -0.03]);
    }

    #[test]
    fn parse_reports_line_number() {
        let err = parse_values("1.0\n2.0\nabc\n").unwrap_err();
        assert!(err.to_string().starts_with("line 3:"), "{err}");
    }

    #[test]
    fn parse_accepts_nan() {
        let values = parse_values("NaN\n").unwrap();
        assert!(values[0].is_nan());
    }

    #[test]
    fn write_one_value_per_line() {
        let mut buf = Vec::new();
        write_values(&mut buf, &[1.5, -2.0]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1.5\n-2\n");
    }

    #[test]
    fn run_maps_file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let splines = dir.path().join("splines.json");
        let input = dir.path().join("values.txt");
        let output = dir.path().join("mapped.txt");

        let mut set = SplineSet::new();
        set.insert(
            "data",
            MonotoneSpline::from_xy(&[0.0, 1.0, 2.0], &[0.0, 0.5, 1.0]).unwrap(),
        );
        set.insert(
            "mc",
            MonotoneSpline::from_xy(&[0.0, 1.0, 2.0], &[0.0, 0.5, 1.0]).unwrap(),
        );
        set.write_path(&splines).unwrap();
        std::fs::write(&input, "# sample\n0.5\n1.0\n7.0\n").unwrap();

        run(ShiftArgs {
            splines,
            source: "data".into(),
            target: "mc".into(),
            bisect: false,
            linear_threshold: None,
            bisect_steps: None,
            config: None,
            input: Some(input),
            output: Some(output.clone()),
        })
        .unwrap();

        let mapped = parse_values(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(mapped.len(), 3);
        assert_relative_eq!(mapped[0], 0.5, epsilon = 1e-3);
        assert_relative_eq!(mapped[1], 1.0, epsilon = 1e-9);
        assert_eq!(mapped[2], 7.0);
    }

    #[test]
    fn run_rejects_unknown_spline_name() {
        let dir = tempfile::tempdir().unwrap();
        let splines = dir.path().join("splines.json");
        let mut set = SplineSet::new();
        set.insert(
            "data",
            MonotoneSpline::from_xy(&[0.0, 1.0], &[0.0, 1.0]).unwrap(),
        );
        set.write_path(&splines).unwrap();

        let err = run(ShiftArgs {
            splines,
            source: "data".into(),
            target: "embedded".into(),
            bisect: false,
            linear_threshold: None,
            bisect_steps: None,
            config: None,
            input: Some(PathBuf::from("unused.txt")),
            output: None,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("embedded"), "{err:#}");
    }
}
