//! Named spline collections and their JSON representation.
//!
//! ```json
//! {
//!   "splines": {
//!     "data": { "x": [0.0, 1.0, 2.0], "y": [0.0, 0.4, 1.0] },
//!     "mc":   { "x": [0.0, 1.0, 2.0], "y": [0.0, 0.6, 1.0], "slopes": [0.8, 0.5, 0.3] }
//!   }
//! }
//! ```
//!
//! `slopes` is optional; when absent the Fritsch–Carlson slopes are used.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SplineError;
use crate::histogram::cumulative_knots;
use crate::knot::Knot;
use crate::spline::MonotoneSpline;

/// Serialized form of one spline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SplineRecord {
    x: Vec<f64>,
    y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slopes: Option<Vec<f64>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SplineFile {
    splines: BTreeMap<String, SplineRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HistogramRecord {
    edges: Vec<f64>,
    counts: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HistogramFile {
    histograms: BTreeMap<String, HistogramRecord>,
}

impl SplineRecord {
    fn into_spline(self, name: &str) -> Result<MonotoneSpline, SplineError> {
        if self.x.len() != self.y.len() {
            warn!(name, "spline record has x and y of different lengths");
            return Err(SplineError::LengthMismatch {
                x: self.x.len(),
                y: self.y.len(),
            });
        }
        let knots: Vec<Knot> = self
            .x
            .into_iter()
            .zip(self.y)
            .map(|(x, y)| Knot::new(x, y))
            .collect();
        match self.slopes {
            Some(slopes) => MonotoneSpline::with_slopes(knots, slopes),
            None => MonotoneSpline::new(knots),
        }
    }

    fn from_spline(spline: &MonotoneSpline) -> Self {
        Self {
            x: spline.knots().iter().map(|k| k.x).collect(),
            y: spline.knots().iter().map(|k| k.y).collect(),
            slopes: Some(spline.slopes().to_vec()),
        }
    }
}

/// A collection of CDF splines identified by name.
#[derive(Debug, Clone, Default)]
pub struct SplineSet {
    splines: BTreeMap<String, Arc<MonotoneSpline>>,
}

impl SplineSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a set from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SplineError> {
        let file: SplineFile = serde_json::from_str(json).map_err(parse_error)?;
        Self::from_records(file.splines)
    }

    /// Parses a set from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SplineError> {
        let file: SplineFile = serde_json::from_reader(reader).map_err(parse_error)?;
        Self::from_records(file.splines)
    }

    /// Reads a set from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SplineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        let set = Self::from_json_str(&text)?;
        debug!(path = %path.display(), n_splines = set.len(), "spline set loaded");
        Ok(set)
    }

    /// Builds a set of CDF splines from a JSON file of histograms.
    ///
    /// Expects `{"histograms": {"name": {"edges": [..], "counts": [..]}}}`.
    pub fn from_histogram_json(json: &str) -> Result<Self, SplineError> {
        let file: HistogramFile = serde_json::from_str(json).map_err(parse_error)?;
        let mut set = Self::new();
        for (name, hist) in file.histograms {
            let knots = cumulative_knots(&hist.edges, &hist.counts)?;
            set.insert(name, MonotoneSpline::new(knots)?);
        }
        Ok(set)
    }

    fn from_records(records: BTreeMap<String, SplineRecord>) -> Result<Self, SplineError> {
        let mut set = Self::new();
        for (name, record) in records {
            let spline = record.into_spline(&name)?;
            set.insert(name, spline);
        }
        Ok(set)
    }

    /// Serializes the set, including slopes, to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, SplineError> {
        let file = SplineFile {
            splines: self
                .splines
                .iter()
                .map(|(name, s)| (name.clone(), SplineRecord::from_spline(s)))
                .collect(),
        };
        serde_json::to_string_pretty(&file).map_err(parse_error)
    }

    /// Writes the set as JSON to `path`.
    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<(), SplineError> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|e| io_error(path, e))
    }

    /// Adds or replaces a spline, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        spline: MonotoneSpline,
    ) -> Option<Arc<MonotoneSpline>> {
        self.splines.insert(name.into(), Arc::new(spline))
    }

    /// Looks up a spline by name.
    pub fn get(&self, name: &str) -> Result<&MonotoneSpline, SplineError> {
        self.splines
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| self.unknown(name))
    }

    /// Looks up a spline by name and returns a shared handle to it.
    pub fn get_shared(&self, name: &str) -> Result<Arc<MonotoneSpline>, SplineError> {
        self.splines
            .get(name)
            .cloned()
            .ok_or_else(|| self.unknown(name))
    }

    /// Spline names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.splines.keys().map(String::as_str)
    }

    /// `(name, spline)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MonotoneSpline)> {
        self.splines.iter().map(|(k, v)| (k.as_str(), &**v))
    }

    /// Number of splines.
    pub fn len(&self) -> usize {
        self.splines.len()
    }

    /// Returns `true` if the set holds no splines.
    pub fn is_empty(&self) -> bool {
        self.splines.is_empty()
    }

    fn unknown(&self, name: &str) -> SplineError {
        SplineError::UnknownSpline {
            name: name.to_string(),
            available: self.splines.keys().cloned().collect(),
        }
    }
}

fn parse_error(e: serde_json::Error) -> SplineError {
    SplineError::Parse {
        message: e.to_string(),
    }
}

fn io_error(path: &Path, e: std::io::Error) -> SplineError {
    SplineError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
