//! Path reports: the JSON form of a K* result, and golden comparison.

use std::path::Path;

use kstar_search::{Cost, Edge};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative tolerance for cost comparison; costs survive a JSON round trip
/// only up to the last ulp.
const COST_TOLERANCE: Cost = 1e-9;

/// One reported path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPath {
    pub edges: Vec<Edge>,
    pub cost: Cost,
}

/// The paths found for one named case, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathReport {
    pub name: String,
    pub paths: Vec<ReportPath>,
}

/// First difference between a report and its expected form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportMismatch {
    #[error("case name differs: expected {expected}, got {actual}")]
    Name { expected: String, actual: String },
    #[error("path count differs: expected {expected}, got {actual}")]
    PathCount { expected: usize, actual: usize },
    #[error("path {index}: cost differs: expected {expected}, got {actual}")]
    Cost {
        index: usize,
        expected: Cost,
        actual: Cost,
    },
    #[error("path {index}: length differs: expected {expected} edges, got {actual}")]
    Length {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("path {index}, edge {position}: expected {expected}, got {actual}")]
    Edge {
        index: usize,
        position: usize,
        expected: Edge,
        actual: Edge,
    },
}

/// Error reading or writing a report file.
#[derive(Debug, Error)]
pub enum ReportIoError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("report JSON error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of [`check_golden`].
#[derive(Debug, Clone, PartialEq)]
pub enum GoldenStatus {
    /// No golden file existed; the report was written as the new golden.
    Recorded,
    /// The golden file existed and was compared.
    Compared(Result<(), ReportMismatch>),
}

fn costs_match(expected: Cost, actual: Cost) -> bool {
    (expected - actual).abs() <= COST_TOLERANCE * expected.abs().max(1.0)
}

impl PathReport {
    #[must_use]
    pub fn new(name: impl Into<String>, paths: &[kstar_search::Path]) -> Self {
        Self {
            name: name.into(),
            paths: paths
                .iter()
                .map(|p| ReportPath {
                    edges: p.edges.clone(),
                    cost: p.cost,
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error (only possible for non-finite costs).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// # Errors
    ///
    /// Returns the parser error for malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Compare against an expected report and name the first difference.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReportMismatch`] found, checking the name, the path
    /// count, then each path's length, edges and cost in order.
    pub fn compare(&self, expected: &PathReport) -> Result<(), ReportMismatch> {
        if self.name != expected.name {
            return Err(ReportMismatch::Name {
                expected: expected.name.clone(),
                actual: self.name.clone(),
            });
        }
        if self.paths.len() != expected.paths.len() {
            return Err(ReportMismatch::PathCount {
                expected: expected.paths.len(),
                actual: self.paths.len(),
            });
        }
        for (index, (got, want)) in self.paths.iter().zip(&expected.paths).enumerate() {
            if got.edges.len() != want.edges.len() {
                return Err(ReportMismatch::Length {
                    index,
                    expected: want.edges.len(),
                    actual: got.edges.len(),
                });
            }
            if let Some((position, (actual, expected))) = got
                .edges
                .iter()
                .zip(&want.edges)
                .enumerate()
                .find(|(_, (a, e))| a != e)
            {
                return Err(ReportMismatch::Edge {
                    index,
                    position,
                    expected: *expected,
                    actual: *actual,
                });
            }
            if !costs_match(want.cost, got.cost) {
                return Err(ReportMismatch::Cost {
                    index,
                    expected: want.cost,
                    actual: got.cost,
                });
            }
        }
        Ok(())
    }

    /// Write the report as pretty JSON, via a temp file and rename.
    ///
    /// # Errors
    ///
    /// Returns [`ReportIoError`] on serialization or I/O failure.
    pub fn write(&self, path: &Path) -> Result<(), ReportIoError> {
        let json = self.to_json().map_err(|source| ReportIoError::Json {
            path: path.display().to_string(),
            source,
        })?;
        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, json.as_bytes()).map_err(|source| ReportIoError::Io {
            path: temp.display().to_string(),
            source,
        })?;
        std::fs::rename(&temp, path).map_err(|source| ReportIoError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// # Errors
    ///
    /// Returns [`ReportIoError`] if the file cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Self, ReportIoError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReportIoError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ReportIoError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Compare `report` with the golden file at `path`, or record it there if
/// no golden exists yet.
///
/// # Errors
///
/// Returns [`ReportIoError`] if an existing golden cannot be read, or a new
/// one cannot be written.
pub fn check_golden(report: &PathReport, path: &Path) -> Result<GoldenStatus, ReportIoError> {
    if !path.exists() {
        report.write(path)?;
        tracing::info!(case = %report.name, path = %path.display(), "golden recorded");
        return Ok(GoldenStatus::Recorded);
    }
    let expected = PathReport::read(path)?;
    Ok(GoldenStatus::Compared(report.compare(&expected)))
}
