//! # Quadratic constant-term recovery
//!
//! Recovers `c` in `f(x) = a·x² + b·x + c` from sample points whose y-values
//! are written in arbitrary bases (2 to 36).
//!
//! ## Pipeline
//!
//! 1. **Record**: read `(index, base, value)` entries plus `n` and `k`
//! 2. **Decode**: `y = decode(value, base)`, `x = index`
//! 3. **Solve**: Cramer's rule on the first three points, or `c = y − x²`
//! 4. **Report**: text transcript or JSON
//!
//! ## Usage Example
//!
//! ```
//! use polysolve::{decoder, solver::{solve, Point}};
//!
//! let points = vec![
//!     Point::new(1, decoder::decode("4", 10)?),
//!     Point::new(2, decoder::decode("111", 2)?),
//!     Point::new(3, decoder::decode("c", 16)?),
//! ];
//! assert_eq!(solve(&points)?.constant, 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod decoder; // Arbitrary-base digit decoding
pub mod solver;  // Cramer's-rule constant solver
pub mod record;  // JSON test-case records
pub mod report;  // Text and JSON rendering

pub use decoder::{decode, Base, DecodeError};
pub use record::{RawCase, RawEntry, RecordError, RecordOptions};
pub use solver::{solve, solve_with, Method, Point, PointSet, SolveError, SolveResult, SolverConfig};

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, info_span};

/// Decoded and solved test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    /// Declared sample count.
    pub n: u32,
    /// Passed through from the record.
    pub k: u32,
    /// Decoded points in index order.
    pub points: PointSet,
    /// Solver outcome.
    pub result: SolveResult,
}

/// Errors that end processing of a single case.
#[derive(Error, Debug)]
pub enum CaseError {
    /// Record could not be read or parsed.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// A sample failed to decode.
    #[error("index {index}: {source}")]
    Decode {
        /// Index of the failing entry.
        index: u32,
        /// Decoder error.
        #[source]
        source: DecodeError,
    },

    /// The solver rejected the decoded points.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Decode every entry of `case` into a point, in entry order.
pub fn decode_case(case: &RawCase) -> Result<PointSet, CaseError> {
    case.entries
        .iter()
        .map(|entry| {
            let y = entry
                .base
                .parse::<Base>()
                .and_then(|base| decoder::decode_in(&entry.value, base))
                .map_err(|source| CaseError::Decode {
                    index: entry.index,
                    source,
                })?;
            debug!(
                index = entry.index,
                base = %entry.base,
                value = %entry.value,
                y,
                "decoded entry"
            );
            Ok(Point::new(i64::from(entry.index), y))
        })
        .collect()
}

/// Decode and solve an in-memory case.
pub fn process_case(case: &RawCase, config: &SolverConfig) -> Result<CaseReport, CaseError> {
    let points = decode_case(case)?;
    let result = solve_with(&points, config)?;
    info!(
        n = case.n,
        k = case.k,
        constant = result.constant,
        method = ?result.method,
        "case solved"
    );
    Ok(CaseReport {
        n: case.n,
        k: case.k,
        points,
        result,
    })
}

/// Read, decode and solve a record file.
pub fn process_file<P: AsRef<Path>>(
    path: P,
    options: &RecordOptions,
    config: &SolverConfig,
) -> Result<CaseReport, CaseError> {
    let path = path.as_ref();
    let _span = info_span!("case", path = %path.display()).entered();
    let case = record::read_case(path, options)?;
    process_case(&case, config)
}

/// Process each file independently; one failure does not stop the others.
pub fn process_batch<I, P>(
    paths: I,
    options: &RecordOptions,
    config: &SolverConfig,
) -> Vec<(PathBuf, Result<CaseReport, CaseError>)>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref().to_path_buf();
            let outcome = process_file(&path, options, config);
            (path, outcome)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: u32, base: &str, value: &str) -> RawEntry {
        RawEntry {
            index,
            base: base.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn decodes_entries_with_index_as_x() {
        let case = RawCase {
            n: 2,
            k: 2,
            entries: vec![entry(1, "10", "4"), entry(6, "4", "213")],
        };
        let points = decode_case(&case).unwrap();
        assert_eq!(points, vec![Point::new(1, 4), Point::new(6, 39)]);
    }

    #[test]
    fn decode_failure_names_the_index() {
        let case = RawCase {
            n: 1,
            k: 1,
            entries: vec![entry(3, "10", "z")],
        };
        let err = process_case(&case, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, CaseError::Decode { index: 3, .. }));
    }

    #[test]
    fn k_is_passed_through() {
        let case = RawCase {
            n: 1,
            k: 42,
            entries: vec![entry(5, "10", "32")],
        };
        let report = process_case(&case, &SolverConfig::default()).unwrap();
        assert_eq!(report.k, 42);
        assert_eq!(report.result.constant, 7);
    }

    #[test]
    fn empty_case_fails_in_solver() {
        let case = RawCase {
            n: 0,
            k: 0,
            entries: Vec::new(),
        };
        assert!(matches!(
            process_case(&case, &SolverConfig::default()),
            Err(CaseError::Solve(SolveError::EmptyInput))
        ));
    }
}
