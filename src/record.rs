//! Test-case records
//!
//! A record is a JSON object with a `keys` entry holding `n` and `k`, plus
//! one entry per sample keyed by its decimal index:
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "6": { "base": "4", "value": "213" }
//! }
//! ```
//!
//! Indices may have gaps. Entries come back sorted by index.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while reading a record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Record file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Record is not valid JSON or not an object.
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level `keys` entry is absent.
    #[error("record has no \"keys\" entry")]
    MissingKeys,

    /// An entry could not be interpreted.
    #[error("invalid entry \"{key}\": {reason}")]
    InvalidEntry {
        /// Offending key.
        key: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// One undecoded sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntry {
    /// Positive index, used as x.
    pub index: u32,
    /// Decimal radix string, e.g. `"16"`.
    pub base: String,
    /// Digit string in that radix.
    pub value: String,
}

/// Undecoded test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawCase {
    /// Declared number of samples.
    pub n: u32,
    /// Passed through untouched.
    pub k: u32,
    /// Samples sorted by index.
    pub entries: Vec<RawEntry>,
}

/// Record reading options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordOptions {
    /// Drop entries with an index above this.
    pub max_index: Option<u32>,
}

#[derive(Deserialize)]
struct Keys {
    n: u32,
    k: u32,
}

#[derive(Deserialize)]
struct EntryFields {
    base: String,
    value: String,
}

/// Read and parse a record file.
pub fn read_case<P: AsRef<Path>>(path: P, options: &RecordOptions) -> Result<RawCase, RecordError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_case(&contents, options)
}

/// Parse a record from its JSON text.
pub fn parse_case(json: &str, options: &RecordOptions) -> Result<RawCase, RecordError> {
    let object: Map<String, Value> = serde_json::from_str(json)?;

    let keys = object.get("keys").ok_or(RecordError::MissingKeys)?;
    let Keys { n, k } =
        Keys::deserialize(keys).map_err(|err| invalid("keys", err.to_string()))?;
    debug!(n, k, "parsed record keys");

    let mut entries = Vec::new();
    for (key, value) in &object {
        // Only decimal keys are samples.
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let index: u32 = key
            .parse()
            .map_err(|_| invalid(key, "index out of range".to_string()))?;
        if index == 0 {
            return Err(invalid(key, "index must be positive".to_string()));
        }
        // "007" would collide with "7".
        if key.starts_with('0') {
            return Err(invalid(key, "index has leading zeros".to_string()));
        }
        if options.max_index.is_some_and(|max| index > max) {
            debug!(index, "entry beyond scan limit, skipped");
            continue;
        }
        let fields =
            EntryFields::deserialize(value).map_err(|err| invalid(key, err.to_string()))?;
        entries.push(RawEntry {
            index,
            base: fields.base,
            value: fields.value,
        });
    }
    entries.sort_by_key(|entry| entry.index);

    if entries.len() != n as usize {
        warn!(declared = n, found = entries.len(), "entry count differs from n");
    }

    Ok(RawCase { n, k, entries })
}

fn invalid(key: &str, reason: String) -> RecordError {
    RecordError::InvalidEntry {
        key: key.to_string(),
        reason,
    }
}
