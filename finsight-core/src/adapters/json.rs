//! JSON activity source
//!
//! Reads activity lists exported from the backend. The payload is either
//! a bare array or a paginated envelope `{"results": [...], "next": ...}`.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::FinancialActivity;
use crate::ports::ActivitySource;

/// Activities decoded from one payload
#[derive(Debug, Default)]
pub struct DecodedPage {
    pub activities: Vec<FinancialActivity>,
    /// Records that could not be decoded (unknown type, not an object, ...)
    pub skipped: usize,
    /// Link to the next page, if the envelope had one
    pub next: Option<String>,
}

/// Decode a payload, unwrapping the `results` envelope
///
/// Individual bad records are skipped; only a payload that is neither a
/// list nor an envelope is an error.
pub fn decode_payload(payload: JsonValue) -> Result<DecodedPage> {
    let (records, next) = match payload {
        JsonValue::Array(records) => (records, None),
        JsonValue::Object(mut envelope) => {
            let next = envelope
                .get("next")
                .and_then(JsonValue::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            match envelope.remove("results") {
                Some(JsonValue::Array(records)) => (records, next),
                _ => {
                    return Err(Error::parse(
                        "Expected an activity list or an object with a `results` list",
                    ))
                }
            }
        }
        _ => {
            return Err(Error::parse(
                "Expected an activity list or an object with a `results` list",
            ))
        }
    };

    let mut page = DecodedPage {
        next,
        ..Default::default()
    };
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<FinancialActivity>(record) {
            Ok(activity) => page.activities.push(activity),
            Err(e) => {
                log::warn!("Skipping activity record #{}: {}", index, e);
                page.skipped += 1;
            }
        }
    }

    Ok(page)
}

/// Parse activities from JSON text
pub fn parse_activities(content: &str) -> Result<Vec<FinancialActivity>> {
    let payload: JsonValue = serde_json::from_str(content)?;
    Ok(decode_payload(payload)?.activities)
}

/// Parse activities from any reader (stdin, network body, ...)
pub fn read_activities<R: Read>(reader: R) -> Result<Vec<FinancialActivity>> {
    let payload: JsonValue = serde_json::from_reader(reader)?;
    Ok(decode_payload(payload)?.activities)
}

/// Activity source backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActivitySource for JsonFileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self) -> Result<Vec<FinancialActivity>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::source(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        let activities = parse_activities(&content)?;
        log::info!(
            "Loaded {} activities from {}",
            activities.len(),
            self.path.display()
        );
        Ok(activities)
    }
}
