//! The bridge between the remote analysis service and the journal.
//!
//! A photo upload either yields a fully-populated [`AnalysisResult`] or one
//! of the [`AnalysisError`] classes; nothing in between ever reaches the
//! journal, so no partial entry can be persisted.

use crate::entry::Entry;
use crate::journal::Journal;
use serde::Deserialize;
use std::fmt;

/// Marker value the service puts in the `response` field on success.
const RESPONSE_OK: &str = "OK";

/// The service's response as it arrives on the wire, before validation.
///
/// Every field is optional here; [`AnalysisResult::from_raw`] decides what
/// is actually acceptable.
#[derive(Debug, Deserialize)]
pub struct RawAnalysisResponse {
    pub response: Option<String>,
    pub foodname: Option<String>,
    pub carbohydrates: Option<f64>,
    pub fats: Option<f64>,
    pub proteins: Option<f64>,
    pub kcal: Option<f64>,
}

/// A validated nutrition estimate, ready to become a journal entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub food_name: String,
    pub carbohydrates: f64,
    pub fats: f64,
    pub proteins: f64,
    pub kcal: f64,
}

/// Why an upload produced no journal entry.
///
/// Both classes are surfaced to the user, who decides whether to retry or
/// discard the captured photo.
#[derive(Debug)]
pub enum AnalysisError {
    /// The service answered, but the payload is unusable: missing fields,
    /// a non-`"OK"` marker, a negative estimate, or an unparseable body.
    Malformed { reason: String },
    /// The service could not be reached, timed out, or returned a non-2xx
    /// status.
    Transport { error: anyhow::Error },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Malformed { reason } => {
                write!(f, "analysis result unusable: {reason}")
            }
            AnalysisError::Transport { error } => {
                write!(f, "could not reach analysis service: {error}")
            }
        }
    }
}

impl AnalysisError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        AnalysisError::Malformed {
            reason: reason.into(),
        }
    }
}

impl AnalysisResult {
    /// Validates a wire response into a usable result.
    ///
    /// Rejects anything missing a field, carrying a non-`"OK"` marker, or
    /// reporting a negative gram/calorie value.
    pub fn from_raw(raw: RawAnalysisResponse) -> Result<Self, AnalysisError> {
        match raw.response.as_deref() {
            Some(RESPONSE_OK) => {}
            Some(other) => {
                return Err(AnalysisError::malformed(format!(
                    "service answered {other:?} instead of \"OK\""
                )));
            }
            None => return Err(AnalysisError::malformed("missing response marker")),
        }

        let food_name = raw
            .foodname
            .ok_or_else(|| AnalysisError::malformed("missing foodname"))?;
        let carbohydrates = require_field(raw.carbohydrates, "carbohydrates")?;
        let fats = require_field(raw.fats, "fats")?;
        let proteins = require_field(raw.proteins, "proteins")?;
        let kcal = require_field(raw.kcal, "kcal")?;

        Ok(Self {
            food_name,
            carbohydrates,
            fats,
            proteins,
            kcal,
        })
    }

    /// Parses and validates a raw JSON response body.
    pub fn parse_body(body: &str) -> Result<Self, AnalysisError> {
        let raw: RawAnalysisResponse = serde_json::from_str(body)
            .map_err(|e| AnalysisError::malformed(format!("unparseable response body: {e}")))?;
        Self::from_raw(raw)
    }
}

fn require_field(value: Option<f64>, name: &str) -> Result<f64, AnalysisError> {
    let value = value.ok_or_else(|| AnalysisError::malformed(format!("missing {name}")))?;
    if value < 0.0 {
        return Err(AnalysisError::malformed(format!("negative {name}: {value}")));
    }
    Ok(value)
}

/// Records a validated analysis result as a new journal entry.
///
/// The entry is constructed atomically from the result; `date_added` is
/// stamped by the append itself. Returns the appended entry.
pub async fn record_analysis<'j>(journal: &'j mut Journal, result: AnalysisResult) -> &'j Entry {
    let entry = Entry {
        food_name: result.food_name,
        carbohydrates: result.carbohydrates,
        fats: result.fats,
        proteins: result.proteins,
        kcal: result.kcal,
        date_added: None,
    };
    journal.append(entry).await
}
