//! Case resource returned by the `Case` endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Numeric identifier of a case.
pub type CaseID = i64;

/// A case record as served by the case collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: CaseID,

    /// Short case reference (e.g. "C123"), at most 10 characters.
    pub reference: String,

    /// Display name, at most 80 characters.
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Working folder for the case, at most 260 characters.
    #[serde(default)]
    pub folder: Option<String>,

    /// Date the case was instructed. Sent without a timezone.
    pub instruction_date: NaiveDateTime,
}
