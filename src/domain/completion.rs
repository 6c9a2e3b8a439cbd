use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entries for the selected template, keyed by placeholder id
pub type FieldValues = BTreeMap<String, String>;

/// One successful completion, as stored in the result archive
///
/// Serialized with the field names the archive has always used:
/// `template`, `formData`, `output` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    #[serde(rename = "template")]
    pub template_id: String,
    #[serde(rename = "formData")]
    pub field_values: FieldValues,
    #[serde(rename = "output")]
    pub text: String,
    #[serde(rename = "timestamp")]
    pub produced_at: DateTime<Utc>,
}

impl CompletionResult {
    /// Creates a result stamped with the current time
    pub fn new(template_id: impl Into<String>, field_values: FieldValues, text: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            field_values,
            text: text.into(),
            produced_at: Utc::now(),
        }
    }
}
