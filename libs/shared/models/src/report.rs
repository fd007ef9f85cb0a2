use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{lenient_date, null_as_default, string_or_number};

/// Uploaded medical document.
///
/// `title`/`file_name` are the canonical field names. Older servers sent
/// `report_type` only and `filename`; those are still accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalReport {
    #[serde(default, alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub report_date: Option<NaiveDate>,
    #[serde(default, alias = "notes")]
    pub description: Option<String>,
    #[serde(default, alias = "filename")]
    pub file_name: Option<String>,
}

impl MedicalReport {
    pub fn display_title(&self) -> String {
        if !self.title.trim().is_empty() {
            return self.title.clone();
        }
        match &self.report_type {
            Some(kind) if !kind.is_empty() => kind.replace('_', " "),
            _ => "Untitled report".to_string(),
        }
    }
}
