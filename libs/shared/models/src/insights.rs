use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The parts of an insights payload the client displays.
///
/// Read field by field from the JSON: servers send `logs_analyzed`, `data_points_analyzed`
/// or both, and counts may arrive as floats.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsightsResponse {
    pub insights: Option<String>,
    pub data_points_analyzed: Option<u64>,
}

impl InsightsResponse {
    pub fn from_payload(data: &Value) -> Self {
        let insights = data
            .get("insights")
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string);

        let data_points_analyzed = ["data_points_analyzed", "logs_analyzed"]
            .iter()
            .filter_map(|key| data.get(*key).and_then(count))
            .find(|days| *days > 0);

        Self {
            insights,
            data_points_analyzed,
        }
    }
}

fn count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 1.0)
            .map(|n| n as u64)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Mild,
    Moderate,
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        };
        f.write_str(label)
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            other => Err(format!("severity must be mild, moderate or severe, got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomAdviceRequest {
    pub symptom: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepAnalysis {
    #[serde(default)]
    pub average_sleep_hours: Option<f64>,
    #[serde(default)]
    pub average_sleep_quality: Option<f64>,
    #[serde(default)]
    pub total_nights_tracked: Option<u32>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub insights: Option<String>,
    // Present instead of the figures when no sleep data has been logged
    #[serde(default)]
    pub message: Option<String>,
}

impl SleepAnalysis {
    pub fn has_data(&self) -> bool {
        self.total_nights_tracked.unwrap_or(0) > 0
    }
}
