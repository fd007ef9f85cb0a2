use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::serde_helpers::lenient_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Headache,
    Fever,
    Cough,
    Fatigue,
    Nausea,
    BackPain,
    JointPain,
    Dizziness,
}

impl Symptom {
    pub const ALL: [Symptom; 8] = [
        Symptom::Headache,
        Symptom::Fever,
        Symptom::Cough,
        Symptom::Fatigue,
        Symptom::Nausea,
        Symptom::BackPain,
        Symptom::JointPain,
        Symptom::Dizziness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symptom::Headache => "headache",
            Symptom::Fever => "fever",
            Symptom::Cough => "cough",
            Symptom::Fatigue => "fatigue",
            Symptom::Nausea => "nausea",
            Symptom::BackPain => "back_pain",
            Symptom::JointPain => "joint_pain",
            Symptom::Dizziness => "dizziness",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown symptom: {0}")]
pub struct UnknownSymptom(pub String);

impl FromStr for Symptom {
    type Err = UnknownSymptom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Symptom::ALL
            .into_iter()
            .find(|symptom| symptom.as_str() == normalized)
            .ok_or_else(|| UnknownSymptom(s.to_string()))
    }
}

/// A day's observation as sent to `POST /api/logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLogEntry {
    pub date: NaiveDate,
    pub symptoms: BTreeSet<Symptom>,
    pub mood: i32,
    pub sleep_hours: f64,
    pub pain_level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure_systolic: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure_diastolic: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A stored log as returned by `GET /api/logs`.
///
/// The backend has shipped several shapes for this record, so everything is optional
/// and mood/pain are kept as raw JSON (numbers on newer servers, labels on older ones).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthLogRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default, alias = "log_date", deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub mood: Option<Value>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub pain_level: Option<Value>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub blood_pressure_systolic: Option<i32>,
    #[serde(default)]
    pub blood_pressure_diastolic: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl HealthLogRecord {
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if let Some(mood) = &self.mood {
            parts.push(format!("mood {}", display_value(mood)));
        }
        if let Some(sleep) = self.sleep_hours {
            parts.push(format!("sleep {}h", sleep));
        }
        if let Some(pain) = &self.pain_level {
            parts.push(format!("pain {}", display_value(pain)));
        }
        if let Some(temp) = self.temperature {
            parts.push(format!("temp {}°F", temp));
        }
        if let (Some(sys), Some(dia)) = (self.blood_pressure_systolic, self.blood_pressure_diastolic) {
            parts.push(format!("BP {}/{}", sys, dia));
        }
        if !self.symptoms.is_empty() {
            parts.push(format!("symptoms: {}", self.symptoms.join(", ")));
        }

        parts.join(" | ")
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symptom_parsing_accepts_display_forms() {
        assert_eq!("back_pain".parse::<Symptom>(), Ok(Symptom::BackPain));
        assert_eq!("Joint Pain".parse::<Symptom>(), Ok(Symptom::JointPain));
        assert_eq!("dizziness".parse::<Symptom>(), Ok(Symptom::Dizziness));
        assert!("sneezing".parse::<Symptom>().is_err());
    }

    #[test]
    fn test_entry_omits_empty_optionals() {
        let entry = HealthLogEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            symptoms: [Symptom::Cough, Symptom::Headache].into_iter().collect(),
            mood: 5,
            sleep_hours: 8.0,
            pain_level: 0,
            temperature: None,
            blood_pressure_systolic: Some(120),
            blood_pressure_diastolic: None,
            notes: None,
        };

        let body = serde_json::to_value(&entry).unwrap();

        assert_eq!(body["date"], "2024-03-09");
        assert_eq!(body["symptoms"], json!(["headache", "cough"]));
        assert_eq!(body["blood_pressure_systolic"], 120);
        assert!(body.get("temperature").is_none());
        assert!(body.get("notes").is_none());
    }

    #[test]
    fn test_record_accepts_legacy_backend_shape() {
        let record: HealthLogRecord = serde_json::from_value(json!({
            "_id": "abc",
            "log_date": "2024-03-09T08:15:00",
            "mood": "good",
            "sleep_hours": 7.5,
            "pain_level": 2
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("abc"));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 9));
        assert_eq!(record.summary(), "mood good | sleep 7.5h | pain 2");
    }
}
