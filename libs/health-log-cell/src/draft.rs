use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use shared_models::health_log::{HealthLogEntry, Symptom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Mood,
    SleepHours,
    PainLevel,
    Temperature,
    BloodPressureSystolic,
    BloodPressureDiastolic,
    Notes,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DraftField::Mood => "mood",
            DraftField::SleepHours => "sleep hours",
            DraftField::PainLevel => "pain level",
            DraftField::Temperature => "temperature",
            DraftField::BloodPressureSystolic => "systolic blood pressure",
            DraftField::BloodPressureDiastolic => "diastolic blood pressure",
            DraftField::Notes => "notes",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("Invalid number for {field}: '{input}'")]
    InvalidNumber { field: DraftField, input: String },
}

/// Unsubmitted health log. Every edit produces a new draft.
///
/// Values are taken as typed: mood outside 1-10 or a negative sleep figure is kept and
/// left for the backend to judge.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthLogDraft {
    symptoms: BTreeSet<Symptom>,
    mood: i32,
    sleep_hours: f64,
    pain_level: i32,
    temperature: Option<f64>,
    blood_pressure_systolic: Option<i32>,
    blood_pressure_diastolic: Option<i32>,
    notes: String,
}

impl Default for HealthLogDraft {
    fn default() -> Self {
        Self {
            symptoms: BTreeSet::new(),
            mood: 5,
            sleep_hours: 8.0,
            pain_level: 0,
            temperature: None,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            notes: String::new(),
        }
    }
}

impl HealthLogDraft {
    pub fn symptoms(&self) -> &BTreeSet<Symptom> {
        &self.symptoms
    }

    pub fn mood(&self) -> i32 {
        self.mood
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours
    }

    pub fn pain_level(&self) -> i32 {
        self.pain_level
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn blood_pressure(&self) -> (Option<i32>, Option<i32>) {
        (self.blood_pressure_systolic, self.blood_pressure_diastolic)
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn toggle_symptom(&self, symptom: Symptom) -> Self {
        let mut next = self.clone();
        if !next.symptoms.remove(&symptom) {
            next.symptoms.insert(symptom);
        }
        next
    }

    /// Replaces one field from raw input text. Blank text clears optional fields.
    pub fn update(&self, field: DraftField, input: &str) -> Result<Self, DraftError> {
        let mut next = self.clone();
        let text = input.trim();

        match field {
            DraftField::Mood => next.mood = parse_int(field, text)?,
            DraftField::SleepHours => next.sleep_hours = parse_real(field, text)?,
            DraftField::PainLevel => next.pain_level = parse_int(field, text)?,
            DraftField::Temperature => next.temperature = optional(text, |t| parse_real(field, t))?,
            DraftField::BloodPressureSystolic => {
                next.blood_pressure_systolic = optional(text, |t| parse_int(field, t))?
            }
            DraftField::BloodPressureDiastolic => {
                next.blood_pressure_diastolic = optional(text, |t| parse_int(field, t))?
            }
            DraftField::Notes => next.notes = input.to_string(),
        }

        Ok(next)
    }

    pub fn to_entry(&self, date: NaiveDate) -> HealthLogEntry {
        let notes = self.notes.trim();

        HealthLogEntry {
            date,
            symptoms: self.symptoms.clone(),
            mood: self.mood,
            sleep_hours: self.sleep_hours,
            pain_level: self.pain_level,
            temperature: self.temperature,
            blood_pressure_systolic: self.blood_pressure_systolic,
            blood_pressure_diastolic: self.blood_pressure_diastolic,
            notes: (!notes.is_empty()).then(|| self.notes.clone()),
        }
    }
}

fn parse_int(field: DraftField, text: &str) -> Result<i32, DraftError> {
    text.parse().map_err(|_| DraftError::InvalidNumber {
        field,
        input: text.to_string(),
    })
}

fn parse_real(field: DraftField, text: &str) -> Result<f64, DraftError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DraftError::InvalidNumber {
            field,
            input: text.to_string(),
        }),
    }
}

fn optional<T>(text: &str, parse: impl FnOnce(&str) -> Result<T, DraftError>) -> Result<Option<T>, DraftError> {
    if text.is_empty() {
        Ok(None)
    } else {
        parse(text).map(Some)
    }
}
