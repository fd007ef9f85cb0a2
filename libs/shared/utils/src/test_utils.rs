use std::path::PathBuf;

use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::ClientConfig;
use shared_models::auth::{Session, SessionUser};

pub struct TestConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            session_file: std::env::temp_dir().join(format!("carelog-test-{}.json", Uuid::new_v4())),
        }
    }
}

impl TestConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::with_base_url(&self.api_base_url, self.session_file.clone())
    }
}

#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            full_name: "Test Patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, full_name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
        }
    }

    pub fn to_user(&self) -> SessionUser {
        SessionUser {
            full_name: self.full_name.clone(),
            email: Some(self.email.clone()),
            id: Some(self.id.clone()),
        }
    }

    pub fn to_session(&self, token: &str) -> Session {
        Session {
            user: self.to_user(),
            token: token.to_string(),
        }
    }
}

pub struct MockApiResponses;

impl MockApiResponses {
    pub fn login_response(user: &TestUser, token: &str) -> Value {
        json!({
            "user": {
                "id": user.id,
                "email": user.email,
                "full_name": user.full_name
            },
            "access_token": token,
            "token_type": "bearer"
        })
    }

    pub fn health_log_response(date: &str) -> Value {
        json!({
            "id": Uuid::new_v4().to_string(),
            "date": date,
            "symptoms": ["headache"],
            "mood": 6,
            "sleep_hours": 7.5,
            "pain_level": 2,
            "temperature": 98.6,
            "blood_pressure_systolic": 118,
            "blood_pressure_diastolic": 76,
            "notes": null
        })
    }

    pub fn health_logs(count: usize) -> Value {
        Value::Array(
            (0..count)
                .map(|day| Self::health_log_response(&format!("2024-01-{:02}", day + 1)))
                .collect(),
        )
    }

    pub fn report_response(id: &str, title: &str, file_name: Option<&str>) -> Value {
        json!({
            "id": id,
            "title": title,
            "report_type": "lab_result",
            "report_date": "2024-01-15",
            "description": "Routine check",
            "file_name": file_name
        })
    }

    pub fn legacy_report_response(id: &str, report_type: &str, filename: &str) -> Value {
        json!({
            "_id": id,
            "report_type": report_type,
            "report_date": "2023-11-02T09:30:00",
            "notes": "Imported from the previous schema",
            "filename": filename
        })
    }

    pub fn reports(count: usize) -> Value {
        Value::Array(
            (0..count)
                .map(|n| Self::report_response(&format!("report-{}", n + 1), &format!("Report {}", n + 1), None))
                .collect(),
        )
    }

    pub fn insights_response(text: &str, days: u64) -> Value {
        json!({
            "insights": text,
            "data_points_analyzed": days
        })
    }

    pub fn error_response(detail: &str) -> Value {
        json!({ "detail": detail })
    }
}
