use serde_json::Value;
use thiserror::Error;

/// Failure of a single backend round trip.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request failed with status code {status}")]
    Server { status: u16, detail: Option<String> },

    #[error("Unexpected response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Server,
    Malformed,
}

impl ApiError {
    /// Builds a server error from the raw response body, pulling out `detail` if present.
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Server {
            status,
            detail: extract_detail(body),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Malformed(_) => ErrorKind::Malformed,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Server detail if there is one, otherwise `fallback`.
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    /// Server detail if there is one, otherwise this error's own message.
    pub fn detail_or_message(&self) -> String {
        match self.detail() {
            Some(detail) => detail.to_string(),
            None => self.to_string(),
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let detail = value.get("detail").or_else(|| value.get("message"))?;

    match detail {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        // FastAPI validation errors arrive as a list of objects
        other => Some(other.to_string()),
    }
}
