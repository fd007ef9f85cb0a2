use serde::{Deserialize, Serialize};

use crate::serde_helpers::{null_as_default, optional_string_or_number};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "_id", deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
}

/// Authenticated user together with the bearer token issued at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: SessionUser,
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session {
            user: response.user,
            token: response.access_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_user_with_null_name_and_numeric_id() {
        let response: LoginResponse = serde_json::from_value(json!({
            "user": { "id": 42, "email": "pat@example.com", "full_name": null },
            "access_token": "t"
        }))
        .unwrap();

        assert_eq!(response.user.full_name, "");
        assert_eq!(response.user.id.as_deref(), Some("42"));
    }
}
