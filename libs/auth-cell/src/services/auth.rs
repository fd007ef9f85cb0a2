use async_trait::async_trait;
use tracing::debug;

use shared_gateway::ApiGateway;
use shared_models::auth::{LoginRequest, LoginResponse};
use shared_models::ApiError;

/// Exchanges credentials for a user and bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
}

pub struct AuthService {
    gateway: ApiGateway,
}

impl AuthService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Authenticator for AuthService {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        debug!("Authenticating {}", email);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.gateway.post("/api/auth/login", &request).await
    }
}
