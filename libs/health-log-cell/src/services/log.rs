use serde_json::Value;
use tracing::debug;

use shared_gateway::ApiGateway;
use shared_models::health_log::{HealthLogEntry, HealthLogRecord};
use shared_models::ApiError;

pub struct LogService {
    gateway: ApiGateway,
}

impl LogService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn create_log(&self, entry: &HealthLogEntry) -> Result<Value, ApiError> {
        debug!("Creating health log for {}", entry.date);

        self.gateway.post("/api/logs", entry).await
    }

    pub async fn get_logs(&self) -> Result<Vec<HealthLogRecord>, ApiError> {
        debug!("Fetching health logs");

        self.gateway.get("/api/logs").await
    }
}
