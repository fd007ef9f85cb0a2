use serde_json::Value;
use tracing::debug;

use shared_gateway::ApiGateway;
use shared_models::insights::{ChatMessage, ChatRequest, Severity, SleepAnalysis, SymptomAdviceRequest};
use shared_models::ApiError;

pub const DEFAULT_INSIGHT_DAYS: u32 = 30;

pub struct InsightsService {
    gateway: ApiGateway,
}

impl InsightsService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn get_insights(&self, days: u32) -> Result<Value, ApiError> {
        debug!("Requesting AI insights over {} days", days);

        self.gateway.get(&format!("/api/ai/insights?days={}", days)).await
    }

    pub async fn get_symptom_advice(&self, symptom: &str, severity: Severity) -> Result<Value, ApiError> {
        debug!("Requesting advice for {} ({})", symptom, severity);

        let request = SymptomAdviceRequest {
            symptom: symptom.to_string(),
            severity,
        };
        self.gateway.post("/api/ai/symptom-advice", &request).await
    }

    pub async fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<Value, ApiError> {
        debug!("Sending chat message ({} earlier turns)", history.len());

        let request = ChatRequest {
            message: message.to_string(),
            conversation_history: (!history.is_empty()).then(|| history.to_vec()),
        };
        self.gateway.post("/api/ai/chat", &request).await
    }

    pub async fn get_sleep_analysis(&self) -> Result<SleepAnalysis, ApiError> {
        debug!("Requesting sleep analysis");

        self.gateway.get("/api/ai/sleep-analysis").await
    }
}
