use tracing::error;

use shared_gateway::{ApiGateway, SessionHandle};
use shared_models::insights::ChatMessage;
use shared_utils::{Outcome, ViewScope};

use crate::services::insights::InsightsService;
use crate::text::reply_text;

/// Conversation with the health assistant. History is kept only for the life of the view.
pub struct AssistantChat {
    service: InsightsService,
    session: SessionHandle,
    scope: ViewScope,
    history: Vec<ChatMessage>,
    loading: bool,
    error: Option<String>,
}

impl AssistantChat {
    pub fn new(gateway: ApiGateway) -> Self {
        Self {
            session: gateway.session().clone(),
            service: InsightsService::new(gateway),
            scope: ViewScope::new(),
            history: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn unmount(&self) {
        self.scope.close();
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.history
            .last()
            .filter(|message| message.role == "assistant")
            .map(|message| message.content.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn send(&mut self, message: &str) -> Outcome {
        if self.loading {
            return Outcome::Busy;
        }
        if !self.session.is_authenticated() {
            return Outcome::NoSession;
        }

        let message = message.trim();
        if message.is_empty() {
            return Outcome::Declined;
        }

        self.loading = true;
        self.error = None;

        let result = match self.scope.run(self.service.chat(message, &self.history)).await {
            Some(result) => result,
            None => return Outcome::Cancelled,
        };

        self.loading = false;

        match result {
            Ok(data) => {
                self.history.push(ChatMessage::user(message));
                self.history.push(ChatMessage::assistant(reply_text(&data)));
                Outcome::Applied
            }
            Err(e) => {
                error!("Chat request failed: {}", e);
                self.error = Some(format!("Failed to reach assistant: {}", e.detail_or_message()));
                Outcome::Failed
            }
        }
    }
}
