use tracing::{debug, error};

use shared_gateway::{ApiGateway, SessionHandle};
use shared_utils::{Outcome, ViewScope};

use crate::services::insights::{InsightsService, DEFAULT_INSIGHT_DAYS};
use crate::text::format_insight;

pub const INSIGHT_FALLBACK: &str = "Please ensure you have health logs saved.";

/// On-demand AI summary. Every `generate` call goes to the server; nothing is cached.
pub struct InsightsView {
    service: InsightsService,
    session: SessionHandle,
    scope: ViewScope,
    days: u32,
    insight: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl InsightsView {
    pub fn new(gateway: ApiGateway) -> Self {
        Self {
            session: gateway.session().clone(),
            service: InsightsService::new(gateway),
            scope: ViewScope::new(),
            days: DEFAULT_INSIGHT_DAYS,
            insight: None,
            loading: false,
            error: None,
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub fn unmount(&self) {
        self.scope.close();
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn insight(&self) -> Option<&str> {
        self.insight.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn generate(&mut self) -> Outcome {
        if self.loading {
            return Outcome::Busy;
        }
        if !self.session.is_authenticated() {
            debug!("No session, insights not requested");
            return Outcome::NoSession;
        }

        self.loading = true;
        self.error = None;
        self.insight = None;

        let result = match self.scope.run(self.service.get_insights(self.days)).await {
            Some(result) => result,
            None => return Outcome::Cancelled,
        };

        self.loading = false;

        match result {
            Ok(data) => {
                self.insight = Some(format_insight(&data));
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to generate insight: {}", e);
                self.error = Some(format!("Failed to generate insight: {}", e.detail_or(INSIGHT_FALLBACK)));
                Outcome::Failed
            }
        }
    }
}
