use serde_json::Value;
use tracing::{debug, error};

use shared_gateway::{ApiGateway, SessionHandle};
use shared_utils::{Outcome, ViewScope};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub logs: usize,
    pub reports: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardRender {
    Placeholder,
    Summary { user_name: String, stats: DashboardStats },
}

pub struct DashboardView {
    gateway: ApiGateway,
    session: SessionHandle,
    scope: ViewScope,
    stats: DashboardStats,
}

impl DashboardView {
    pub fn new(gateway: ApiGateway) -> Self {
        Self {
            session: gateway.session().clone(),
            gateway,
            scope: ViewScope::new(),
            stats: DashboardStats::default(),
        }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub fn unmount(&self) {
        self.scope.close();
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    /// Loads both lists at once. Each count is updated on its own; a failed list keeps its old count.
    pub async fn fetch(&mut self) -> Outcome {
        if !self.session.is_authenticated() {
            debug!("No session, dashboard not loaded");
            return Outcome::NoSession;
        }

        let gateway = &self.gateway;
        let both = async {
            tokio::join!(
                gateway.get::<Vec<Value>>("/api/logs"),
                gateway.get::<Vec<Value>>("/api/reports"),
            )
        };

        let (logs, reports) = match self.scope.run(both).await {
            Some(results) => results,
            None => return Outcome::Cancelled,
        };

        let mut outcome = Outcome::Applied;

        match logs {
            Ok(logs) => self.stats.logs = logs.len(),
            Err(e) => {
                error!("Failed to fetch health logs for dashboard: {}", e);
                outcome = Outcome::Failed;
            }
        }

        match reports {
            Ok(reports) => self.stats.reports = reports.len(),
            Err(e) => {
                error!("Failed to fetch reports for dashboard: {}", e);
                outcome = Outcome::Failed;
            }
        }

        outcome
    }

    pub fn render(&self) -> DashboardRender {
        match self.session.user() {
            None => DashboardRender::Placeholder,
            Some(user) => DashboardRender::Summary {
                user_name: user.full_name,
                stats: self.stats,
            },
        }
    }
}
