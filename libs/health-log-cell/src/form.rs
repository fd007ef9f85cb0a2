use chrono::{Local, NaiveDate};
use tracing::{debug, error, info};

use shared_gateway::{ApiGateway, SessionHandle};
use shared_models::health_log::Symptom;
use shared_utils::{Outcome, ViewScope};

use crate::draft::{DraftError, DraftField, HealthLogDraft};
use crate::services::log::LogService;

type SuccessCallback = Box<dyn FnMut() + Send>;

/// Daily health log entry form.
pub struct HealthLogForm {
    service: LogService,
    session: SessionHandle,
    scope: ViewScope,
    draft: HealthLogDraft,
    loading: bool,
    error: Option<String>,
    on_success: Option<SuccessCallback>,
}

impl HealthLogForm {
    pub fn new(gateway: ApiGateway) -> Self {
        Self::with_scope(gateway, ViewScope::new())
    }

    /// Form mounted inside a parent view's lifetime.
    pub fn with_scope(gateway: ApiGateway, scope: ViewScope) -> Self {
        Self {
            session: gateway.session().clone(),
            service: LogService::new(gateway),
            scope,
            draft: HealthLogDraft::default(),
            loading: false,
            error: None,
            on_success: None,
        }
    }

    pub fn on_success(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
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

    pub fn draft(&self) -> &HealthLogDraft {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Submit control is disabled while a save is in flight.
    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle_symptom(&mut self, symptom: Symptom) {
        self.draft = self.draft.toggle_symptom(symptom);
    }

    pub fn update(&mut self, field: DraftField, input: &str) -> Result<(), DraftError> {
        self.draft = self.draft.update(field, input)?;
        Ok(())
    }

    pub async fn submit(&mut self) -> Outcome {
        self.submit_for(Local::now().date_naive()).await
    }

    /// Submits the draft stamped with `date`.
    pub async fn submit_for(&mut self, date: NaiveDate) -> Outcome {
        if self.loading {
            return Outcome::Busy;
        }
        if !self.session.is_authenticated() {
            debug!("No session, health log not submitted");
            return Outcome::NoSession;
        }

        self.loading = true;
        self.error = None;

        let entry = self.draft.to_entry(date);
        let result = match self.scope.run(self.service.create_log(&entry)).await {
            Some(result) => result,
            None => return Outcome::Cancelled,
        };

        self.loading = false;

        match result {
            Ok(_) => {
                info!("Health log saved for {}", date);
                if let Some(callback) = self.on_success.as_mut() {
                    callback();
                }
                self.draft = HealthLogDraft::default();
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to save health log: {}", e);
                self.error = Some(format!("Failed to save log: {}", e.detail_or_message()));
                Outcome::Failed
            }
        }
    }
}
