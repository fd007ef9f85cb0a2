use tracing::{debug, error, info};

use shared_gateway::{ApiGateway, SessionHandle};
use shared_models::report::MedicalReport;
use shared_utils::{Outcome, ViewScope};

use crate::models::{ReportCard, ReportsRender};
use crate::prompt::Prompt;
use crate::services::report::ReportService;
use crate::upload::UploadReportForm;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this report?";
pub const DELETE_FAILED: &str = "Failed to delete report";

/// Report list screen. List order is whatever the server returned.
pub struct ReportsView {
    service: ReportService,
    session: SessionHandle,
    scope: ViewScope,
    reports: Vec<MedicalReport>,
    loading: bool,
    show_form: bool,
}

impl ReportsView {
    pub fn new(gateway: ApiGateway) -> Self {
        Self {
            session: gateway.session().clone(),
            service: ReportService::new(gateway),
            scope: ViewScope::new(),
            reports: Vec::new(),
            loading: true,
            show_form: false,
        }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub fn unmount(&self) {
        self.scope.close();
    }

    pub fn reports(&self) -> &[MedicalReport] {
        &self.reports
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show_form(&self) -> bool {
        self.show_form
    }

    pub fn toggle_form(&mut self) {
        self.show_form = !self.show_form;
    }

    /// Upload form living inside this view's lifetime.
    pub fn upload_form(&self) -> UploadReportForm {
        UploadReportForm::with_scope(self.service.gateway().clone(), self.scope.child())
    }

    /// Called once the upload form reports success.
    pub async fn upload_finished(&mut self) -> Outcome {
        self.show_form = false;
        self.fetch().await
    }

    /// Loads the list. Failures are logged only; the current list stays as it was.
    pub async fn fetch(&mut self) -> Outcome {
        if !self.session.is_authenticated() {
            debug!("No session, reports not fetched");
            return Outcome::NoSession;
        }

        let result = match self.scope.run(self.service.get_reports()).await {
            Some(result) => result,
            None => return Outcome::Cancelled,
        };

        self.loading = false;

        match result {
            Ok(reports) => {
                debug!("Loaded {} reports", reports.len());
                self.reports = reports;
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to fetch reports: {}", e);
                Outcome::Failed
            }
        }
    }

    /// Deletes after confirmation, then reloads. A failed delete raises an alert.
    pub async fn delete(&mut self, report_id: &str, prompt: &dyn Prompt) -> Outcome {
        if !self.session.is_authenticated() {
            return Outcome::NoSession;
        }
        if !prompt.confirm(DELETE_CONFIRMATION) {
            debug!("Deletion of report {} declined", report_id);
            return Outcome::Declined;
        }

        let result = match self.scope.run(self.service.delete_report(report_id)).await {
            Some(result) => result,
            None => return Outcome::Cancelled,
        };

        match result {
            Ok(()) => {
                info!("Deleted report {}", report_id);
                match self.fetch().await {
                    Outcome::Cancelled => Outcome::Cancelled,
                    _ => Outcome::Applied,
                }
            }
            Err(e) => {
                error!("Failed to delete report {}: {}", report_id, e);
                prompt.alert(DELETE_FAILED);
                Outcome::Failed
            }
        }
    }

    pub fn render(&self) -> ReportsRender {
        if !self.session.is_authenticated() {
            return ReportsRender::Placeholder;
        }
        if self.loading {
            return ReportsRender::Loading;
        }
        if self.reports.is_empty() {
            return ReportsRender::Empty;
        }

        ReportsRender::List(self.reports.iter().map(|report| self.card(report)).collect())
    }

    fn card(&self, report: &MedicalReport) -> ReportCard {
        ReportCard {
            id: report.id.clone(),
            title: report.display_title(),
            report_type: report.report_type.clone(),
            report_date: report.report_date,
            description: report.description.clone(),
            file_url: report
                .file_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| self.service.file_url(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::MockPrompt;
    use shared_utils::test_utils::{TestConfig, TestUser};

    // Nothing listens on this port; any request would fail with a transport error.
    fn offline_view(signed_in: bool) -> ReportsView {
        let config = TestConfig::with_base_url("http://127.0.0.1:9").to_client_config();
        let session = SessionHandle::in_memory();
        if signed_in {
            session.login(TestUser::default().to_session("t")).unwrap();
        }
        ReportsView::new(ApiGateway::new(&config, session))
    }

    #[tokio::test]
    async fn test_declined_confirmation_skips_delete() {
        let mut prompt = MockPrompt::new();
        prompt
            .expect_confirm()
            .withf(|message| message == DELETE_CONFIRMATION)
            .times(1)
            .return_const(false);
        prompt.expect_alert().times(0);

        let mut view = offline_view(true);

        assert_eq!(view.delete("r1", &prompt).await, Outcome::Declined);
    }

    #[tokio::test]
    async fn test_failed_delete_alerts_once() {
        let mut prompt = MockPrompt::new();
        prompt.expect_confirm().return_const(true);
        prompt
            .expect_alert()
            .withf(|message| message == DELETE_FAILED)
            .times(1)
            .return_const(());

        let mut view = offline_view(true);

        assert_eq!(view.delete("r1", &prompt).await, Outcome::Failed);
    }

    #[tokio::test]
    async fn test_without_session_nothing_is_asked() {
        let mut prompt = MockPrompt::new();
        prompt.expect_confirm().times(0);

        let mut view = offline_view(false);

        assert_eq!(view.delete("r1", &prompt).await, Outcome::NoSession);
        assert_eq!(view.fetch().await, Outcome::NoSession);
        assert_eq!(view.render(), ReportsRender::Placeholder);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_silent_and_keeps_list_empty() {
        let mut view = offline_view(true);
        assert_eq!(view.render(), ReportsRender::Loading);

        assert_eq!(view.fetch().await, Outcome::Failed);
        assert_eq!(view.render(), ReportsRender::Empty);
    }

    #[test]
    fn test_toggle_form() {
        let mut view = offline_view(true);
        assert!(!view.show_form());

        view.toggle_form();
        assert!(view.show_form());

        view.toggle_form();
        assert!(!view.show_form());
    }
}
