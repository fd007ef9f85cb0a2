use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, error, info};

use shared_gateway::{ApiGateway, SessionHandle};
use shared_utils::{Outcome, ViewScope};

use crate::models::ReportUpload;
use crate::services::report::ReportService;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Report title is required")]
    MissingTitle,

    #[error("Choose a file to upload")]
    MissingFile,

    #[error("Could not read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Form for attaching a new medical report.
pub struct UploadReportForm {
    service: ReportService,
    session: SessionHandle,
    scope: ViewScope,
    pub title: String,
    pub report_type: String,
    pub report_date: Option<NaiveDate>,
    pub description: String,
    pub file: Option<PathBuf>,
    loading: bool,
    error: Option<String>,
}

impl UploadReportForm {
    pub fn new(gateway: ApiGateway) -> Self {
        Self::with_scope(gateway, ViewScope::new())
    }

    pub fn with_scope(gateway: ApiGateway, scope: ViewScope) -> Self {
        Self {
            session: gateway.session().clone(),
            service: ReportService::new(gateway),
            scope,
            title: String::new(),
            report_type: String::new(),
            report_date: None,
            description: String::new(),
            file: None,
            loading: false,
            error: None,
        }
    }

    pub fn unmount(&self) {
        self.scope.close();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    async fn prepare(&self) -> Result<ReportUpload, UploadError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UploadError::MissingTitle);
        }
        let path = self.file.clone().ok_or(UploadError::MissingFile)?;

        let content = tokio::fs::read(&path)
            .await
            .map_err(|source| UploadError::ReadFile { path: path.clone(), source })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());

        Ok(ReportUpload {
            title: title.to_string(),
            report_type: non_empty(&self.report_type),
            report_date: self.report_date,
            description: non_empty(&self.description),
            file_name,
            content,
        })
    }

    /// Validates, reads the file and uploads it. On success the caller hides the form.
    pub async fn submit(&mut self) -> Outcome {
        if self.loading {
            return Outcome::Busy;
        }
        if !self.session.is_authenticated() {
            return Outcome::NoSession;
        }

        self.error = None;

        let upload = match self.prepare().await {
            Ok(upload) => upload,
            Err(e) => {
                debug!("Upload not sent: {}", e);
                self.error = Some(e.to_string());
                return Outcome::Failed;
            }
        };

        self.loading = true;

        let result = match self.scope.run(self.service.upload_report(upload)).await {
            Some(result) => result,
            None => return Outcome::Cancelled,
        };

        self.loading = false;

        match result {
            Ok(_) => {
                info!("Report '{}' uploaded", self.title.trim());
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to upload report: {}", e);
                self.error = Some(format!("Failed to upload report: {}", e.detail_or_message()));
                Outcome::Failed
            }
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
