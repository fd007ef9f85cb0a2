use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;

use shared_gateway::ApiGateway;
use shared_models::report::MedicalReport;
use shared_models::ApiError;

use crate::models::ReportUpload;

pub struct ReportService {
    gateway: ApiGateway,
}

impl ReportService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn get_reports(&self) -> Result<Vec<MedicalReport>, ApiError> {
        debug!("Fetching reports");

        self.gateway.get("/api/reports").await
    }

    pub async fn delete_report(&self, report_id: &str) -> Result<(), ApiError> {
        debug!("Deleting report: {}", report_id);

        let path = format!("/api/reports/{}", report_id);
        let _: Value = self.gateway.delete(&path).await?;

        Ok(())
    }

    pub async fn upload_report(&self, upload: ReportUpload) -> Result<Value, ApiError> {
        debug!("Uploading report '{}' ({} bytes)", upload.title, upload.content.len());

        let mime = mime_guess::from_path(&upload.file_name)
            .first_or_octet_stream()
            .to_string();

        let file_part = Part::bytes(upload.content)
            .file_name(upload.file_name)
            .mime_str(&mime)
            .map_err(|e| ApiError::Malformed(format!("Invalid content type {}: {}", mime, e)))?;

        let mut form = Form::new().text("title", upload.title);

        if let Some(report_type) = upload.report_type {
            form = form.text("report_type", report_type);
        }
        if let Some(report_date) = upload.report_date {
            form = form.text("report_date", report_date.format("%Y-%m-%d").to_string());
        }
        if let Some(description) = upload.description {
            form = form.text("description", description);
        }

        self.gateway
            .post_multipart("/api/reports/upload", form.part("file", file_part))
            .await
    }

    /// Link to a stored attachment.
    pub fn file_url(&self, file_name: &str) -> String {
        self.gateway.public_file_url(file_name)
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }
}
