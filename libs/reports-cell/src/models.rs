use chrono::NaiveDate;

/// Metadata and file contents for a new report.
#[derive(Debug, Clone)]
pub struct ReportUpload {
    pub title: String,
    pub report_type: Option<String>,
    pub report_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub file_name: String,
    pub content: Vec<u8>,
}

/// One report as shown in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    pub id: String,
    pub title: String,
    pub report_type: Option<String>,
    pub report_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Present only when the report has a stored file.
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportsRender {
    Placeholder,
    Loading,
    Empty,
    List(Vec<ReportCard>),
}
