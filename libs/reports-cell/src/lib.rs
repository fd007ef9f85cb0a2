pub mod models;
pub mod prompt;
pub mod services;
pub mod upload;
pub mod view;

pub use models::{ReportCard, ReportUpload, ReportsRender};
pub use prompt::Prompt;
pub use upload::{UploadError, UploadReportForm};
pub use view::ReportsView;

pub mod api {
    pub use crate::services::report::ReportService;
}
