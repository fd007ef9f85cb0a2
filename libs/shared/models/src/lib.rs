pub mod auth;
pub mod error;
pub mod health_log;
pub mod insights;
pub mod report;

mod serde_helpers;

pub use error::{ApiError, ErrorKind};
