pub mod draft;
pub mod form;
pub mod services;

pub use draft::{DraftError, DraftField, HealthLogDraft};
pub use form::HealthLogForm;

pub mod api {
    pub use crate::services::log::LogService;
}
