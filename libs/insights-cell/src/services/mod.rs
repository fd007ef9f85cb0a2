pub mod insights;

pub use insights::InsightsService;
