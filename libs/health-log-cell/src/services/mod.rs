pub mod log;

pub use log::LogService;
