pub mod view;

pub use view::{DashboardRender, DashboardStats, DashboardView};
