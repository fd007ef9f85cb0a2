pub mod chat;
pub mod services;
pub mod text;
pub mod view;

pub use chat::AssistantChat;
pub use view::InsightsView;

pub mod api {
    pub use crate::services::insights::InsightsService;
}
