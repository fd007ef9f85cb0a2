pub mod client;
pub mod session;

pub use client::ApiGateway;
pub use session::{SessionError, SessionHandle, SessionStore};
