pub mod login;
pub mod services;

pub use login::{sign_out, LoginView, Route};
pub use services::auth::{AuthService, Authenticator};
