use std::sync::Arc;

use tracing::{debug, error, info};

use shared_config::ClientConfig;
use shared_gateway::{SessionError, SessionHandle};
use shared_models::auth::Session;
use shared_utils::{Outcome, ViewScope};

use crate::services::auth::Authenticator;

/// Screens a flow can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Logs,
    Reports,
    Insights,
}

pub struct LoginView {
    auth: Arc<dyn Authenticator>,
    session: SessionHandle,
    scope: ViewScope,
    pub email: String,
    pub password: String,
    loading: bool,
    error: Option<String>,
    redirect: Option<Route>,
}

impl LoginView {
    /// Credentials are pre-filled only when demo credentials are configured.
    pub fn new(config: &ClientConfig, auth: Arc<dyn Authenticator>, session: SessionHandle) -> Self {
        Self {
            auth,
            session,
            scope: ViewScope::new(),
            email: config.demo_email.clone().unwrap_or_default(),
            password: config.demo_password.clone().unwrap_or_default(),
            loading: false,
            error: None,
            redirect: None,
        }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub fn unmount(&self) {
        self.scope.close();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn redirect(&self) -> Option<Route> {
        self.redirect
    }

    pub async fn submit(&mut self) -> Outcome {
        if self.loading {
            return Outcome::Busy;
        }
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required".to_string());
            return Outcome::Failed;
        }

        self.loading = true;
        self.error = None;

        let auth = Arc::clone(&self.auth);
        let email = self.email.trim().to_string();
        let password = self.password.clone();

        let result = match self.scope.run(async move { auth.login(&email, &password).await }).await {
            Some(result) => result,
            None => return Outcome::Cancelled,
        };

        self.loading = false;

        match result {
            Ok(response) => {
                let session = Session::from(response);
                let name = session.user.full_name.clone();

                if let Err(e) = self.session.login(session) {
                    error!("Failed to store session: {}", e);
                    self.error = Some(format!("Could not save session: {}", e));
                    return Outcome::Failed;
                }

                info!("Signed in as {}", name);
                self.redirect = Some(Route::Dashboard);
                Outcome::Applied
            }
            Err(e) => {
                debug!("Login rejected: {}", e);
                self.error = Some(e.detail_or("Login failed"));
                Outcome::Failed
            }
        }
    }
}

/// Ends the session and returns the screen to show next.
pub fn sign_out(session: &SessionHandle) -> Result<Route, SessionError> {
    session.logout()?;
    info!("Signed out");
    Ok(Route::Login)
}
