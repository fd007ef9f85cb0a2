use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub static_base_url: String,
    pub session_file: PathBuf,
    pub demo_email: Option<String>,
    pub demo_password: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_base_url = env::var("CARELOG_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| {
                warn!("CARELOG_API_URL not set, using default {}", DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            });

        let config = Self {
            static_base_url: env::var("CARELOG_STATIC_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| api_base_url.clone()),
            session_file: env::var("CARELOG_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_file()),
            demo_email: env::var("CARELOG_DEMO_EMAIL").ok(),
            demo_password: env::var("CARELOG_DEMO_PASSWORD").ok(),
            api_base_url,
        };

        if !config.is_configured() {
            warn!("Client not fully configured - API base URL is empty");
        }

        config
    }

    /// Builds a config pointing both API and static files at `base_url`.
    pub fn with_base_url(base_url: &str, session_file: PathBuf) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            static_base_url: base.clone(),
            api_base_url: base,
            session_file,
            demo_email: None,
            demo_password: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }
}

fn default_session_file() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("carelog").join("session.json"),
        None => {
            warn!("No user config directory found, storing session in working directory");
            PathBuf::from(".carelog-session.json")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = ClientConfig::with_base_url("http://localhost:8000/", PathBuf::from("s.json"));

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.static_base_url, "http://localhost:8000");
        assert!(config.is_configured());
        assert!(config.demo_email.is_none());
    }
}
