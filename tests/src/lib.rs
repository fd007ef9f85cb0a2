//! Scripted backend for end-to-end client flows.
//!
//! `FakeBackend` answers the routes the client uses with canned payloads, and
//! `FakeBackend::client` opens a gateway whose session lives in a file so a flow can
//! "restart" the app by building a second client on the same path.

use std::path::Path;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::ClientConfig;
use shared_gateway::{ApiGateway, SessionHandle, SessionStore};
use shared_utils::test_utils::{MockApiResponses, TestUser};

pub const TOKEN: &str = "flow-token";

pub struct FakeBackend {
    server: MockServer,
    user: TestUser,
}

impl FakeBackend {
    pub async fn start(user: TestUser) -> Self {
        Self {
            server: MockServer::start().await,
            user,
        }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self, session_file: &Path) -> ApiGateway {
        let config = ClientConfig::with_base_url(&self.server.uri(), session_file.to_path_buf());
        let session = SessionHandle::with_store(SessionStore::new(&config.session_file));
        ApiGateway::new(&config, session)
    }

    pub async fn accept_login(&self) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::login_response(&self.user, TOKEN)))
            .mount(&self.server)
            .await;
    }

    pub async fn accept_log(&self) {
        Mock::given(method("POST"))
            .and(path("/api/logs"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Log created" })))
            .mount(&self.server)
            .await;
    }

    pub async fn serve_logs(&self, logs: Value) {
        Mock::given(method("GET"))
            .and(path("/api/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(logs))
            .mount(&self.server)
            .await;
    }

    /// Serves `first` once, then `after` for every later listing.
    pub async fn serve_reports(&self, first: Value, after: Value) {
        Mock::given(method("GET"))
            .and(path("/api/reports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(first))
            .up_to_n_times(1)
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/reports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(after))
            .mount(&self.server)
            .await;
    }

    pub async fn accept_upload(&self) {
        Mock::given(method("POST"))
            .and(path("/api/reports/upload"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Report uploaded" })))
            .mount(&self.server)
            .await;
    }

    pub async fn accept_delete(&self) {
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/api/reports/[^/]+$"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }
}
