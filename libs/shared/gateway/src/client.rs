use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    multipart::Form,
    Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::ClientConfig;
use shared_models::ApiError;

use crate::session::SessionHandle;

/// Single HTTP entry point to the backend. Every call carries the current bearer token.
#[derive(Clone)]
pub struct ApiGateway {
    client: Client,
    base_url: String,
    static_base_url: String,
    session: SessionHandle,
}

impl ApiGateway {
    pub fn new(config: &ClientConfig, session: SessionHandle) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            static_base_url: config.static_base_url.clone(),
            session,
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Session token contains invalid header characters, sending request without it"),
            }
        }

        headers
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        self.client.request(method, &url).headers(self.get_headers())
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut req = self.builder(method, path);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        self.send(req).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Malformed(format!("Could not encode request body: {}", e)))?;
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ApiError> {
        let req = self.builder(Method::POST, path).multipart(form);
        self.send(req).await
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let response = req.send().await.map_err(|e| {
            error!("Transport failure: {}", e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            let error_text = String::from_utf8_lossy(&bytes);
            error!("API error ({}): {}", status, error_text);
            return Err(ApiError::from_response(status.as_u16(), &error_text));
        }

        // 204 and friends parse as JSON null
        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"null" } else { &bytes[..] };

        serde_json::from_slice(payload).map_err(|e| {
            error!("Could not decode response body: {}", e);
            ApiError::Malformed(e.to_string())
        })
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Direct link to an uploaded attachment. The name is appended verbatim.
    pub fn public_file_url(&self, file_name: &str) -> String {
        format!("{}/static/uploads/{}", self.static_base_url, file_name)
    }
}
