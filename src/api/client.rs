use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::envelope;
use crate::auth::Credential;
use crate::config::AppConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One call against the backend, path relative to the base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ResourceRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path, Some(body))
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path, Some(body))
    }

    pub fn patch(path: impl Into<String>, body: Option<Value>) -> Self {
        Self::new(Method::Patch, path, body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, None)
    }

    fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }
}

/// Fire-once access to the backend. Implementations return the payload with
/// any `{ success, data }` envelope already removed.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn execute(&self, request: ResourceRequest) -> Result<Value, ApiError>;
}

/// GET a collection and decode its items
pub async fn fetch_items<T, C>(client: &C, path: &str) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    C: ResourceClient + ?Sized,
{
    let payload = client.execute(ResourceRequest::get(path)).await?;
    envelope::into_items(payload, path)
}

/// `reqwest`-backed client. No retries, no caching, transport default timeouts.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
    credential: Option<Credential>,
    log_requests: bool,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            credential: None,
            log_requests: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut client = Self::new(config.api_base_url());
        client.log_requests = config.api.enable_request_logging;
        client
    }

    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl ResourceClient for HttpClient {
    async fn execute(&self, request: ResourceRequest) -> Result<Value, ApiError> {
        let url = self.url(&request.path);
        if self.log_requests {
            tracing::info!("{} {}", request.method.as_str(), url);
        } else {
            tracing::debug!("{} {}", request.method.as_str(), url);
        }

        let mut builder = self.http.request(request.method.into(), &url);
        if let Some(credential) = &self.credential {
            builder = builder.bearer_auth(credential.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let result = envelope::normalize(status, &text);
        if let Err(e) = &result {
            tracing::warn!("{} {} failed: {} ({})", request.method.as_str(), url, e, e.error_code());
        }
        result
    }
}
