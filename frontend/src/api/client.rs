use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{api::types::ApiError, config};

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    geocoder_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_geocoder_url(mut self, geocoder_url: impl Into<String>) -> Self {
        self.geocoder_url = geocoder_url.into();
        self
    }

    pub(super) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(super) fn geocoder_url(&self) -> &str {
        self.geocoder_url.trim_end_matches('/')
    }

    pub(super) async fn resolved_base_url(&self) -> String {
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => config::await_api_base_url().await,
        };
        base.trim_end_matches('/').to_string()
    }

    pub(super) async fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }
}

pub(super) async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))
}

/// Maps a non-success status and its body to the error shown to the user.
pub(super) type ErrorMapping = fn(u16, &Value, &str) -> ApiError;

pub(super) async fn parse_json<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, ApiError> {
    parse_json_with(response, fallback, ApiError::from_response).await
}

pub(super) async fn parse_json_with<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
    map_error: ErrorMapping,
) -> Result<T, ApiError> {
    let response = ensure_success_with(response, fallback, map_error).await?;
    response
        .json()
        .await
        .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
}

pub(super) async fn ensure_success(response: Response, fallback: &str) -> Result<Response, ApiError> {
    ensure_success_with(response, fallback, ApiError::from_response).await
}

pub(super) async fn ensure_success_with(
    response: Response,
    fallback: &str,
    map_error: ErrorMapping,
) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    Err(map_error(status.as_u16(), &body, fallback))
}
