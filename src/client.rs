//! HTTP client for the Site24x7 REST API.
//!
//! One `reqwest` session per client instance carries the OAuth token and the
//! fixed headers. Every failure is normalized into [`ApiError`].

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, trace};

pub const AUTHORIZATION_SCHEME: &str = "Zoho-oauthtoken";
pub const ACCEPT_VALUE: &str = "application/json; version=2.0";
pub const CONTENT_TYPE_VALUE: &str = "application/json;charset=UTF-8";

/// Endpoint used to check that a token is accepted
pub const CURRENT_STATUS_PATH: &str = "/current_status";

/// Error emitted by the Site24x7 API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("{status} for {method} {url}: {message}")]
    StatusError {
        method: Method,
        url: String,
        status: StatusCode,
        message: String,
    },
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("invalid OAuth token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::StatusError { status, .. } => Some(*status),
            ApiError::HttpError(e) => e.status(),
            _ => None,
        }
    }

    /// True when the server rejected the token
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }
}

/// Authenticated client for the Site24x7 API
#[derive(Debug, Clone)]
pub struct Site24x7Client {
    client: Client,
    base_url: String,
}

impl Site24x7Client {
    /// Create a client for `base_url`.
    ///
    /// With a token, every request carries the authorization header and the
    /// versioned JSON accept and content-type headers.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("site24x7-cli/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(token) = token {
            let mut authorization =
                HeaderValue::from_str(&format!("{} {}", AUTHORIZATION_SCHEME, token))?;
            authorization.set_sensitive(true);
            headers.insert(AUTHORIZATION, authorization);
            headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_VALUE));
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request to the specified path
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.execute_request(Method::GET, path, |request| request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        self.execute_request(Method::POST, path, |request| json_body(request, body))
            .await
    }

    /// Make a PUT request with a JSON body
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        self.execute_request(Method::PUT, path, |request| json_body(request, body))
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.execute_request(Method::DELETE, path, |request| request)
            .await
    }

    async fn execute_request<F>(
        &self,
        method: Method,
        path: &str,
        customize: F,
    ) -> Result<Value, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let request = customize(self.client.request(method.clone(), &url));
        let response = request.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        let response_text = response.text().await?;
        trace!("Raw response text: {}", response_text);

        if !status.is_success() {
            let message = if response_text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                response_text
            };
            return Err(ApiError::StatusError {
                method,
                url,
                status,
                message,
            });
        }

        if response_text.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!(
                "Failed to deserialize response: {}. Raw response: {}",
                e, response_text
            );
            ApiError::JsonError(e)
        })
    }
}

fn json_body(request: RequestBuilder, body: Vec<u8>) -> RequestBuilder {
    request
        .header(CONTENT_TYPE, CONTENT_TYPE_VALUE)
        .body(body)
}
