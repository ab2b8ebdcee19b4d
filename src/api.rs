//! HTTP plumbing for the journal's own REST backend.
//!
//! Every response is wrapped in a `{ success, message, data }` envelope.
//! The bearer token comes from the [`Session`] passed to each call.

use crate::error::{Result, SmileError};
use crate::session::Session;
use crate::validation;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Error bodies only need the message; `data` may be anything or absent.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(SmileError::Config(
                "REST backend needs a base URL (rest.base_url or MADEMESMILE_BASE_URL)".to_string(),
            ));
        }
        let base_url = Url::parse(trimmed)
            .map_err(|e| SmileError::Config(format!("Invalid base URL '{}': {}", trimmed, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SmileError::Config(format!(
                "Base URL cannot have paths appended: {}",
                trimmed
            )));
        }
        Ok(Self { base_url, http })
    }

    /// Base URL with `segments` appended as escaped path segments.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                SmileError::Config(format!("Base URL cannot be a base: {}", self.base_url))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// URL for a resource addressed by id, validating the id first.
    pub fn resource_url(&self, collection: &str, id: &str) -> Result<Url> {
        validation::validate_id(id)?;
        self.url(&[collection, id])
    }

    /// A request with the session's bearer token attached when it has one.
    pub fn request(&self, method: Method, url: Url, session: Option<&Session>) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match session.and_then(|s| s.access_token.as_deref()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and unwrap the envelope, requiring `data`.
    pub async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let envelope: ApiEnvelope<T> = self.send_envelope(request).await?;
        envelope.data.ok_or_else(|| {
            SmileError::Parse(format!(
                "Response envelope has no data (message: {})",
                envelope.message
            ))
        })
    }

    /// Send a request whose success body carries no meaningful data.
    pub async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        check_status(response).await.map(|_| ())
    }

    pub async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiEnvelope<T>> {
        let response = check_status(request.send().await?).await?;
        let body = response.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| SmileError::Parse(format!("Unexpected response body: {}", e)))?;
        if !envelope.success {
            return Err(SmileError::Api {
                status: StatusCode::OK.as_u16(),
                message: envelope.message,
            });
        }
        Ok(envelope)
    }
}

/// Pass successful responses through; turn failures into typed errors
/// carrying the server's message when it sent one.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .unwrap_or_else(|| body.trim().to_string());
    tracing::debug!(status = status.as_u16(), %message, "REST request failed");
    Err(error_for_status(status, message))
}

pub(crate) fn error_for_status(status: StatusCode, message: String) -> SmileError {
    match status {
        StatusCode::UNAUTHORIZED => SmileError::Unauthorized(message),
        StatusCode::FORBIDDEN => SmileError::PermissionDenied(message),
        StatusCode::NOT_FOUND => SmileError::NotFound(message),
        _ => SmileError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
