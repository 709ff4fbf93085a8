//! HTTP client for the Sehat Station REST API.
//!
//! Registration, login and the hospital directory all go through [`ApiClient`].
//! Calls come back as an [`ApiResponse`]; callers decide how to read the body
//! because the backend does not always send JSON on success.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiConfig;

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const HOSPITALS_PATH: &str = "/hospitalapi";

#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server rejected request with status {status}")]
    Rejected { status: u16, body: ErrorBody },
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// The structured whole-request message of a rejection, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { body, .. } => body.message(),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> &[FieldRejection] {
        match self {
            ApiError::Rejected { body, .. } => &body.errors,
            _ => &[],
        }
    }
}

/// Error body shape shared by the auth endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<NestedError>,
    #[serde(default)]
    pub errors: Vec<FieldRejection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NestedError {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldRejection {
    pub field: String,
    pub message: String,
}

impl ErrorBody {
    /// `message` first, then `error.message`; blank strings count as absent.
    pub fn message(&self) -> Option<&str> {
        let non_blank = |m: &&str| !m.trim().is_empty();
        self.message.as_deref().filter(non_blank).or_else(|| {
            self.error
                .as_ref()
                .and_then(|e| e.message.as_deref())
                .filter(non_blank)
        })
    }
}

/// Status and raw body of a successful (2xx) call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json<R: DeserializeOwned>(&self) -> Result<R> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Decode the body, falling back to `R::default()` when it is empty or not JSON.
    pub fn json_or_default<R: DeserializeOwned + Default>(&self) -> R {
        serde_json::from_str(&self.body).unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_base_url(base_url: &str) -> Self {
        Self::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        Self::finish(response).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<ApiResponse> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Self::finish(response).await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.get(path).await?.json()
    }

    async fn finish(response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(ApiResponse {
                status: status.as_u16(),
                body,
            });
        }

        let body: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        warn!(status = status.as_u16(), message = ?body.message(), "request rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
