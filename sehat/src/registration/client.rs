use serde::Deserialize;

use super::state::RegistrationPayload;
use crate::http_client::{ApiClient, ApiError, REGISTER_PATH};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegisterResponse {
    pub token: Option<String>,
    pub message: Option<String>,
}

/// Registration endpoint of the backend.
#[derive(Debug, Clone)]
pub struct RegistrationClient {
    api: ApiClient,
}

impl RegistrationClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /auth/register`. A 2xx with an unreadable body still counts as success.
    pub async fn register(&self, payload: &RegistrationPayload) -> Result<RegisterResponse, ApiError> {
        tracing::info!(email = %payload.email, account_type = payload.account_type.wire_name(), "registering");
        let response = self.api.post_json(REGISTER_PATH, payload).await?;
        Ok(response.json_or_default())
    }
}
