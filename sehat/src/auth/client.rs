use serde::Deserialize;

use super::form::LoginForm;
use crate::http_client::{ApiClient, ApiError, LOGIN_PATH};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError> {
        tracing::info!(email = %form.email, account_type = form.account_type.wire_name(), "logging in");
        let response = self.api.post_json(LOGIN_PATH, form).await?;
        Ok(response.json_or_default())
    }
}
