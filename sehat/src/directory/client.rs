use super::hospital::Hospital;
use crate::http_client::{ApiClient, ApiError, HOSPITALS_PATH};

#[derive(Debug, Clone)]
pub struct DirectoryClient {
    api: ApiClient,
}

impl DirectoryClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Hospital>, ApiError> {
        let hospitals: Vec<Hospital> = self.api.get_json(HOSPITALS_PATH).await?;
        tracing::debug!(count = hospitals.len(), "fetched hospitals");
        Ok(hospitals)
    }
}
