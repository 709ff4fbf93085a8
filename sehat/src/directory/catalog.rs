use serde::Serialize;

use super::client::DirectoryClient;
use super::filter::HospitalFilters;
use super::hospital::Hospital;

const BUNDLED_HOSPITALS: &str = include_str!("../../data/hospitals.json");

/// The hospitals shipped with the client, shown even when the backend is down.
pub fn bundled_hospitals() -> Vec<Hospital> {
    match serde_json::from_str(BUNDLED_HOSPITALS) {
        Ok(hospitals) => hospitals,
        Err(error) => {
            tracing::error!("Bundled hospital list is malformed: {}", error);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DirectorySource {
    BundledOnly,
    Combined,
}

/// Searchable, filterable hospital list.
#[derive(Debug, Clone)]
pub struct HospitalDirectory {
    hospitals: Vec<Hospital>,
    source: DirectorySource,
    query: String,
    filters: HospitalFilters,
}

impl HospitalDirectory {
    pub fn new(hospitals: Vec<Hospital>, source: DirectorySource) -> Self {
        Self {
            hospitals,
            source,
            query: String::new(),
            filters: HospitalFilters::default(),
        }
    }

    pub fn bundled() -> Self {
        Self::new(bundled_hospitals(), DirectorySource::BundledOnly)
    }

    /// Bundled list followed by the backend's list; bundled only when the fetch fails.
    pub async fn load(client: &DirectoryClient) -> Self {
        let mut hospitals = bundled_hospitals();
        match client.fetch_all().await {
            Ok(remote) => {
                hospitals.extend(remote);
                tracing::info!(count = hospitals.len(), "hospital directory loaded");
                Self::new(hospitals, DirectorySource::Combined)
            }
            Err(error) => {
                tracing::warn!("Error fetching hospitals, using bundled list: {}", error);
                Self::new(hospitals, DirectorySource::BundledOnly)
            }
        }
    }

    pub fn source(&self) -> DirectorySource {
        self.source
    }

    pub fn all(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &HospitalFilters {
        &self.filters
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn apply_filters(&mut self, filters: HospitalFilters) {
        self.filters = filters;
    }

    pub fn clear_filters(&mut self) {
        self.filters = HospitalFilters::default();
    }

    pub fn visible(&self) -> Vec<&Hospital> {
        self.hospitals
            .iter()
            .filter(|h| h.matches_query(&self.query) && self.filters.matches(h))
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Hospital> {
        self.hospitals.iter().find(|h| h.id == id)
    }
}
