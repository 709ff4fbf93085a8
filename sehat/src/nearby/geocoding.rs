//! Nominatim forward and reverse geocoding.

use reqwest::Client;
use serde::Deserialize;

use super::error::{NearbyError, Result};
use super::geo::GeoPoint;

#[derive(Debug, Deserialize)]
struct ReverseResult {
    #[serde(default)]
    display_name: Option<String>,
}

/// Nominatim sends coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Human-readable address for a point, `None` when Nominatim has none.
    pub async fn reverse(&self, point: GeoPoint) -> Result<Option<String>> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", point.lat.to_string()),
                ("lon", point.lon.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NearbyError::Status(response.status().as_u16()));
        }
        let result: ReverseResult = serde_json::from_str(&response.text().await?)?;
        Ok(result.display_name.filter(|name| !name.trim().is_empty()))
    }

    /// First match for a free-text query, `None` when nothing matched.
    pub async fn search(&self, query: &str) -> Result<Option<GeoPoint>> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("q", query), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NearbyError::Status(response.status().as_u16()));
        }
        let hits: Vec<SearchHit> = serde_json::from_str(&response.text().await?)?;
        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        match (hit.lat.parse::<f64>(), hit.lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => Ok(Some(GeoPoint::new(lat, lon))),
            _ => {
                tracing::warn!(lat = %hit.lat, lon = %hit.lon, "unparseable geocoding hit");
                Ok(None)
            }
        }
    }
}
