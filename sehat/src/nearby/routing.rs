use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{NearbyError, Result};
use super::geo::{format_km, GeoPoint};

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RouteSummary {
    pub distance_m: f64,
    pub duration_s: f64,
}

impl RouteSummary {
    pub fn describe(&self) -> String {
        let minutes = (self.duration_s / 60.0).round() as u64;
        format!("{} km, about {} min by car", format_km(self.distance_m / 1000.0), minutes)
    }
}

/// OSRM-compatible driving router.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    client: Client,
    base_url: String,
}

impl RoutingClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteSummary> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url, from.lon, from.lat, to.lon, to.lat
        );
        tracing::debug!(%url, "routing");
        let response = self
            .client
            .get(&url)
            .query(&[("overview", "false")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            // OSRM explains its 4xx answers in the body
            let reason = serde_json::from_str::<OsrmResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| format!("status {}", status.as_u16()));
            return Err(NearbyError::NoRoute(reason));
        }

        let parsed: OsrmResponse = serde_json::from_str(&body)?;
        if parsed.code != "Ok" {
            return Err(NearbyError::NoRoute(parsed.message.unwrap_or(parsed.code)));
        }
        parsed
            .routes
            .first()
            .map(|r| RouteSummary { distance_m: r.distance, duration_s: r.duration })
            .ok_or_else(|| NearbyError::NoRoute("empty route list".to_string()))
    }
}
