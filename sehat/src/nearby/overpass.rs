//! Hospital lookup against an ordered list of Overpass mirrors.
//!
//! Mirrors are tried one after another. The first mirror that answers with a
//! 2xx status and a JSON body wins, even if it found nothing. A mirror that
//! times out, errors, or returns garbage is skipped.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{NearbyError, Result};
use super::geo::{directions_url, format_km, GeoPoint};

pub const UNNAMED_HOSPITAL: &str = "Unnamed Hospital";

const ADDRESS_TAGS: [&str; 5] = [
    "addr:housenumber",
    "addr:street",
    "addr:place",
    "addr:city",
    "addr:state",
];

pub fn hospital_query(point: GeoPoint, radius_m: u32) -> String {
    let around = format!("(around:{radius_m},{},{})", point.lat, point.lon);
    format!(
        "[out:json];(node[\"amenity\"=\"hospital\"]{around};way[\"amenity\"=\"hospital\"]{around};relation[\"amenity\"=\"hospital\"]{around};);out center;"
    )
}

#[derive(Debug, Default, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    center: Option<Center>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

impl OverpassElement {
    /// Nodes carry their own coordinates; ways and relations carry a centre.
    fn location(&self) -> Option<GeoPoint> {
        match self.kind.as_str() {
            "node" => Some(GeoPoint::new(self.lat?, self.lon?)),
            "way" | "relation" => self.center.map(|c| GeoPoint::new(c.lat, c.lon)),
            _ => None,
        }
    }

    fn address(&self) -> String {
        let parts: Vec<&str> = ADDRESS_TAGS
            .iter()
            .filter_map(|key| self.tags.get(*key))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect();
        if !parts.is_empty() {
            return parts.join(", ");
        }
        self.tags
            .get("addr:full")
            .or_else(|| self.tags.get("operator"))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NearbyHospital {
    pub name: String,
    pub location: GeoPoint,
    pub address: String,
    /// From the search point.
    pub distance_km: f64,
    pub directions_url: String,
}

impl NearbyHospital {
    pub fn from_element(element: &OverpassElement, origin: GeoPoint, real: Option<GeoPoint>) -> Option<Self> {
        let location = element.location()?;
        Some(Self {
            name: element
                .tags
                .get("name")
                .filter(|n| !n.is_empty())
                .cloned()
                .unwrap_or_else(|| UNNAMED_HOSPITAL.to_string()),
            location,
            address: element.address(),
            distance_km: origin.distance_km(&location),
            directions_url: directions_url(real, location),
        })
    }

    pub fn distance_label(&self) -> String {
        format!("{} km", format_km(self.distance_km))
    }
}

/// Parse an Overpass body into hospitals sorted by distance from `origin`.
pub fn parse_hospitals(body: &str, origin: GeoPoint, real: Option<GeoPoint>) -> Result<Vec<NearbyHospital>> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    let mut hospitals: Vec<NearbyHospital> = response
        .elements
        .iter()
        .filter_map(|e| NearbyHospital::from_element(e, origin, real))
        .collect();
    hospitals.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(hospitals)
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    mirrors: Vec<String>,
}

impl OverpassClient {
    pub fn new(client: Client, mirrors: Vec<String>) -> Self {
        Self { client, mirrors }
    }

    pub fn mirrors(&self) -> &[String] {
        &self.mirrors
    }

    pub async fn hospitals_around(
        &self,
        origin: GeoPoint,
        radius_m: u32,
        real: Option<GeoPoint>,
    ) -> Result<Vec<NearbyHospital>> {
        let query = hospital_query(origin, radius_m);

        for mirror in &self.mirrors {
            match self.try_mirror(mirror, &query, origin, real).await {
                Ok(hospitals) => {
                    tracing::info!(%mirror, count = hospitals.len(), "overpass lookup succeeded");
                    return Ok(hospitals);
                }
                Err(error) => {
                    tracing::warn!(%mirror, "Overpass mirror failed: {}", error);
                }
            }
        }

        Err(NearbyError::AllMirrorsFailed { tried: self.mirrors.len() })
    }

    async fn try_mirror(
        &self,
        mirror: &str,
        query: &str,
        origin: GeoPoint,
        real: Option<GeoPoint>,
    ) -> Result<Vec<NearbyHospital>> {
        let response = self.client.get(mirror).query(&[("data", query)]).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NearbyError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_hospitals(&body, origin, real)
    }
}
