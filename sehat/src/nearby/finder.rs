use reqwest::Client;
use std::time::Duration;

use super::error::NearbyError;
use super::geo::GeoPoint;
use super::geocoding::Geocoder;
use super::location::LocationProvider;
use super::overpass::{NearbyHospital, OverpassClient};
use super::routing::{RouteSummary, RoutingClient};
use crate::config::NearbyConfig;
use crate::notify::{Notification, Notifier};

pub const FETCHING_ADDRESS: &str = "Fetching address...";
pub const ADDRESS_NOT_FOUND: &str = "Address not found";
pub const ADDRESS_FAILED: &str = "Unable to fetch address";
pub const LOCATION_NOT_FOUND: &str = "Location not found. Try a different query.";
pub const GEOCODING_FAILED: &str = "Geocoding failed. Check network and try again.";
pub const NO_HOSPITALS: &str = "No hospitals found nearby.";
pub const ROUTE_FAILED: &str = "Unable to calculate route. Please try again or check your network.";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Loaded,
    Empty,
    Failed(String),
}

/// Shared HTTP client for the third-party geo services.
pub fn geo_http_client(config: &NearbyConfig) -> Client {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.mirror_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Nearby-hospitals page state.
///
/// The real location (where the user is) and the search location (where to
/// look) are kept apart: a manual search moves only the latter, while routes
/// and direction links start from the real location when it is known.
pub struct NearbyFinder {
    geocoder: Geocoder,
    overpass: OverpassClient,
    routing: RoutingClient,
    radius_m: u32,

    real_location: Option<GeoPoint>,
    search_location: Option<GeoPoint>,
    location_error: Option<String>,
    address: String,
    hospitals: Vec<NearbyHospital>,
    status: SearchStatus,
    route: Option<(usize, RouteSummary)>,

    notifier: Notifier,
}

impl NearbyFinder {
    pub fn new(geocoder: Geocoder, overpass: OverpassClient, routing: RoutingClient, radius_m: u32) -> Self {
        Self {
            geocoder,
            overpass,
            routing,
            radius_m,
            real_location: None,
            search_location: None,
            location_error: None,
            address: FETCHING_ADDRESS.to_string(),
            hospitals: Vec::new(),
            status: SearchStatus::Idle,
            route: None,
            notifier: Notifier::default(),
        }
    }

    pub fn from_config(config: &NearbyConfig) -> Self {
        let client = geo_http_client(config);
        Self::new(
            Geocoder::new(client.clone(), &config.nominatim_url),
            OverpassClient::new(client.clone(), config.overpass_mirrors.clone()),
            RoutingClient::new(client, &config.routing_url),
            config.radius_m,
        )
    }

    pub fn real_location(&self) -> Option<GeoPoint> {
        self.real_location
    }

    pub fn search_location(&self) -> Option<GeoPoint> {
        self.search_location
    }

    pub fn location_error(&self) -> Option<&str> {
        self.location_error.as_deref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn hospitals(&self) -> &[NearbyHospital] {
        &self.hospitals
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn route(&self) -> Option<&(usize, RouteSummary)> {
        self.route.as_ref()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifier.drain()
    }

    /// Ask the provider where the user is, then search around that point.
    pub async fn locate(&mut self, provider: &dyn LocationProvider) {
        match provider.current_location().await {
            Ok(point) => {
                tracing::info!(lat = point.lat, lon = point.lon, "location acquired");
                self.real_location = Some(point);
                self.location_error = None;
                self.search_at(point).await;
            }
            Err(error) => {
                tracing::error!("Error getting location: {}", error);
                self.location_error = Some(error.to_string());
            }
        }
    }

    /// Search around an arbitrary point (manual pick); the real location is kept.
    pub async fn search_at(&mut self, point: GeoPoint) {
        self.search_location = Some(point);
        self.route = None;
        self.refresh_address(point).await;
        self.find_hospitals(point).await;
    }

    /// Manual mode: geocode free text and search there. Blank input is ignored.
    pub async fn search_address(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        match self.geocoder.search(query).await {
            Ok(Some(point)) => {
                tracing::info!(%query, lat = point.lat, lon = point.lon, "address geocoded");
                self.search_at(point).await;
            }
            Ok(None) => {
                self.notifier.push(Notification::warn(LOCATION_NOT_FOUND));
            }
            Err(error) => {
                tracing::error!("Geocoding '{}' failed: {}", query, error);
                self.notifier.push(Notification::error(GEOCODING_FAILED));
            }
        }
    }

    async fn refresh_address(&mut self, point: GeoPoint) {
        self.address = match self.geocoder.reverse(point).await {
            Ok(Some(name)) => name,
            Ok(None) => ADDRESS_NOT_FOUND.to_string(),
            Err(error) => {
                tracing::warn!("Error fetching address: {}", error);
                ADDRESS_FAILED.to_string()
            }
        };
    }

    async fn find_hospitals(&mut self, point: GeoPoint) {
        self.status = SearchStatus::Loading;
        match self
            .overpass
            .hospitals_around(point, self.radius_m, self.real_location)
            .await
        {
            Ok(hospitals) if hospitals.is_empty() => {
                self.hospitals.clear();
                self.status = SearchStatus::Empty;
                self.notifier.push(Notification::info(NO_HOSPITALS));
            }
            Ok(hospitals) => {
                self.hospitals = hospitals;
                self.status = SearchStatus::Loaded;
            }
            Err(error) => {
                let message = format!("Error fetching hospitals: {error}");
                tracing::error!("{}", message);
                self.hospitals.clear();
                self.status = SearchStatus::Failed(message.clone());
                self.notifier.push(Notification::error(message));
            }
        }
    }

    /// Route to the hospital at `index`, from the real location if known.
    pub async fn route_to(&mut self, index: usize) -> Option<RouteSummary> {
        let hospital = self.hospitals.get(index)?;
        let destination = hospital.location;
        let origin = self.real_location.or(self.search_location)?;

        match self.routing.route(origin, destination).await {
            Ok(summary) => {
                tracing::info!(hospital = %hospital.name, distance_m = summary.distance_m, "route found");
                self.route = Some((index, summary));
                Some(summary)
            }
            Err(error) => {
                self.report_route_failure(&error);
                None
            }
        }
    }

    fn report_route_failure(&mut self, error: &NearbyError) {
        tracing::warn!("Routing failed: {}", error);
        self.route = None;
        self.notifier.push(Notification::error(ROUTE_FAILED));
    }
}
