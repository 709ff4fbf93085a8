//! Hospitals around a point: location, geocoding, Overpass mirrors and routing.

pub mod error;
pub mod finder;
pub mod geo;
pub mod geocoding;
pub mod location;
pub mod overpass;
pub mod routing;

pub use error::NearbyError;
pub use finder::{geo_http_client, NearbyFinder, SearchStatus};
pub use geo::{directions_url, format_km, GeoPoint};
pub use geocoding::Geocoder;
pub use location::{FixedLocation, LocationProvider, NoLocation};
pub use overpass::{hospital_query, NearbyHospital, OverpassClient};
pub use routing::{RouteSummary, RoutingClient};
