use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius used for great-circle distances, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine distance in metres.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let rad = std::f64::consts::PI / 180.0;
        let lat1 = self.lat * rad;
        let lat2 = other.lat * rad;
        let sin_dlat = ((other.lat - self.lat) * rad / 2.0).sin();
        let sin_dlon = ((other.lon - self.lon) * rad / 2.0).sin();
        let a = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        self.distance_to(other) / 1000.0
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// "1.23" for 1.2345 km.
pub fn format_km(km: f64) -> String {
    format!("{km:.2}")
}

/// Google Maps directions link; without an origin Maps uses the device location.
pub fn directions_url(origin: Option<GeoPoint>, destination: GeoPoint) -> String {
    match origin {
        Some(origin) => format!(
            "https://www.google.com/maps/dir/?api=1&origin={origin}&destination={destination}"
        ),
        None => format!("https://www.google.com/maps/dir/?api=1&destination={destination}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        let p = GeoPoint::new(12.9716, 77.5946);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        // 2 * pi * R / 360
        assert!((a.distance_km(&b) - 111.19).abs() < 0.01);
        assert_eq!(format_km(a.distance_km(&b)), "111.19");
    }

    #[test]
    fn test_known_city_pair() {
        let bengaluru = GeoPoint::new(12.9716, 77.5946);
        let chennai = GeoPoint::new(13.0827, 80.2707);
        let km = bengaluru.distance_km(&chennai);
        assert!((km - 290.2).abs() < 1.0, "{km}");
    }

    #[test]
    fn test_directions_url() {
        let dest = GeoPoint::new(12.5, 77.25);
        assert_eq!(
            directions_url(None, dest),
            "https://www.google.com/maps/dir/?api=1&destination=12.5,77.25"
        );
        assert_eq!(
            directions_url(Some(GeoPoint::new(12.0, 77.0)), dest),
            "https://www.google.com/maps/dir/?api=1&origin=12,77&destination=12.5,77.25"
        );
    }

    #[test]
    fn test_validity() {
        assert!(GeoPoint::new(-33.9, 151.2).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}
