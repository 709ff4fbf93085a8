use async_trait::async_trait;

use super::error::{NearbyError, Result};
use super::geo::GeoPoint;

/// Source of the user's real position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<GeoPoint>;
}

/// A position known up front, e.g. from command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoPoint);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<GeoPoint> {
        if self.0.is_valid() {
            Ok(self.0)
        } else {
            Err(NearbyError::LocationUnavailable(format!("invalid coordinates {}", self.0)))
        }
    }
}

/// No positioning available; every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current_location(&self) -> Result<GeoPoint> {
        Err(NearbyError::LocationUnavailable("no location provider configured".to_string()))
    }
}
