use thiserror::Error;

/// Failures of the third-party geo services.
#[derive(Error, Debug)]
pub enum NearbyError {
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Service responded with status {0}")]
    Status(u16),
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("All Overpass servers failed. Please try again later.")]
    AllMirrorsFailed { tried: usize },
    #[error("No route found: {0}")]
    NoRoute(String),
}

pub type Result<T> = std::result::Result<T, NearbyError>;
