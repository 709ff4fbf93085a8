//! Client library for the Sehat Station hospital appointment service.
//!
//! Every feature is a UI-independent state machine that a shell (the CLI in
//! `sehat-cli`, or any other front end) drives and renders:
//!
//! - [`registration`]: the three-step registration wizard and its submit flow
//! - [`auth`]: login form, login call and token storage
//! - [`directory`]: hospital directory with search and filters
//! - [`nearby`]: nearby hospitals via geocoding, Overpass mirrors and routing

pub mod auth;
pub mod config;
pub mod directory;
pub mod http_client;
pub mod nearby;
pub mod notify;
pub mod registration;
pub mod theme;

pub use config::SehatConfig;
pub use http_client::{ApiClient, ApiError};
pub use notify::{NoticeLevel, Notification, Route};
pub use theme::DisplayTheme;

// Re-export for convenience
pub mod prelude {
    pub use super::auth::{LoginFlow, LoginForm};
    pub use super::config::SehatConfig;
    pub use super::directory::{HospitalDirectory, HospitalFilters};
    pub use super::http_client::{ApiClient, ApiError};
    pub use super::nearby::{GeoPoint, NearbyFinder};
    pub use super::notify::{NoticeLevel, Notification, Route};
    pub use super::registration::{
        AccountType, BasicIdentity, RegistrationAction, RegistrationManager, SecondaryProfile,
        Step,
    };
    pub use super::theme::DisplayTheme;
}
