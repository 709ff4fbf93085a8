//! Hospital directory: backend list merged after the bundled list, with search and filters.

pub mod catalog;
pub mod client;
pub mod filter;
pub mod hospital;

pub use catalog::{bundled_hospitals, DirectorySource, HospitalDirectory};
pub use client::DirectoryClient;
pub use filter::HospitalFilters;
pub use hospital::{Hospital, HospitalAddress};
