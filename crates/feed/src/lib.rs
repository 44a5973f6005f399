//! Earthquake feed access: a single GET against a GeoJSON summary feed,
//! decoded into immutable [`layers::EarthquakeFeature`] records.

pub mod client;
pub mod error;
pub mod protocol;

pub use client::*;
pub use error::*;
pub use protocol::*;
