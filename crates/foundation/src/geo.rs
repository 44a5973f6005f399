use serde::{Deserialize, Serialize};

/// Geographic point in presenter order (latitude first).
///
/// Serialized as a two-element `[lat, lng]` array.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a point from GeoJSON axis order (longitude first).
    pub const fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lng: lon }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        [p.lat, p.lng]
    }
}

/// Initial camera of a slippy map.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl MapView {
    pub const fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}
