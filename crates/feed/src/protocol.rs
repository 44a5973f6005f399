//! GeoJSON wire types for the USGS summary feeds.
//!
//! Only the members the map uses are modelled; everything else in the
//! payload is ignored. Per-feature members are optional and tolerate the
//! wrong JSON type, so a single incomplete or mistyped record is skipped
//! instead of rejecting the whole collection.

use foundation::EventTime;
use layers::EarthquakeFeature;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{FeatureError, FeedError};

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub metadata: Option<FeedMetadata>,
    pub features: Vec<RawFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedMetadata {
    #[serde(default)]
    pub title: Option<String>,
    /// Generation instant, epoch millis.
    #[serde(default)]
    pub generated: Option<i64>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFeature {
    /// GeoJSON ids may be strings or numbers; numbers are kept as their text.
    #[serde(default, deserialize_with = "feature_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub properties: Option<RawProperties>,
    #[serde(default, deserialize_with = "lenient")]
    pub geometry: Option<RawGeometry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProperties {
    #[serde(default, deserialize_with = "lenient")]
    pub mag: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub place: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGeometry {
    #[serde(default, deserialize_with = "lenient")]
    pub coordinates: Option<Vec<Option<f64>>>,
}

// A member of the wrong type reads as absent; `into_feature` decides
// whether the record survives.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn feature_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

impl RawFeature {
    pub fn into_feature(self) -> Result<EarthquakeFeature, FeatureError> {
        let props = self.properties.ok_or(FeatureError::MissingProperties)?;
        let magnitude = props.mag.ok_or(FeatureError::MissingField("mag"))?;
        let place = props.place.ok_or(FeatureError::MissingField("place"))?;
        let time = props.time.ok_or(FeatureError::MissingField("time"))?;
        let geometry = self
            .geometry
            .ok_or(FeatureError::MissingField("geometry"))?;

        let coordinates = geometry
            .coordinates
            .ok_or(FeatureError::MissingField("coordinates"))?;
        let coordinates = match coordinates.as_slice() {
            [Some(lon), Some(lat), Some(depth), ..] => [*lon, *lat, *depth],
            [_, _, _, ..] => return Err(FeatureError::NullCoordinate),
            other => return Err(FeatureError::ShortCoordinates(other.len())),
        };

        Ok(EarthquakeFeature {
            id: self.id,
            place,
            time: EventTime::from_epoch_millis(time),
            magnitude,
            coordinates,
        })
    }
}

/// A decoded feed: usable features plus what the upstream said about itself.
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeFeed {
    pub title: Option<String>,
    pub generated: Option<EventTime>,
    pub upstream_count: Option<u64>,
    pub features: Vec<EarthquakeFeature>,
    /// Records dropped because required members were absent or mistyped.
    pub skipped: usize,
}

impl From<FeatureCollection> for QuakeFeed {
    fn from(collection: FeatureCollection) -> Self {
        let metadata = collection.metadata.unwrap_or_default();
        let mut features = Vec::with_capacity(collection.features.len());
        let mut skipped = 0usize;

        for raw in collection.features {
            let id = raw.id.clone();
            match raw.into_feature() {
                Ok(feature) => features.push(feature),
                Err(err) => {
                    warn!(id = id.as_deref().unwrap_or("<none>"), "skipping feature: {err}");
                    skipped += 1;
                }
            }
        }

        Self {
            title: metadata.title,
            generated: metadata.generated.map(EventTime::from_epoch_millis),
            upstream_count: metadata.count,
            features,
            skipped,
        }
    }
}

/// Decodes a GeoJSON `FeatureCollection` payload.
pub fn decode(bytes: &[u8]) -> Result<QuakeFeed, FeedError> {
    let collection: FeatureCollection = serde_json::from_slice(bytes)?;
    Ok(collection.into())
}
