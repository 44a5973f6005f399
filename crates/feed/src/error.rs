use std::fmt;

#[derive(Debug)]
pub enum FeedError {
    UnsupportedUrl(String),
    Request(reqwest::Error),
    Status(u16),
    TooLarge { size: usize, max: usize },
    Decode(serde_json::Error),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::UnsupportedUrl(url) => write!(f, "only http(s) feed URLs are allowed: {url}"),
            FeedError::Request(e) => write!(f, "feed request failed: {e}"),
            FeedError::Status(status) => write!(f, "feed responded with HTTP {status}"),
            FeedError::TooLarge { size, max } => {
                write!(f, "feed payload too large: {size} bytes (max {max})")
            }
            FeedError::Decode(e) => write!(f, "feed is not a valid feature collection: {e}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Request(e) => Some(e),
            FeedError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Decode(e)
    }
}

/// Why a single feed record could not become an earthquake feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    MissingProperties,
    MissingField(&'static str),
    ShortCoordinates(usize),
    NullCoordinate,
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::MissingProperties => write!(f, "feature has no properties"),
            FeatureError::MissingField(name) => {
                write!(f, "feature is missing `{name}` or it has the wrong type")
            }
            FeatureError::NullCoordinate => write!(f, "feature has a null coordinate"),
            FeatureError::ShortCoordinates(n) => {
                write!(f, "expected lon/lat/depth coordinates, got {n} values")
            }
        }
    }
}

impl std::error::Error for FeatureError {}
