//! Earthquake features and their adaptation into map markers.

use std::fmt::Display;

use chrono::{Local, TimeZone};
use foundation::{EventTime, LatLng};
use serde::Serialize;

use crate::symbology::MarkerStyle;

pub const OVERLAY_NAME: &str = "Earthquakes";

/// One seismic event as published by the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeFeature {
    pub id: Option<String>,
    pub place: String,
    pub time: EventTime,
    pub magnitude: f64,
    /// Feed axis order: longitude, latitude, depth in km.
    pub coordinates: [f64; 3],
}

impl EarthquakeFeature {
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn depth_km(&self) -> f64 {
        self.coordinates[2]
    }

    pub fn point(&self) -> LatLng {
        LatLng::from_lon_lat(self.longitude(), self.latitude())
    }
}

/// A circle marker ready for the presenter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeMarker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub point: LatLng,
    pub style: MarkerStyle,
    pub popup: String,
}

/// Adapts a feature, rendering its time in the process-local zone.
pub fn adapt(feature: &EarthquakeFeature) -> QuakeMarker {
    adapt_in(feature, &Local)
}

pub fn adapt_in<Tz: TimeZone>(feature: &EarthquakeFeature, tz: &Tz) -> QuakeMarker
where
    Tz::Offset: Display,
{
    QuakeMarker {
        id: feature.id.clone(),
        point: feature.point(),
        style: MarkerStyle::for_event(feature.magnitude, feature.depth_km()),
        popup: popup_html(&feature.place, &feature.time.calendar_string(tz)),
    }
}

pub fn popup_html(place: &str, when: &str) -> String {
    format!(
        "<h3>{}</h3><hr><p>{}</p>",
        escape_html(place),
        escape_html(when)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The toggleable marker layer drawn over the base map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeOverlay {
    pub name: String,
    pub markers: Vec<QuakeMarker>,
}

impl QuakeOverlay {
    pub fn empty() -> Self {
        Self {
            name: OVERLAY_NAME.to_string(),
            markers: Vec::new(),
        }
    }

    pub fn from_features(features: &[EarthquakeFeature]) -> Self {
        Self::from_features_in(features, &Local)
    }

    pub fn from_features_in<Tz: TimeZone>(features: &[EarthquakeFeature], tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        Self {
            name: OVERLAY_NAME.to_string(),
            markers: features.iter().map(|f| adapt_in(f, tz)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbology::Color;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn sample() -> EarthquakeFeature {
        EarthquakeFeature {
            id: Some("nc75000000".to_string()),
            place: "10km N of X".to_string(),
            time: EventTime::from_epoch_millis(1_700_000_000_000),
            magnitude: 4.2,
            coordinates: [-120.5, 38.2, 12.3],
        }
    }

    #[test]
    fn adapts_sample_feature() {
        let marker = adapt_in(&sample(), &Utc);
        assert_eq!(marker.point, LatLng::new(38.2, -120.5));
        assert_eq!(marker.style.radius, 21.0);
        assert_eq!(marker.style.fill_color, Color::TEAL);
        assert_eq!(marker.style.fill_color.to_string(), "#34ebc6");
        assert_eq!(marker.style.fill_opacity, 0.7);
        assert_eq!(marker.style.stroke_color, Color::BLACK);
        assert_eq!(marker.style.stroke_weight, 0.7);
        assert!(marker.style.stroke);
        assert_eq!(
            marker.popup,
            "<h3>10km N of X</h3><hr><p>Tue Nov 14 2023 22:13:20 GMT+0000</p>"
        );
    }

    #[test]
    fn local_adapter_keeps_geometry_and_style() {
        let a = adapt(&sample());
        let b = adapt_in(&sample(), &Utc);
        assert_eq!(a.point, b.point);
        assert_eq!(a.style, b.style);
        assert!(a.popup.starts_with("<h3>10km N of X</h3><hr><p>"));
    }

    #[test]
    fn degenerate_magnitudes_pass_through() {
        let mut f = sample();
        f.magnitude = -0.8;
        f.coordinates[2] = -1.2;
        let marker = adapt_in(&f, &Utc);
        assert_eq!(marker.style.radius, -4.0);
        assert_eq!(marker.style.fill_color, Color::VIOLET);
    }

    #[test]
    fn place_is_escaped_in_popup() {
        let mut f = sample();
        f.place = "<b>Tom & Jerry's</b>".to_string();
        let marker = adapt_in(&f, &Utc);
        assert!(
            marker
                .popup
                .starts_with("<h3>&lt;b&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;</h3>")
        );
    }

    #[test]
    fn overlay_keeps_feature_order() {
        let mut deep = sample();
        deep.id = Some("deep".to_string());
        deep.coordinates = [140.1, -5.0, 650.0];

        let overlay = QuakeOverlay::from_features_in(&[sample(), deep], &Utc);
        assert_eq!(overlay.name, OVERLAY_NAME);
        assert_eq!(overlay.len(), 2);
        assert_eq!(overlay.markers[1].id.as_deref(), Some("deep"));
        assert_eq!(overlay.markers[1].point, LatLng::new(-5.0, 140.1));
        assert_eq!(overlay.markers[1].style.fill_color, Color::TEAL_GREEN);
    }

    #[test]
    fn empty_feed_gives_empty_overlay() {
        let overlay = QuakeOverlay::from_features(&[]);
        assert!(overlay.is_empty());
        assert_eq!(overlay, QuakeOverlay::empty());
    }

    #[test]
    fn marker_serializes_point_as_pair() {
        let json = serde_json::to_value(adapt_in(&sample(), &Utc)).unwrap();
        assert_eq!(json["point"], serde_json::json!([38.2, -120.5]));
        assert_eq!(json["id"], "nc75000000");
        assert_eq!(json["style"]["fillColor"], "#34ebc6");
    }
}
