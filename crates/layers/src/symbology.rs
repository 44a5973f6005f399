//! Visual encoding of earthquake events.
//!
//! Magnitude drives marker radius and hypocenter depth drives fill colour.
//! Both functions are pure and total: no clamping, no error path.

use std::fmt;

use serde::{Serialize, Serializer};

/// 24-bit RGB colour, rendered as `#rrggbb`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_hex(0x000000);
    pub const VIOLET: Color = Color::from_hex(0x9d34eb);
    pub const TEAL: Color = Color::from_hex(0x34ebc6);
    pub const MAGENTA: Color = Color::from_hex(0xd234eb);
    pub const ORANGE_RED: Color = Color::from_hex(0xeb5934);
    pub const GREEN: Color = Color::from_hex(0x34eb40);
    pub const AMBER: Color = Color::from_hex(0xf5b042);
    pub const TEAL_GREEN: Color = Color::from_hex(0x1cba9e);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Upper (exclusive) depth bounds in km, ascending, paired with their colour.
pub const DEPTH_BANDS: [(f64, Color); 6] = [
    (5.0, Color::VIOLET),
    (20.0, Color::TEAL),
    (40.0, Color::MAGENTA),
    (50.0, Color::ORANGE_RED),
    (60.0, Color::GREEN),
    (70.0, Color::AMBER),
];

/// Colour for everything at or beyond the last bound (and NaN).
pub const DEEPEST: Color = Color::TEAL_GREEN;

pub const FILL_OPACITY: f64 = 0.7;
pub const STROKE_WEIGHT: f64 = 0.7;
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

/// Marker radius for a magnitude. Zero and negative magnitudes yield
/// degenerate radii; the presenter has to tolerate them.
pub fn size_for(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

/// Index into [`DEPTH_BANDS`] (or `DEPTH_BANDS.len()` for the deepest bucket).
///
/// Comparisons are strict, so a depth sitting exactly on a bound belongs to
/// the next bucket. NaN fails every comparison and lands in the deepest one.
pub fn depth_band(depth_km: f64) -> usize {
    DEPTH_BANDS
        .iter()
        .position(|(bound, _)| depth_km < *bound)
        .unwrap_or(DEPTH_BANDS.len())
}

pub fn color_for(depth_km: f64) -> Color {
    DEPTH_BANDS
        .get(depth_band(depth_km))
        .map(|(_, color)| *color)
        .unwrap_or(DEEPEST)
}

/// Circle-marker options, serialized with the presenter's option names.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub stroke: bool,
    #[serde(rename = "color")]
    pub stroke_color: Color,
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
}

impl MarkerStyle {
    pub fn for_event(magnitude: f64, depth_km: f64) -> Self {
        Self {
            radius: size_for(magnitude),
            fill_color: color_for(depth_km),
            fill_opacity: FILL_OPACITY,
            stroke: true,
            stroke_color: Color::BLACK,
            stroke_weight: STROKE_WEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn size_is_five_times_magnitude() {
        for m in [-2.0, -0.5, 0.0, 1.0, 2.5, 4.2, 7.8, 10.0] {
            assert_eq!(size_for(m), 5.0 * m);
        }
        assert_eq!(size_for(0.0), 0.0);
        assert!(size_for(-1.0) < 0.0);
    }

    #[test]
    fn bounds_fall_into_the_next_bucket() {
        let cases = [
            (4.999, Color::VIOLET),
            (5.0, Color::TEAL),
            (19.999, Color::TEAL),
            (20.0, Color::MAGENTA),
            (39.999, Color::MAGENTA),
            (40.0, Color::ORANGE_RED),
            (49.999, Color::ORANGE_RED),
            (50.0, Color::GREEN),
            (59.999, Color::GREEN),
            (60.0, Color::AMBER),
            (69.999, Color::AMBER),
            (70.0, Color::TEAL_GREEN),
        ];
        for (depth, expected) in cases {
            assert_eq!(color_for(depth), expected, "depth {depth}");
        }
    }

    #[test]
    fn extreme_depths_are_covered() {
        assert_eq!(color_for(-3.5), Color::VIOLET);
        assert_eq!(color_for(f64::NEG_INFINITY), Color::VIOLET);
        assert_eq!(color_for(700.0), Color::TEAL_GREEN);
        assert_eq!(color_for(f64::INFINITY), Color::TEAL_GREEN);
        assert_eq!(color_for(f64::NAN), DEEPEST);
    }

    #[test]
    fn bucket_index_never_decreases_with_depth() {
        let mut last = 0;
        let mut depth = -10.0;
        while depth < 100.0 {
            let band = depth_band(depth);
            assert!(band >= last, "depth {depth} went back to band {band}");
            last = band;
            depth += 0.25;
        }
        assert_eq!(last, DEPTH_BANDS.len());
    }

    #[test]
    fn colours_render_as_hex() {
        assert_eq!(Color::VIOLET.to_string(), "#9d34eb");
        assert_eq!(Color::TEAL.to_string(), "#34ebc6");
        assert_eq!(Color::BLACK.to_string(), "#000000");
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn style_uses_presenter_option_names() {
        let style = MarkerStyle::for_event(4.2, 12.3);
        let json = serde_json::to_value(style).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "radius": 21.0,
                "fillColor": "#34ebc6",
                "fillOpacity": 0.7,
                "stroke": true,
                "color": "#000000",
                "weight": 0.7,
            })
        );
    }
}
