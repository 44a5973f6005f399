pub mod layer;
pub mod legend;
pub mod quakes;
pub mod symbology;

pub use layer::*;
pub use legend::{Legend, LegendEntry, LegendPosition};
pub use quakes::{EarthquakeFeature, QuakeMarker, QuakeOverlay, adapt, adapt_in};
pub use symbology::{Color, MarkerStyle, color_for, size_for};
