use foundation::{LatLng, MapView};
use serde::Serialize;

use crate::legend::Legend;
use crate::quakes::OVERLAY_NAME;

pub const MAP_CONTAINER: &str = "map";
pub const DEFAULT_VIEW: MapView = MapView::new(LatLng::new(37.09, -95.71), 5);

const OSM_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const TOPO_ATTRIBUTION: &str = "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)";

/// A selectable background tile source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
}

impl BaseLayer {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            attribution: attribution.into(),
        }
    }

    pub fn street() -> Self {
        Self::new(
            "Street Map",
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            OSM_ATTRIBUTION,
        )
    }

    pub fn topographic() -> Self {
        Self::new(
            "Topographic Map",
            "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            TOPO_ATTRIBUTION,
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LayerControl {
    pub collapsed: bool,
}

/// Everything the presenter needs to build the map, apart from the markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    pub container: String,
    pub view: MapView,
    pub base_layers: Vec<BaseLayer>,
    /// Index into `base_layers` shown on load.
    pub active_base: usize,
    pub overlay: String,
    pub control: LayerControl,
    pub legend: Legend,
}

impl MapDocument {
    pub fn new(view: MapView) -> Self {
        Self {
            container: MAP_CONTAINER.to_string(),
            view,
            base_layers: vec![BaseLayer::street(), BaseLayer::topographic()],
            active_base: 0,
            overlay: OVERLAY_NAME.to_string(),
            control: LayerControl { collapsed: false },
            legend: Legend::depths(),
        }
    }
}

impl Default for MapDocument {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW)
    }
}
