//! HTML shell for the browser-side map.
//!
//! Leaflet owns tiles, panning and popups. The page only receives the map
//! document, the legend markup and either an inline marker set or the URL to
//! fetch one from. The map is built after that request settles; on failure
//! the base layers are still shown with an empty overlay.

use layers::MapDocument;
use serde::Serialize;

use crate::feeds::MarkerSet;

pub const MARKERS_PATH: &str = "/api/earthquakes";

const BOOT_PLACEHOLDER: &str = "__QUAKEMAP_BOOT__";

/// Where the page gets its markers from.
#[derive(Debug, Clone, Copy)]
pub enum MarkerSource<'a> {
    Endpoint(&'a str),
    Inline(&'a MarkerSet),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Boot<'a> {
    map: &'a MapDocument,
    legend_html: String,
    markers: Option<&'a MarkerSet>,
    markers_url: Option<&'a str>,
}

pub fn render(doc: &MapDocument, source: MarkerSource<'_>) -> Result<String, serde_json::Error> {
    let (markers, markers_url) = match source {
        MarkerSource::Endpoint(url) => (None, Some(url)),
        MarkerSource::Inline(set) => (Some(set), None),
    };
    let boot = Boot {
        map: doc,
        legend_html: doc.legend.to_html(),
        markers,
        markers_url,
    };
    let json = script_safe(&serde_json::to_string(&boot)?);
    Ok(PAGE.replace(BOOT_PLACEHOLDER, &json))
}

// JSON is embedded in a <script> element; `</` must not close it early.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Earthquakes</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <style>
    html, body, #map { height: 100%; margin: 0; }
    .legend { background: white; padding: 6px 10px; line-height: 20px; color: #333; border-radius: 4px; }
    .legend i { width: 18px; height: 18px; float: left; margin-right: 8px; opacity: 0.8; }
    .quakemap-error { position: absolute; top: 10px; left: 50%; transform: translateX(-50%); z-index: 1000;
      background: #fff3f3; color: #8a1f11; border: 1px solid #e0b4b4; border-radius: 4px; padding: 6px 12px; font: 14px sans-serif; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <script>window.QUAKEMAP = __QUAKEMAP_BOOT__;</script>
  <script>
  (async function () {
    const boot = window.QUAKEMAP;
    const doc = boot.map;
    let data = boot.markers;
    let failure = null;

    if (!data && boot.markersUrl) {
      try {
        const resp = await fetch(boot.markersUrl);
        if (!resp.ok) {
          throw new Error("HTTP " + resp.status);
        }
        data = await resp.json();
      } catch (err) {
        failure = err;
        console.error("earthquake feed unavailable", err);
      }
    }

    const baseMaps = {};
    for (const layer of doc.baseLayers) {
      baseMaps[layer.name] = L.tileLayer(layer.urlTemplate, { attribution: layer.attribution });
    }

    const overlay = L.layerGroup();
    for (const m of (data ? data.markers : [])) {
      L.circleMarker(m.point, m.style).bindPopup(m.popup).addTo(overlay);
    }

    const map = L.map(doc.container, {
      center: doc.view.center,
      zoom: doc.view.zoom,
      layers: [baseMaps[doc.baseLayers[doc.activeBase].name], overlay]
    });

    L.control.layers(baseMaps, { [doc.overlay]: overlay }, { collapsed: doc.control.collapsed }).addTo(map);

    const legend = L.control({ position: doc.legend.position });
    legend.onAdd = function () {
      const div = L.DomUtil.create("div", "info legend");
      div.innerHTML = boot.legendHtml;
      return div;
    };
    legend.addTo(map);

    if (failure) {
      const banner = document.createElement("div");
      banner.className = "quakemap-error";
      banner.textContent = "Earthquake data could not be loaded.";
      document.body.appendChild(banner);
    }
  })();
  </script>
</body>
</html>
"#;
