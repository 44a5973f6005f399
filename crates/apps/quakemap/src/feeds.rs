use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use feed::{FeedClient, FeedError, QuakeFeed};
use foundation::EventTime;
use layers::{MapDocument, QuakeMarker, QuakeOverlay};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::page::{self, MARKERS_PATH, MarkerSource};

#[derive(Clone)]
pub struct AppState {
    pub feed: FeedClient,
    pub map: Arc<MapDocument>,
}

impl AppState {
    pub fn new(feed: FeedClient, map: MapDocument) -> Self {
        Self {
            feed,
            map: Arc::new(map),
        }
    }
}

/// Marker payload handed to the presenter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSet {
    pub title: Option<String>,
    pub generated: Option<EventTime>,
    pub overlay: String,
    pub count: usize,
    pub skipped: usize,
    pub markers: Vec<QuakeMarker>,
}

impl MarkerSet {
    pub fn from_overlay(
        title: Option<String>,
        generated: Option<EventTime>,
        skipped: usize,
        overlay: QuakeOverlay,
    ) -> Self {
        Self {
            title,
            generated,
            overlay: overlay.name,
            count: overlay.markers.len(),
            skipped,
            markers: overlay.markers,
        }
    }

    pub fn from_feed(feed: QuakeFeed) -> Self {
        let overlay = QuakeOverlay::from_features(&feed.features);
        Self::from_overlay(feed.title, feed.generated, feed.skipped, overlay)
    }
}

/// One upstream fetch, fully adapted. Nothing is kept between calls.
pub async fn load_markers(feed: &FeedClient) -> Result<MarkerSet, FeedError> {
    let quakes = feed.fetch().await?;
    let set = MarkerSet::from_feed(quakes);
    info!(
        markers = set.count,
        skipped = set.skipped,
        "earthquake overlay rebuilt"
    );
    Ok(set)
}

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

fn status_for(err: &FeedError) -> StatusCode {
    match err {
        FeedError::UnsupportedUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        FeedError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        FeedError::Request(_) | FeedError::Status(_) | FeedError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

pub async fn earthquakes(
    State(state): State<AppState>,
) -> Result<Json<MarkerSet>, (StatusCode, Json<Value>)> {
    match load_markers(&state.feed).await {
        Ok(set) => Ok(Json(set)),
        Err(err) => {
            error!(url = state.feed.url(), "earthquake feed unavailable: {err}");
            Err(api_error(status_for(&err), err.to_string()))
        }
    }
}

pub async fn map_document(State(state): State<AppState>) -> Json<MapDocument> {
    Json(state.map.as_ref().clone())
}

pub async fn index(State(state): State<AppState>) -> Response {
    match page::render(&state.map, MarkerSource::Endpoint(MARKERS_PATH)) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("page render failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "page error").into_response()
        }
    }
}

pub async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::get;
    use pretty_assertions::assert_eq;

    pub(crate) const TWO_QUAKES: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"title": "USGS All Earthquakes, Past Week", "generated": 1700000300000, "count": 3},
        "features": [
            {"type":"Feature","id":"nc1",
             "properties":{"mag":4.2,"place":"10km N of X","time":1700000000000},
             "geometry":{"type":"Point","coordinates":[-120.5,38.2,12.3]}},
            {"type":"Feature","id":"broken",
             "properties":{"mag":1.0,"place":"nowhere","time":1700000000500},
             "geometry":null},
            {"type":"Feature","id":"hv2",
             "properties":{"mag":0.0,"place":"Volcano","time":1700000001000},
             "geometry":{"type":"Point","coordinates":[-155.3,19.4,-1.5]}}
        ]
    }"#;

    /// Starts a stand-in for the USGS endpoint and returns its base URL.
    pub(crate) async fn upstream() -> String {
        let router = Router::new()
            .route("/week.geojson", get(|| async { TWO_QUAKES }))
            .route(
                "/empty.geojson",
                get(|| async { r#"{"type":"FeatureCollection","features":[]}"# }),
            )
            .route(
                "/down",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub(crate) fn state_for(url: String) -> AppState {
        AppState::new(
            FeedClient::new(reqwest::Client::new(), url),
            MapDocument::default(),
        )
    }

    #[tokio::test]
    async fn markers_are_adapted_from_the_feed() {
        let base = upstream().await;
        let state = state_for(format!("{base}/week.geojson"));

        let Json(set) = earthquakes(State(state)).await.unwrap();
        assert_eq!(set.title.as_deref(), Some("USGS All Earthquakes, Past Week"));
        assert_eq!(set.generated, Some(EventTime(1_700_000_300_000)));
        assert_eq!(set.overlay, "Earthquakes");
        assert_eq!(set.count, 2);
        assert_eq!(set.skipped, 1);

        let first = &set.markers[0];
        assert_eq!(first.id.as_deref(), Some("nc1"));
        assert_eq!((first.point.lat, first.point.lng), (38.2, -120.5));
        assert_eq!(first.style.radius, 21.0);
        assert_eq!(first.style.fill_color.to_string(), "#34ebc6");

        let second = &set.markers[1];
        assert_eq!(second.style.radius, 0.0);
        assert_eq!(second.style.fill_color.to_string(), "#9d34eb");
    }

    #[tokio::test]
    async fn empty_feed_gives_empty_overlay() {
        let base = upstream().await;
        let state = state_for(format!("{base}/empty.geojson"));

        let Json(set) = earthquakes(State(state)).await.unwrap();
        assert_eq!(set.count, 0);
        assert!(set.markers.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_bad_gateway() {
        let base = upstream().await;
        let state = state_for(format!("{base}/down"));

        let (status, Json(body)) = earthquakes(State(state)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "feed responded with HTTP 500");
    }

    #[tokio::test]
    async fn misconfigured_url_is_a_server_error() {
        let state = state_for("ftp://example.org/feed".to_string());
        let (status, _) = earthquakes(State(state)).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn map_document_is_served_as_configured() {
        let state = state_for("http://127.0.0.1:1/unused".to_string());
        let Json(doc) = map_document(State(state)).await;
        assert_eq!(doc, MapDocument::default());
    }
}
