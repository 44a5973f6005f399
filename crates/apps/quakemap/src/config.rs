use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use feed::{DEFAULT_MAX_BYTES, FeedClient, USGS_ALL_WEEK};
use foundation::{LatLng, MapView};

#[derive(Debug, Parser)]
#[command(name = "quakemap", about = "Live earthquake map over a USGS GeoJSON feed")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Listen address for `serve`.
    #[arg(long, global = true, env = "QUAKEMAP_ADDR", default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,

    #[command(flatten)]
    pub feed: FeedArgs,

    #[command(flatten)]
    pub map: MapArgs,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve the map page and the marker endpoint (default).
    Serve,
    /// Fetch the feed once and write a self-contained HTML page.
    Snapshot {
        #[arg(long, short)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct FeedArgs {
    #[arg(long, global = true, env = "QUAKEMAP_FEED_URL", default_value = USGS_ALL_WEEK)]
    pub feed_url: String,

    #[arg(long, global = true, env = "QUAKEMAP_MAX_FEED_BYTES", default_value_t = DEFAULT_MAX_BYTES)]
    pub max_feed_bytes: usize,
}

impl FeedArgs {
    pub fn client(&self, http: reqwest::Client) -> FeedClient {
        FeedClient::new(http, self.feed_url.clone()).with_max_bytes(self.max_feed_bytes)
    }
}

#[derive(Debug, Clone, Args)]
pub struct MapArgs {
    #[arg(long, global = true, env = "QUAKEMAP_CENTER_LAT", default_value_t = 37.09, allow_hyphen_values = true)]
    pub center_lat: f64,

    #[arg(long, global = true, env = "QUAKEMAP_CENTER_LON", default_value_t = -95.71, allow_hyphen_values = true)]
    pub center_lon: f64,

    #[arg(long, global = true, env = "QUAKEMAP_ZOOM", default_value_t = 5)]
    pub zoom: u8,
}

impl MapArgs {
    pub fn view(&self) -> MapView {
        MapView::new(LatLng::new(self.center_lat, self.center_lon), self.zoom)
    }
}
