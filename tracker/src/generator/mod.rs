pub mod locator;
pub mod orbit;
pub mod replay;

use crate::workflow::config::FeedConfig;
use radarcore::prelude::GeoPoint;

/// Periodic supplier of the tracked object's coordinates.
pub trait PositionSource {
    fn fetch_target(&mut self, now_ms: u32) -> anyhow::Result<GeoPoint>;
}

pub fn build_source(feed: &FeedConfig) -> anyhow::Result<Box<dyn PositionSource>> {
    match feed {
        FeedConfig::Orbit { .. } => Ok(Box::new(orbit::OrbitSource::from_config(feed)?)),
        FeedConfig::Replay { path } => Ok(Box::new(replay::ReplaySource::load(path)?)),
    }
}
