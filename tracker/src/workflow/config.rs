use anyhow::Context;
use radarcore::prelude::{GeoPoint, RadarConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A raw bitmap on disk plus its declared dimensions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetConfig {
    pub path: PathBuf,
    pub width: usize,
    pub height: usize,
}

/// Where target positions come from.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedConfig {
    /// Circular-orbit ground track.
    Orbit {
        #[serde(default = "default_inclination")]
        inclination_deg: f64,
        #[serde(default = "default_period")]
        period_min: f64,
        #[serde(default)]
        start_lon_deg: f64,
        #[serde(default)]
        phase_deg: f64,
        #[serde(default = "default_time_scale")]
        time_scale: f64,
        #[serde(default)]
        jitter_deg: f64,
        #[serde(default)]
        failure_rate: f64,
        #[serde(default)]
        seed: u64,
    },
    /// JSON array of recorded position reports, replayed in order.
    Replay { path: PathBuf },
}

fn default_inclination() -> f64 {
    51.64
}

fn default_period() -> f64 {
    92.68
}

fn default_time_scale() -> f64 {
    1.0
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig::Orbit {
            inclination_deg: default_inclination(),
            period_min: default_period(),
            start_lon_deg: 0.0,
            phase_deg: 0.0,
            time_scale: default_time_scale(),
            jitter_deg: 0.0,
            failure_rate: 0.0,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Used when geolocation is unavailable.
    pub observer: GeoPoint,
    /// Cached geolocation response (`{"lat": .., "lon": ..}`).
    pub observer_file: Option<PathBuf>,
    pub update_interval_ms: u32,
    pub link_check_interval_ms: u32,
    /// The link counts as down while this file exists.
    pub link_down_flag: Option<PathBuf>,
    pub frame_delay_ms: u64,
    pub screenshot_dir: PathBuf,
    pub screenshot_limit: usize,
    pub map: Option<AssetConfig>,
    pub icon: Option<AssetConfig>,
    pub feed: FeedConfig,
    pub radar: RadarConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            observer: GeoPoint::new(40.7128, -74.0060),
            observer_file: None,
            update_interval_ms: 30_000,
            link_check_interval_ms: 2_000,
            link_down_flag: None,
            frame_delay_ms: 25,
            screenshot_dir: PathBuf::from("."),
            screenshot_limit: 10,
            map: None,
            icon: None,
            feed: FeedConfig::default(),
            radar: RadarConfig::default(),
        }
    }
}

impl TrackerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading tracker config {}", path_ref.display()))?;
        let config: TrackerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing tracker config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(latitude: f64, longitude: f64, frame_delay_ms: u64) -> Self {
        Self {
            observer: GeoPoint::new(latitude, longitude),
            frame_delay_ms,
            ..Default::default()
        }
    }
}
