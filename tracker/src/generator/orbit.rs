use crate::generator::PositionSource;
use crate::workflow::config::FeedConfig;
use anyhow::{bail, ensure};
use rand::{rngs::StdRng, Rng, SeedableRng};
use radarcore::prelude::GeoPoint;

/// Sidereal rotation rate of the Earth in degrees per second.
const EARTH_ROTATION_DEG_S: f64 = 360.0 / 86_164.0905;

/// Parameters of a circular orbit's ground track.
#[derive(Debug, Clone, Copy)]
pub struct OrbitParams {
    pub inclination_deg: f64,
    pub period_min: f64,
    pub start_lon_deg: f64,
    pub phase_deg: f64,
    /// Simulated seconds per wall-clock second.
    pub time_scale: f64,
}

/// Sub-satellite point at `t_s` seconds after epoch.
pub fn ground_track(params: &OrbitParams, t_s: f64) -> GeoPoint {
    let inclination = params.inclination_deg.to_radians();
    let u = (params.phase_deg + 360.0 * t_s / (params.period_min * 60.0)).to_radians();

    let latitude = (inclination.sin() * u.sin()).clamp(-1.0, 1.0).asin().to_degrees();
    let lon_in_plane = (inclination.cos() * u.sin()).atan2(u.cos()).to_degrees();
    let longitude = wrap_longitude(params.start_lon_deg + lon_in_plane - EARTH_ROTATION_DEG_S * t_s);

    GeoPoint::new(latitude, longitude)
}

/// Wraps into `[-180, 180)`.
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Synthetic position feed following a circular orbit, with optional
/// seeded jitter and simulated fetch failures.
pub struct OrbitSource {
    params: OrbitParams,
    jitter_deg: f64,
    failure_rate: f64,
    rng: StdRng,
}

impl OrbitSource {
    pub fn new(params: OrbitParams, jitter_deg: f64, failure_rate: f64, seed: u64) -> anyhow::Result<Self> {
        ensure!(params.period_min > 0.0, "orbit period must be positive");
        ensure!(
            (0.0..=1.0).contains(&failure_rate),
            "failure rate {failure_rate} outside [0, 1]"
        );
        Ok(Self {
            params,
            jitter_deg: jitter_deg.abs(),
            failure_rate,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn from_config(feed: &FeedConfig) -> anyhow::Result<Self> {
        let FeedConfig::Orbit {
            inclination_deg,
            period_min,
            start_lon_deg,
            phase_deg,
            time_scale,
            jitter_deg,
            failure_rate,
            seed,
        } = *feed
        else {
            bail!("feed is not an orbit");
        };
        let params = OrbitParams {
            inclination_deg,
            period_min,
            start_lon_deg,
            phase_deg,
            time_scale,
        };
        Self::new(params, jitter_deg, failure_rate, seed)
    }
}

impl PositionSource for OrbitSource {
    fn fetch_target(&mut self, now_ms: u32) -> anyhow::Result<GeoPoint> {
        if self.failure_rate > 0.0 && self.rng.gen_bool(self.failure_rate) {
            bail!("simulated feed timeout");
        }

        let t_s = now_ms as f64 / 1000.0 * self.params.time_scale;
        let mut point = ground_track(&self.params, t_s);
        if self.jitter_deg > 0.0 {
            point.latitude = (point.latitude + self.rng.gen_range(-self.jitter_deg..self.jitter_deg))
                .clamp(-90.0, 90.0);
            point.longitude = wrap_longitude(
                point.longitude + self.rng.gen_range(-self.jitter_deg..self.jitter_deg),
            );
        }
        Ok(point)
    }
}
