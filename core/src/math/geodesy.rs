use crate::prelude::{GeoPoint, PolarFix};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const TARGET_ALTITUDE_KM: f64 = 408.0;

/// Returned whenever a fix cannot be computed.
pub const FALLBACK_FIX: PolarFix = PolarFix {
    distance_km: 1000.0,
    surface_km: 1000.0,
    bearing_deg: 0.0,
};

/// Spherical-earth range and bearing between two geographic points.
pub struct PositionCalculator;

impl PositionCalculator {
    /// Computes slant range and forward azimuth from `observer` to `target`.
    ///
    /// Never fails: invalid coordinates or a non-finite result yield
    /// [`FALLBACK_FIX`] so the render loop always has something to draw.
    pub fn compute(observer: GeoPoint, target: GeoPoint) -> PolarFix {
        if !observer.is_valid() || !target.is_valid() {
            log::debug!("invalid fix input {:?} -> {:?}", observer, target);
            return FALLBACK_FIX;
        }

        let obs_lat = observer.latitude.to_radians();
        let obs_lon = observer.longitude.to_radians();
        let tgt_lat = target.latitude.to_radians();
        let tgt_lon = target.longitude.to_radians();

        let dlat = tgt_lat - obs_lat;
        let dlon = tgt_lon - obs_lon;

        let a = (dlat / 2.0).sin().powi(2)
            + obs_lat.cos() * tgt_lat.cos() * (dlon / 2.0).sin().powi(2);
        // rounding can push `a` just past 1 near antipodes
        let surface_km = 2.0 * EARTH_RADIUS_KM * a.clamp(0.0, 1.0).sqrt().asin();
        let distance_km = surface_km.hypot(TARGET_ALTITUDE_KM);

        let y = dlon.sin() * tgt_lat.cos();
        let x = obs_lat.cos() * tgt_lat.sin() - obs_lat.sin() * tgt_lat.cos() * dlon.cos();
        let bearing_deg = normalize_degrees(y.atan2(x).to_degrees());

        if !(distance_km.is_finite() && surface_km.is_finite() && bearing_deg.is_finite()) {
            log::debug!("non-finite fix for {:?} -> {:?}", observer, target);
            return FALLBACK_FIX;
        }

        PolarFix {
            distance_km,
            surface_km,
            bearing_deg,
        }
    }
}

/// Wraps an angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
