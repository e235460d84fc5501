use anyhow::Context;
use radarcore::interface::GeolocationReport;
use radarcore::prelude::GeoPoint;
use std::fs;
use std::path::PathBuf;

/// One-shot observer location lookup.
pub trait ObserverLocator {
    fn locate(&mut self) -> anyhow::Result<GeoPoint>;
}

/// Reads a cached geolocation response from disk.
pub struct GeolocationFile {
    path: PathBuf,
}

impl GeolocationFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ObserverLocator for GeolocationFile {
    fn locate(&mut self) -> anyhow::Result<GeoPoint> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("reading geolocation {}", self.path.display()))?;
        let report = GeolocationReport::from_json(&contents)
            .with_context(|| format!("parsing geolocation {}", self.path.display()))?;
        Ok(report.geo_point()?)
    }
}

/// Resolves the observer, falling back to `fallback` on any failure.
pub fn resolve_observer(locator: Option<&mut dyn ObserverLocator>, fallback: GeoPoint) -> GeoPoint {
    let Some(locator) = locator else {
        log::info!("no geolocation configured, using {:?}", fallback);
        return fallback;
    };
    match locator.locate() {
        Ok(point) => {
            log::info!("geolocation: {}, {}", point.latitude, point.longitude);
            point
        }
        Err(err) => {
            log::warn!("geolocation failed, using fallback coordinates: {err:#}");
            fallback
        }
    }
}
