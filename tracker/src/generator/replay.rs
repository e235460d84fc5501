use crate::generator::PositionSource;
use anyhow::{ensure, Context};
use radarcore::interface::PositionReport;
use radarcore::prelude::GeoPoint;
use std::fs;
use std::path::Path;

/// Replays recorded position reports one per fetch, then holds the last.
pub struct ReplaySource {
    reports: Vec<PositionReport>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(reports: Vec<PositionReport>) -> anyhow::Result<Self> {
        ensure!(!reports.is_empty(), "replay track has no reports");
        Ok(Self { reports, cursor: 0 })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading replay track {}", path_ref.display()))?;
        let reports: Vec<PositionReport> = serde_json::from_str(&contents)
            .with_context(|| format!("parsing replay track {}", path_ref.display()))?;
        Self::new(reports)
    }
}

impl PositionSource for ReplaySource {
    fn fetch_target(&mut self, _now_ms: u32) -> anyhow::Result<GeoPoint> {
        let index = self.cursor.min(self.reports.len() - 1);
        self.cursor = self.cursor.saturating_add(1);
        self.reports[index]
            .geo_point()
            .with_context(|| format!("replay report {index}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TRACK: &str = r#"[
        {"iss_position": {"latitude": "10.0", "longitude": "20.0"}},
        {"iss_position": {"latitude": "bad", "longitude": "21.0"}},
        {"iss_position": {"latitude": "12.0", "longitude": "22.0"}}
    ]"#;

    #[test]
    fn replay_walks_reports_and_holds_the_last() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(TRACK.as_bytes()).unwrap();
        let path = temp.into_temp_path();
        let mut source = ReplaySource::load(&path).unwrap();

        assert_eq!(source.fetch_target(0).unwrap(), GeoPoint::new(10.0, 20.0));
        assert!(source.fetch_target(0).is_err());
        assert_eq!(source.fetch_target(0).unwrap(), GeoPoint::new(12.0, 22.0));
        assert_eq!(source.fetch_target(0).unwrap(), GeoPoint::new(12.0, 22.0));
    }

    #[test]
    fn empty_track_is_rejected() {
        assert!(ReplaySource::new(Vec::new()).is_err());
    }
}
