use crate::generator::PositionSource;
use crate::panel::{HeadlessPanel, ScreenshotStore, ScreenshotTrigger};
use crate::workflow::clock::elapsed_at_least;
use crate::workflow::config::{AssetConfig, TrackerConfig};
use crate::workflow::link::LinkMonitor;
use anyhow::Context;
use radarcore::interface::{IconBitmap, MonoBitmap};
use radarcore::prelude::GeoPoint;
use radarcore::processing::{FrameReport, RadarRenderer};
use radarcore::telemetry::{LogManager, Metrics, MetricsRecorder};
use std::fs;
use std::path::PathBuf;

/// Everything the host owns between ticks: the renderer with its sweep and
/// trail, the panel, the feeds and the refresh timers.
pub struct HostLoop {
    renderer: RadarRenderer,
    panel: HeadlessPanel,
    source: Box<dyn PositionSource>,
    link: Box<dyn LinkMonitor>,
    screenshots: ScreenshotStore,
    trigger: ScreenshotTrigger,
    metrics: MetricsRecorder,
    logger: LogManager,
    observer: GeoPoint,
    target: GeoPoint,
    update_interval_ms: u32,
    link_check_interval_ms: u32,
    last_fetch_ms: u32,
    last_link_check_ms: u32,
    link_up: bool,
}

impl HostLoop {
    pub fn new(
        config: &TrackerConfig,
        observer: GeoPoint,
        source: Box<dyn PositionSource>,
        link: Box<dyn LinkMonitor>,
    ) -> anyhow::Result<Self> {
        let renderer = build_renderer(config)?;
        Ok(Self {
            renderer,
            panel: HeadlessPanel::default(),
            source,
            link,
            screenshots: ScreenshotStore::open(&config.screenshot_dir, config.screenshot_limit),
            trigger: ScreenshotTrigger::new(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("host"),
            observer,
            target: GeoPoint::new(0.0, 0.0),
            update_interval_ms: config.update_interval_ms,
            link_check_interval_ms: config.link_check_interval_ms,
            last_fetch_ms: 0,
            last_link_check_ms: 0,
            link_up: true,
        })
    }

    /// Handle for a signal callback to request a screenshot.
    pub fn trigger(&self) -> ScreenshotTrigger {
        self.trigger.clone()
    }

    pub fn link_connected(&mut self) -> bool {
        self.link.is_connected()
    }

    pub fn pulse_panel(&mut self) {
        self.panel.pulse();
    }

    /// Initial fetch and timer reset; call once before the first tick.
    pub fn start(&mut self, now_ms: u32) {
        self.refresh_target(now_ms);
        self.last_fetch_ms = now_ms;
        self.last_link_check_ms = now_ms;
        self.renderer.start_clock(now_ms);
        self.logger.record(&format!(
            "observer {:.4}, {:.4}; refresh every {} ms; {} screenshots on disk",
            self.observer.latitude,
            self.observer.longitude,
            self.update_interval_ms,
            self.screenshots.count()
        ));
    }

    /// Link check, periodic refresh, one frame, then any pending screenshot.
    pub fn tick(&mut self, now_ms: u32) -> FrameReport {
        if elapsed_at_least(now_ms, self.last_link_check_ms, self.link_check_interval_ms) {
            self.check_link();
            self.last_link_check_ms = now_ms;
        }

        if elapsed_at_least(now_ms, self.last_fetch_ms, self.update_interval_ms) {
            self.refresh_target(now_ms);
            self.last_fetch_ms = now_ms;
        }

        let report = self
            .renderer
            .render(&mut self.panel, now_ms, self.observer, self.target);
        self.metrics.record_frame();

        if self.trigger.take() {
            self.save_screenshot();
        }
        report
    }

    /// Writes the visible frame as the next numbered screenshot.
    pub fn save_screenshot(&mut self) -> Option<PathBuf> {
        match self.screenshots.save(self.panel.visible()) {
            Ok(Some(path)) => {
                self.metrics.record_screenshot();
                Some(path)
            }
            Ok(None) => None,
            Err(err) => {
                self.logger.degraded(&format!("screenshot failed: {err:#}"));
                None
            }
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    pub fn target(&self) -> GeoPoint {
        self.target
    }

    pub fn observer(&self) -> GeoPoint {
        self.observer
    }

    pub fn panel(&self) -> &HeadlessPanel {
        &self.panel
    }

    pub fn renderer(&self) -> &RadarRenderer {
        &self.renderer
    }

    fn refresh_target(&mut self, now_ms: u32) {
        match self.source.fetch_target(now_ms) {
            Ok(point) => {
                self.target = point;
                self.metrics.record_fetch(true);
            }
            Err(err) => {
                self.metrics.record_fetch(false);
                self.logger.degraded(&format!(
                    "target refresh failed, keeping {:.2}, {:.2}: {err:#}",
                    self.target.latitude, self.target.longitude
                ));
            }
        }
    }

    fn check_link(&mut self) {
        let connected = self.link.is_connected();
        if connected == self.link_up {
            return;
        }
        self.logger.record(&format!(
            "link state changed: {}",
            if connected { "connected" } else { "disconnected" }
        ));
        if !connected {
            self.panel.show_link_lost();
        }
        self.link_up = connected;
    }
}

fn build_renderer(config: &TrackerConfig) -> anyhow::Result<RadarRenderer> {
    let mut renderer = RadarRenderer::new(config.radar.clone());
    if let Some(map) = config.map.as_ref() {
        let bits = read_asset(map)?;
        let bitmap = MonoBitmap::new(map.width, map.height, bits)
            .with_context(|| format!("decoding map {}", map.path.display()))?;
        renderer = renderer.with_map(bitmap);
    }
    if let Some(icon) = config.icon.as_ref() {
        let bytes = read_asset(icon)?;
        let bitmap = IconBitmap::from_le_bytes(icon.width, icon.height, &bytes)
            .with_context(|| format!("decoding icon {}", icon.path.display()))?;
        renderer = renderer.with_icon(bitmap);
    }
    Ok(renderer)
}

fn read_asset(asset: &AssetConfig) -> anyhow::Result<Vec<u8>> {
    fs::read(&asset.path).with_context(|| format!("reading asset {}", asset.path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::link::AlwaysUp;
    use radarcore::prelude::{PixelSink, RadarConfig};
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use tempfile::tempdir;

    struct ScriptedSource {
        script: VecDeque<anyhow::Result<GeoPoint>>,
        calls: Rc<Cell<usize>>,
    }

    impl PositionSource for ScriptedSource {
        fn fetch_target(&mut self, _now_ms: u32) -> anyhow::Result<GeoPoint> {
            self.calls.set(self.calls.get() + 1);
            self.script
                .pop_front()
                .unwrap_or_else(|| Err(anyhow::anyhow!("script exhausted")))
        }
    }

    struct ScriptedLink {
        states: VecDeque<bool>,
    }

    impl LinkMonitor for ScriptedLink {
        fn is_connected(&mut self) -> bool {
            self.states.pop_front().unwrap_or(true)
        }
    }

    fn test_radar() -> RadarConfig {
        RadarConfig {
            trail_capacity: 16,
            ..RadarConfig::default()
        }
    }

    fn host(
        dir: &std::path::Path,
        script: Vec<anyhow::Result<GeoPoint>>,
        link: Box<dyn LinkMonitor>,
    ) -> (HostLoop, Rc<Cell<usize>>) {
        let config = TrackerConfig {
            screenshot_dir: dir.to_path_buf(),
            radar: test_radar(),
            ..TrackerConfig::default()
        };
        let calls = Rc::new(Cell::new(0));
        let source = ScriptedSource {
            script: script.into(),
            calls: calls.clone(),
        };
        let host = HostLoop::new(&config, GeoPoint::new(0.0, 0.0), Box::new(source), link).unwrap();
        (host, calls)
    }

    #[test]
    fn refresh_runs_on_the_update_interval() {
        let dir = tempdir().unwrap();
        let (mut host, calls) = host(
            dir.path(),
            vec![Ok(GeoPoint::new(10.0, 0.0)), Ok(GeoPoint::new(15.0, 0.0))],
            Box::new(AlwaysUp),
        );
        host.start(0);
        assert_eq!(calls.get(), 1);
        for now in (25..30_000).step_by(25) {
            host.tick(now);
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(host.target(), GeoPoint::new(10.0, 0.0));
        host.tick(30_000);
        assert_eq!(calls.get(), 2);
        assert_eq!(host.target(), GeoPoint::new(15.0, 0.0));
    }

    #[test]
    fn failed_refresh_keeps_the_previous_target() {
        let dir = tempdir().unwrap();
        let (mut host, _) = host(
            dir.path(),
            vec![Ok(GeoPoint::new(10.0, 0.0)), Err(anyhow::anyhow!("timeout"))],
            Box::new(AlwaysUp),
        );
        host.start(0);
        let report = host.tick(30_000);
        assert_eq!(host.target(), GeoPoint::new(10.0, 0.0));
        assert!(report.committed);
        let metrics = host.metrics();
        assert_eq!((metrics.fetch_ok, metrics.fetch_failures, metrics.frames), (1, 1, 1));
    }

    #[test]
    fn link_loss_flashes_an_inverted_frame_once() {
        let dir = tempdir().unwrap();
        let link = ScriptedLink {
            states: vec![false, false, true].into(),
        };
        let (mut host, _) = host(dir.path(), vec![Ok(GeoPoint::new(10.0, 0.0))], Box::new(link));
        host.start(0);

        host.tick(1_000);
        assert_eq!(host.panel().commits(), 1);
        host.tick(2_000);
        // inversion commit plus the frame itself
        assert_eq!(host.panel().commits(), 3);
        host.tick(4_000);
        assert_eq!(host.panel().commits(), 4);
        host.tick(6_000);
        assert_eq!(host.panel().commits(), 5);
    }

    #[test]
    fn screenshot_request_is_served_on_the_next_tick() {
        let dir = tempdir().unwrap();
        let (mut host, _) = host(dir.path(), vec![Ok(GeoPoint::new(10.0, 0.0))], Box::new(AlwaysUp));
        host.start(0);
        host.trigger().request();
        host.tick(25);

        let saved = dir.path().join("screenshot_001.bin");
        let bytes = fs::read(&saved).unwrap();
        assert_eq!(bytes, host.panel().visible().to_le_bytes());
        assert_eq!(host.metrics().screenshots, 1);

        host.tick(50);
        assert!(!dir.path().join("screenshot_002.bin").exists());
    }

    #[test]
    fn frames_show_the_radar_face() {
        let dir = tempdir().unwrap();
        let (mut host, _) = host(dir.path(), vec![Ok(GeoPoint::new(10.0, 0.0))], Box::new(AlwaysUp));
        host.start(0);
        let report = host.tick(25);
        assert!(report.in_range());
        assert_eq!(host.panel().visible().get_pixel(150, 120), Some(0xFFFF));
        assert_eq!(host.renderer().trail().len(), 1);
    }

    #[test]
    fn missing_asset_is_reported() {
        let config = TrackerConfig {
            map: Some(AssetConfig {
                path: PathBuf::from("/nonexistent/map.bin"),
                width: 360,
                height: 180,
            }),
            ..TrackerConfig::default()
        };
        let err = build_renderer(&config).err().unwrap();
        assert!(format!("{err:#}").contains("reading asset"));
    }
}
