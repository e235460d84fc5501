use crate::interface::asset::{IconBitmap, MonoBitmap};
use crate::interface::font::TinyFont;
use crate::math::geodesy::PositionCalculator;
use crate::math::projection::{bearing_offset, Placement, ProjectionMapper};
use crate::math::raster::Rasterizer;
use crate::prelude::{Display, GeoPoint, PixelSink, PolarFix, RadarConfig};
use crate::processing::sweep::SweepAnimator;
use crate::processing::trajectory::TrajectoryBuffer;
use crate::telemetry::log::LogManager;

/// Half-width of the horizontal crosshair bar.
const CROSSHAIR_HALF_WIDTH: i32 = 8;
/// Vertical gap between the two label lines.
const LABEL_LINE_SPACING: i32 = 6;
/// Label offset below the chevron tip.
const ARROW_LABEL_DROP: f64 = 8.0;

/// Drawing phases of one frame, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Background,
    Rings,
    Trajectory,
    SweepAndCrosshair,
    TargetOrArrow,
    Label,
    Commit,
}

impl FramePhase {
    pub const ORDER: [FramePhase; 7] = [
        FramePhase::Background,
        FramePhase::Rings,
        FramePhase::Trajectory,
        FramePhase::SweepAndCrosshair,
        FramePhase::TargetOrArrow,
        FramePhase::Label,
        FramePhase::Commit,
    ];
}

/// What one call to [`RadarRenderer::render`] drew.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Whole-degree sweep angle used for drawing.
    pub sweep_deg: f64,
    pub fix: Option<PolarFix>,
    pub placement: Option<Placement>,
    pub trail_appended: bool,
    pub trail_segments: usize,
    pub trail_breaks: usize,
    pub label_drawn: bool,
    pub committed: bool,
}

impl FrameReport {
    pub fn in_range(&self) -> bool {
        self.placement.map(|p| p.in_range()).unwrap_or(false)
    }
}

/// Owns the sweep and trail state and composes one frame per tick.
pub struct RadarRenderer {
    config: RadarConfig,
    sweep: SweepAnimator,
    trail: TrajectoryBuffer,
    map: Option<MonoBitmap>,
    icon: IconBitmap,
    font: TinyFont,
    logger: LogManager,
}

impl RadarRenderer {
    pub fn new(config: RadarConfig) -> Self {
        let trail = TrajectoryBuffer::with_capacity(config.trail_capacity, config.trail_min_step_px);
        let logger = LogManager::new("renderer");
        logger.record(&format!(
            "radar ready: center ({}, {}), trail capacity {}",
            config.center_x, config.center_y, config.trail_capacity
        ));
        Self {
            config,
            sweep: SweepAnimator::new(),
            trail,
            map: None,
            icon: IconBitmap::satellite(),
            font: TinyFont,
            logger,
        }
    }

    pub fn with_map(mut self, map: MonoBitmap) -> Self {
        self.logger
            .record(&format!("background map {}x{}", map.width(), map.height()));
        self.map = Some(map);
        self
    }

    pub fn with_icon(mut self, icon: IconBitmap) -> Self {
        self.icon = icon;
        self
    }

    /// Restarts sweep timing from `now_ms` so the first frame does not
    /// credit time spent before rendering began.
    pub fn start_clock(&mut self, now_ms: u32) {
        self.sweep = SweepAnimator::starting_at(now_ms);
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    pub fn trail(&self) -> &TrajectoryBuffer {
        &self.trail
    }

    pub fn sweep(&self) -> &SweepAnimator {
        &self.sweep
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Draws and commits a full frame for the given instant.
    pub fn render<D: Display + ?Sized>(
        &mut self,
        display: &mut D,
        now_ms: u32,
        observer: GeoPoint,
        target: GeoPoint,
    ) -> FrameReport {
        let mut report = FrameReport {
            sweep_deg: self.sweep.advance(now_ms).trunc(),
            ..Default::default()
        };

        for phase in FramePhase::ORDER {
            match phase {
                FramePhase::Background => {
                    display.fill(self.config.background);
                    self.draw_background(display, observer);
                }
                FramePhase::Rings => self.draw_rings(display),
                FramePhase::Trajectory => self.draw_trail(display, &mut report),
                FramePhase::SweepAndCrosshair => self.draw_sweep(display, report.sweep_deg),
                FramePhase::TargetOrArrow => {
                    self.draw_target(display, observer, target, now_ms, &mut report)
                }
                FramePhase::Label => self.draw_label(display, target, &mut report),
                FramePhase::Commit => {
                    display.commit_frame();
                    report.committed = true;
                }
            }
        }

        self.logger.trace_frame(&format!(
            "sweep {:.0} in_range {} trail {}",
            report.sweep_deg,
            report.in_range(),
            self.trail.len()
        ));
        report
    }

    fn draw_background<S: PixelSink + ?Sized>(&self, sink: &mut S, observer: GeoPoint) {
        let Some(map) = self.map.as_ref() else {
            return;
        };
        let (map_w, map_h) = (map.width() as i32, map.height() as i32);
        let (x_offset, y_offset) = ProjectionMapper::map_offset(observer, map.width(), map.height());
        let start_x = self.config.center_x - x_offset + self.config.map_nudge_x;
        let start_y = self.config.center_y - y_offset + self.config.map_nudge_y;
        let step = self.config.map_step.max(1);

        for screen_y in (0..sink.height()).step_by(step) {
            let map_y = screen_y - start_y;
            if !(0..map_h).contains(&map_y) {
                continue;
            }
            for screen_x in (0..sink.width()).step_by(step) {
                let map_x = (screen_x - start_x).rem_euclid(map_w);
                if map.is_set(map_x as usize, map_y as usize) {
                    sink.set_pixel(screen_x, screen_y, self.config.map_color);
                }
            }
        }
    }

    fn draw_trail<S: PixelSink + ?Sized>(&self, sink: &mut S, report: &mut FrameReport) {
        for (from, to) in self.trail.segments() {
            let dx = (to.x - from.x) as f64;
            let dy = (to.y - from.y) as f64;
            let distance = dx.hypot(dy);
            if distance > self.config.trail_break_px {
                report.trail_breaks += 1;
                continue;
            }
            if distance > 0.0 {
                Rasterizer::draw_dashed_segment(
                    sink,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    self.config.dash_length,
                    self.config.gap_length,
                    self.config.trail_color,
                );
                report.trail_segments += 1;
            }
        }
    }

    fn draw_rings<S: PixelSink + ?Sized>(&self, sink: &mut S) {
        let (cx, cy) = (self.config.center_x, self.config.center_y);
        let color = self.config.foreground;
        for &radius in &self.config.ring_radii {
            Rasterizer::draw_circle(sink, cx, cy, radius, color);
        }
    }

    fn draw_sweep<S: PixelSink + ?Sized>(&self, sink: &mut S, sweep_deg: f64) {
        let (cx, cy) = (self.config.center_x, self.config.center_y);
        let color = self.config.foreground;
        Rasterizer::draw_line(sink, cx, 0, cx, cy, color);
        Rasterizer::draw_line(
            sink,
            cx - CROSSHAIR_HALF_WIDTH,
            cy,
            cx + CROSSHAIR_HALF_WIDTH,
            cy,
            color,
        );

        let (dx, dy) = bearing_offset(sweep_deg, self.config.sweep_length);
        Rasterizer::draw_line(sink, cx, cy, cx + dx as i32, cy + dy as i32, color);
    }

    fn draw_target<S: PixelSink + ?Sized>(
        &mut self,
        sink: &mut S,
        observer: GeoPoint,
        target: GeoPoint,
        now_ms: u32,
        report: &mut FrameReport,
    ) {
        let fix = PositionCalculator::compute(observer, target);
        let placement = ProjectionMapper::to_screen(&fix, &self.config);
        let color = self.config.foreground;

        match placement {
            Placement::InRange(coord) => {
                report.trail_appended = self.trail.maybe_append(coord.pixel(), now_ms);
                let (icon_x, icon_y) = self.icon_origin(coord.x, coord.y);
                Rasterizer::draw_icon(sink, &self.icon, icon_x, icon_y, color);
            }
            Placement::OutOfRange(chevron) => {
                let base = chevron.base.pixel();
                for arm in [chevron.right.pixel(), chevron.left.pixel()] {
                    Rasterizer::draw_line(sink, base.x, base.y, arm.x, arm.y, color);
                }
            }
        }

        report.fix = Some(fix);
        report.placement = Some(placement);
    }

    fn draw_label<S: PixelSink + ?Sized>(&self, sink: &mut S, target: GeoPoint, report: &mut FrameReport) {
        let (Some(fix), Some(placement)) = (report.fix, report.placement) else {
            return;
        };
        if !SweepAnimator::near(report.sweep_deg, fix.bearing_deg, self.config.label_tolerance_deg) {
            return;
        }

        let (x, y) = match placement {
            Placement::InRange(coord) => {
                let (icon_x, icon_y) = self.icon_origin(coord.x, coord.y);
                (icon_x, icon_y + self.icon.height() as i32 + 1)
            }
            Placement::OutOfRange(chevron) => (
                chevron.base.x as i32,
                (chevron.base.y + ARROW_LABEL_DROP) as i32,
            ),
        };

        let (lat, lon) = coordinate_label(target);
        let color = self.config.foreground;
        Rasterizer::draw_text(sink, &self.font, &lat, x, y, color);
        Rasterizer::draw_text(sink, &self.font, &lon, x, y + LABEL_LINE_SPACING, color);
        report.label_drawn = true;
    }

    fn icon_origin(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (x - (self.icon.width() / 2) as f64) as i32,
            (y - (self.icon.height() / 2) as f64) as i32,
        )
    }
}

/// Latitude and longitude with one decimal and a hemisphere letter,
/// e.g. `("51.6N", "0.1W")`.
pub fn coordinate_label(point: GeoPoint) -> (String, String) {
    let lat = format!(
        "{:.1}{}",
        point.latitude.abs(),
        if point.latitude >= 0.0 { 'N' } else { 'S' }
    );
    let lon = format!(
        "{:.1}{}",
        point.longitude.abs(),
        if point.longitude >= 0.0 { 'E' } else { 'W' }
    );
    (lat, lon)
}
