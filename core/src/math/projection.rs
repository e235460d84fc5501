use crate::prelude::{GeoPoint, PolarFix, RadarConfig, ScreenCoord};

/// Angle of each chevron arm relative to the bearing, in degrees.
pub const CHEVRON_ARM_DEG: f64 = 135.0;

/// Edge marker drawn when the target is beyond radar range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chevron {
    pub base: ScreenCoord,
    /// Arm at `bearing - 135°`.
    pub right: ScreenCoord,
    /// Arm at `bearing + 135°`.
    pub left: ScreenCoord,
}

/// Where the target lands on screen for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    InRange(ScreenCoord),
    OutOfRange(Chevron),
}

impl Placement {
    pub fn in_range(&self) -> bool {
        matches!(self, Placement::InRange(_))
    }

    /// Anchor point: the target itself, or the chevron tip.
    pub fn anchor(&self) -> ScreenCoord {
        match self {
            Placement::InRange(point) => *point,
            Placement::OutOfRange(chevron) => chevron.base,
        }
    }
}

/// Converts a compass bearing and length into a screen-space offset.
///
/// Bearings run clockwise from north and north is screen-up, so the Y
/// component is negated.
pub fn bearing_offset(bearing_deg: f64, length: f64) -> (f64, f64) {
    let rad = bearing_deg.to_radians();
    (length * rad.sin(), -length * rad.cos())
}

/// Point `length` pixels from `origin` along `bearing_deg`.
pub fn screen_from_bearing(origin: ScreenCoord, bearing_deg: f64, length: f64) -> ScreenCoord {
    let (dx, dy) = bearing_offset(bearing_deg, length);
    ScreenCoord::new(origin.x + dx, origin.y + dy)
}

pub struct ProjectionMapper;

impl ProjectionMapper {
    /// Maps a fix onto the radar face.
    ///
    /// Range is decided on the raw distance; the drawn distance is scaled
    /// by `scale_divisor` and clamped to `screen_radius`.
    pub fn to_screen(fix: &PolarFix, config: &RadarConfig) -> Placement {
        let origin = ScreenCoord::new(config.center_x as f64, config.center_y as f64);
        if fix.distance_km <= config.max_distance_km {
            let scaled = (fix.distance_km / config.scale_divisor).min(config.screen_radius);
            return Placement::InRange(screen_from_bearing(origin, fix.bearing_deg, scaled));
        }
        Placement::OutOfRange(Self::chevron(
            origin,
            fix.bearing_deg,
            config.screen_radius - config.arrow_buffer,
            config.marker_size,
        ))
    }

    /// Chevron with its tip `radius` px out along the bearing and arms of
    /// `marker_size` px at ±135°.
    pub fn chevron(origin: ScreenCoord, bearing_deg: f64, radius: f64, marker_size: f64) -> Chevron {
        let base = screen_from_bearing(origin, bearing_deg, radius);
        Chevron {
            base,
            right: screen_from_bearing(base, bearing_deg - CHEVRON_ARM_DEG, marker_size),
            left: screen_from_bearing(base, bearing_deg + CHEVRON_ARM_DEG, marker_size),
        }
    }

    /// Pixel offset into an equirectangular background raster that puts the
    /// observer under the display center. Longitude wraps, latitude does not.
    pub fn map_offset(observer: GeoPoint, map_width: usize, map_height: usize) -> (i32, i32) {
        let width = map_width as f64;
        let height = map_height as f64;
        let x_offset = (width / 2.0 + observer.longitude * width / 360.0) as i32;
        let y_offset = (height / 2.0 - observer.latitude * height / 180.0) as i32;
        (x_offset.rem_euclid((map_width as i32).max(1)), y_offset)
    }
}
