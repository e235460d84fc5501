use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and inside their bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Range and bearing from the observer to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarFix {
    /// Slant range in km.
    pub distance_km: f64,
    /// Great-circle surface distance in km.
    pub surface_km: f64,
    /// Degrees clockwise from north, in `[0, 360)`.
    pub bearing_deg: f64,
}

/// Integer pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Sub-pixel screen position produced by projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCoord {
    pub x: f64,
    pub y: f64,
}

impl ScreenCoord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Truncates toward zero.
    pub fn pixel(self) -> ScreenPoint {
        ScreenPoint::new(self.x as i32, self.y as i32)
    }
}

/// Display geometry, scaling constants and palette for the radar plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub center_x: i32,
    pub center_y: i32,
    pub screen_radius: f64,
    pub ring_radii: Vec<i32>,
    pub sweep_length: f64,
    pub scale_divisor: f64,
    pub max_distance_km: f64,
    pub arrow_buffer: f64,
    pub marker_size: f64,
    pub trail_capacity: usize,
    pub trail_min_step_px: i32,
    pub trail_break_px: f64,
    pub dash_length: u32,
    pub gap_length: u32,
    pub label_tolerance_deg: f64,
    pub map_nudge_x: i32,
    pub map_nudge_y: i32,
    pub map_step: usize,
    pub foreground: u16,
    pub trail_color: u16,
    pub map_color: u16,
    pub background: u16,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            center_x: 120,
            center_y: 120,
            screen_radius: 120.0,
            ring_radii: vec![30, 60, 90],
            sweep_length: 120.0,
            scale_divisor: 100.0,
            max_distance_km: 12_000.0,
            arrow_buffer: 10.0,
            marker_size: 10.0,
            trail_capacity: 1000,
            trail_min_step_px: 5,
            trail_break_px: 30.0,
            dash_length: 3,
            gap_length: 3,
            label_tolerance_deg: 12.0,
            map_nudge_x: 16,
            map_nudge_y: -50,
            map_step: 2,
            foreground: 0xFFFF,
            trail_color: 0xE739,
            map_color: 0x6631,
            background: 0x0000,
        }
    }
}

impl RadarConfig {
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.center_x, self.center_y)
    }
}

/// Common error type for the radar core.
#[derive(thiserror::Error, Debug)]
pub enum RadarError {
    #[error("asset size mismatch: expected {expected} bytes, got {actual}")]
    AssetSize { expected: usize, actual: usize },
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("malformed feed payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("coordinate out of range: {0}")]
    Coordinate(String),
}

pub type RadarResult<T> = Result<T, RadarError>;

/// Raw 16-bit (RGB565) pixel access. Out-of-bounds writes are ignored and
/// out-of-bounds reads return `None`.
pub trait PixelSink {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn set_pixel(&mut self, x: i32, y: i32, color: u16);
    fn get_pixel(&self, x: i32, y: i32) -> Option<u16>;

    fn fill(&mut self, color: u16) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_pixel(x, y, color);
            }
        }
    }
}

/// A pixel sink backed by a physical or virtual panel.
pub trait Display: PixelSink {
    fn commit_frame(&mut self);
}
