//! Position, projection and rasterization core for the orbital radar scope.
//!
//! Everything here is synchronous and I/O free. The host supplies time,
//! coordinates and a pixel sink; the renderer composes one frame per call.

pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{Display, GeoPoint, PixelSink, PolarFix, RadarConfig, ScreenPoint};
