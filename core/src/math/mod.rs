pub mod geodesy;
pub mod projection;
pub mod raster;

pub use geodesy::PositionCalculator;
pub use projection::{Chevron, Placement, ProjectionMapper};
pub use raster::Rasterizer;
