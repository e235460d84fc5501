pub mod renderer;
pub mod sweep;
pub mod trajectory;

pub use renderer::{FramePhase, FrameReport, RadarRenderer};
pub use sweep::SweepAnimator;
pub use trajectory::{TrajectoryBuffer, TrajectoryEntry};
