pub mod asset;
pub mod feed;
pub mod font;
pub mod framebuffer;

pub use asset::{IconBitmap, MonoBitmap};
pub use feed::{GeolocationReport, PositionReport};
pub use font::TinyFont;
pub use framebuffer::FrameBuffer;
