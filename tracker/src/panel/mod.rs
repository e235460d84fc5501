pub mod headless;
pub mod screenshot;
pub mod trigger;

pub use headless::HeadlessPanel;
pub use screenshot::ScreenshotStore;
pub use trigger::ScreenshotTrigger;
