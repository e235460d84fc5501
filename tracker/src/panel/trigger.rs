use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Screenshot request flag shared between a signal callback and the
/// render loop. The callback only sets it; the loop clears it.
#[derive(Clone, Default)]
pub struct ScreenshotTrigger {
    requested: Arc<AtomicBool>,
}

impl ScreenshotTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Returns whether a request was pending and clears it.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_coalesce_until_taken() {
        let trigger = ScreenshotTrigger::new();
        let handler = trigger.clone();
        assert!(!trigger.take());
        handler.request();
        handler.request();
        assert!(trigger.take());
        assert!(!trigger.take());
    }
}
