use std::time::Instant;

/// Millisecond tick counter that wraps at `u32::MAX`, like a device
/// `ticks_ms()`.
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// True once at least `interval_ms` has passed since `since_ms`.
pub fn elapsed_at_least(now_ms: u32, since_ms: u32, interval_ms: u32) -> bool {
    now_ms.wrapping_sub(since_ms) >= interval_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_check_survives_counter_wrap() {
        assert!(elapsed_at_least(1_500, 0, 1_000));
        assert!(!elapsed_at_least(999, 0, 1_000));
        assert!(elapsed_at_least(500, u32::MAX - 499, 1_000));
        assert!(!elapsed_at_least(400, u32::MAX - 499, 1_000));
    }

    #[test]
    fn clock_starts_near_zero() {
        assert!(Clock::new().now_ms() < 1_000);
    }
}
