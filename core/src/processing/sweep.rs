/// Longest elapsed interval credited to a single advance.
pub const MAX_STEP_MS: u32 = 100;
/// Milliseconds per degree of sweep (one revolution per 18 s).
pub const MS_PER_DEGREE: f64 = 50.0;
pub const DEFAULT_TOLERANCE_DEG: f64 = 12.0;

/// Rotating sweep angle driven by wall-clock time rather than frame count.
#[derive(Debug, Clone)]
pub struct SweepAnimator {
    angle_deg: f64,
    last_update_ms: u32,
}

impl SweepAnimator {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Animator whose first advance measures from `now_ms`.
    pub fn starting_at(now_ms: u32) -> Self {
        Self {
            angle_deg: 0.0,
            last_update_ms: now_ms,
        }
    }

    /// Advances by the time since the previous call, at most
    /// [`MAX_STEP_MS`], and returns the new angle in `[0, 360)`.
    ///
    /// The millisecond counter may wrap; the difference is taken modulo 2^32.
    pub fn advance(&mut self, now_ms: u32) -> f64 {
        let elapsed = now_ms.wrapping_sub(self.last_update_ms).min(MAX_STEP_MS);
        self.last_update_ms = now_ms;
        self.angle_deg = (self.angle_deg + elapsed as f64 / MS_PER_DEGREE) % 360.0;
        self.angle_deg
    }

    pub fn angle(&self) -> f64 {
        self.angle_deg
    }

    pub fn last_update_ms(&self) -> u32 {
        self.last_update_ms
    }

    /// Whether the sweep is within `tolerance_deg` of `bearing_deg`,
    /// measured the short way round the circle.
    pub fn near(sweep_deg: f64, bearing_deg: f64, tolerance_deg: f64) -> bool {
        let mut diff = (sweep_deg - bearing_deg).abs() % 360.0;
        if diff > 180.0 {
            diff = 360.0 - diff;
        }
        diff <= tolerance_deg
    }
}

impl Default for SweepAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_revolution_in_eighteen_seconds() {
        let mut sweep = SweepAnimator::starting_at(5_000);
        let start = sweep.angle();
        let mut previous = start;
        let mut wraps = 0;
        for step in 1..=180u32 {
            let angle = sweep.advance(5_000 + step * 100);
            if angle < previous {
                wraps += 1;
            }
            previous = angle;
        }
        assert_eq!(sweep.angle(), start);
        assert_eq!(wraps, 1);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut sweep = SweepAnimator::starting_at(0);
        assert_eq!(sweep.advance(30_000), 2.0);
        assert_eq!(sweep.last_update_ms(), 30_000);
        assert_eq!(sweep.advance(30_025), 2.5);
    }

    #[test]
    fn counter_wraparound_is_a_short_step() {
        let mut sweep = SweepAnimator::starting_at(u32::MAX - 9);
        assert_eq!(sweep.advance(15), 0.5);
    }

    #[test]
    fn repeated_timestamp_does_not_move() {
        let mut sweep = SweepAnimator::starting_at(1_000);
        sweep.advance(1_050);
        let angle = sweep.angle();
        assert_eq!(sweep.advance(1_050), angle);
    }

    #[test]
    fn near_accounts_for_wraparound() {
        assert!(SweepAnimator::near(355.0, 5.0, DEFAULT_TOLERANCE_DEG));
        assert!(SweepAnimator::near(5.0, 355.0, DEFAULT_TOLERANCE_DEG));
        assert!(SweepAnimator::near(100.0, 112.0, DEFAULT_TOLERANCE_DEG));
        assert!(!SweepAnimator::near(100.0, 112.5, DEFAULT_TOLERANCE_DEG));
        assert!(!SweepAnimator::near(0.0, 180.0, DEFAULT_TOLERANCE_DEG));
    }
}
