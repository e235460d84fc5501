use std::collections::VecDeque;

use crate::prelude::ScreenPoint;

/// One recorded screen position of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectoryEntry {
    pub x: i32,
    pub y: i32,
    pub timestamp_ms: u32,
}

impl TrajectoryEntry {
    pub fn point(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }
}

/// Bounded FIFO of screen positions that ignores points too close to the
/// previous one.
pub struct TrajectoryBuffer {
    entries: VecDeque<TrajectoryEntry>,
    max_capacity: usize,
    min_step_px: i32,
}

impl TrajectoryBuffer {
    pub fn with_capacity(max_capacity: usize, min_step_px: i32) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_capacity + 1),
            max_capacity,
            min_step_px,
        }
    }

    /// Records `point` unless it is within `min_step_px` of the last entry
    /// on both axes. Returns whether it was recorded.
    pub fn maybe_append(&mut self, point: ScreenPoint, timestamp_ms: u32) -> bool {
        if let Some(last) = self.entries.back() {
            if (last.x - point.x).abs() <= self.min_step_px
                && (last.y - point.y).abs() <= self.min_step_px
            {
                return false;
            }
        }

        self.entries.push_back(TrajectoryEntry {
            x: point.x,
            y: point.y,
            timestamp_ms,
        });
        if self.entries.len() > self.max_capacity {
            self.entries.pop_front();
        }
        true
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TrajectoryEntry> + '_ {
        self.entries.iter()
    }

    /// Consecutive entry pairs, oldest first.
    pub fn segments(&self) -> impl Iterator<Item = (&TrajectoryEntry, &TrajectoryEntry)> + '_ {
        self.entries.iter().zip(self.entries.iter().skip(1))
    }

    pub fn last(&self) -> Option<&TrajectoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(i: i32) -> ScreenPoint {
        // 6 px steps on both axes, folded into the display
        ScreenPoint::new((i * 6) % 240, (i * 6 / 240) * 6 % 240)
    }

    #[test]
    fn overflow_evicts_the_oldest_entry() {
        let mut buffer = TrajectoryBuffer::with_capacity(1000, 5);
        let mut inserted = Vec::new();
        for i in 0..1001 {
            let point = ScreenPoint::new(if i % 2 == 0 { 0 } else { 100 }, i % 200);
            assert!(buffer.maybe_append(point, i as u32));
            inserted.push(point);
        }
        assert_eq!(buffer.len(), 1000);
        let first = buffer.iter().next().unwrap();
        assert_eq!(first.point(), inserted[1]);
        assert_eq!(first.timestamp_ms, 1);
        assert_eq!(buffer.last().unwrap().timestamp_ms, 1000);
    }

    #[test]
    fn nearby_point_is_ignored() {
        let mut buffer = TrajectoryBuffer::with_capacity(1000, 5);
        assert!(buffer.maybe_append(ScreenPoint::new(100, 100), 0));
        assert!(!buffer.maybe_append(ScreenPoint::new(105, 95), 10));
        assert!(!buffer.maybe_append(ScreenPoint::new(100, 100), 20));
        assert_eq!(buffer.len(), 1);
        assert!(buffer.maybe_append(ScreenPoint::new(106, 100), 30));
        assert!(buffer.maybe_append(ScreenPoint::new(106, 94), 40));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn comparison_is_against_the_last_entry_only() {
        let mut buffer = TrajectoryBuffer::with_capacity(1000, 5);
        for i in 0..50 {
            buffer.maybe_append(walk(i), i as u32);
        }
        assert_eq!(buffer.len(), 50);
        // back to the first position, far from the last one
        assert!(buffer.maybe_append(walk(0), 99));
    }

    #[test]
    fn segments_pair_neighbours_in_order() {
        let mut buffer = TrajectoryBuffer::with_capacity(4, 5);
        for (i, x) in [0, 10, 20].into_iter().enumerate() {
            buffer.maybe_append(ScreenPoint::new(x, 0), i as u32);
        }
        let pairs: Vec<_> = buffer.segments().map(|(a, b)| (a.x, b.x)).collect();
        assert_eq!(pairs, vec![(0, 10), (10, 20)]);
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut buffer = TrajectoryBuffer::with_capacity(4, 5);
        buffer.maybe_append(ScreenPoint::new(1, 1), 0);
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.maybe_append(ScreenPoint::new(1, 1), 1));
    }
}
