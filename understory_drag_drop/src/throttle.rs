// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-interval limiter for pointer moves.
//!
//! Pointer moves arrive at raw input rate, and every move that leaves the cached
//! rectangle costs a registry scan. [`MoveThrottle`] sits in front of
//! [`DragDropStore::move_and_check_bounds`](crate::DragDropStore::move_and_check_bounds)
//! and lets at most one move through per interval, remembering the latest suppressed
//! point so the final position is never lost.
//!
//! Timestamps are caller-supplied milliseconds from any monotonic clock.
//!
//! ```
//! use kurbo::Point;
//! use understory_drag_drop::throttle::MoveThrottle;
//!
//! let mut throttle = MoveThrottle::default();
//!
//! assert_eq!(throttle.offer(Point::new(1.0, 1.0), 0), Some(Point::new(1.0, 1.0)));
//! // Inside the same frame: held back.
//! assert_eq!(throttle.offer(Point::new(2.0, 2.0), 5), None);
//! assert_eq!(throttle.offer(Point::new(3.0, 3.0), 9), None);
//! // The frame elapsed: the latest held point is released.
//! assert_eq!(throttle.poll(16), Some(Point::new(3.0, 3.0)));
//! ```

use kurbo::Point;

/// Lets at most one pointer move through per interval.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MoveThrottle {
    interval_ms: u64,
    last_emit: Option<u64>,
    pending: Option<Point>,
}

impl Default for MoveThrottle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL_MS)
    }
}

impl MoveThrottle {
    /// One frame at 60 Hz.
    pub const DEFAULT_INTERVAL_MS: u64 = 16;

    /// Creates a throttle with the given interval. An interval of `0` passes every move.
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_emit: None,
            pending: None,
        }
    }

    /// The configured interval.
    #[must_use]
    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Offers a move at time `now`.
    ///
    /// Returns the point if it should be applied now; otherwise keeps it as pending,
    /// replacing any older pending point.
    pub fn offer(&mut self, point: Point, now: u64) -> Option<Point> {
        if self.is_open(now) {
            self.last_emit = Some(now);
            self.pending = None;
            Some(point)
        } else {
            self.pending = Some(point);
            None
        }
    }

    /// Releases the pending point if the interval has elapsed by `now`.
    pub fn poll(&mut self, now: u64) -> Option<Point> {
        if self.pending.is_some() && self.is_open(now) {
            self.last_emit = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// Releases the pending point regardless of timing, e.g. right before a drop.
    pub fn flush(&mut self) -> Option<Point> {
        self.pending.take()
    }

    /// Forgets timing and any pending point.
    pub fn reset(&mut self) {
        self.last_emit = None;
        self.pending = None;
    }

    fn is_open(&self, now: u64) -> bool {
        self.last_emit
            .is_none_or(|last| now.saturating_sub(last) >= self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_passes() {
        let mut t = MoveThrottle::new(16);
        assert_eq!(t.offer(Point::new(1.0, 2.0), 100), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn moves_within_interval_are_held() {
        let mut t = MoveThrottle::new(16);
        t.offer(Point::ZERO, 0);
        assert_eq!(t.offer(Point::new(1.0, 0.0), 15), None);
        assert_eq!(t.poll(15), None);
        assert_eq!(t.offer(Point::new(2.0, 0.0), 16), Some(Point::new(2.0, 0.0)));
        // Emitting directly discards the older pending point.
        assert_eq!(t.flush(), None);
    }

    #[test]
    fn poll_releases_latest_pending_once() {
        let mut t = MoveThrottle::new(10);
        t.offer(Point::ZERO, 0);
        t.offer(Point::new(1.0, 0.0), 3);
        t.offer(Point::new(2.0, 0.0), 6);
        assert_eq!(t.poll(10), Some(Point::new(2.0, 0.0)));
        assert_eq!(t.poll(30), None);
        // The poll counts as an emission.
        assert_eq!(t.offer(Point::new(3.0, 0.0), 15), None);
    }

    #[test]
    fn flush_ignores_timing() {
        let mut t = MoveThrottle::new(1_000);
        t.offer(Point::ZERO, 0);
        t.offer(Point::new(9.0, 9.0), 1);
        assert_eq!(t.flush(), Some(Point::new(9.0, 9.0)));
        assert_eq!(t.flush(), None);
    }

    #[test]
    fn zero_interval_passes_everything() {
        let mut t = MoveThrottle::new(0);
        for i in 0..5 {
            assert!(t.offer(Point::new(f64::from(i), 0.0), 7).is_some());
        }
    }

    #[test]
    fn clock_going_backwards_holds_moves() {
        let mut t = MoveThrottle::new(16);
        t.offer(Point::ZERO, 100);
        assert_eq!(t.offer(Point::new(1.0, 0.0), 50), None);
    }

    #[test]
    fn reset_reopens() {
        let mut t = MoveThrottle::new(16);
        t.offer(Point::ZERO, 0);
        t.offer(Point::new(1.0, 0.0), 1);
        t.reset();
        assert_eq!(t.flush(), None);
        assert!(t.offer(Point::new(2.0, 0.0), 2).is_some());
        assert_eq!(t.interval_ms(), 16);
    }
}
