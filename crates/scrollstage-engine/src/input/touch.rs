//! Touch gesture capture and the unbound-section boundary poll.

use scrollstage_core::Direction;

/// Gesture must finish within this window to count as a swipe.
pub(crate) const SWIPE_MAX_MS: f64 = 1000.0;
/// Minimum vertical travel for a swipe.
pub(crate) const SWIPE_MIN_VERTICAL_PX: f64 = 30.0;
/// Maximum horizontal travel before the gesture reads as sideways.
pub(crate) const SWIPE_MAX_HORIZONTAL_PX: f64 = 75.0;
/// Vertical travel past which the gesture claims the move events.
pub(crate) const MOVE_CAPTURE_PX: f64 = 10.0;
/// Poll interval while an unbound section is being touch-scrolled.
pub(crate) const UNBOUND_POLL_MS: f64 = 20.0;

/// One touch contact point in page coordinates.
#[derive(Debug, Clone, Copy)]
pub struct TouchPoint {
    pub timestamp_ms: f64,
    pub x: f64,
    pub y: f64,
}

/// Tracks a single in-flight touch gesture on a hijacked section.
#[derive(Debug, Default)]
pub struct TouchTracker {
    start: Option<TouchPoint>,
    stop: Option<TouchPoint>,
}

impl TouchTracker {
    pub fn begin(&mut self, point: TouchPoint) {
        self.start = Some(point);
        self.stop = None;
    }

    /// Record a move. Returns `true` once vertical travel exceeds the capture
    /// threshold, telling the host to suppress the default (prevents
    /// rubber-banding while the gesture is being read).
    pub fn update(&mut self, point: TouchPoint) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        self.stop = Some(point);
        (start.y - point.y).abs() > MOVE_CAPTURE_PX
    }

    /// Classify the finished gesture. A quick, mostly-vertical drag is a
    /// swipe; the finger travelling up drags the next section into view, so
    /// it requests DOWN.
    pub fn finish(&mut self) -> Option<Direction> {
        let start = self.start.take()?;
        let stop = self.stop.take()?;
        let quick = stop.timestamp_ms - start.timestamp_ms < SWIPE_MAX_MS;
        let vertical = (start.y - stop.y).abs() > SWIPE_MIN_VERTICAL_PX;
        let straight = (start.x - stop.x).abs() < SWIPE_MAX_HORIZONTAL_PX;
        if quick && vertical && straight {
            Some(if start.y > stop.y {
                Direction::Down
            } else {
                Direction::Up
            })
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.stop = None;
    }
}

/// Cancellable fixed-rate poll evaluating boundary crossings while touch is
/// active on an unbound section. Must be cancelled on touch end and on
/// transition start so it cannot fire after the section already changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryPoll {
    next_due_ms: Option<f64>,
}

impl BoundaryPoll {
    /// Start polling; already-running polls keep their schedule.
    pub fn start(&mut self, now_ms: f64) {
        if self.next_due_ms.is_none() {
            self.next_due_ms = Some(now_ms + UNBOUND_POLL_MS);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Returns `true` when a poll slot elapsed, scheduling the next one.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                self.next_due_ms = Some(now_ms + UNBOUND_POLL_MS);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(t: f64, x: f64, y: f64) -> TouchPoint {
        TouchPoint {
            timestamp_ms: t,
            x,
            y,
        }
    }

    #[test]
    fn test_upward_drag_requests_down() {
        // start (t=0, y=500), end (t=300, y=440): 60px up in 300ms.
        let mut tracker = TouchTracker::default();
        tracker.begin(point(0.0, 100.0, 500.0));
        tracker.update(point(300.0, 100.0, 440.0));
        assert_eq!(tracker.finish(), Some(Direction::Down));
    }

    #[test]
    fn test_downward_drag_requests_up() {
        let mut tracker = TouchTracker::default();
        tracker.begin(point(0.0, 100.0, 300.0));
        tracker.update(point(200.0, 110.0, 380.0));
        assert_eq!(tracker.finish(), Some(Direction::Up));
    }

    #[test]
    fn test_slow_or_short_or_sideways_is_no_swipe() {
        // Too slow.
        let mut tracker = TouchTracker::default();
        tracker.begin(point(0.0, 100.0, 500.0));
        tracker.update(point(1200.0, 100.0, 400.0));
        assert_eq!(tracker.finish(), None);

        // Not enough vertical travel.
        tracker.begin(point(0.0, 100.0, 500.0));
        tracker.update(point(200.0, 100.0, 480.0));
        assert_eq!(tracker.finish(), None);

        // Too much horizontal travel.
        tracker.begin(point(0.0, 100.0, 500.0));
        tracker.update(point(200.0, 200.0, 440.0));
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn test_move_capture_threshold() {
        let mut tracker = TouchTracker::default();
        tracker.begin(point(0.0, 0.0, 500.0));
        assert!(!tracker.update(point(50.0, 0.0, 495.0)));
        assert!(tracker.update(point(100.0, 0.0, 480.0)));
    }

    #[test]
    fn test_move_without_start_is_ignored() {
        let mut tracker = TouchTracker::default();
        assert!(!tracker.update(point(0.0, 0.0, 0.0)));
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn test_poll_schedule_and_cancel() {
        let mut poll = BoundaryPoll::default();
        poll.start(0.0);
        poll.start(5.0); // no reschedule
        assert!(!poll.fire(10.0));
        assert!(poll.fire(20.0));
        assert!(poll.fire(40.0));
        poll.cancel();
        assert!(!poll.fire(100.0));
        assert!(!poll.is_running());
    }
}
