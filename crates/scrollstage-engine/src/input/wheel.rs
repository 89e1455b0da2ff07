//! Wheel/trackpad gesture detection.
//!
//! Trackpads keep emitting decaying inertial deltas long after the finger
//! lifted. The gauge keeps a rolling buffer of recent magnitudes and only
//! treats a sample as deliberate while the gesture is still accelerating:
//! the mean over the last 10 samples must not fall below the mean over the
//! last 70.

use std::collections::VecDeque;

use scrollstage_core::Direction;

/// Samples kept in the rolling magnitude buffer.
pub(crate) const RECORD_CAP: usize = 150;
/// A gap longer than this starts a new gesture.
pub(crate) const GESTURE_GAP_MS: f64 = 200.0;

const SHORT_WINDOW: usize = 10;
const LONG_WINDOW: usize = 70;

/// Raw wheel payload, preserving the originating event model. The sign
/// conventions differ between models and are kept exactly as the browsers
/// define them.
#[derive(Debug, Clone, Copy)]
pub enum WheelDelta {
    /// Legacy `DOMMouseScroll` detail: positive scrolls down.
    Detail(f64),
    /// Legacy `mousewheel` wheelDelta: negative scrolls down.
    WheelDelta(f64),
    /// Standard `wheel` deltaY: positive scrolls down.
    DeltaY(f64),
}

impl WheelDelta {
    pub fn direction(self) -> Option<Direction> {
        let (value, positive_is_down) = match self {
            WheelDelta::Detail(v) => (v, true),
            WheelDelta::WheelDelta(v) => (v, false),
            WheelDelta::DeltaY(v) => (v, true),
        };
        if value == 0.0 {
            return None;
        }
        let down = (value > 0.0) == positive_is_down;
        Some(if down { Direction::Down } else { Direction::Up })
    }

    pub fn magnitude(self) -> f64 {
        match self {
            WheelDelta::Detail(v) | WheelDelta::WheelDelta(v) | WheelDelta::DeltaY(v) => v.abs(),
        }
    }
}

/// One wheel event as delivered by the host.
#[derive(Debug, Clone, Copy)]
pub struct WheelSample {
    pub timestamp_ms: f64,
    pub delta: WheelDelta,
}

/// Acceleration gauge over recent wheel magnitudes.
pub struct WheelGauge {
    records: VecDeque<f64>,
    previous_ms: f64,
}

impl Default for WheelGauge {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelGauge {
    pub fn new() -> Self {
        Self {
            records: VecDeque::with_capacity(RECORD_CAP),
            previous_ms: f64::NEG_INFINITY,
        }
    }

    /// Feed one sample. Returns the travel direction when the sample belongs
    /// to a deliberate, still-accelerating gesture. The first sample after a
    /// gesture gap always qualifies.
    pub fn observe(&mut self, sample: WheelSample) -> Option<Direction> {
        if self.records.len() >= RECORD_CAP {
            self.records.pop_front();
        }
        self.records.push_back(sample.delta.magnitude());

        let gap = sample.timestamp_ms - self.previous_ms;
        self.previous_ms = sample.timestamp_ms;
        if gap > GESTURE_GAP_MS {
            self.records.clear();
        }

        let short = window_average(&self.records, SHORT_WINDOW);
        let long = window_average(&self.records, LONG_WINDOW);
        if short >= long {
            sample.delta.direction()
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.records.clear();
        self.previous_ms = f64::NEG_INFINITY;
    }

    #[cfg(test)]
    fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Mean over the trailing `n` records, always skipping the oldest record and
/// dividing by the window size rather than the sample count: the exact shape
/// the acceleration threshold was tuned against.
fn window_average(records: &VecDeque<f64>, n: usize) -> f64 {
    let start = records.len().saturating_sub(n).max(1);
    let sum: f64 = records.iter().skip(start).sum();
    (sum / n as f64).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f64, delta_y: f64) -> WheelSample {
        WheelSample {
            timestamp_ms: t,
            delta: WheelDelta::DeltaY(delta_y),
        }
    }

    #[test]
    fn test_sign_conventions() {
        assert_eq!(WheelDelta::DeltaY(3.0).direction(), Some(Direction::Down));
        assert_eq!(WheelDelta::DeltaY(-3.0).direction(), Some(Direction::Up));
        assert_eq!(WheelDelta::Detail(3.0).direction(), Some(Direction::Down));
        assert_eq!(WheelDelta::Detail(-3.0).direction(), Some(Direction::Up));
        assert_eq!(
            WheelDelta::WheelDelta(-120.0).direction(),
            Some(Direction::Down)
        );
        assert_eq!(
            WheelDelta::WheelDelta(120.0).direction(),
            Some(Direction::Up)
        );
        assert_eq!(WheelDelta::DeltaY(0.0).direction(), None);
    }

    #[test]
    fn test_first_sample_of_gesture_fires() {
        let mut gauge = WheelGauge::new();
        assert_eq!(gauge.observe(sample(0.0, 40.0)), Some(Direction::Down));
    }

    #[test]
    fn test_inertial_decay_is_filtered() {
        let mut gauge = WheelGauge::new();
        // Strong deliberate burst.
        let mut t = 0.0;
        for _ in 0..80 {
            gauge.observe(sample(t, 100.0));
            t += 10.0;
        }
        // Decaying tail: short-window mean drops below the long-window mean.
        let mut fired = 0;
        for i in 0..30 {
            let magnitude = 90.0 - (i as f64) * 3.0;
            if gauge.observe(sample(t, magnitude)).is_some() {
                fired += 1;
            }
            t += 10.0;
        }
        assert_eq!(fired, 0, "decaying samples must not trigger transitions");
    }

    #[test]
    fn test_accelerating_burst_fires() {
        let mut gauge = WheelGauge::new();
        let mut t = 0.0;
        // Settle a low plateau first.
        for _ in 0..80 {
            gauge.observe(sample(t, 5.0));
            t += 10.0;
        }
        // A hard flick accelerates past the long-window mean.
        assert_eq!(gauge.observe(sample(t, 200.0)), Some(Direction::Down));
    }

    #[test]
    fn test_gap_starts_new_gesture() {
        let mut gauge = WheelGauge::new();
        let mut t = 0.0;
        for _ in 0..40 {
            gauge.observe(sample(t, 100.0));
            t += 10.0;
        }
        // 300ms of silence, then a weak upward sample: new gesture, fires.
        t += 300.0;
        assert_eq!(gauge.observe(sample(t, -2.0)), Some(Direction::Up));
        assert_eq!(gauge.record_count(), 0);
    }

    #[test]
    fn test_buffer_is_capped() {
        let mut gauge = WheelGauge::new();
        let mut t = 0.0;
        for _ in 0..400 {
            gauge.observe(sample(t, 50.0));
            t += 10.0;
        }
        assert!(gauge.record_count() <= RECORD_CAP);
    }
}
