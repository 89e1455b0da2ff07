//! Timed scroll interpolation for animated section transitions.

pub mod easing;
pub mod timing;

use scrollstage_core::EasingType;

use easing::EasingExt;
use timing::{lerp, progress};

/// One in-flight animated scroll from a start position to a target offset.
/// Tick-driven: the host calls [`Engine::tick`](crate::Engine::tick) each
/// frame and the tween reports its interpolated position. Cancellation
/// mid-flight is not supported; a started tween always reaches completion.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTween {
    start_ms: f64,
    from: f64,
    to: f64,
    duration_ms: f64,
    easing: EasingType,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64, duration_ms: f64, easing: EasingType, now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            from,
            to,
            duration_ms,
            easing,
        }
    }

    /// Interpolated scroll position at `now_ms`.
    pub fn position(&self, now_ms: f64) -> f64 {
        let t = progress(self.start_ms, self.duration_ms, now_ms);
        lerp(self.from, self.to, self.easing.apply(t))
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}
