//! Progress and interpolation helpers over millisecond timestamps.

/// Animation progress in [0, 1] given a start time and duration.
#[inline]
pub fn progress(start_ms: f64, duration_ms: f64, now_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0)
}

/// Linear interpolation between two positions.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        assert_eq!(progress(0.0, 1000.0, 0.0), 0.0);
        assert_eq!(progress(0.0, 1000.0, 250.0), 0.25);
        assert_eq!(progress(0.0, 1000.0, 2000.0), 1.0);
        // Before start clamps to zero.
        assert_eq!(progress(500.0, 1000.0, 100.0), 0.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert_eq!(progress(0.0, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 100.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 100.0, 0.5), 50.0);
        assert_eq!(lerp(200.0, 100.0, 1.0), 100.0);
    }
}
