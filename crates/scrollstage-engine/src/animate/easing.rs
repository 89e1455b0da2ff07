//! Easing curves mapping animation progress [0, 1] to eased output [0, 1].

use scrollstage_core::EasingType;

/// Calculation methods for the shared [`EasingType`].
pub trait EasingExt {
    /// Apply the curve to a progress value in [0, 1].
    fn apply(&self, t: f64) -> f64;
}

impl EasingExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            EasingType::Quintic => {
                let inv = 1.0 - t;
                1.0 - inv.powi(5)
            }
            EasingType::EaseOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 5] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_boundaries() {
        for easing in ALL {
            if easing != EasingType::None {
                assert!(easing.apply(0.0).abs() < 0.001, "{easing:?} at t=0");
            }
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{easing:?} at t=1");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in ALL {
            let mut previous = 0.0;
            for i in 0..=20 {
                let value = easing.apply(i as f64 / 20.0);
                assert!(value >= previous, "{easing:?} not monotonic at step {i}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(EasingType::Linear.apply(-0.5), 0.0);
        assert_eq!(EasingType::Linear.apply(1.5), 1.0);
    }
}
