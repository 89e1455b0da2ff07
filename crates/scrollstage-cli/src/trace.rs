//! Input trace format for the replay command.
//!
//! A trace is a TOML document with a `[[steps]]` table per input event, each
//! tagged with a `type` and a millisecond timestamp `at`. Timestamps must be
//! non-decreasing; the replay loop ticks the engine between steps.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use scrollstage_engine::{Key, TouchPoint, WheelDelta, WheelSample};

#[derive(Debug, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading trace {}", path.display()))?;
        let trace: Trace = toml::from_str(&raw)
            .with_context(|| format!("parsing trace {}", path.display()))?;
        let mut previous = f64::NEG_INFINITY;
        for step in &trace.steps {
            let at = step.at();
            if at < previous {
                bail!("trace steps must be ordered by time (step at {at}ms after {previous}ms)");
            }
            previous = at;
        }
        Ok(trace)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Wheel {
        at: f64,
        #[serde(default)]
        delta_y: Option<f64>,
        #[serde(default)]
        wheel_delta: Option<f64>,
        #[serde(default)]
        detail: Option<f64>,
    },
    KeyDown {
        at: f64,
        key: KeyName,
        #[serde(default = "default_true")]
        focus_on_page: bool,
        #[serde(default)]
        target_is_page: bool,
    },
    KeyUp {
        at: f64,
    },
    TouchStart {
        at: f64,
        x: f64,
        y: f64,
    },
    TouchMove {
        at: f64,
        x: f64,
        y: f64,
    },
    TouchEnd {
        at: f64,
    },
    GoUp {
        at: f64,
    },
    GoDown {
        at: f64,
    },
    GoTo {
        at: f64,
        section: String,
    },
    Lock {
        at: f64,
    },
    Unlock {
        at: f64,
    },
    Resize {
        at: f64,
        width: f64,
        height: f64,
    },
    /// Scroll the page natively (only meaningful on an unbound section).
    Scroll {
        at: f64,
        top: f64,
    },
    /// Advance time with no input, letting animations and polls run out.
    Run {
        at: f64,
    },
}

impl Step {
    pub fn at(&self) -> f64 {
        match self {
            Step::Wheel { at, .. }
            | Step::KeyDown { at, .. }
            | Step::KeyUp { at }
            | Step::TouchStart { at, .. }
            | Step::TouchMove { at, .. }
            | Step::TouchEnd { at }
            | Step::GoUp { at }
            | Step::GoDown { at }
            | Step::GoTo { at, .. }
            | Step::Lock { at }
            | Step::Unlock { at }
            | Step::Resize { at, .. }
            | Step::Scroll { at, .. }
            | Step::Run { at } => *at,
        }
    }
}

/// Key names accepted in a trace.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyName {
    ArrowUp,
    ArrowDown,
    Tab,
    Space,
    Other,
}

impl From<KeyName> for Key {
    fn from(name: KeyName) -> Self {
        match name {
            KeyName::ArrowUp => Key::ArrowUp,
            KeyName::ArrowDown => Key::ArrowDown,
            KeyName::Tab => Key::Tab,
            KeyName::Space => Key::Space,
            KeyName::Other => Key::Other,
        }
    }
}

/// Resolve the wheel payload from whichever delta field the step carries.
pub fn wheel_sample(
    at: f64,
    delta_y: Option<f64>,
    wheel_delta: Option<f64>,
    detail: Option<f64>,
) -> Result<WheelSample> {
    let delta = if let Some(v) = delta_y {
        WheelDelta::DeltaY(v)
    } else if let Some(v) = wheel_delta {
        WheelDelta::WheelDelta(v)
    } else if let Some(v) = detail {
        WheelDelta::Detail(v)
    } else {
        bail!("wheel step at {at}ms carries no delta_y, wheel_delta or detail");
    };
    Ok(WheelSample {
        timestamp_ms: at,
        delta,
    })
}

pub fn touch_point(at: f64, x: f64, y: f64) -> TouchPoint {
    TouchPoint {
        timestamp_ms: at,
        x,
        y,
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trace() {
        let trace: Trace = toml::from_str(
            r#"
            [[steps]]
            type = "wheel"
            at = 0.0
            delta_y = 40.0

            [[steps]]
            type = "key_down"
            at = 1500.0
            key = "arrow_down"

            [[steps]]
            type = "go_to"
            at = 3000.0
            section = "finale"

            [[steps]]
            type = "run"
            at = 5000.0
            "#,
        )
        .unwrap();
        assert_eq!(trace.steps.len(), 4);
        assert!(matches!(trace.steps[0], Step::Wheel { .. }));
        assert_eq!(trace.steps[3].at(), 5000.0);
    }

    #[test]
    fn test_wheel_sample_requires_a_delta() {
        assert!(wheel_sample(0.0, None, None, None).is_err());
        let sample = wheel_sample(0.0, None, Some(-120.0), None).unwrap();
        assert!(matches!(sample.delta, WheelDelta::WheelDelta(_)));
    }
}
