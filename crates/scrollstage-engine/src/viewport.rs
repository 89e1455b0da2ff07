//! Viewport classification: window size, device class and named breakpoints.

use std::collections::BTreeMap;

use scrollstage_core::{DeviceClass, Error, Result};

/// One named width bucket. Classification picks the smallest breakpoint whose
/// `max_width` is >= the window width, falling back to the largest.
#[derive(Debug, Clone)]
pub struct Breakpoint {
    pub name: String,
    pub max_width: f64,
}

/// Read-only snapshot of the current viewport.
#[derive(Debug, Clone)]
pub struct ViewportState {
    pub width: f64,
    pub height: f64,
    pub device: DeviceClass,
    pub breakpoint: String,
}

/// A capability restricted to a set of devices and/or breakpoints. `None`
/// means "all".
#[derive(Debug, Clone, Default)]
pub struct Capability {
    pub devices: Option<Vec<DeviceClass>>,
    pub breakpoints: Option<Vec<String>>,
}

impl Capability {
    /// Active on every device at every breakpoint.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn for_breakpoints<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            devices: None,
            breakpoints: Some(names.into_iter().map(Into::into).collect()),
        }
    }
}

pub struct ViewportClassifier {
    /// Sorted ascending by max width.
    breakpoints: Vec<Breakpoint>,
    state: ViewportState,
}

impl ViewportClassifier {
    pub fn new(
        table: &BTreeMap<String, f64>,
        width: f64,
        height: f64,
        device: DeviceClass,
    ) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::Config("breakpoint table is empty".into()));
        }
        let mut breakpoints: Vec<Breakpoint> = table
            .iter()
            .map(|(name, max_width)| Breakpoint {
                name: name.clone(),
                max_width: *max_width,
            })
            .collect();
        breakpoints.sort_by(|a, b| {
            a.max_width
                .partial_cmp(&b.max_width)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let breakpoint = classify_width(&breakpoints, width);
        Ok(Self {
            breakpoints,
            state: ViewportState {
                width,
                height,
                device,
                breakpoint,
            },
        })
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Name of the bucket a window of `width` px falls into.
    pub fn classify(&self, width: f64) -> String {
        classify_width(&self.breakpoints, width)
    }

    /// Record a new window size. Returns `true` only when the breakpoint name
    /// actually changed, which is the signal for section re-initialization.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.state.width = width;
        self.state.height = height;
        let breakpoint = self.classify(width);
        if breakpoint != self.state.breakpoint {
            tracing::debug!(from = %self.state.breakpoint, to = %breakpoint, "breakpoint changed");
            self.state.breakpoint = breakpoint;
            true
        } else {
            false
        }
    }

    /// Is a capability active in the current viewport?
    pub fn is_active(&self, capability: &Capability) -> bool {
        if let Some(devices) = &capability.devices {
            if !devices.contains(&self.state.device) {
                return false;
            }
        }
        if let Some(names) = &capability.breakpoints {
            if !names.iter().any(|n| *n == self.state.breakpoint) {
                return false;
            }
        }
        true
    }
}

fn classify_width(breakpoints: &[Breakpoint], width: f64) -> String {
    // Largest bucket is the fallback when nothing matches.
    let mut name = breakpoints[breakpoints.len() - 1].name.clone();
    let mut previous = 0.0;
    for bp in breakpoints {
        if width > previous && width <= bp.max_width {
            name = bp.name.clone();
            break;
        }
        previous = bp.max_width;
    }
    name
}
