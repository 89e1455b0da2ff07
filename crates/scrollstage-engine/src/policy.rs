//! Per-section, per-viewport decision of whether scroll is hijacked or left
//! native, plus the boundary math used while a native-scrolling section is
//! current.

use std::fmt;
use std::rc::Rc;

use scrollstage_core::{DeviceClass, UnboundDecl};

use crate::viewport::{Capability, ViewportClassifier, ViewportState};

/// How a section opts out of scroll hijacking.
#[derive(Clone)]
pub enum UnboundPolicy {
    /// Hijacked everywhere (the default).
    Bound,
    /// Native scroll everywhere.
    Unbound,
    /// Native scroll only within these breakpoints.
    Breakpoints(Vec<String>),
    /// Arbitrary predicate over the viewport, registered in code.
    Custom(Rc<dyn Fn(&ViewportState) -> bool>),
}

impl fmt::Debug for UnboundPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnboundPolicy::Bound => f.write_str("Bound"),
            UnboundPolicy::Unbound => f.write_str("Unbound"),
            UnboundPolicy::Breakpoints(names) => f.debug_tuple("Breakpoints").field(names).finish(),
            UnboundPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&UnboundDecl> for UnboundPolicy {
    fn from(decl: &UnboundDecl) -> Self {
        match decl {
            UnboundDecl::Fixed(false) => UnboundPolicy::Bound,
            UnboundDecl::Fixed(true) => UnboundPolicy::Unbound,
            UnboundDecl::Breakpoints(names) => UnboundPolicy::Breakpoints(names.clone()),
        }
    }
}

/// Resolve a policy against the current viewport. Must be re-evaluated on
/// every section change and every breakpoint change.
pub fn is_scroll_unbound(policy: &UnboundPolicy, viewport: &ViewportClassifier) -> bool {
    match policy {
        UnboundPolicy::Bound => false,
        UnboundPolicy::Unbound => true,
        UnboundPolicy::Breakpoints(names) => {
            viewport.is_active(&Capability::for_breakpoints(names.iter().cloned()))
        }
        UnboundPolicy::Custom(predicate) => predicate(viewport.state()),
    }
}

/// Has the scroll position crossed above the current section's top edge?
/// Touch devices compare strictly so that resting exactly on the edge during
/// an inertial scroll does not count as a crossing.
pub fn crossed_above(scroll_top: f64, current_offset: f64, device: DeviceClass) -> bool {
    match device {
        DeviceClass::Touch => scroll_top < current_offset,
        DeviceClass::Desktop => scroll_top <= current_offset,
    }
}

/// Has the scroll position crossed the effective bottom edge? When the next
/// section is bound the edge is pulled one viewport height short of its top,
/// so the animated hand-off starts before the gap is visible.
pub fn crossed_below(
    scroll_top: f64,
    below_offset: f64,
    below_is_bound: bool,
    window_height: f64,
    device: DeviceClass,
) -> bool {
    let edge = if below_is_bound {
        below_offset - window_height
    } else {
        below_offset
    };
    match device {
        DeviceClass::Touch => scroll_top > edge,
        DeviceClass::Desktop => scroll_top >= edge,
    }
}
