//! Pure planning of a section transition: resolve the candidate, derive the
//! travel direction, and pick the transition mode. Side effects stay in the
//! engine.

use scrollstage_core::{Direction, SectionId};
use tracing::debug;

use crate::policy::is_scroll_unbound;
use crate::registry::SectionRegistry;
use crate::viewport::ViewportClassifier;

/// A request for the engine to move the current section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionRequest {
    Up,
    Down,
    /// Deliberate navigation to a named section (menu click, API call).
    Target(SectionId),
}

impl From<Direction> for TransitionRequest {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => TransitionRequest::Up,
            Direction::Down => TransitionRequest::Down,
        }
    }
}

/// Where the animated scroll lands inside the target section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    /// Land on the bottom edge: used when backing up into an unbound
    /// section, which then scrolls natively from there.
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    Animate(Anchor),
    /// Both sections scroll natively and are contiguous; only the section
    /// references change.
    Swap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub mode: TransitionMode,
}

/// Resolve a request against the section order and bound/unbound policy.
/// Returns `None` when there is nothing to do: no neighbor in that
/// direction, or an id that does not resolve (a normal navigation race, not
/// an error).
pub(crate) fn plan(
    registry: &SectionRegistry,
    viewport: &ViewportClassifier,
    current: usize,
    request: &TransitionRequest,
) -> Option<TransitionPlan> {
    let (to, direction, explicit) = match request {
        TransitionRequest::Up => (current.checked_sub(1)?, Direction::Up, false),
        TransitionRequest::Down => {
            let to = current + 1;
            if to >= registry.len() {
                return None;
            }
            (to, Direction::Down, false)
        }
        TransitionRequest::Target(id) => {
            let Some(to) = registry.position(id) else {
                debug!(target = %id, "no such section to scroll to");
                return None;
            };
            // Direction only selects the lifecycle event names here.
            let direction = if registry[current].offset > registry[to].offset {
                Direction::Up
            } else {
                Direction::Down
            };
            (to, direction, true)
        }
    };

    let mode = if explicit {
        // Deliberate navigation always animates, whatever the bound state.
        TransitionMode::Animate(Anchor::Top)
    } else {
        let current_unbound = is_scroll_unbound(&registry[current].unbound, viewport);
        let next_unbound = is_scroll_unbound(&registry[to].unbound, viewport);
        if next_unbound {
            if current_unbound {
                TransitionMode::Swap
            } else if direction == Direction::Up {
                TransitionMode::Animate(Anchor::Bottom)
            } else {
                TransitionMode::Animate(Anchor::Top)
            }
        } else {
            TransitionMode::Animate(Anchor::Top)
        }
    };

    Some(TransitionPlan {
        from: current,
        to,
        direction,
        mode,
    })
}
