//! Explicit session state, passed by reference to the components that need
//! it. Every flag the engine consults lives here rather than in ambient
//! globals.

use crate::input::keys::Key;

#[derive(Debug, Clone)]
pub struct SessionState {
    /// Ordinal index of the current section.
    pub current: usize,
    pub previous: Option<usize>,
    /// Ordinal neighbors of the current section, when they exist.
    pub above: Option<usize>,
    pub below: Option<usize>,
    /// A transition animation is in flight; new requests are dropped.
    pub transitioning: bool,
    /// Derived from the current section's policy and the viewport.
    pub current_unbound: bool,
    /// Default wheel/touch handling is currently cancelled on the host.
    pub native_scroll_disabled: bool,
    /// External full-page lock (modal open). Blocks all transitions.
    pub page_locked: bool,
    /// Last key seen without an intervening key-up, for repeat suppression.
    pub last_key: Option<Key>,
}

impl SessionState {
    pub fn new(current: usize) -> Self {
        Self {
            current,
            previous: None,
            above: None,
            below: None,
            transitioning: false,
            current_unbound: false,
            native_scroll_disabled: false,
            page_locked: false,
            last_key: None,
        }
    }

    /// Recompute above/below as the ordinal neighbors of `current`.
    pub fn refresh_neighbors(&mut self, section_count: usize) {
        self.above = self.current.checked_sub(1);
        self.below = if self.current + 1 < section_count {
            Some(self.current + 1)
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_at_ends() {
        let mut state = SessionState::new(0);
        state.refresh_neighbors(5);
        assert_eq!(state.above, None);
        assert_eq!(state.below, Some(1));

        state.current = 4;
        state.refresh_neighbors(5);
        assert_eq!(state.above, Some(3));
        assert_eq!(state.below, None);
    }

    #[test]
    fn test_neighbors_single_section() {
        let mut state = SessionState::new(0);
        state.refresh_neighbors(1);
        assert_eq!(state.above, None);
        assert_eq!(state.below, None);
    }
}
