//! Keyboard input classification.

use scrollstage_core::Direction;

/// Keys the engine reacts to; anything else is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Tab,
    Space,
    Other,
}

impl Key {
    /// Directional intent of the key, if it has one.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            _ => None,
        }
    }
}

/// What the host should do with the raw key event after the engine has seen
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Let the browser default run.
    Native,
    /// Cancel the default; the engine consumed the key.
    Swallowed,
    /// Hand the key to the focus collaborator (tab trapping).
    DelegateFocus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_directions() {
        assert_eq!(Key::ArrowUp.direction(), Some(Direction::Up));
        assert_eq!(Key::ArrowDown.direction(), Some(Direction::Down));
        assert_eq!(Key::Tab.direction(), None);
        assert_eq!(Key::Space.direction(), None);
    }
}
