//! Lifecycle events and the typed observer surface.
//!
//! The event names and the `sectionChanged` payload shape are a wire
//! contract: collaborators written against the string forms (navigation
//! highlighting, audio, URL hash) rely on them exactly as spelled by
//! [`SectionEvent::wire_name`].

use std::fmt;

use scrollstage_core::{Direction, SectionId};

/// Per-section lifecycle event, qualified by travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEvent {
    ExitingUp,
    ExitingDown,
    EnteringUp,
    EnteringDown,
    ExitedUp,
    ExitedDown,
    EnteredUp,
    EnteredDown,
}

impl SectionEvent {
    pub(crate) fn exiting(direction: Direction) -> Self {
        match direction {
            Direction::Up => SectionEvent::ExitingUp,
            Direction::Down => SectionEvent::ExitingDown,
        }
    }

    pub(crate) fn entering(direction: Direction) -> Self {
        match direction {
            Direction::Up => SectionEvent::EnteringUp,
            Direction::Down => SectionEvent::EnteringDown,
        }
    }

    pub(crate) fn exited(direction: Direction) -> Self {
        match direction {
            Direction::Up => SectionEvent::ExitedUp,
            Direction::Down => SectionEvent::ExitedDown,
        }
    }

    pub(crate) fn entered(direction: Direction) -> Self {
        match direction {
            Direction::Up => SectionEvent::EnteredUp,
            Direction::Down => SectionEvent::EnteredDown,
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            SectionEvent::ExitingUp => "exitingUp",
            SectionEvent::ExitingDown => "exitingDown",
            SectionEvent::EnteringUp => "enteringUp",
            SectionEvent::EnteringDown => "enteringDown",
            SectionEvent::ExitedUp => "exitedUp",
            SectionEvent::ExitedDown => "exitedDown",
            SectionEvent::EnteredUp => "enteredUp",
            SectionEvent::EnteredDown => "enteredDown",
        }
    }
}

impl fmt::Display for SectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Payload of the `sectionChanged` notification. On the wire the neighbor
/// fields are spelled `sectionAbove` and `sectionBelow`.
#[derive(Debug, Clone)]
pub struct SectionChange {
    pub previous: Option<SectionId>,
    pub current: SectionId,
    pub above: Option<SectionId>,
    pub below: Option<SectionId>,
}

/// Typed observer registered with the engine. All hooks default to no-ops so
/// collaborators implement only what they consume.
pub trait EventSink {
    /// Fired once, after asset preconditions were met and the engine
    /// performed its first placement.
    fn initialized(&mut self, _current: &SectionId) {}

    fn section_event(&mut self, _section: &SectionId, _event: SectionEvent) {}

    /// Fired on every completed or swapped transition.
    fn section_changed(&mut self, _change: &SectionChange) {}

    /// Fired only when the breakpoint name actually changes.
    fn viewport_changed(&mut self, _breakpoint: &str) {}
}

pub type EnterHook = Box<dyn FnMut(&SectionId, Direction)>;
pub type ExitHook = Box<dyn FnMut(&SectionId, Direction)>;

/// Capability set a per-section collaborator registers with. The variant
/// states up front which hooks exist; there is no runtime probing for
/// optional handlers.
pub enum HookSet {
    /// Observes nothing; present for collaborators that only need to exist
    /// in the section table.
    Passive,
    OnEnter(EnterHook),
    OnEnterExit { enter: EnterHook, exit: ExitHook },
}

impl HookSet {
    pub(crate) fn entered(&mut self, section: &SectionId, direction: Direction) {
        match self {
            HookSet::Passive => {}
            HookSet::OnEnter(enter) | HookSet::OnEnterExit { enter, .. } => {
                enter(section, direction)
            }
        }
    }

    pub(crate) fn exited(&mut self, section: &SectionId, direction: Direction) {
        match self {
            HookSet::Passive | HookSet::OnEnter(_) => {}
            HookSet::OnEnterExit { exit, .. } => exit(section, direction),
        }
    }
}

/// Sink that records everything it receives. Used by the test suites and the
/// replay tool.
#[derive(Default)]
pub struct RecordingSink {
    pub initialized: Vec<SectionId>,
    pub events: Vec<(SectionId, SectionEvent)>,
    pub changes: Vec<SectionChange>,
    pub breakpoints: Vec<String>,
}

impl EventSink for RecordingSink {
    fn initialized(&mut self, current: &SectionId) {
        self.initialized.push(current.clone());
    }

    fn section_event(&mut self, section: &SectionId, event: SectionEvent) {
        self.events.push((section.clone(), event));
    }

    fn section_changed(&mut self, change: &SectionChange) {
        self.changes.push(change.clone());
    }

    fn viewport_changed(&mut self, breakpoint: &str) {
        self.breakpoints.push(breakpoint.to_owned());
    }
}

/// Shared handle so callers keep inspecting the sink after handing it to the
/// engine.
impl EventSink for std::rc::Rc<std::cell::RefCell<RecordingSink>> {
    fn initialized(&mut self, current: &SectionId) {
        self.borrow_mut().initialized(current);
    }

    fn section_event(&mut self, section: &SectionId, event: SectionEvent) {
        self.borrow_mut().section_event(section, event);
    }

    fn section_changed(&mut self, change: &SectionChange) {
        self.borrow_mut().section_changed(change);
    }

    fn viewport_changed(&mut self, breakpoint: &str) {
        self.borrow_mut().viewport_changed(breakpoint);
    }
}
