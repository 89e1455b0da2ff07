//! Scroll-hijacked section transition engine.
//!
//! A page is divided into discrete sections; the engine fuses wheel, keyboard
//! and touch input into a single directional intent and moves the viewport
//! exactly one section at a time, animating the transition. Sections may opt
//! out of hijacking ("unbound") and scroll natively, in which case the engine
//! watches for boundary crossings instead of intercepting every input.
//!
//! The engine is headless and single-threaded: the embedding host feeds it
//! raw input samples, resize notifications and a monotonic tick, and receives
//! side effects through the [`host::PageHost`] trait plus lifecycle events
//! through registered [`events::EventSink`]s.

pub mod animate;
pub mod engine;
pub mod events;
pub mod host;
pub mod input;
pub mod policy;
pub mod registry;
pub mod session;
pub mod suppress;
pub mod transition;
pub mod viewport;

pub use engine::Engine;
pub use events::{EventSink, HookSet, SectionChange, SectionEvent};
pub use host::{MemoryPage, PageHost};
pub use input::keys::{Key, KeyDisposition};
pub use input::touch::TouchPoint;
pub use input::wheel::{WheelDelta, WheelSample};
pub use policy::UnboundPolicy;
pub use registry::{Section, SectionRegistry};
pub use transition::TransitionRequest;
pub use viewport::{Capability, ViewportClassifier, ViewportState};
