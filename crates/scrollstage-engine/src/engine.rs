//! The transition engine: fuses normalized input into section transitions,
//! owns the session state, and drives all host-facing side effects.

use std::collections::HashMap;

use scrollstage_core::{
    DeviceClass, Direction, Error, OptionsConfig, PageConfig, Result, SectionDecl, SectionId,
};
use tracing::{debug, warn};

use crate::animate::ScrollTween;
use crate::events::{EventSink, HookSet, SectionChange, SectionEvent};
use crate::host::PageHost;
use crate::input::keys::{Key, KeyDisposition};
use crate::input::touch::{BoundaryPoll, TouchPoint, TouchTracker};
use crate::input::wheel::{WheelGauge, WheelSample};
use crate::policy::{crossed_above, crossed_below, is_scroll_unbound, UnboundPolicy};
use crate::registry::{Section, SectionRegistry};
use crate::session::SessionState;
use crate::suppress;
use crate::transition::{self, Anchor, TransitionMode, TransitionPlan, TransitionRequest};
use crate::viewport::{ViewportClassifier, ViewportState};

/// Which handler produced a boundary probe; crossing only counts when the
/// input keeps moving in the crossed direction.
#[derive(Debug, Clone, Copy)]
enum ProbeSource {
    Wheel(Option<Direction>),
    Key(Key),
    Touch,
}

/// An animated transition in flight. Section references were already updated
/// when it started; completion fires the trailing lifecycle events and
/// returns the engine to idle.
#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    tween: ScrollTween,
    direction: Direction,
    origin: usize,
    target: usize,
}

pub struct Engine<H: PageHost> {
    host: H,
    options: OptionsConfig,
    viewport: ViewportClassifier,
    registry: SectionRegistry,
    session: SessionState,
    wheel: WheelGauge,
    touch: TouchTracker,
    poll: BoundaryPoll,
    pending: Option<PendingTransition>,
    sinks: Vec<Box<dyn EventSink>>,
    hooks: HashMap<SectionId, HookSet>,
    initialized: bool,
}

impl<H: PageHost> Engine<H> {
    pub fn new(config: PageConfig, host: H) -> Result<Self> {
        let device = if host.has_touch() {
            DeviceClass::Touch
        } else {
            DeviceClass::Desktop
        };
        let viewport = ViewportClassifier::new(
            &config.options.breakpoints,
            host.window_width(),
            host.window_height(),
            device,
        )?;

        let mut registry = SectionRegistry::new();
        for decl in &config.sections {
            registry.add(&host, decl)?;
        }
        if registry.is_empty() {
            return Err(Error::Config("page declares no sections".into()));
        }

        let mut engine = Self {
            host,
            options: config.options,
            viewport,
            registry,
            session: SessionState::new(0),
            wheel: WheelGauge::new(),
            touch: TouchTracker::default(),
            poll: BoundaryPoll::default(),
            pending: None,
            sinks: Vec::new(),
            hooks: HashMap::new(),
            initialized: false,
        };
        engine.registry.recompute_offsets(&engine.host);
        let start = engine.resolve_deep_link();
        engine.session = SessionState::new(start);
        engine.session.refresh_neighbors(engine.registry.len());
        engine.refresh_policy();
        Ok(engine)
    }

    // Registration
    ///////////////////////////////////////////////////////

    pub fn register_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Register per-section collaborator hooks. Replaces any existing set
    /// for that section.
    pub fn register_hooks(&mut self, section: SectionId, hooks: HookSet) {
        self.hooks.insert(section, hooks);
    }

    /// Replace a section's unbound policy (used for predicate policies that
    /// cannot be declared in TOML). Returns false for an unknown id.
    pub fn set_unbound_policy(&mut self, id: &SectionId, policy: UnboundPolicy) -> bool {
        let replaced = self.registry.set_unbound_policy(id, policy);
        if replaced {
            self.refresh_policy();
        }
        replaced
    }

    /// Register a section after initialization; triggers a re-sort.
    pub fn add_section(&mut self, decl: &SectionDecl) -> Result<()> {
        self.registry.add(&self.host, decl)?;
        self.recompute_offsets();
        Ok(())
    }

    // Lifecycle
    ///////////////////////////////////////////////////////

    /// Asset preconditions are met: perform the first section placement and
    /// fire the initial lifecycle events. Input is ignored until this runs.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let offset = self.registry[self.session.current].offset;
        self.host.set_scroll_top(offset);
        let id = self.registry[self.session.current].id.clone();
        self.emit_section_event(&id, SectionEvent::EnteringDown);
        self.emit_section_event(&id, SectionEvent::EnteredDown);
        for sink in &mut self.sinks {
            sink.initialized(&id);
        }
    }

    /// Tear down: stop timers and restore native scrolling.
    pub fn kill(&mut self) {
        self.poll.cancel();
        self.touch.cancel();
        self.wheel.reset();
        suppress::enable(&mut self.session, &mut self.host);
    }

    fn resolve_deep_link(&mut self) -> usize {
        if !self.options.hash_change {
            return 0;
        }
        let Some(fragment) = self.host.fragment() else {
            return 0;
        };
        let id = SectionId::new(fragment);
        match self.registry.count_id(&id) {
            0 => {
                warn!(fragment = %id, "no section matches the fragment, starting at the first");
                self.host.clear_fragment();
                0
            }
            1 => self.registry.position(&id).unwrap_or(0),
            _ => {
                warn!(fragment = %id, "more than one section matches the fragment");
                self.registry.position(&id).unwrap_or(0)
            }
        }
    }

    // Inbound operations
    ///////////////////////////////////////////////////////

    pub fn go_up(&mut self, now_ms: f64) {
        self.request_transition(TransitionRequest::Up, now_ms);
    }

    pub fn go_down(&mut self, now_ms: f64) {
        self.request_transition(TransitionRequest::Down, now_ms);
    }

    pub fn go_to(&mut self, id: &SectionId, now_ms: f64) {
        self.request_transition(TransitionRequest::Target(id.clone()), now_ms);
    }

    /// Full-page lock for modal collaborators; unconditionally blocks new
    /// transitions while held.
    pub fn lock_page(&mut self) {
        suppress::lock_page(&mut self.session, &mut self.host);
        self.apply_scroll_policy();
    }

    pub fn unlock_page(&mut self) {
        suppress::unlock_page(&mut self.session, &mut self.host);
        self.apply_scroll_policy();
    }

    /// Recompute section offsets after a layout-affecting change, remapping
    /// session references across the re-sort.
    pub fn recompute_offsets(&mut self) {
        let current_id = self.registry[self.session.current].id.clone();
        let previous_id = self.session.previous.map(|i| self.registry[i].id.clone());
        self.registry.recompute_offsets(&self.host);
        if let Some(index) = self.registry.position(&current_id) {
            self.session.current = index;
        }
        self.session.previous = previous_id.and_then(|id| self.registry.position(&id));
        self.session.refresh_neighbors(self.registry.len());
    }

    /// Snap the scroll position back onto the current section without
    /// animating. No-op while the current section scrolls natively.
    pub fn stick(&mut self) {
        if !self.session.current_unbound {
            let offset = self.registry[self.session.current].offset;
            self.host.set_scroll_top(offset);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        let breakpoint_changed = self.viewport.resize(width, height);
        self.recompute_offsets();
        if breakpoint_changed {
            self.sections_reinit();
        }
        self.stick();
    }

    fn sections_reinit(&mut self) {
        // Per-viewport unbound status can flip with the breakpoint.
        self.refresh_policy();
        let breakpoint = self.viewport.state().breakpoint.clone();
        for sink in &mut self.sinks {
            sink.viewport_changed(&breakpoint);
        }
    }

    // Input entry points
    ///////////////////////////////////////////////////////

    /// Feed one wheel event. Returns `true` when the host must cancel the
    /// event's default action.
    pub fn handle_wheel(&mut self, sample: WheelSample) -> bool {
        if !self.initialized {
            return false;
        }
        if self.session.page_locked {
            // Content above the lock scrolls normally.
            suppress::enable(&mut self.session, &mut self.host);
            return false;
        }
        if self.session.current_unbound {
            suppress::enable(&mut self.session, &mut self.host);
            if !self.session.transitioning {
                let direction = sample.delta.direction();
                return self.unbound_probe(ProbeSource::Wheel(direction), sample.timestamp_ms);
            }
            false
        } else {
            suppress::disable(&mut self.session, &mut self.host);
            if let Some(direction) = self.wheel.observe(sample) {
                self.request_transition(direction.into(), sample.timestamp_ms);
            }
            true
        }
    }

    /// Feed one key-down while reporting where focus sits. The disposition
    /// tells the host whether to run, cancel, or delegate the default.
    pub fn handle_key_down(
        &mut self,
        key: Key,
        focus_on_page: bool,
        target_is_page: bool,
        now_ms: f64,
    ) -> KeyDisposition {
        if !self.initialized || self.session.page_locked || !focus_on_page {
            return KeyDisposition::Native;
        }
        // Holding a key repeats the keydown without a keyup in between;
        // while hijacked that must not machine-gun transitions.
        if !self.session.current_unbound && self.session.last_key == Some(key) {
            return KeyDisposition::Swallowed;
        }
        self.session.last_key = Some(key);

        match key {
            Key::ArrowUp | Key::ArrowDown => self.arrow_key(key, now_ms),
            Key::Tab => KeyDisposition::DelegateFocus,
            Key::Space => {
                if target_is_page {
                    KeyDisposition::Swallowed
                } else {
                    KeyDisposition::Native
                }
            }
            Key::Other => KeyDisposition::Native,
        }
    }

    pub fn handle_key_up(&mut self) {
        self.session.last_key = None;
    }

    fn arrow_key(&mut self, key: Key, now_ms: f64) -> KeyDisposition {
        let Some(direction) = key.direction() else {
            return KeyDisposition::Native;
        };
        if self.session.current_unbound {
            if !self.session.transitioning && self.unbound_probe(ProbeSource::Key(key), now_ms) {
                KeyDisposition::Swallowed
            } else {
                KeyDisposition::Native
            }
        } else {
            self.request_transition(direction.into(), now_ms);
            KeyDisposition::Swallowed
        }
    }

    pub fn handle_touch_start(&mut self, point: TouchPoint) {
        if !self.touch_eligible() {
            return;
        }
        if self.session.current_unbound {
            self.poll.start(point.timestamp_ms);
        } else {
            self.touch.begin(point);
        }
    }

    /// Returns `true` when the host must suppress the default move handling
    /// (gesture capture on a hijacked section).
    pub fn handle_touch_move(&mut self, point: TouchPoint) -> bool {
        if !self.touch_eligible() {
            return false;
        }
        self.touch.update(point)
    }

    pub fn handle_touch_end(&mut self, now_ms: f64) {
        if self.viewport.state().device != DeviceClass::Touch {
            return;
        }
        self.poll.cancel();
        let swipe = self.touch.finish();
        if !self.touch_eligible() {
            return;
        }
        if let Some(direction) = swipe {
            if !self.session.current_unbound {
                self.request_transition(direction.into(), now_ms);
            }
        }
    }

    fn touch_eligible(&self) -> bool {
        self.initialized
            && self.viewport.state().device == DeviceClass::Touch
            && !self.session.page_locked
    }

    /// Advance timers: the unbound-touch boundary poll and any in-flight
    /// transition animation.
    pub fn tick(&mut self, now_ms: f64) {
        if self.poll.fire(now_ms) && self.session.current_unbound && !self.session.transitioning {
            self.unbound_probe(ProbeSource::Touch, now_ms);
        }

        let Some(pending) = self.pending else {
            return;
        };
        self.host.set_scroll_top(pending.tween.position(now_ms));
        if pending.tween.is_complete(now_ms) {
            self.pending = None;
            self.host.set_scroll_top(pending.tween.target());
            let entered = self.registry[pending.target].id.clone();
            let exited = self.registry[pending.origin].id.clone();
            self.emit_section_event(&entered, SectionEvent::entered(pending.direction));
            self.emit_section_event(&exited, SectionEvent::exited(pending.direction));
            self.session.transitioning = false;
        }
    }

    // Transitions
    ///////////////////////////////////////////////////////

    /// Ask for a transition. Dropped while one is already in flight or the
    /// page is locked; that drop is the engine's backpressure, not an error.
    pub fn request_transition(&mut self, request: TransitionRequest, now_ms: f64) {
        if !self.initialized || self.session.transitioning || self.session.page_locked {
            return;
        }
        let Some(plan) =
            transition::plan(&self.registry, &self.viewport, self.session.current, &request)
        else {
            return;
        };
        debug!(to = %self.registry[plan.to].id, "changing section");
        self.poll.cancel();
        match plan.mode {
            TransitionMode::Swap => self.swap_sections(plan),
            TransitionMode::Animate(anchor) => self.animate(plan, anchor, now_ms),
        }
    }

    /// Instantaneous hand-off between two adjacent natively-scrolling
    /// sections: lifecycle events and reference updates only.
    fn swap_sections(&mut self, plan: TransitionPlan) {
        let from_id = self.registry[plan.from].id.clone();
        let to_id = self.registry[plan.to].id.clone();
        self.emit_section_event(&from_id, SectionEvent::exiting(plan.direction));
        self.emit_section_event(&to_id, SectionEvent::entering(plan.direction));
        self.emit_section_event(&to_id, SectionEvent::entered(plan.direction));
        self.apply_change(plan.from, plan.to);
    }

    fn animate(&mut self, plan: TransitionPlan, anchor: Anchor, now_ms: f64) {
        self.session.transitioning = true;

        let (next_offset, next_element) = {
            let next = &self.registry[plan.to];
            (next.offset, next.element)
        };
        let target_offset = match anchor {
            Anchor::Top => next_offset,
            Anchor::Bottom => {
                next_offset + self.host.element_height(next_element) - self.viewport.state().height
            }
        };

        let from_id = self.registry[plan.from].id.clone();
        let to_id = self.registry[plan.to].id.clone();
        self.emit_section_event(&from_id, SectionEvent::exiting(plan.direction));
        self.emit_section_event(&to_id, SectionEvent::entering(plan.direction));
        // References change at animation start so dependent UI switches in
        // sync with the visual motion.
        self.apply_change(plan.from, plan.to);

        self.pending = Some(PendingTransition {
            tween: ScrollTween::new(
                self.host.scroll_top(),
                target_offset,
                self.options.scroll.duration_ms as f64,
                self.options.scroll.easing,
                now_ms,
            ),
            direction: plan.direction,
            origin: plan.from,
            target: plan.to,
        });
    }

    fn apply_change(&mut self, from: usize, to: usize) {
        self.session.previous = Some(from);
        self.session.current = to;
        self.session.refresh_neighbors(self.registry.len());
        self.emit_section_changed();
        self.refresh_policy();
    }

    fn emit_section_changed(&mut self) {
        let change = SectionChange {
            previous: self.session.previous.map(|i| self.registry[i].id.clone()),
            current: self.registry[self.session.current].id.clone(),
            above: self.session.above.map(|i| self.registry[i].id.clone()),
            below: self.session.below.map(|i| self.registry[i].id.clone()),
        };
        for sink in &mut self.sinks {
            sink.section_changed(&change);
        }
    }

    fn emit_section_event(&mut self, section: &SectionId, event: SectionEvent) {
        for sink in &mut self.sinks {
            sink.section_event(section, event);
        }
        if let Some(hooks) = self.hooks.get_mut(section) {
            match event {
                SectionEvent::EnteredUp => hooks.entered(section, Direction::Up),
                SectionEvent::EnteredDown => hooks.entered(section, Direction::Down),
                SectionEvent::ExitedUp => hooks.exited(section, Direction::Up),
                SectionEvent::ExitedDown => hooks.exited(section, Direction::Down),
                _ => {}
            }
        }
    }

    // Bound/unbound hand-off
    ///////////////////////////////////////////////////////

    /// Evaluate boundary crossing while the current section scrolls
    /// natively. Returns `true` when the probe consumed the input (the host
    /// must cancel the default).
    fn unbound_probe(&mut self, source: ProbeSource, now_ms: f64) -> bool {
        let device = self.viewport.state().device;
        let window_height = self.viewport.state().height;
        let scroll_top = self.host.scroll_top();
        let current_offset = self.registry[self.session.current].offset;

        let is_above = self.session.above.is_some()
            && crossed_above(scroll_top, current_offset, device);
        if is_above {
            match source {
                ProbeSource::Wheel(direction) if direction != Some(Direction::Up) => return false,
                ProbeSource::Key(key) if key != Key::ArrowUp => return false,
                _ => {}
            }
            let Some(above) = self.session.above else {
                return false;
            };
            if is_scroll_unbound(&self.registry[above].unbound, &self.viewport) {
                // Contiguous native content: just move the references.
                self.request_transition(TransitionRequest::Up, now_ms);
                false
            } else {
                self.relock_and_go(Direction::Up, source, now_ms);
                true
            }
        } else {
            let Some(below) = self.session.below else {
                return false;
            };
            let below_unbound = is_scroll_unbound(&self.registry[below].unbound, &self.viewport);
            let crossed = crossed_below(
                scroll_top,
                self.registry[below].offset,
                !below_unbound,
                window_height,
                device,
            );
            if !crossed {
                return false;
            }
            self.poll.cancel();
            match source {
                ProbeSource::Wheel(direction) if direction != Some(Direction::Down) => {
                    return false
                }
                ProbeSource::Key(key) if key != Key::ArrowDown => return false,
                _ => {}
            }
            if below_unbound {
                self.request_transition(TransitionRequest::Down, now_ms);
                false
            } else {
                self.relock_and_go(Direction::Down, source, now_ms);
                true
            }
        }
    }

    /// Crossing into a hijacked neighbor: stop watching, re-disable native
    /// scroll and run the animated hand-off.
    fn relock_and_go(&mut self, direction: Direction, source: ProbeSource, now_ms: f64) {
        if matches!(source, ProbeSource::Touch) {
            self.poll.cancel();
            self.host.kill_inertia();
        }
        self.session.current_unbound = false;
        self.apply_scroll_policy();
        self.request_transition(direction.into(), now_ms);
    }

    // Derived state
    ///////////////////////////////////////////////////////

    fn refresh_policy(&mut self) {
        let unbound =
            is_scroll_unbound(&self.registry[self.session.current].unbound, &self.viewport);
        self.session.current_unbound = unbound;
        self.apply_scroll_policy();
    }

    fn apply_scroll_policy(&mut self) {
        // Native scroll is disabled iff the current section is hijacked and
        // no external page lock is active.
        if !self.session.current_unbound && !self.session.page_locked {
            suppress::disable(&mut self.session, &mut self.host);
        } else {
            suppress::enable(&mut self.session, &mut self.host);
        }
    }

    // Accessors
    ///////////////////////////////////////////////////////

    pub fn current_section(&self) -> &Section {
        &self.registry[self.session.current]
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> &ViewportState {
        self.viewport.state()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Resolved unbound status of a section in the current viewport.
    pub fn is_section_unbound(&self, id: &SectionId) -> Option<bool> {
        let index = self.registry.position(id)?;
        Some(is_scroll_unbound(&self.registry[index].unbound, &self.viewport))
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
