//! Full engine flow over the in-memory page host: deep link, wheel-driven
//! transitions, native scrolling through an unbound section and the animated
//! hand-off back into a hijacked one.

use std::cell::RefCell;
use std::rc::Rc;

use scrollstage_core::{EasingType, PageConfig, SectionDecl, SectionId, UnboundDecl};
use scrollstage_engine::{
    Engine, Key, KeyDisposition, MemoryPage, PageHost, SectionEvent, WheelDelta, WheelSample,
};
use scrollstage_engine::events::RecordingSink;

fn decl(id: &str, unbound: UnboundDecl) -> SectionDecl {
    SectionDecl {
        id: SectionId::new(id),
        name: None,
        unbound,
        height: None,
    }
}

/// intro (bound, 800) / story (bound, 800) / longread (unbound, 2400) /
/// credits (bound, 800) on a 1280x800 desktop window.
fn presentation() -> (Engine<MemoryPage>, Rc<RefCell<RecordingSink>>) {
    let page = MemoryPage::new(1280.0, 800.0, false)
        .with_section("intro", 800.0)
        .with_section("story", 800.0)
        .with_section("longread", 2400.0)
        .with_section("credits", 800.0);

    let mut config = PageConfig::default();
    config.options.scroll.duration_ms = 1000;
    config.options.scroll.easing = EasingType::Linear;
    config.sections = vec![
        decl("intro", UnboundDecl::Fixed(false)),
        decl("story", UnboundDecl::Fixed(false)),
        decl("longread", UnboundDecl::Fixed(true)),
        decl("credits", UnboundDecl::Fixed(false)),
    ];

    let mut engine = Engine::new(config, page).unwrap();
    let sink = Rc::new(RefCell::new(RecordingSink::default()));
    engine.register_sink(Box::new(Rc::clone(&sink)));
    engine.initialize();
    (engine, sink)
}

fn run_out(engine: &mut Engine<MemoryPage>, start_ms: f64) -> f64 {
    let mut t = start_ms;
    while engine.session().transitioning {
        t += 50.0;
        engine.tick(t);
        assert!(t < start_ms + 10_000.0, "transition never completed");
    }
    t
}

fn wheel(t: f64, delta_y: f64) -> WheelSample {
    WheelSample {
        timestamp_ms: t,
        delta: WheelDelta::DeltaY(delta_y),
    }
}

#[test]
fn test_full_presentation_walkthrough() {
    let (mut engine, sink) = presentation();

    // First placement: intro current, native scroll suppressed.
    assert_eq!(engine.current_section().id.as_str(), "intro");
    assert_eq!(sink.borrow().initialized.len(), 1);
    assert!(engine.host().input_suppressed);

    // A wheel flick moves exactly one section down.
    assert!(engine.handle_wheel(wheel(0.0, 60.0)));
    assert!(engine.session().transitioning);
    let t = run_out(&mut engine, 0.0);
    assert_eq!(engine.current_section().id.as_str(), "story");
    assert_eq!(engine.host().scroll_top(), 800.0);

    // Arrow key into the unbound longread: animated in, then native scroll
    // is handed back to the page.
    let d = engine.handle_key_down(Key::ArrowDown, true, true, t + 500.0);
    assert_eq!(d, KeyDisposition::Swallowed);
    engine.handle_key_up();
    let t = run_out(&mut engine, t + 500.0);
    assert_eq!(engine.current_section().id.as_str(), "longread");
    assert!(engine.session().current_unbound);
    assert!(!engine.host().input_suppressed);
    assert_eq!(engine.host().scroll_top(), 1600.0);

    // Scroll natively through the longread. Wheel samples inside it do not
    // transition and do not cancel the default.
    engine.host_mut().set_scroll_top(2500.0);
    assert!(!engine.handle_wheel(wheel(t + 1000.0, 40.0)));
    assert_eq!(engine.current_section().id.as_str(), "longread");

    // Past the effective bottom edge (credits at 4000, minus one viewport)
    // a downward wheel re-locks and animates into credits.
    engine.host_mut().set_scroll_top(3250.0);
    assert!(engine.handle_wheel(wheel(t + 1400.0, 40.0)));
    assert!(engine.session().transitioning);
    let t = run_out(&mut engine, t + 1400.0);
    assert_eq!(engine.current_section().id.as_str(), "credits");
    assert!(engine.host().input_suppressed);
    assert_eq!(engine.host().scroll_top(), 4000.0);

    // DOWN from the last section is a no-op.
    let events_before = sink.borrow().events.len();
    engine.go_down(t + 100.0);
    assert!(!engine.session().transitioning);
    assert_eq!(sink.borrow().events.len(), events_before);

    // Backing UP into the unbound longread lands on its bottom edge
    // (offset 1600 + height 2400 - viewport 800) and unlocks native scroll.
    engine.go_up(t + 200.0);
    run_out(&mut engine, t + 200.0);
    assert_eq!(engine.current_section().id.as_str(), "longread");
    assert_eq!(engine.host().scroll_top(), 3200.0);
    assert!(engine.session().current_unbound);
    assert!(!engine.host().input_suppressed);

    // Every animated leg fired exactly one entered per target, in order.
    let entered: Vec<_> = sink
        .borrow()
        .events
        .iter()
        .filter(|(_, e)| matches!(e, SectionEvent::EnteredUp | SectionEvent::EnteredDown))
        .map(|(id, _)| id.as_str().to_owned())
        .collect();
    assert_eq!(entered, ["intro", "story", "longread", "credits", "longread"]);
}

#[test]
fn test_deep_link_then_explicit_navigation() {
    let page = MemoryPage::new(1280.0, 800.0, false)
        .with_section("intro", 800.0)
        .with_section("story", 800.0)
        .with_section("credits", 800.0)
        .with_fragment("story");

    let mut config = PageConfig::default();
    config.options.scroll.duration_ms = 600;
    config.options.scroll.easing = EasingType::Linear;
    config.sections = vec![
        decl("intro", UnboundDecl::Fixed(false)),
        decl("story", UnboundDecl::Fixed(false)),
        decl("credits", UnboundDecl::Fixed(false)),
    ];

    let mut engine = Engine::new(config, page).unwrap();
    engine.initialize();
    assert_eq!(engine.current_section().id.as_str(), "story");
    assert_eq!(engine.host().scroll_top(), 800.0);

    // Menu-style navigation animates even across multiple sections.
    engine.go_to(&SectionId::new("credits"), 0.0);
    assert!(engine.session().transitioning);
    run_out(&mut engine, 0.0);
    assert_eq!(engine.current_section().id.as_str(), "credits");
    assert_eq!(engine.session().previous, Some(1));
    assert_eq!(engine.host().scroll_top(), 1600.0);
}
