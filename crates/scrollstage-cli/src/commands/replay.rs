use std::path::Path;

use anyhow::Result;
use serde_json::json;

use scrollstage_core::{PageConfig, SectionId};
use scrollstage_engine::{Engine, EventSink, MemoryPage, PageHost, SectionChange, SectionEvent};

use super::synthetic_page;
use crate::trace::{self, Step, Trace};

/// Tick granularity while replaying; fine enough for the boundary poll.
const TICK_MS: f64 = 10.0;

/// Sink that prints every lifecycle notification as it happens.
struct PrintSink {
    json: bool,
}

impl EventSink for PrintSink {
    fn initialized(&mut self, current: &SectionId) {
        if self.json {
            println!("{}", json!({ "event": "initialized", "section": current.as_str() }));
        } else {
            println!("initialized          {current}");
        }
    }

    fn section_event(&mut self, section: &SectionId, event: SectionEvent) {
        if self.json {
            println!("{}", json!({ "event": event.wire_name(), "section": section.as_str() }));
        } else {
            println!("{:<20} {section}", event.wire_name());
        }
    }

    fn section_changed(&mut self, change: &SectionChange) {
        if self.json {
            println!("{}", change_json(change));
        } else {
            let name = |id: &Option<SectionId>| {
                id.as_ref().map(SectionId::to_string).unwrap_or_else(|| "-".into())
            };
            println!(
                "sectionChanged       {} (previous {}, above {}, below {})",
                change.current,
                name(&change.previous),
                name(&change.above),
                name(&change.below),
            );
        }
    }

    fn viewport_changed(&mut self, breakpoint: &str) {
        if self.json {
            println!("{}", json!({ "event": "viewportChanged", "breakpoint": breakpoint }));
        } else {
            println!("viewportChanged      {breakpoint}");
        }
    }
}

/// `sectionChanged` as JSON. The neighbor keys are spelled `sectionAbove` /
/// `sectionBelow` on the wire, whatever the struct fields are called.
fn change_json(change: &SectionChange) -> serde_json::Value {
    json!({
        "event": "sectionChanged",
        "current": change.current.as_str(),
        "previous": change.previous.as_ref().map(SectionId::as_str),
        "sectionAbove": change.above.as_ref().map(SectionId::as_str),
        "sectionBelow": change.below.as_ref().map(SectionId::as_str),
    })
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: PageConfig,
    trace_path: &Path,
    width: f64,
    height: f64,
    touch: bool,
    fragment: Option<String>,
    json: bool,
) -> Result<()> {
    let trace = Trace::load(trace_path)?;

    let mut page = synthetic_page(&config, width, height, touch)?;
    if let Some(fragment) = fragment {
        page = page.with_fragment(fragment);
    }

    let mut engine = Engine::new(config, page)?;
    engine.register_sink(Box::new(PrintSink { json }));
    engine.initialize();

    let mut now = 0.0_f64;
    for step in &trace.steps {
        now = advance(&mut engine, now, step.at());
        apply(&mut engine, step, now)?;
    }

    // Let whatever is still in flight run out.
    let deadline = now + 60_000.0;
    while engine.session().transitioning && now < deadline {
        now += TICK_MS;
        engine.tick(now);
    }

    let current = engine.current_section();
    if json {
        println!(
            "{}",
            json!({
                "event": "replayFinished",
                "section": current.id.as_str(),
                "scroll_top": engine.host().scroll_top(),
            })
        );
    } else {
        println!(
            "\nfinished at \"{}\" (scroll {:.0}px)",
            current.id,
            engine.host().scroll_top()
        );
    }
    Ok(())
}

fn advance(engine: &mut Engine<MemoryPage>, mut now: f64, until: f64) -> f64 {
    while now < until {
        now = (now + TICK_MS).min(until);
        engine.tick(now);
    }
    until
}

fn apply(engine: &mut Engine<MemoryPage>, step: &Step, now: f64) -> Result<()> {
    match step {
        Step::Wheel {
            at,
            delta_y,
            wheel_delta,
            detail,
        } => {
            let sample = trace::wheel_sample(*at, *delta_y, *wheel_delta, *detail)?;
            engine.handle_wheel(sample);
        }
        Step::KeyDown {
            key,
            focus_on_page,
            target_is_page,
            ..
        } => {
            engine.handle_key_down((*key).into(), *focus_on_page, *target_is_page, now);
        }
        Step::KeyUp { .. } => engine.handle_key_up(),
        Step::TouchStart { at, x, y } => engine.handle_touch_start(trace::touch_point(*at, *x, *y)),
        Step::TouchMove { at, x, y } => {
            engine.handle_touch_move(trace::touch_point(*at, *x, *y));
        }
        Step::TouchEnd { .. } => engine.handle_touch_end(now),
        Step::GoUp { .. } => engine.go_up(now),
        Step::GoDown { .. } => engine.go_down(now),
        Step::GoTo { section, .. } => engine.go_to(&SectionId::new(section.clone()), now),
        Step::Lock { .. } => engine.lock_page(),
        Step::Unlock { .. } => engine.unlock_page(),
        Step::Resize { width, height, .. } => engine.resize(*width, *height),
        Step::Scroll { top, .. } => engine.host_mut().set_scroll_top(*top),
        Step::Run { .. } => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollstage_core::{SectionDecl, UnboundDecl};

    fn engine() -> Engine<MemoryPage> {
        let mut config = PageConfig::default();
        config.sections = vec![SectionDecl {
            id: SectionId::new("longread"),
            name: None,
            unbound: UnboundDecl::Fixed(true),
            height: Some(2400.0),
        }];
        let page = synthetic_page(&config, 1280.0, 800.0, false).unwrap();
        let mut engine = Engine::new(config, page).unwrap();
        engine.initialize();
        engine
    }

    #[test]
    fn test_section_change_json_uses_wire_key_names() {
        let change = SectionChange {
            previous: Some(SectionId::new("intro")),
            current: SectionId::new("story"),
            above: Some(SectionId::new("intro")),
            below: None,
        };
        let value = change_json(&change);
        assert_eq!(value["event"], "sectionChanged");
        assert_eq!(value["current"], "story");
        assert_eq!(value["sectionAbove"], "intro");
        assert!(value.get("sectionBelow").is_some());
        assert!(value.get("above").is_none());
        assert!(value.get("below").is_none());
    }

    #[test]
    fn test_scroll_step_moves_the_page() {
        let mut engine = engine();
        let step = Step::Scroll { at: 0.0, top: 640.0 };
        apply(&mut engine, &step, 0.0).unwrap();
        assert_eq!(engine.host().scroll_top(), 640.0);
    }

    #[test]
    fn test_advance_ticks_up_to_the_deadline() {
        let mut engine = engine();
        assert_eq!(advance(&mut engine, 0.0, 95.0), 95.0);
    }
}
