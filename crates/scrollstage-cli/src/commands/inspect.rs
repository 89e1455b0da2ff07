use anyhow::Result;

use scrollstage_core::PageConfig;
use scrollstage_engine::Engine;

use super::synthetic_page;

pub fn run(config: PageConfig, width: f64, height: f64, touch: bool) -> Result<()> {
    let page = synthetic_page(&config, width, height, touch)?;
    let engine = Engine::new(config, page)?;

    let viewport = engine.viewport();
    println!(
        "Viewport: {}x{} ({:?}, breakpoint \"{}\")\n",
        viewport.width, viewport.height, viewport.device, viewport.breakpoint
    );

    println!("Sections ({}):\n", engine.registry().len());
    for section in engine.registry().sections() {
        let unbound = engine
            .is_section_unbound(&section.id)
            .unwrap_or(false);
        let marker = if section.index == engine.session().current {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:>3}  {:<24} {:>8.0}px  {}",
            marker,
            section.index,
            format!("{} ({})", section.id, section.name),
            section.offset,
            if unbound { "unbound" } else { "bound" },
        );
    }

    Ok(())
}
