pub mod inspect;
pub mod replay;

use anyhow::{bail, Result};

use scrollstage_core::PageConfig;
use scrollstage_engine::MemoryPage;

/// Build a synthetic page from the declaration: sections stacked in order,
/// each as tall as its declared height or one viewport.
pub fn synthetic_page(
    config: &PageConfig,
    width: f64,
    height: f64,
    touch: bool,
) -> Result<MemoryPage> {
    if config.sections.is_empty() {
        bail!("page declares no sections");
    }
    let mut page = MemoryPage::new(width, height, touch);
    for decl in &config.sections {
        page.push_section(decl.id.clone(), decl.height.unwrap_or(height));
    }
    Ok(page)
}
