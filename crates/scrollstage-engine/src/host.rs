//! Seam between the engine and the surface it drives.
//!
//! The engine never touches a real DOM; everything it needs from the page is
//! behind [`PageHost`]. [`MemoryPage`] is an in-memory implementation used by
//! the replay tool and the test suite.

use scrollstage_core::SectionId;

/// Opaque handle to a section's element on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHandle(pub(crate) usize);

/// Surface the engine reads layout from and writes scroll state to.
pub trait PageHost {
    /// Look up the element backing a declared section.
    fn find_section_element(&self, id: &SectionId) -> Option<ElementHandle>;

    /// Top of the element relative to the current viewport, in px.
    fn element_top(&self, element: ElementHandle) -> f64;

    /// Rendered height of the element, in px.
    fn element_height(&self, element: ElementHandle) -> f64;

    fn scroll_top(&self) -> f64;

    fn set_scroll_top(&mut self, y: f64);

    fn window_width(&self) -> f64;

    fn window_height(&self) -> f64;

    /// Platform touch capability, probed once at startup.
    fn has_touch(&self) -> bool;

    /// Install or remove the document-level wheel/touch default cancellers.
    fn set_input_suppressed(&mut self, suppressed: bool);

    /// Force full page-scroll lockdown (modal open), independent of section
    /// policy. Inner content of the locking surface may still scroll.
    fn set_page_locked(&mut self, locked: bool);

    /// Halt in-flight touch inertia before re-locking an unbound section.
    fn kill_inertia(&mut self) {}

    /// URL fragment the page was opened with, if any.
    fn fragment(&self) -> Option<String> {
        None
    }

    /// Drop a fragment that matched no section.
    fn clear_fragment(&mut self) {}
}

/// In-memory page: sections stacked vertically in declaration order.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    window: (f64, f64),
    touch: bool,
    sections: Vec<(SectionId, f64)>,
    scroll_top: f64,
    fragment: Option<String>,
    /// Whether default wheel/touch handling is currently cancelled.
    pub input_suppressed: bool,
    /// Whether the page surface is fully locked.
    pub page_locked: bool,
}

impl MemoryPage {
    pub fn new(width: f64, height: f64, touch: bool) -> Self {
        Self {
            window: (width, height),
            touch,
            sections: Vec::new(),
            scroll_top: 0.0,
            fragment: None,
            input_suppressed: false,
            page_locked: false,
        }
    }

    /// Append a section of the given height below the existing ones.
    pub fn with_section(mut self, id: impl Into<SectionId>, height: f64) -> Self {
        self.sections.push((id.into(), height));
        self
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn push_section(&mut self, id: SectionId, height: f64) {
        self.sections.push((id, height));
    }

    /// Document-absolute top of the section at `index`.
    fn document_top(&self, index: usize) -> f64 {
        self.sections[..index].iter().map(|(_, h)| h).sum()
    }
}

impl PageHost for MemoryPage {
    fn find_section_element(&self, id: &SectionId) -> Option<ElementHandle> {
        self.sections
            .iter()
            .position(|(sid, _)| sid == id)
            .map(ElementHandle)
    }

    fn element_top(&self, element: ElementHandle) -> f64 {
        self.document_top(element.0) - self.scroll_top
    }

    fn element_height(&self, element: ElementHandle) -> f64 {
        self.sections[element.0].1
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, y: f64) {
        self.scroll_top = y.max(0.0);
    }

    fn window_width(&self) -> f64 {
        self.window.0
    }

    fn window_height(&self) -> f64 {
        self.window.1
    }

    fn has_touch(&self) -> bool {
        self.touch
    }

    fn set_input_suppressed(&mut self, suppressed: bool) {
        self.input_suppressed = suppressed;
    }

    fn set_page_locked(&mut self, locked: bool) {
        self.page_locked = locked;
    }

    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn clear_fragment(&mut self) {
        self.fragment = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_page_stacks_sections() {
        let page = MemoryPage::new(1280.0, 800.0, false)
            .with_section("a", 800.0)
            .with_section("b", 1200.0)
            .with_section("c", 800.0);

        let b = page.find_section_element(&SectionId::new("b")).unwrap();
        let c = page.find_section_element(&SectionId::new("c")).unwrap();
        assert_eq!(page.element_top(b), 800.0);
        assert_eq!(page.element_top(c), 2000.0);
        assert_eq!(page.element_height(b), 1200.0);
    }

    #[test]
    fn test_element_top_tracks_scroll() {
        let mut page = MemoryPage::new(1280.0, 800.0, false).with_section("a", 800.0);
        let a = page.find_section_element(&SectionId::new("a")).unwrap();
        page.set_scroll_top(300.0);
        assert_eq!(page.element_top(a), -300.0);
    }

    #[test]
    fn test_scroll_top_clamps_negative() {
        let mut page = MemoryPage::new(1280.0, 800.0, false);
        page.set_scroll_top(-40.0);
        assert_eq!(page.scroll_top(), 0.0);
    }
}
