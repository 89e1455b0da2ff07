//! Ordered collection of sections with computed scroll offsets.

use scrollstage_core::{Error, Result, SectionDecl, SectionId};
use tracing::warn;

use crate::host::{ElementHandle, PageHost};
use crate::policy::UnboundPolicy;

#[derive(Debug, Clone)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    /// Ordinal position after sorting by offset.
    pub index: usize,
    /// Pixels from document top; recomputed on layout changes.
    pub offset: f64,
    pub unbound: UnboundPolicy,
    pub(crate) element: ElementHandle,
}

#[derive(Default)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declared section. A declaration whose element cannot be
    /// found on the page is a configuration error, not a silent skip.
    pub fn add<H: PageHost>(&mut self, host: &H, decl: &SectionDecl) -> Result<&Section> {
        let element = host
            .find_section_element(&decl.id)
            .ok_or_else(|| Error::MissingElement(decl.id.clone()))?;
        let name = decl
            .name
            .clone()
            .unwrap_or_else(|| display_name(decl.id.as_str()));
        let index = self.sections.len();
        self.sections.push(Section {
            id: decl.id.clone(),
            name,
            index,
            offset: 0.0,
            unbound: UnboundPolicy::from(&decl.unbound),
            element,
        });
        Ok(&self.sections[index])
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Ordinal index of the first section with this id.
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    /// How many sections share this id; more than one is a declaration
    /// problem surfaced during deep-link resolution.
    pub fn count_id(&self, id: &SectionId) -> usize {
        self.sections.iter().filter(|s| &s.id == id).count()
    }

    /// Replace the unbound policy of the first section with this id. Used to
    /// install predicate policies that cannot be declared in TOML. Returns
    /// `false` when the id is unknown.
    pub fn set_unbound_policy(&mut self, id: &SectionId, policy: UnboundPolicy) -> bool {
        match self.sections.iter_mut().find(|s| &s.id == id) {
            Some(section) => {
                section.unbound = policy;
                true
            }
            None => false,
        }
    }

    /// Recompute every offset as `scroll_top + element top in viewport`, then
    /// re-sort by offset and reassign ordinal indices.
    pub fn recompute_offsets<H: PageHost>(&mut self, host: &H) {
        let scroll_top = host.scroll_top();
        for section in &mut self.sections {
            section.offset = scroll_top + host.element_top(section.element);
        }
        self.resort();
    }

    fn resort(&mut self) {
        self.sections.sort_by(|a, b| {
            a.offset
                .partial_cmp(&b.offset)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for pair in self.sections.windows(2) {
            if pair[0].offset == pair[1].offset {
                // Ordering between these two is undefined.
                warn!(
                    first = %pair[0].id,
                    second = %pair[1].id,
                    offset = pair[0].offset,
                    "sections share an identical offset"
                );
            }
        }
        for (index, section) in self.sections.iter_mut().enumerate() {
            section.index = index;
        }
    }
}

impl std::ops::Index<usize> for SectionRegistry {
    type Output = Section;

    fn index(&self, index: usize) -> &Section {
        &self.sections[index]
    }
}

/// Human-readable name from an id: separators become spaces, words are
/// title-cased, camelCase is split.
pub fn display_name(id: &str) -> String {
    let mut spaced = String::with_capacity(id.len() + 4);
    let mut previous_lower = false;
    for ch in id.chars() {
        if ch == '-' || ch == '_' {
            spaced.push(' ');
            previous_lower = false;
            continue;
        }
        if ch.is_ascii_uppercase() && previous_lower {
            spaced.push(' ');
        }
        previous_lower = ch.is_ascii_lowercase();
        spaced.push(ch);
    }
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = ch == ' ';
    }
    out
}
