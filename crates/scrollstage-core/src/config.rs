use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{EasingType, SectionId};

/// Full page declaration: global options plus the ordered section list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub options: OptionsConfig,
    #[serde(default)]
    pub sections: Vec<SectionDecl>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            options: OptionsConfig::default(),
            sections: Vec::new(),
        }
    }
}

impl PageConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Named viewport buckets, name to max-width in px.
    #[serde(default = "default_breakpoints")]
    pub breakpoints: BTreeMap<String, f64>,
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Resolve the initial section from a URL fragment.
    #[serde(default = "default_true")]
    pub hash_change: bool,
    /// Surface configuration diagnostics at a visible log level.
    #[serde(default)]
    pub dev_mode: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            breakpoints: default_breakpoints(),
            scroll: ScrollConfig::default(),
            hash_change: default_true(),
            dev_mode: false,
        }
    }
}

/// Animated transition parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_scroll_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_easing")]
    pub easing: EasingType,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_scroll_duration_ms(),
            easing: default_easing(),
        }
    }
}

/// One declared section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDecl {
    pub id: SectionId,
    /// Display name; derived from the id when absent.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unbound: UnboundDecl,
    /// Content height in px, used when building a synthetic page for
    /// replay and inspection tooling.
    #[serde(default)]
    pub height: Option<f64>,
}

/// Declared unbound policy: a plain flag, or a set of breakpoint names the
/// section scrolls natively within.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnboundDecl {
    Fixed(bool),
    Breakpoints(Vec<String>),
}

impl Default for UnboundDecl {
    fn default() -> Self {
        UnboundDecl::Fixed(false)
    }
}

fn default_breakpoints() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("mobile".to_owned(), 480.0),
        ("tablet".to_owned(), 768.0),
        ("mdDesktop".to_owned(), 992.0),
        ("lgDesktop".to_owned(), 1200.0),
    ])
}

fn default_scroll_duration_ms() -> u64 {
    1000
}

fn default_easing() -> EasingType {
    EasingType::EaseOut
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.options.breakpoints.len(), 4);
        assert_eq!(config.options.breakpoints["mobile"], 480.0);
        assert_eq!(config.options.scroll.duration_ms, 1000);
        assert_eq!(config.options.scroll.easing, EasingType::EaseOut);
        assert!(config.options.hash_change);
        assert!(!config.options.dev_mode);
        assert!(config.sections.is_empty());
    }

    #[test]
    fn test_parse_page_declaration() {
        let config = PageConfig::from_toml_str(
            r#"
            [options.scroll]
            duration_ms = 600
            easing = "cubic"

            [[sections]]
            id = "intro"

            [[sections]]
            id = "long-read"
            unbound = true
            height = 3000.0

            [[sections]]
            id = "gallery"
            unbound = ["mobile", "tablet"]
            "#,
        )
        .unwrap();

        assert_eq!(config.options.scroll.duration_ms, 600);
        assert_eq!(config.options.scroll.easing, EasingType::Cubic);
        assert_eq!(config.sections.len(), 3);
        assert!(matches!(config.sections[0].unbound, UnboundDecl::Fixed(false)));
        assert!(matches!(config.sections[1].unbound, UnboundDecl::Fixed(true)));
        match &config.sections[2].unbound {
            UnboundDecl::Breakpoints(names) => assert_eq!(names, &["mobile", "tablet"]),
            other => panic!("expected breakpoint list, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PageConfig::from_toml_str("sections = 3").is_err());
    }
}
