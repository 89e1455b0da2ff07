use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a section, unique within a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Direction of travel through the section order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Device class, detected once at startup and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Touch,
    Desktop,
}

/// Easing curve applied to animated section transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump straight to the target at completion.
    None,
    Linear,
    Cubic,
    Quintic,
    #[serde(rename = "ease-out")]
    EaseOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_display() {
        let id = SectionId::new("intro");
        assert_eq!(id.to_string(), "intro");
        assert_eq!(id.as_str(), "intro");
    }

}
