pub mod config;
pub mod error;
pub mod model;

pub use config::{OptionsConfig, PageConfig, ScrollConfig, SectionDecl, UnboundDecl};
pub use error::{Error, Result};
pub use model::{DeviceClass, Direction, EasingType, SectionId};
