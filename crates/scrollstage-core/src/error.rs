use thiserror::Error;

use crate::model::SectionId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Section '{0}' has no matching element on the page")]
    MissingElement(SectionId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page declaration error: {0}")]
    PageDecl(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
