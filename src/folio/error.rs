use std::path::PathBuf;
use thiserror::Error;

/// A frontmatter field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid `{field}`: {reason}")]
pub struct SchemaError {
    pub field: String,
    pub reason: String,
}

impl SchemaError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, "required field is missing")
    }
}

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("{}: {source}", path.display())]
    Schema { path: PathBuf, source: SchemaError },

    #[error("{}: {message}", path.display())]
    Document { path: PathBuf, message: String },

    #[error("Content error: {0}")]
    Content(String),

    #[error("{0}")]
    Filter(#[from] crate::filter::UnknownSelection),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frontmatter error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] stencil::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Invalid site URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font error in {}: {message}", path.display())]
    Font { path: PathBuf, message: String },

    #[error("Feed error: {0}")]
    Feed(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
