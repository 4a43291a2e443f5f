//! Error types for the layout core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Parse error: {0}")]
    Parse(#[from] exhibit_markup::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported layout type: {0}")]
    UnsupportedLayoutType(String),

    #[error("Layout has no HTML data")]
    MissingHtml,
}

pub type LayoutResult<T> = Result<T, LayoutError>;
