//! The unified error type for preparing invitations.

use rsvpress_links::LinkError;
use rsvpress_pdf_composer::ComposerError;
use rsvpress_qrcode::CodeError;
use rsvpress_traits::{ResourceError, StoreError};
use rsvpress_types::InvalidValue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Code generation failed: {0}")]
    Code(#[from] CodeError),
    #[error("PDF composition failed: {0}")]
    Composer(#[from] ComposerError),
    #[error("Link rewriting failed: {0}")]
    Links(#[from] LinkError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown guest: '{0}'")]
    UnknownGuest(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<InvalidValue> for PipelineError {
    fn from(e: InvalidValue) -> Self {
        PipelineError::InvalidInput(e.to_string())
    }
}
