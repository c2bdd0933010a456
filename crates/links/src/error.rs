use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("PDF error: {0}")]
    Format(#[from] lopdf::Error),

    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
