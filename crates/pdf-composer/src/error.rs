use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("PDF error: {0}")]
    Format(#[from] lopdf::Error),

    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("page {requested} is out of range (document has {page_count} pages)")]
    PageIndex { requested: u32, page_count: u32 },

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("invalid placement: {0}")]
    Placement(String),

    #[error("{0}")]
    Other(String),
}
