use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeError {
    #[error("cannot encode an empty payload")]
    EmptyInput,

    #[error("payload does not fit in a QR symbol: {0}")]
    Encoding(String),

    #[error("image error: {0}")]
    Image(String),
}
