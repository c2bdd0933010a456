use thiserror::Error;

/// Raised when a value type is constructed from input that violates its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidValue {
    #[error("guest identifier must not be empty")]
    EmptyGuestId,

    #[error("public domain must not be empty")]
    EmptyDomain,

    #[error("placement {field} must be a finite, non-negative number (got {value})")]
    Placement { field: &'static str, value: f32 },
}
