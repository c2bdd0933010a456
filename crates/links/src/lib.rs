//! Link annotations in invitation PDFs.
//!
//! [`rewrite_links`] points every external (URI) link at a new address while
//! leaving internal jumps and non-link annotations alone. [`extract_links`]
//! lists the links a document carries.

mod annots;
mod error;
mod extract;
mod rewrite;

#[cfg(test)]
mod test_support;

pub use error::LinkError;
pub use extract::extract_links;
pub use rewrite::rewrite_links;
