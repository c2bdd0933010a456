//! Resource providers for the rsvpress pipeline.
//!
//! - [`FilesystemResourceProvider`]: reads base documents from a static directory
//! - [`InMemoryResourceProvider`]: re-exported from `rsvpress-traits`

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use rsvpress_traits::InMemoryResourceProvider;
