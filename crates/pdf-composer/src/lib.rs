//! PDF composition for personalised invitations.
//!
//! This crate provides the low-level PDF manipulation used to stamp a
//! per-guest code onto a shared invitation, built on lopdf and printpdf:
//! - Building a one-page overlay that holds a single image at a rectangle
//! - Merging that overlay onto one page of a base document
//! - Deep object copying between documents with cycle detection
//! - Inspecting where images are drawn on a page

mod copier;
mod error;
pub mod inspect;
mod merge;
mod overlay;
mod page;

#[cfg(test)]
mod test_support;

pub use error::ComposerError;
pub use inspect::{placed_images, PlacedImage};
pub use merge::merge_overlay;
pub use overlay::{make_overlay, make_overlay_on};
pub use page::{page_box, page_count, page_size};
