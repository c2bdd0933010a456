//! Personalised invitation PDFs.
//!
//! An [`InvitationPipeline`] takes one shared invitation document and, per
//! guest, stamps a QR code carrying the guest's RSVP link onto a configured
//! page and points the document's external links at that same address.
//!
//! ```no_run
//! use rsvpress::{InvitationPipeline, PressConfig};
//!
//! let config = PressConfig::from_env()?;
//! let pipeline = InvitationPipeline::from_config(config)?;
//! let invite = pipeline.prepare_document("g42")?;
//! std::fs::write(&invite.file_name, &invite.bytes)?;
//! # Ok::<(), rsvpress::PipelineError>(())
//! ```

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{PressConfig, PressConfigBuilder};
pub use error::PipelineError;
pub use pipeline::{InvitationPipeline, PreparedInvitation};

pub use rsvpress_links::{extract_links, rewrite_links, LinkError};
pub use rsvpress_pdf_composer::{
    make_overlay, make_overlay_on, merge_overlay, page_box, page_count, page_size, placed_images, ComposerError,
    PlacedImage,
};
pub use rsvpress_qrcode::{generate_code, generate_code_with, CodeError, CodeStyle};
pub use rsvpress_resource::FilesystemResourceProvider;
pub use rsvpress_traits::{
    FoodPreference, GuestRecord, InMemoryResourceProvider, InMemoryResponseStore, InMemoryRoster,
    ResourceError, ResourceProvider, ResponseRecord, ResponseStore, RosterStore, StoreError,
};
pub use rsvpress_types::{
    GuestId, LinkAnnotation, LinkTarget, PageBox, PageSize, PersonalizationUrl, PlacementRect, PublicDomain,
};
