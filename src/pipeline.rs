//! The per-guest personalization pipeline.

use crate::config::PressConfig;
use crate::error::PipelineError;
use rsvpress_links::rewrite_links;
use rsvpress_pdf_composer::{make_overlay_on, merge_overlay, page_box, page_count};
use rsvpress_qrcode::generate_code_with;
use rsvpress_resource::FilesystemResourceProvider;
use rsvpress_traits::{ResourceProvider, RosterStore};
use rsvpress_types::{GuestId, PageBox, PageSize, PersonalizationUrl, PublicDomain};
use std::sync::Arc;

/// A personalised invitation, ready to hand to the guest.
#[derive(Debug, Clone)]
pub struct PreparedInvitation {
    /// The RSVP link encoded in the code and, if enabled, behind every URI link.
    pub url: PersonalizationUrl,
    /// Download name, `<event_title>.pdf`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Stamps a per-guest RSVP code onto a shared base invitation.
///
/// All state is immutable after construction, so one pipeline can serve
/// concurrent requests from many threads. Each request builds its code image,
/// overlay and output in memory and returns either a complete document or an
/// error, never a partial one.
#[derive(Debug, Clone)]
pub struct InvitationPipeline {
    config: PressConfig,
    domain: PublicDomain,
    base_document: Arc<[u8]>,
    target_box: PageBox,
}

impl InvitationPipeline {
    /// Builds a pipeline around an already loaded base document.
    ///
    /// Everything that does not depend on the guest is checked here: the
    /// document must parse, the target page must exist, and the placement
    /// rectangle must fit on it.
    pub fn new(config: PressConfig, base_document: impl Into<Arc<[u8]>>) -> Result<Self, PipelineError> {
        config.validate()?;
        let domain = config.domain()?;
        let base_document: Arc<[u8]> = base_document.into();

        let pages = page_count(&base_document)?;
        let target_box = page_box(&base_document, config.target_page)?;
        if !config.placement.fits_within(target_box) {
            return Err(PipelineError::Config(format!(
                "placement {:?} does not fit on page {} (MediaBox {:?})",
                config.placement.to_pdf_rect(),
                config.target_page,
                target_box.to_pdf_rect()
            )));
        }

        log::info!(
            "Loaded '{}' ({} pages); codes go on page {} at {:?}",
            config.document_name(),
            pages,
            config.target_page,
            config.placement.to_pdf_rect()
        );
        Ok(Self {
            config,
            domain,
            base_document,
            target_box,
        })
    }

    /// Loads `<event_title>.pdf` from `config.static_dir`.
    pub fn from_config(config: PressConfig) -> Result<Self, PipelineError> {
        let provider = FilesystemResourceProvider::new(&config.static_dir);
        Self::from_provider(config, &provider)
    }

    /// Loads `<event_title>.pdf` through `provider`.
    pub fn from_provider(config: PressConfig, provider: &dyn ResourceProvider) -> Result<Self, PipelineError> {
        let name = config.document_name();
        log::debug!("Loading base document '{}' from {} provider", name, provider.name());
        let data = provider.load(&name)?;
        Self::new(config, data)
    }

    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    /// Size of the page that receives the code.
    pub fn target_size(&self) -> PageSize {
        self.target_box.size()
    }

    /// MediaBox of the page that receives the code.
    pub fn target_box(&self) -> PageBox {
        self.target_box
    }

    pub fn base_document(&self) -> &[u8] {
        &self.base_document
    }

    /// Produces the invitation for `guest_id`.
    ///
    /// The same guest always gets the same link; the call has no side effects.
    pub fn prepare_document(&self, guest_id: &str) -> Result<PreparedInvitation, PipelineError> {
        let guest = GuestId::new(guest_id)?;
        self.prepare(&guest)
    }

    /// Like [`prepare_document`](Self::prepare_document), but only for guests
    /// on `roster`.
    pub fn prepare_for_guest(
        &self,
        roster: &dyn RosterStore,
        guest_id: &str,
    ) -> Result<PreparedInvitation, PipelineError> {
        let guest = GuestId::new(guest_id)?;
        let Some(record) = roster.lookup(&guest)? else {
            return Err(PipelineError::UnknownGuest(guest_id.to_string()));
        };
        log::debug!("Guest '{}' is {}", guest, record.display_name);
        self.prepare(&guest)
    }

    fn prepare(&self, guest: &GuestId) -> Result<PreparedInvitation, PipelineError> {
        let url = PersonalizationUrl::for_guest(&self.domain, guest);
        log::debug!("Personalizing invitation with {}", url);

        let code = generate_code_with(url.as_str(), &self.config.code_style())?;
        log::debug!("Rendered code image ({} bytes)", code.len());

        let overlay = make_overlay_on(&code, self.config.placement, self.target_box)?;
        let mut bytes = merge_overlay(&self.base_document, &overlay, self.config.target_page)?;
        log::debug!("Merged overlay onto page {}", self.config.target_page);

        if self.config.rewrite_links {
            bytes = rewrite_links(&bytes, url.as_str())?;
            log::debug!("Retargeted links to {}", url);
        }

        log::info!("Prepared invitation for '{}' ({} bytes)", guest, bytes.len());
        Ok(PreparedInvitation {
            url,
            file_name: self.config.document_name(),
            bytes,
        })
    }
}
