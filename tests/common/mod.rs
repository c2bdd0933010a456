pub mod code_image;
pub mod fixtures;

use lopdf::Document as LopdfDocument;
use rsvpress::PreparedInvitation;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a produced PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn from_invitation(invite: &PreparedInvitation) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(invite.bytes.clone())
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
