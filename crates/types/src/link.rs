use serde::Serialize;

/// Where a link annotation sends the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LinkTarget {
    /// An external URI action (`/S /URI`).
    Uri(String),
    /// An in-document jump: a `GoTo` action or a bare `/Dest`.
    GoTo,
    /// Any other action subtype, e.g. `Launch` or `JavaScript`.
    Other(String),
}

impl LinkTarget {
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            LinkTarget::Uri(uri) => Some(uri),
            _ => None,
        }
    }
}

/// A clickable region on a page together with its destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAnnotation {
    /// 1-based page number.
    pub page: u32,
    /// `[llx, lly, urx, ury]` in the page's user space.
    pub rect: [f32; 4],
    pub target: LinkTarget,
}

impl LinkAnnotation {
    pub fn is_uri(&self) -> bool {
        matches!(self.target, LinkTarget::Uri(_))
    }
}
