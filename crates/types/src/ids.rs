//! Newtype wrappers for guest identifiers and the URLs built from them.
//!
//! These keep a raw roster key, a host name and a finished URL from being
//! passed where one of the others is expected.

use crate::error::InvalidValue;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifies one guest (one invitation) in the roster.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuestId(Arc<str>);

impl GuestId {
    /// Creates a guest id, trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, InvalidValue> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidValue::EmptyGuestId);
        }
        Ok(Self(trimmed.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GuestId {
    type Error = InvalidValue;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for GuestId {
    type Error = InvalidValue;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<GuestId> for String {
    fn from(id: GuestId) -> Self {
        id.0.to_string()
    }
}

impl AsRef<str> for GuestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The public host the guest-facing app is served from, e.g. `rsvp.example.com`.
///
/// Any `http://` or `https://` prefix and trailing slashes are dropped so the
/// value can be pasted straight from a deployment dashboard.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicDomain(Arc<str>);

impl PublicDomain {
    pub fn new(domain: impl AsRef<str>) -> Result<Self, InvalidValue> {
        let raw = domain.as_ref().trim();
        let host = raw
            .strip_prefix("https://")
            .or_else(|| raw.strip_prefix("http://"))
            .unwrap_or(raw)
            .trim_end_matches('/');
        if host.is_empty() {
            return Err(InvalidValue::EmptyDomain);
        }
        Ok(Self(host.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PublicDomain {
    type Error = InvalidValue;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PublicDomain> for String {
    fn from(domain: PublicDomain) -> Self {
        domain.0.to_string()
    }
}

impl fmt::Display for PublicDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Query value encoding: everything but RFC 3986 unreserved characters.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The guest-specific URL that ends up in the QR code and in the document's links.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PersonalizationUrl(Arc<str>);

impl PersonalizationUrl {
    /// Builds `https://<domain>/app/?user=<guest>`.
    ///
    /// The guest id is percent-encoded as a query value, so the same guest
    /// always maps to the same URL.
    pub fn for_guest(domain: &PublicDomain, guest: &GuestId) -> Self {
        let url = format!(
            "https://{}/app/?user={}",
            domain.as_str(),
            utf8_percent_encode(guest.as_str(), QUERY_VALUE)
        );
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonalizationUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonalizationUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
