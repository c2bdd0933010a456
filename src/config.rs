//! Invitation settings: where the code goes, which page, and which host the
//! personal links point at.

use crate::error::PipelineError;
use rsvpress_qrcode::CodeStyle;
use rsvpress_types::{PlacementRect, PublicDomain};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_MODULE_PX: u32 = 10;

/// Immutable configuration for an [`InvitationPipeline`](crate::InvitationPipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressConfig {
    /// Names both the base document (`<event_title>.pdf`) and the output file.
    pub event_title: String,
    /// Host that personal RSVP links point at.
    pub public_domain: String,
    /// Where the code is drawn on the target page, in points.
    pub placement: PlacementRect,
    /// 1-based page that receives the code.
    pub target_page: u32,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_rewrite_links")]
    pub rewrite_links: bool,
    /// Pixels per QR module in the rendered code image.
    #[serde(default = "default_module_px")]
    pub code_module_px: u32,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATIC_DIR)
}

fn default_rewrite_links() -> bool {
    true
}

fn default_module_px() -> u32 {
    DEFAULT_MODULE_PX
}

impl PressConfig {
    pub fn builder() -> PressConfigBuilder {
        PressConfigBuilder::default()
    }

    /// Reads the configuration from process environment variables.
    ///
    /// | variable | meaning |
    /// |---|---|
    /// | `EVENT_TITLE` | event title, required |
    /// | `PUBLIC_DOMAIN` (or `RAILWAY_PUBLIC_DOMAIN`) | link host, required |
    /// | `INVITE_FILE_QR_X`, `INVITE_FILE_QR_Y` | code position in points, required |
    /// | `INVITE_FILE_QR_SIZE` | code width and height in points, required |
    /// | `INVITE_FILE_QR_PAGE` | 1-based target page, required |
    /// | `INVITE_STATIC_DIR` | directory holding the base document, default `static` |
    /// | `INVITE_REWRITE_LINKS` | retarget URI links, default `true` |
    /// | `INVITE_QR_MODULE_PX` | pixels per code module, default `10` |
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PipelineError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let event_title = var("EVENT_TITLE").ok_or_else(|| missing("EVENT_TITLE"))?;
        let public_domain = var("PUBLIC_DOMAIN")
            .or_else(|| var("RAILWAY_PUBLIC_DOMAIN"))
            .ok_or_else(|| missing("PUBLIC_DOMAIN"))?;
        let x: f32 = parse_required(&var, "INVITE_FILE_QR_X")?;
        let y: f32 = parse_required(&var, "INVITE_FILE_QR_Y")?;
        let size: f32 = parse_required(&var, "INVITE_FILE_QR_SIZE")?;
        let target_page: u32 = parse_required(&var, "INVITE_FILE_QR_PAGE")?;

        let static_dir = var("INVITE_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_static_dir);
        let rewrite_links = match var("INVITE_REWRITE_LINKS") {
            Some(raw) => parse_bool("INVITE_REWRITE_LINKS", &raw)?,
            None => default_rewrite_links(),
        };
        let code_module_px = match var("INVITE_QR_MODULE_PX") {
            Some(raw) => parse_value("INVITE_QR_MODULE_PX", &raw)?,
            None => default_module_px(),
        };

        let config = Self {
            event_title,
            public_domain,
            placement: PlacementRect::square(x, y, size),
            target_page,
            static_dir,
            rewrite_links,
            code_module_px,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path_ref.display(), e),
            ))
        })?;
        let config: Self = serde_json::from_str(&source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks everything that can be checked without the base document.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.event_title.trim().is_empty() {
            return Err(PipelineError::Config("event title must not be empty".to_string()));
        }
        self.domain()?;
        if self.target_page == 0 {
            return Err(PipelineError::Config(
                "target page is 1-based and must be at least 1".to_string(),
            ));
        }
        self.placement
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        if self.code_module_px == 0 {
            return Err(PipelineError::Config(
                "code module size must be at least one pixel".to_string(),
            ));
        }
        Ok(())
    }

    pub fn domain(&self) -> Result<PublicDomain, PipelineError> {
        PublicDomain::new(&self.public_domain).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// File name of both the base document and every prepared invitation.
    pub fn document_name(&self) -> String {
        format!("{}.pdf", self.event_title)
    }

    pub fn code_style(&self) -> CodeStyle {
        CodeStyle {
            module_px: self.code_module_px,
        }
    }
}

fn missing(key: &str) -> PipelineError {
    PipelineError::Config(format!("{} is not set", key))
}

fn parse_required<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<T, PipelineError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = var(key).ok_or_else(|| missing(key))?;
    parse_value(key, &raw)
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, PipelineError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>()
        .map_err(|e| PipelineError::Config(format!("{} has invalid value '{}': {}", key, raw, e)))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, PipelineError> {
    match raw {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        _ => Err(PipelineError::Config(format!(
            "{} must be a boolean, got '{}'",
            key, raw
        ))),
    }
}

/// A builder for [`PressConfig`].
///
/// Title, domain, placement and target page are required; the rest default
/// the same way the environment loader does.
#[derive(Debug, Default)]
pub struct PressConfigBuilder {
    event_title: Option<String>,
    public_domain: Option<String>,
    placement: Option<PlacementRect>,
    target_page: Option<u32>,
    static_dir: Option<PathBuf>,
    rewrite_links: Option<bool>,
    code_module_px: Option<u32>,
}

impl PressConfigBuilder {
    pub fn with_event_title(mut self, title: impl Into<String>) -> Self {
        self.event_title = Some(title.into());
        self
    }

    pub fn with_public_domain(mut self, domain: impl Into<String>) -> Self {
        self.public_domain = Some(domain.into());
        self
    }

    pub fn with_placement(mut self, placement: PlacementRect) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_target_page(mut self, page: u32) -> Self {
        self.target_page = Some(page);
        self
    }

    pub fn with_static_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn with_rewrite_links(mut self, rewrite: bool) -> Self {
        self.rewrite_links = Some(rewrite);
        self
    }

    pub fn with_code_module_px(mut self, px: u32) -> Self {
        self.code_module_px = Some(px);
        self
    }

    /// Consumes the builder and validates the result.
    pub fn build(self) -> Result<PressConfig, PipelineError> {
        let required = |name: &str| PipelineError::Config(format!("No {} has been configured.", name));
        let config = PressConfig {
            event_title: self.event_title.ok_or_else(|| required("event title"))?,
            public_domain: self.public_domain.ok_or_else(|| required("public domain"))?,
            placement: self.placement.ok_or_else(|| required("placement"))?,
            target_page: self.target_page.ok_or_else(|| required("target page"))?,
            static_dir: self.static_dir.unwrap_or_else(default_static_dir),
            rewrite_links: self.rewrite_links.unwrap_or_else(default_rewrite_links),
            code_module_px: self.code_module_px.unwrap_or_else(default_module_px),
        };
        config.validate()?;
        Ok(config)
    }
}
