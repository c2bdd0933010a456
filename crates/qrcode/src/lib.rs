//! QR code rendering for personalization URLs.
//!
//! Codes are rendered at error-correction level H so a printed invitation
//! still scans with a fold, a smudge or a logo sticker over part of it. The
//! symbol version is picked by the encoder to fit the payload, there is no
//! quiet zone (the invitation artwork provides one), and light modules are
//! transparent so the code sits on whatever background the design has.

mod error;
pub mod verify;

pub use error::CodeError;

use image::{ImageFormat, Rgba};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Rendering knobs for the generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeStyle {
    /// Edge length of one module in pixels.
    pub module_px: u32,
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self { module_px: 10 }
    }
}

/// Renders `url` as a PNG QR code using the default [`CodeStyle`].
pub fn generate_code(url: &str) -> Result<Vec<u8>, CodeError> {
    generate_code_with(url, &CodeStyle::default())
}

/// Renders `url` as a PNG QR code.
///
/// # Errors
///
/// - [`CodeError::EmptyInput`] for an empty string
/// - [`CodeError::Encoding`] if the payload exceeds the capacity of a version 40 symbol at level H
/// - [`CodeError::Image`] if PNG encoding fails
pub fn generate_code_with(url: &str, style: &CodeStyle) -> Result<Vec<u8>, CodeError> {
    if url.is_empty() {
        return Err(CodeError::EmptyInput);
    }
    let module_px = style.module_px.max(1);

    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::H)
        .map_err(|e| CodeError::Encoding(e.to_string()))?;

    let image = code
        .render::<Rgba<u8>>()
        .quiet_zone(false)
        .module_dimensions(module_px, module_px)
        .dark_color(DARK)
        .light_color(LIGHT)
        .build();

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| CodeError::Image(e.to_string()))?;

    log::debug!(
        "Rendered {}x{} module code ({}x{} px) for {} byte payload",
        code.width(),
        code.width(),
        image.width(),
        image.height(),
        url.len()
    );
    Ok(png.into_inner())
}
