//! Module-level comparison helpers.
//!
//! This is not a QR decoder. It only answers "does this PNG show the symbol
//! the encoder produces for that payload?", which is enough to check that an
//! invitation carries the right URL.

use crate::CodeError;
use qrcode::{Color, EcLevel, QrCode};

/// The module matrix (row-major, `true` = dark) the encoder produces for `payload`.
pub fn expected_modules(payload: &str) -> Result<(usize, Vec<bool>), CodeError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| CodeError::Encoding(e.to_string()))?;
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();
    Ok((code.width(), modules))
}

/// Samples the centre of every module of a borderless `width` x `width` code image.
///
/// A module counts as dark when it is opaque and darker than mid-grey, so both
/// the transparent-background PNGs this crate writes and flattened
/// black-on-white renderings read back the same.
pub fn read_modules(png: &[u8], width: usize) -> Result<Vec<bool>, CodeError> {
    if width == 0 {
        return Err(CodeError::Image("module count must be positive".to_string()));
    }
    let image = image::load_from_memory(png)
        .map_err(|e| CodeError::Image(e.to_string()))?
        .to_rgba8();
    let module_w = image.width() as f32 / width as f32;
    let module_h = image.height() as f32 / width as f32;

    let mut modules = Vec::with_capacity(width * width);
    for row in 0..width {
        for col in 0..width {
            let x = ((col as f32 + 0.5) * module_w) as u32;
            let y = ((row as f32 + 0.5) * module_h) as u32;
            let [r, g, b, a] = image.get_pixel(x, y).0;
            let luma = (u32::from(r) + u32::from(g) + u32::from(b)) / 3;
            modules.push(a > 127 && luma < 128);
        }
    }
    Ok(modules)
}
