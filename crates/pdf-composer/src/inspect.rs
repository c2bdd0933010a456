//! Read-only inspection of where images end up on a page.
//!
//! Walks a page's content streams, tracking the graphics state's
//! transformation matrix through `q`/`Q`/`cm` and into Form XObjects, and
//! reports the user-space bounding box of every image painted with `Do`.

use crate::page::{self, resolve};
use crate::ComposerError;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object};

const MAX_FORM_DEPTH: usize = 16;

/// `[a b c d e f]`, as in the `cm` operator.
type Matrix = [f32; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// An image painted on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    /// Bounding box in page user space, `[llx, lly, urx, ury]`.
    pub rect: [f32; 4],
    pub width_px: u32,
    pub height_px: u32,
}

/// Lists every image drawn on `page` (1-based), including images nested in
/// Form XObjects.
pub fn placed_images(doc: &[u8], page: u32) -> Result<Vec<PlacedImage>, ComposerError> {
    let doc = page::load(doc)?;
    let page_id = page::page_id(&doc, page)?;
    let resources = page::effective_resources(&doc, page_id)?;
    let content = page::decoded_content(&doc, page_id)?;

    let mut found = Vec::new();
    walk(&doc, &content, &resources, IDENTITY, 0, &mut found)?;
    Ok(found)
}

fn walk(
    doc: &Document,
    content: &[u8],
    resources: &Dictionary,
    base: Matrix,
    depth: usize,
    found: &mut Vec<PlacedImage>,
) -> Result<(), ComposerError> {
    if depth > MAX_FORM_DEPTH {
        return Err(ComposerError::Other("Form XObjects nested too deeply".to_string()));
    }

    let mut ctm = base;
    let mut saved = Vec::new();
    for op in Content::decode(content)?.operations {
        match op.operator.as_str() {
            "q" => saved.push(ctm),
            "Q" => {
                if let Some(previous) = saved.pop() {
                    ctm = previous;
                }
            }
            "cm" => ctm = multiply(&matrix_from(doc, &op.operands)?, &ctm),
            "Do" => {
                let Some(Object::Name(name)) = op.operands.first() else {
                    continue;
                };
                let Some(stream_obj) = lookup_xobject(doc, resources, name)? else {
                    log::warn!("Content draws unknown XObject /{}", String::from_utf8_lossy(name));
                    continue;
                };
                let stream = stream_obj.as_stream()?;
                match stream.dict.get(b"Subtype").and_then(Object::as_name) {
                    Ok(b"Image") => found.push(PlacedImage {
                        rect: unit_square_bounds(&ctm),
                        width_px: dimension(doc, &stream.dict, b"Width")?,
                        height_px: dimension(doc, &stream.dict, b"Height")?,
                    }),
                    Ok(b"Form") => {
                        let form_matrix = match stream.dict.get(b"Matrix") {
                            Ok(m) => matrix_from(doc, resolve(doc, m)?.as_array()?)?,
                            Err(_) => IDENTITY,
                        };
                        let form_resources = match stream.dict.get(b"Resources") {
                            Ok(r) => resolve(doc, r)?.as_dict()?.clone(),
                            Err(_) => resources.clone(),
                        };
                        let form_content = stream
                            .decompressed_content()
                            .unwrap_or_else(|_| stream.content.clone());
                        walk(
                            doc,
                            &form_content,
                            &form_resources,
                            multiply(&form_matrix, &ctm),
                            depth + 1,
                            found,
                        )?;
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn lookup_xobject<'a>(
    doc: &'a Document,
    resources: &'a Dictionary,
    name: &[u8],
) -> Result<Option<&'a Object>, ComposerError> {
    let Ok(xobjects) = resources.get(b"XObject") else {
        return Ok(None);
    };
    let xobjects = resolve(doc, xobjects)?.as_dict()?;
    match xobjects.get(name) {
        Ok(obj) => Ok(Some(resolve(doc, obj)?)),
        Err(_) => Ok(None),
    }
}

fn dimension(doc: &Document, dict: &Dictionary, key: &[u8]) -> Result<u32, ComposerError> {
    let value = resolve(doc, dict.get(key)?)?.as_i64()?;
    Ok(value.max(0) as u32)
}

fn matrix_from(doc: &Document, operands: &[Object]) -> Result<Matrix, ComposerError> {
    if operands.len() < 6 {
        return Err(ComposerError::Other(format!(
            "matrix needs 6 numbers, found {}",
            operands.len()
        )));
    }
    let mut m = [0.0f32; 6];
    for (slot, operand) in m.iter_mut().zip(operands) {
        *slot = resolve(doc, operand)?.as_float()?;
    }
    Ok(m)
}

/// `m` applied first, then `n`.
fn multiply(m: &Matrix, n: &Matrix) -> Matrix {
    [
        m[0] * n[0] + m[1] * n[2],
        m[0] * n[1] + m[1] * n[3],
        m[2] * n[0] + m[3] * n[2],
        m[2] * n[1] + m[3] * n[3],
        m[4] * n[0] + m[5] * n[2] + n[4],
        m[4] * n[1] + m[5] * n[3] + n[5],
    ]
}

fn unit_square_bounds(m: &Matrix) -> [f32; 4] {
    let corners = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)].map(|(x, y)| {
        (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
    });
    let mut rect = [f32::MAX, f32::MAX, f32::MIN, f32::MIN];
    for (x, y) in corners {
        rect[0] = rect[0].min(x);
        rect[1] = rect[1].min(y);
        rect[2] = rect[2].max(x);
        rect[3] = rect[3].max(y);
    }
    rect
}
