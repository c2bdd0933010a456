//! Builds the single-page overlay document that carries the code image.

use crate::page;
use crate::ComposerError;
use lopdf::Object;
use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};
use rsvpress_types::{PageBox, PageSize, PlacementRect};

/// Creates an A4 one-page PDF whose only content is `image` drawn at `rect`.
///
/// See [`make_overlay_on`] for details.
pub fn make_overlay(image: &[u8], rect: PlacementRect) -> Result<Vec<u8>, ComposerError> {
    make_overlay_on(image, rect, PageSize::A4)
}

/// Page boxes the overlay page may carry; all are set to the requested box.
const PAGE_BOXES: [&[u8]; 5] = [b"MediaBox", b"CropBox", b"TrimBox", b"BleedBox", b"ArtBox"];

/// Creates a one-page PDF covering `page` whose only content is `image`
/// stretched over `rect`.
///
/// `rect` is in default user space, the same space as `page`. Pass the target
/// page's MediaBox (or just its [`PageSize`] when the origin is `(0, 0)`) so
/// the overlay lines up with it exactly. Square rectangles are expected for
/// codes but not required.
///
/// # Errors
///
/// - [`ComposerError::Placement`] if any component of `rect` is negative or not finite
/// - [`ComposerError::Decode`] if `image` is not a decodable raster image
pub fn make_overlay_on(
    image: &[u8],
    rect: PlacementRect,
    page: impl Into<PageBox>,
) -> Result<Vec<u8>, ComposerError> {
    let page = page.into();
    rect.validate()
        .map_err(|e| ComposerError::Placement(e.to_string()))?;

    let mut warnings = Vec::new();
    let raw_image = RawImage::decode_from_bytes(image, &mut warnings)
        .map_err(|e| ComposerError::Decode(e.to_string()))?;
    let (img_w, img_h) = (raw_image.width as f32, raw_image.height as f32);
    if img_w == 0.0 || img_h == 0.0 {
        return Err(ComposerError::Decode("image has no pixels".to_string()));
    }

    let mut doc = PdfDocument::new("Invitation code overlay");
    let xobj_id = XObjectId::new();
    doc.resources
        .xobjects
        .map
        .insert(xobj_id.clone(), XObject::Image(raw_image));

    // At 72 dpi one pixel is one point, so the scale factors map pixels onto the rectangle.
    let transform = XObjectTransform {
        translate_x: Some(Pt(rect.x)),
        translate_y: Some(Pt(rect.y)),
        scale_x: Some(rect.width / img_w),
        scale_y: Some(rect.height / img_h),
        rotate: None,
        dpi: Some(72.0),
    };
    let ops = vec![Op::UseXobject { id: xobj_id, transform }];
    doc.pages
        .push(PdfPage::new(Pt(page.width()).into(), Pt(page.height()).into(), ops));

    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::debug!("Overlay generation produced {} warnings", warnings.len());
    }
    set_page_box(&bytes, page)
}

/// printpdf always puts the origin at `(0, 0)` and rounds the page to whole
/// points, so the boxes are rewritten to the exact requested region.
fn set_page_box(bytes: &[u8], page_box: PageBox) -> Result<Vec<u8>, ComposerError> {
    let mut doc = page::load(bytes)?;
    let page_id = page::page_id(&doc, 1)?;
    let rect: Vec<Object> = page_box.to_pdf_rect().iter().map(|v| Object::Real(*v)).collect();

    let dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    for key in PAGE_BOXES {
        if key == b"MediaBox" || dict.has(key) {
            dict.set(key.to_vec(), rect.clone());
        }
    }
    page::save(doc)
}
