//! Stamps an overlay page onto one page of a base document.

use crate::copier::ObjectCopier;
use crate::page;
use crate::ComposerError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Resource name prefix for the stamped overlay.
const OVERLAY_NAME: &str = "RsvpQr";

/// Composites the first page of `overlay` on top of page `target_page`
/// (1-based) of `base` and returns the resulting document.
///
/// The overlay page becomes a Form XObject that is drawn after the target
/// page's existing content. Every other page, every page's size and every
/// annotation are left as they were, and the page count does not change.
///
/// # Errors
///
/// - [`ComposerError::Format`] if either input cannot be parsed as a PDF
/// - [`ComposerError::PageIndex`] if `target_page` is not in `1..=page_count`
pub fn merge_overlay(base: &[u8], overlay: &[u8], target_page: u32) -> Result<Vec<u8>, ComposerError> {
    let mut base_doc = page::load(base)?;
    let overlay_doc = page::load(overlay)?;

    let page_id = page::page_id(&base_doc, target_page)?;
    let overlay_page = overlay_doc
        .get_pages()
        .get(&1)
        .copied()
        .ok_or_else(|| ComposerError::Other("overlay document has no pages".to_string()))?;

    let form_id = import_page_as_form(&overlay_doc, overlay_page, &mut base_doc)?;
    let name = stamp_form(&mut base_doc, page_id, form_id)?;
    log::debug!(
        "Stamped overlay as /{} on page {} of {}",
        name,
        target_page,
        base_doc.get_pages().len()
    );

    page::save(base_doc)
}

/// Copies a page of `source` into `target` as a self-contained Form XObject.
fn import_page_as_form(
    source: &Document,
    page_id: ObjectId,
    target: &mut Document,
) -> Result<ObjectId, ComposerError> {
    let bbox = page::media_box(source, page_id)?;
    let resources = page::effective_resources(source, page_id)?;
    let content = page::decoded_content(source, page_id)?;

    let mut copier = ObjectCopier::new(source, target);
    let resources = copier.copy_value(Object::Dictionary(resources))?;

    let form = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "FormType" => 1,
            "BBox" => bbox.iter().map(|v| Object::Real(*v)).collect::<Vec<_>>(),
            "Resources" => resources,
        },
        content,
    );
    Ok(target.add_object(form))
}

/// Registers `form_id` in the page's resources and draws it on top of the
/// existing content. Returns the resource name used.
///
/// The page's effective resources are cloned onto the page itself, so a
/// resources dictionary shared with other pages (or inherited from the page
/// tree) is never modified.
fn stamp_form(doc: &mut Document, page_id: ObjectId, form_id: ObjectId) -> Result<String, ComposerError> {
    let mut resources = page::effective_resources(doc, page_id)?;
    let mut xobjects = match resources.get(b"XObject") {
        Ok(obj) => page::resolve(doc, obj)?.as_dict()?.clone(),
        Err(_) => Dictionary::new(),
    };
    let name = unused_name(&xobjects, OVERLAY_NAME);
    xobjects.set(name.as_bytes().to_vec(), Object::Reference(form_id));
    resources.set("XObject", Object::Dictionary(xobjects));

    // Wrap the original content in q/Q so whatever graphics state it leaves
    // behind cannot move or clip the overlay.
    let mut contents = page::content_refs(doc, page_id)?;
    let open_id = doc.add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
    let draw = Content {
        operations: vec![
            Operation::new("Q", vec![]),
            Operation::new("q", vec![]),
            Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let draw_id = doc.add_object(Stream::new(dictionary! {}, draw.encode()?));
    contents.insert(0, Object::Reference(open_id));
    contents.push(Object::Reference(draw_id));

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page_dict.set("Contents", Object::Array(contents));
    page_dict.set("Resources", Object::Dictionary(resources));
    Ok(name)
}

fn unused_name(xobjects: &Dictionary, prefix: &str) -> String {
    let mut name = prefix.to_string();
    let mut n = 1;
    while xobjects.has(name.as_bytes()) {
        name = format!("{}{}", prefix, n);
        n += 1;
    }
    name
}
