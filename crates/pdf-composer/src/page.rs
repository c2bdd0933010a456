//! Page-level lookups shared by the merger and the inspector.

use crate::ComposerError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use rsvpress_types::{PageBox, PageSize};

/// Guards against malformed page trees whose `/Parent` chain loops.
const MAX_TREE_DEPTH: usize = 64;

pub(crate) fn load(bytes: &[u8]) -> Result<Document, ComposerError> {
    Ok(Document::load_mem(bytes)?)
}

pub(crate) fn save(mut doc: Document) -> Result<Vec<u8>, ComposerError> {
    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

/// Resolves a 1-based page number to its object id.
pub(crate) fn page_id(doc: &Document, page: u32) -> Result<ObjectId, ComposerError> {
    let pages = doc.get_pages();
    let page_count = pages.len() as u32;
    pages.get(&page).copied().ok_or(ComposerError::PageIndex {
        requested: page,
        page_count,
    })
}

/// Follows a reference, if `obj` is one.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object, ComposerError> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// Looks a key up on the page and, failing that, on its ancestors in the page
/// tree. `Resources`, `MediaBox`, `CropBox` and `Rotate` are inheritable.
pub(crate) fn inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, ComposerError> {
    let mut node = doc.get_dictionary(page_id)?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Ok(Some(resolve(doc, value)?));
        }
        match node.get(b"Parent") {
            Ok(Object::Reference(parent)) => node = doc.get_dictionary(*parent)?,
            _ => return Ok(None),
        }
    }
    Err(ComposerError::Other(format!(
        "page tree above {:?} is deeper than {} levels",
        page_id, MAX_TREE_DEPTH
    )))
}

/// A copy of the resources in effect for a page (own or inherited).
pub(crate) fn effective_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary, ComposerError> {
    match inherited(doc, page_id, b"Resources")? {
        Some(Object::Dictionary(dict)) => Ok(dict.clone()),
        Some(_) | None => Ok(Dictionary::new()),
    }
}

pub(crate) fn media_box(doc: &Document, page_id: ObjectId) -> Result<[f32; 4], ComposerError> {
    let media_box = inherited(doc, page_id, b"MediaBox")?
        .ok_or_else(|| ComposerError::Other(format!("page {:?} has no MediaBox", page_id)))?;
    rect_from_array(doc, media_box)
}

/// Reads a PDF rectangle, normalising it so that `[0] <= [2]` and `[1] <= [3]`.
pub(crate) fn rect_from_array(doc: &Document, obj: &Object) -> Result<[f32; 4], ComposerError> {
    let arr = resolve(doc, obj)?.as_array()?;
    if arr.len() < 4 {
        return Err(ComposerError::Other(format!(
            "expected a 4 element rectangle, found {} elements",
            arr.len()
        )));
    }
    let mut v = [0.0f32; 4];
    for (slot, item) in v.iter_mut().zip(arr.iter()) {
        *slot = resolve(doc, item)?.as_float()?;
    }
    Ok([v[0].min(v[2]), v[1].min(v[3]), v[0].max(v[2]), v[1].max(v[3])])
}

/// The page's content stream references, in drawing order.
pub(crate) fn content_refs(doc: &Document, page_id: ObjectId) -> Result<Vec<Object>, ComposerError> {
    let page = doc.get_dictionary(page_id)?;
    match page.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id)? {
            Object::Array(arr) => Ok(arr.clone()),
            _ => Ok(vec![Object::Reference(*id)]),
        },
        Ok(Object::Array(arr)) => Ok(arr.clone()),
        Ok(_) => Err(ComposerError::Other(format!(
            "page {:?} has an inline /Contents stream",
            page_id
        ))),
        Err(_) => Ok(Vec::new()),
    }
}

/// The decoded content of every stream on the page, joined with newlines so
/// operators at stream boundaries stay separated.
pub(crate) fn decoded_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>, ComposerError> {
    let mut content = Vec::new();
    for item in content_refs(doc, page_id)? {
        let stream = resolve(doc, &item)?.as_stream()?;
        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        content.extend_from_slice(&data);
        content.push(b'\n');
    }
    Ok(content)
}

/// Number of pages in a PDF.
pub fn page_count(doc: &[u8]) -> Result<u32, ComposerError> {
    Ok(load(doc)?.get_pages().len() as u32)
}

/// Size of a page (1-based) from its effective MediaBox.
pub fn page_size(doc: &[u8], page: u32) -> Result<PageSize, ComposerError> {
    Ok(page_box(doc, page)?.size())
}

/// The effective MediaBox of a page (1-based), origin included.
pub fn page_box(doc: &[u8], page: u32) -> Result<PageBox, ComposerError> {
    let doc = load(doc)?;
    let id = page_id(&doc, page)?;
    let [llx, lly, urx, ury] = media_box(&doc, id)?;
    Ok(PageBox::new(llx, lly, urx, ury))
}
