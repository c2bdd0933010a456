use crate::LinkError;
use lopdf::{Dictionary, Document, Object, ObjectId};

pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object, LinkError> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// The entries of a page's `/Annots` array, or `None` if the page has none.
pub(crate) fn page_annotations(doc: &Document, page_id: ObjectId) -> Result<Option<Vec<Object>>, LinkError> {
    let page = doc.get_dictionary(page_id)?;
    let Ok(annots) = page.get(b"Annots") else {
        return Ok(None);
    };
    match resolve(doc, annots)? {
        Object::Array(entries) => Ok(Some(entries.clone())),
        Object::Null => Ok(None),
        _ => Err(LinkError::Other(format!("page {:?} has a non-array /Annots entry", page_id))),
    }
}

/// The annotation dictionary behind an `/Annots` entry.
///
/// Entries that are dangling references or not dictionaries yield `None`.
pub(crate) fn annotation_dict<'a>(doc: &'a Document, entry: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, entry).ok()?.as_dict().ok()
}

pub(crate) fn is_link(dict: &Dictionary) -> bool {
    matches!(dict.get(b"Subtype").and_then(Object::as_name), Ok(b"Link"))
}

/// The annotation's action dictionary (`/A`), direct or indirect.
pub(crate) fn action<'a>(doc: &'a Document, dict: &'a Dictionary) -> Option<&'a Dictionary> {
    let action = dict.get(b"A").ok()?;
    resolve(doc, action).ok()?.as_dict().ok()
}

pub(crate) fn action_kind(action: &Dictionary) -> Option<&[u8]> {
    action.get(b"S").and_then(Object::as_name).ok()
}

/// Whether an annotation is a link whose action opens a URI.
pub(crate) fn is_uri_link(doc: &Document, dict: &Dictionary) -> bool {
    is_link(dict) && action(doc, dict).and_then(action_kind) == Some(b"URI".as_slice())
}

/// Reads an annotation's `/Rect`, normalised so that `[0] <= [2]` and `[1] <= [3]`.
pub(crate) fn rect(doc: &Document, dict: &Dictionary) -> Option<[f32; 4]> {
    let arr = resolve(doc, dict.get(b"Rect").ok()?).ok()?.as_array().ok()?;
    if arr.len() < 4 {
        return None;
    }
    let mut v = [0.0f32; 4];
    for (slot, item) in v.iter_mut().zip(arr.iter()) {
        *slot = resolve(doc, item).ok()?.as_float().ok()?;
    }
    Some([v[0].min(v[2]), v[1].min(v[3]), v[0].max(v[2]), v[1].max(v[3])])
}
