use crate::annots;
use crate::LinkError;
use lopdf::{Dictionary, Document, Object};
use rsvpress_types::{LinkAnnotation, LinkTarget};

/// Lists every link annotation in `doc`, in page order and, within a page,
/// in `/Annots` order.
///
/// Links without a readable `/Rect` are skipped with a warning.
pub fn extract_links(doc: &[u8]) -> Result<Vec<LinkAnnotation>, LinkError> {
    let doc = Document::load_mem(doc)?;
    let mut links = Vec::new();

    for (page_no, page_id) in doc.get_pages() {
        let Some(entries) = annots::page_annotations(&doc, page_id)? else {
            continue;
        };
        for entry in &entries {
            let Some(dict) = annots::annotation_dict(&doc, entry) else {
                continue;
            };
            if !annots::is_link(dict) {
                continue;
            }
            let Some(rect) = annots::rect(&doc, dict) else {
                log::warn!("Link annotation on page {} has no usable /Rect", page_no);
                continue;
            };
            links.push(LinkAnnotation {
                page: page_no,
                rect,
                target: target_of(&doc, dict),
            });
        }
    }

    Ok(links)
}

fn target_of(doc: &Document, dict: &Dictionary) -> LinkTarget {
    let Some(action) = annots::action(doc, dict) else {
        return if dict.has(b"Dest") {
            LinkTarget::GoTo
        } else {
            LinkTarget::Other("None".to_string())
        };
    };
    match annots::action_kind(action) {
        Some(b"URI") => {
            let uri = action.get(b"URI").ok().and_then(|u| annots::resolve(doc, u).ok());
            match uri {
                Some(Object::String(bytes, _)) => LinkTarget::Uri(String::from_utf8_lossy(bytes).into_owned()),
                _ => LinkTarget::Uri(String::new()),
            }
        }
        Some(b"GoTo") => LinkTarget::GoTo,
        Some(other) => LinkTarget::Other(String::from_utf8_lossy(other).into_owned()),
        None => LinkTarget::Other("None".to_string()),
    }
}
