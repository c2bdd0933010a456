use crate::annots::{self, resolve};
use crate::LinkError;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

/// Keys carried over from the replaced annotation, besides `/Rect`.
const KEPT_KEYS: [&[u8]; 2] = [b"QuadPoints", b"Border"];

/// Points every URI link annotation in `doc` at `new_url`.
///
/// Each matching annotation is replaced, at the same position in its page's
/// `/Annots`, by a fresh link annotation with the same clickable area and a
/// `/URI` action targeting `new_url`. Internal jumps, named destinations and
/// non-link annotations are left untouched. Objects that only the replaced
/// annotations used are dropped from the output.
///
/// Every URI link in the document ends up with the same target.
pub fn rewrite_links(doc: &[u8], new_url: &str) -> Result<Vec<u8>, LinkError> {
    let mut doc = Document::load_mem(doc)?;
    let mut rewritten = 0usize;

    for (page_no, page_id) in doc.get_pages() {
        let Some(mut entries) = annots::page_annotations(&doc, page_id)? else {
            continue;
        };

        let mut changed = false;
        for entry in entries.iter_mut() {
            let replacement = {
                let Some(dict) = annots::annotation_dict(&doc, entry) else {
                    log::warn!("Skipping unreadable annotation on page {}", page_no);
                    continue;
                };
                if !annots::is_uri_link(&doc, dict) {
                    continue;
                }
                match replacement_link(&doc, dict, page_id, new_url)? {
                    Some(replacement) => replacement,
                    None => {
                        log::warn!("Skipping URI link without a /Rect on page {}", page_no);
                        continue;
                    }
                }
            };
            *entry = Object::Reference(doc.add_object(replacement));
            changed = true;
            rewritten += 1;
        }

        if changed {
            doc.get_object_mut(page_id)?
                .as_dict_mut()?
                .set("Annots", Object::Array(entries));
        }
    }

    if rewritten > 0 {
        let pruned = doc.prune_objects();
        log::debug!("Rewrote {} links, pruned {} objects", rewritten, pruned.len());
    }

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

/// Builds the annotation that replaces `original`, or `None` if it has no
/// usable `/Rect`.
fn replacement_link(
    doc: &Document,
    original: &Dictionary,
    page_id: ObjectId,
    new_url: &str,
) -> Result<Option<Dictionary>, LinkError> {
    let Ok(rect) = original.get(b"Rect") else {
        return Ok(None);
    };

    let mut link = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => resolve(doc, rect)?.clone(),
        "P" => page_id,
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(new_url),
        },
    };
    for key in KEPT_KEYS {
        if let Ok(value) = original.get(key) {
            link.set(key.to_vec(), resolve(doc, value)?.clone());
        }
    }
    Ok(Some(link))
}
