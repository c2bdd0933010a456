//! Cross-document object copying.
//!
//! Object ids are only meaningful inside the document that assigned them, so
//! moving anything from the overlay into the base document means renumbering
//! every reference it contains and copying whatever those references point at.

use lopdf::{Document, Object, ObjectId};
use std::collections::HashMap;

/// Copies objects out of one document into another, renumbering references.
///
/// Each source object is copied at most once; later references to it resolve
/// to the same target id. Reuse one copier for everything taken from the same
/// source so shared objects (an image and its soft mask, a font used twice)
/// stay shared in the target.
///
/// Copying follows every reference, including `/Parent`. Copy a page's
/// resources or content rather than the page dictionary itself, or the whole
/// source page tree comes along.
pub(crate) struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    /// Source id to target id, filled in before the object's children are
    /// visited.
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    pub(crate) fn new(source_doc: &'a Document, target_doc: &'a mut Document) -> Self {
        Self {
            source_doc,
            target_doc,
            id_map: HashMap::new(),
        }
    }

    /// Deep copies an indirect object and everything it references, returning
    /// the object's id in the target document.
    ///
    /// Stream data is copied as is, filters included.
    pub(crate) fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the target id before recursing so reference cycles terminate.
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source_doc.get_object(source_id)?.clone();
        let new_obj = self.copy_value(obj)?;

        match self.target_doc.objects.get_mut(&new_id) {
            Some(target_obj) => *target_obj = new_obj,
            None => return Err(lopdf::Error::ObjectNotFound(new_id)),
        }

        Ok(new_id)
    }

    /// Rewrites every reference inside a direct object, copying the referenced
    /// objects into the target document.
    ///
    /// This is the entry point for values that are not indirect objects in the
    /// source, like a page's inline `/Resources` dictionary.
    pub(crate) fn copy_value(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(arr) => {
                let new_arr = arr
                    .into_iter()
                    .map(|o| self.copy_value(o))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Object::Array(new_arr))
            }
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.copy_value(std::mem::replace(value, Object::Null))?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.copy_value(std::mem::replace(value, Object::Null))?;
                }
                Ok(Object::Stream(stream))
            }
            _ => Ok(obj),
        }
    }
}
