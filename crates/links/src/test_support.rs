use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

pub(crate) const ORIGINAL_URL: &str = "https://forms.example.org/rsvp";

/// A document with `num_pages` empty letter pages and no annotations.
pub(crate) fn blank_pdf(num_pages: u32) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = vec![];
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, b"0 0 m 10 10 l S".to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }
    doc.objects.insert(
        pages_id,
        dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => num_pages as i64 }.into(),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub(crate) fn page(doc: &Document, number: u32) -> ObjectId {
    doc.get_pages()[&number]
}

pub(crate) fn uri_link(rect: [i64; 4], url: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
        "A" => dictionary! { "S" => "URI", "URI" => Object::string_literal(url) },
    }
}

pub(crate) fn goto_link(doc: &Document, rect: [i64; 4], target_page: u32) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
        "A" => dictionary! {
            "S" => "GoTo",
            "D" => vec![Object::Reference(page(doc, target_page)), Object::Name(b"Fit".to_vec())],
        },
    }
}

pub(crate) fn text_note(rect: [i64; 4]) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Text",
        "Rect" => rect.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
        "Contents" => Object::string_literal("Dress code: garden party"),
    }
}

pub(crate) fn set_annots(doc: &mut Document, number: u32, annots: Vec<Object>) {
    let page_id = page(doc, number);
    doc.get_object_mut(page_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Annots", annots);
}

pub(crate) fn to_bytes(mut doc: Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
