use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use rsvpress::{PlacementRect, PressConfig};

/// A4 in whole points.
pub const A4: (i64, i64) = (595, 842);
pub const LETTER: (i64, i64) = (612, 792);

pub const EVENT_TITLE: &str = "Garden Party";
pub const DOMAIN: &str = "example.com";
pub const ORIGINAL_RSVP_URL: &str = "https://forms.example.org/rsvp";
pub const MAPS_URL: &str = "https://maps.example.org/venue";

/// Builds a PDF with one page per entry in `sizes`. Every page shows
/// "Invitation page <n>" and all pages share one resources dictionary.
/// `annotate` can add annotations once the page objects exist.
pub fn build_pdf(sizes: &[(i64, i64)], annotate: impl FnOnce(&mut Document, &[ObjectId])) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids = Vec::new();
    for (i, (width, height)) in sizes.iter().enumerate() {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), (height - 100).into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Invitation page {}", i + 1).into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => rect(0, 0, *width, *height),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => sizes.len() as i64,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    annotate(&mut doc, &page_ids);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// `num_pages` A4 pages without annotations.
pub fn plain_invitation(num_pages: usize) -> Vec<u8> {
    build_pdf(&vec![A4; num_pages], |_, _| {})
}

/// One letter-sized page whose MediaBox is `[100 100 712 892]`.
pub fn shifted_invitation() -> Vec<u8> {
    build_pdf(&[LETTER], |doc, pages| {
        doc.get_object_mut(pages[0])
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .set("MediaBox", rect(100, 100, 712, 892));
    })
}

/// Two A4 pages. Page 1 has an RSVP link (indirect annotation and action) and
/// a jump to page 2; page 2 has an inline map link and a sticky note.
pub fn linked_invitation() -> Vec<u8> {
    build_pdf(&[A4, A4], |doc, pages| {
        let action = doc.add_object(dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(ORIGINAL_RSVP_URL),
        });
        let rsvp = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => rect(72, 100, 272, 130),
            "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
            "A" => action,
        });
        let jump = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => rect(72, 50, 272, 80),
            "A" => dictionary! {
                "S" => "GoTo",
                "D" => vec![Object::Reference(pages[1]), Object::Name(b"Fit".to_vec())],
            },
        });
        set_annots(doc, pages[0], vec![rsvp.into(), jump.into()]);

        let maps = uri_link(rect(300, 400, 500, 420), MAPS_URL);
        let note = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Text",
            "Rect" => rect(20, 20, 40, 40),
            "Contents" => Object::string_literal("Parking behind the barn"),
        };
        set_annots(doc, pages[1], vec![maps.into(), note.into()]);
    })
}

pub fn uri_link(rect: Vec<Object>, url: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect,
        "A" => dictionary! { "S" => "URI", "URI" => Object::string_literal(url) },
    }
}

pub fn rect(llx: i64, lly: i64, urx: i64, ury: i64) -> Vec<Object> {
    vec![llx.into(), lly.into(), urx.into(), ury.into()]
}

pub fn set_annots(doc: &mut Document, page_id: ObjectId, annots: Vec<Object>) {
    doc.get_object_mut(page_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Annots", annots);
}

/// Code at (100, 700), 80 x 80 points, on `target_page`.
pub fn test_config(target_page: u32) -> PressConfig {
    PressConfig::builder()
        .with_event_title(EVENT_TITLE)
        .with_public_domain(DOMAIN)
        .with_placement(PlacementRect::square(100.0, 700.0, 80.0))
        .with_target_page(target_page)
        .build()
        .expect("test config is valid")
}
