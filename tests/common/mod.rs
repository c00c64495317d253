//! Shared helpers for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A line of text placed on a synthetic page: (font size, baseline y, text).
pub type Line<'a> = (f32, f32, &'a str);

/// Build a PDF with one page per entry; each line is drawn at x = 72 with
/// Helvetica at the given size.
pub fn build_pdf(pages: &[Vec<Line<'_>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (size, y, text) in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(b"F1".to_vec()), Object::Real(*size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Real(72.0), Object::Real(*y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// A three-page report: title and section heading on page 1, a subsection
/// heading split across two spans on page 2, body text everywhere.
pub fn sample_report() -> Vec<u8> {
    build_pdf(&[
        vec![
            (24.0, 760.0, "Annual Report"),
            (18.0, 720.0, "Introduction"),
            (11.0, 690.0, "This report covers our methodology."),
            (11.0, 676.0, "It spans several pages."),
        ],
        vec![
            (14.0, 760.0, "Data"),
            (14.0, 742.0, "Collection"),
            (11.0, 710.0, "The dataset was gathered over a year."),
        ],
        vec![(11.0, 760.0, "Closing remarks without keywords.")],
    ])
}
