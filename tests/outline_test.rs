//! Integration tests for outline extraction on in-memory documents.

use docoutline::model::{Document, HeadingLevel, OutlineItem, Page};
use docoutline::outline::{extract_outline, HeadingLevelMap};
use docoutline::render::{to_json, JsonFormat};

fn level(s: &str) -> HeadingLevel {
    s.parse().unwrap()
}

#[test]
fn test_level_map_and_merge_for_mixed_sizes() {
    let doc = Document::new("a.pdf").with_page(
        Page::new(0)
            .with_span("Quarterly", 24.0)
            .with_span("Review", 24.0)
            .with_span("Highlights", 18.0)
            .with_span("Revenue grew in every region.", 12.0),
    );

    let levels = HeadingLevelMap::from_document(&doc);
    let map: Vec<(f32, String)> = levels.iter().map(|(s, l)| (s, l.to_string())).collect();
    assert_eq!(
        map,
        vec![
            (24.0, "H1".to_string()),
            (18.0, "H2".to_string()),
            (12.0, "H3".to_string()),
        ]
    );

    let result = extract_outline(&doc);
    assert_eq!(result.title, "Quarterly Review");
    assert_eq!(
        result.outline,
        vec![
            OutlineItem::new(HeadingLevel::H1, "Quarterly Review", 0),
            OutlineItem::new(level("H2"), "Highlights", 0),
            OutlineItem::new(level("H3"), "Revenue grew in every region.", 0),
        ]
    );
}

#[test]
fn test_same_level_on_different_pages_not_merged() {
    let doc = Document::new("a.pdf")
        .with_page(Page::new(0).with_span("Part One", 20.0))
        .with_page(Page::new(1).with_span("Part Two", 20.0));

    let result = extract_outline(&doc);
    assert_eq!(result.outline.len(), 2);
    assert_eq!(result.outline[1].page, 1);
}

#[test]
fn test_full_width_digits_are_noise() {
    let doc = Document::new("a.pdf").with_page(
        Page::new(0)
            .with_span("１２３", 30.0)
            .with_span("Ｈｅａｄｉｎｇ", 20.0)
            .with_span("ﬁnal words", 10.0),
    );

    let result = extract_outline(&doc);
    let texts: Vec<&str> = result.outline.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["Heading", "final words"]);
    // The digit span still contributes a level, so the heading is H2
    assert_eq!(result.outline[0].level, level("H2"));
    assert_eq!(result.title, "Heading");
}

#[test]
fn test_letter_numerals_are_kept() {
    let doc = Document::new("a.pdf").with_page(
        Page::new(0)
            .with_span("〇〇", 20.0)
            .with_span("42", 20.0)
            .with_span("Body", 10.0),
    );

    let result = extract_outline(&doc);
    let texts: Vec<&str> = result.outline.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["〇〇", "Body"]);
}

#[test]
fn test_urls_and_single_chars_skipped() {
    let doc = Document::new("a.pdf").with_page(
        Page::new(0)
            .with_span("https://example.com/report", 16.0)
            .with_span("•", 16.0)
            .with_span("   ", 16.0)
            .with_span("Overview", 16.0),
    );

    let result = extract_outline(&doc);
    assert_eq!(result.outline.len(), 1);
    assert_eq!(result.outline[0].text, "Overview");
}

#[test]
fn test_late_h1_becomes_title() {
    let doc = Document::new("a.pdf")
        .with_page(Page::new(0).with_span("Small intro", 10.0))
        .with_page(Page::new(1).with_span("Body", 10.0))
        .with_page(Page::new(2).with_span("Huge late banner", 40.0));

    let result = extract_outline(&doc);
    // H1 exists on page 2, so it wins over the page-0 candidate
    assert_eq!(result.title, "Huge late banner");
    assert_eq!(result.outline[0].level, level("H2"));
}

#[test]
fn test_empty_document_output_shape() {
    let result = extract_outline(&Document::new("empty.pdf"));
    let json = to_json(&result, JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"{"title":"Untitled Document","outline":[]}"#);
}
