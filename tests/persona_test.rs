//! Integration tests for persona ranking.

use chrono::NaiveDate;
use serde_json::{json, Value};

use docoutline::model::{Document, Page, Persona, PersonaRequest};
use docoutline::persona::{
    score_paragraph, KeywordModel, PersonaRanker, RankOptions, SynonymTable,
};
use docoutline::render::{to_json, JsonFormat};

#[test]
fn test_job_synonyms_expand_and_weigh() {
    let request = PersonaRequest::new(
        Persona::new("Researcher", "ML", Vec::<String>::new()),
        "find methodology section",
    );
    let keywords = KeywordModel::from_request(&request, &SynonymTable::builtin());

    assert!(keywords.persona_terms.contains("researcher"));
    assert!(keywords.persona_terms.contains("ml"));
    for term in ["methodology", "approach", "technique", "procedure"] {
        assert!(keywords.job_terms.contains(term), "missing {term}");
    }

    let score = score_paragraph(
        "our approach beats the baseline approach",
        &keywords,
        &RankOptions::default(),
    );
    assert_eq!(score, 6);
}

#[test]
fn test_top_twenty_across_documents() {
    // One paragraph per page; blank pages contribute nothing
    let paragraph = |g: usize| format!("{}item {}", "approach ".repeat(g % 4 + 1), g);
    let document = |name: &str, groups: std::ops::Range<usize>| {
        groups
            .enumerate()
            .fold(Document::new(name), |doc, (index, g)| {
                doc.with_page(Page::new(index).with_text(paragraph(g)))
            })
    };
    let docs = vec![
        document("a.pdf", 0..10),
        document("b.pdf", 10..20),
        document("c.pdf", 20..25).with_page(Page::new(5)),
    ];
    let request = PersonaRequest::new(Persona::default(), "approach");

    let output = PersonaRanker::new().rank(&docs, &request);
    let sections = &output.extracted_sections;
    assert_eq!(sections.len(), 20);

    let ranks: Vec<usize> = sections.iter().map(|s| s.importance_rank).collect();
    assert_eq!(ranks, (1..=20).collect::<Vec<_>>());

    // Stable order: higher repeat count first, then discovery order
    let mut expected: Vec<usize> = (0..25).collect();
    expected.sort_by_key(|g| std::cmp::Reverse(g % 4 + 1));
    let titles: Vec<String> = sections.iter().map(|s| s.section_title.clone()).collect();
    let expected_titles: Vec<String> = expected[..20].iter().map(|&g| paragraph(g)).collect();
    assert_eq!(titles, expected_titles);

    // First place is the earliest four-repeat paragraph: g = 3 on a.pdf page 3
    assert_eq!(sections[0].document, "a.pdf");
    assert_eq!(sections[0].page, 3);
    assert_eq!(output.metadata.documents, vec!["a.pdf", "b.pdf", "c.pdf"]);
}

#[test]
fn test_blank_lines_within_page_form_one_section() {
    let text = "Our approach here\n\nfiller text\n\nanother approach";
    let docs = vec![Document::new("a.pdf").with_page(Page::new(0).with_text(text))];
    let request = PersonaRequest::new(Persona::default(), "approach");

    let output = PersonaRanker::new().rank(&docs, &request);
    assert_eq!(output.extracted_sections.len(), 1);
    assert_eq!(
        output.extracted_sections[0].section_title,
        "our approach here filler text another approach"
    );
}

#[test]
fn test_empty_document_set() {
    let request = PersonaRequest::new(
        Persona::new("Student", "History", ["wars"]),
        "Prepare an essay",
    );
    let output = PersonaRanker::new().rank(&[], &request);

    let json = to_json(&output, JsonFormat::Pretty).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["metadata"]["documents"], json!([]));
    assert_eq!(value["extracted_sections"], json!([]));
    assert_eq!(value["metadata"]["job_to_be_done"], "Prepare an essay");
}

#[test]
fn test_output_shape_and_persona_echo() {
    let request: PersonaRequest = serde_json::from_value(json!({
        "persona": {"role": "Chef", "seniority": "head"},
        "job_to_be_done": "Plan a menu"
    }))
    .unwrap();
    let docs =
        vec![Document::new("menu.pdf").with_page(Page::new(3).with_text("How to plan a menu"))];
    let timestamp = NaiveDate::from_ymd_opt(2025, 3, 9)
        .and_then(|d| d.and_hms_opt(8, 5, 0))
        .unwrap();

    let output = PersonaRanker::new().rank_at(&docs, &request, timestamp);
    let value = serde_json::to_value(&output).unwrap();

    assert_eq!(
        value,
        json!({
            "metadata": {
                "documents": ["menu.pdf"],
                "persona": {"role": "Chef", "seniority": "head"},
                "job_to_be_done": "Plan a menu",
                "timestamp": "2025-03-09T08:05:00"
            },
            "extracted_sections": [{
                "document": "menu.pdf",
                "page": 3,
                "section_title": "how to plan a menu",
                "importance_rank": 1
            }]
        })
    );
}

#[test]
fn test_long_paragraph_truncated() {
    let long = format!("methodology {}", "word ".repeat(40));
    let docs = vec![Document::new("x.pdf").with_page(Page::new(0).with_text(long))];
    let request = PersonaRequest::new(Persona::default(), "methodology");

    let output = PersonaRanker::new().rank(&docs, &request);
    let title = &output.extracted_sections[0].section_title;
    assert_eq!(title.chars().count(), 83);
    assert!(title.ends_with("..."));
}
