//! Layout analysis for PDF pages.
//!
//! Walks a page's content stream to recover positioned text runs, then
//! rebuilds the page's plain text by grouping runs into lines and lines
//! into blocks. Blocks are separated by a blank line.

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};
use crate::error::{Error, Result};

/// Adjustment in a `TJ` array (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A decoded text run with its baseline position and effective size.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Font size in points after text-matrix scaling
    pub font_size: f32,
}

impl PositionedSpan {
    /// Create a new positioned span.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
        }
    }
}

/// Spans sharing a baseline.
#[derive(Debug, Clone)]
struct TextLine {
    spans: Vec<PositionedSpan>,
    y: f32,
    x: f32,
    font_size: f32,
}

impl TextLine {
    fn from_spans(mut spans: Vec<PositionedSpan>) -> Self {
        spans.sort_by(|a, b| a.x.total_cmp(&b.x));

        // Dominant size weighted by text length
        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let weighted: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        let font_size = match spans.first() {
            Some(_) if total_chars > 0 => weighted / total_chars as f32,
            Some(first) => first.font_size,
            None => 0.0,
        };
        let (x, y) = spans.first().map(|s| (s.x, s.y)).unwrap_or((0.0, 0.0));

        Self {
            spans,
            y,
            x,
            font_size,
        }
    }

    /// Joined text, with a space between runs except inside spaceless scripts.
    fn text(&self) -> String {
        let mut result = String::new();
        for span in &self.spans {
            let needs_space = match (result.chars().last(), span.text.chars().next()) {
                (Some(prev), Some(next)) => {
                    !prev.is_whitespace()
                        && !next.is_whitespace()
                        && !(is_spaceless_script_char(prev) && is_spaceless_script_char(next))
                }
                _ => false,
            };
            if needs_space {
                result.push(' ');
            }
            result.push_str(&span.text);
        }
        result
    }
}

/// Reads positioned spans out of page content streams.
pub struct LayoutAnalyzer<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: PdfBackend + ?Sized> LayoutAnalyzer<'a, B> {
    /// Create a new layout analyzer over a backend.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Extract text spans from a page, in content-stream order.
    pub fn extract_page_spans(&self, page_num: u32) -> Result<Vec<PositionedSpan>> {
        let pages = self.backend.pages();
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let content = self.backend.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let ops = self.backend.decode_content(&content)?;
        Ok(self.spans_from_ops(page_id, &ops))
    }

    /// Interpret text operators, tracking font and text matrix state.
    fn spans_from_ops(&self, page_id: PageId, ops: &[ContentOp]) -> Vec<PositionedSpan> {
        let mut spans = Vec::new();
        let mut font_name: Vec<u8> = Vec::new();
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in ops {
            let text = match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    matrix = TextMatrix::default();
                    None
                }
                "ET" => {
                    in_text_block = false;
                    None
                }
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        font_name = name.clone();
                    }
                    font_size = op.number(1, font_size);
                    None
                }
                "TL" => {
                    matrix.leading = op.number(0, matrix.leading);
                    None
                }
                "Td" => {
                    matrix.translate(op.number(0, 0.0), op.number(1, 0.0));
                    None
                }
                "TD" => {
                    let ty = op.number(1, 0.0);
                    matrix.leading = -ty;
                    matrix.translate(op.number(0, 0.0), ty);
                    None
                }
                "Tm" if op.operands.len() >= 6 => {
                    matrix.set([
                        op.number(0, 1.0),
                        op.number(1, 0.0),
                        op.number(2, 0.0),
                        op.number(3, 1.0),
                        op.number(4, 0.0),
                        op.number(5, 0.0),
                    ]);
                    None
                }
                "T*" => {
                    matrix.next_line();
                    None
                }
                "Tj" => match op.operands.first() {
                    Some(PdfValue::Str(bytes)) => {
                        Some(self.backend.decode_text(page_id, &font_name, bytes))
                    }
                    _ => None,
                },
                "TJ" => match op.operands.first() {
                    Some(PdfValue::Array(items)) => {
                        Some(self.decode_tj_array(page_id, &font_name, items))
                    }
                    _ => None,
                },
                "'" | "\"" => {
                    matrix.next_line();
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    match op.operands.get(text_idx) {
                        Some(PdfValue::Str(bytes)) => {
                            Some(self.backend.decode_text(page_id, &font_name, bytes))
                        }
                        _ => None,
                    }
                }
                _ => None,
            };

            if let Some(text) = text {
                if in_text_block && !text.trim().is_empty() {
                    let (x, y) = matrix.position();
                    spans.push(PositionedSpan::new(text, x, y, font_size * matrix.scale()));
                }
            }
        }

        spans
    }

    /// Decode a `TJ` array, turning large negative adjustments into spaces.
    fn decode_tj_array(&self, page_id: PageId, font_name: &[u8], items: &[PdfValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    combined.push_str(&self.backend.decode_text(page_id, font_name, bytes));
                }
                other => {
                    let Some(n) = other.as_number() else {
                        continue;
                    };
                    if -n > TJ_SPACE_THRESHOLD {
                        if let Some(last) = combined.chars().last() {
                            if !last.is_whitespace() && !is_spaceless_script_char(last) {
                                combined.push(' ');
                            }
                        }
                    }
                }
            }
        }
        combined
    }
}

/// Rebuild a page's text from its spans.
///
/// Lines are joined with a newline inside a block; blocks are separated by
/// a blank line. A new block starts on a spacing jump beyond 1.5 times the
/// average line spacing, a size change over 1pt, or an indent shift over 20pt.
pub fn layout_text(spans: &[PositionedSpan]) -> String {
    let lines = group_spans_into_lines(spans.to_vec());
    if lines.is_empty() {
        return String::new();
    }

    let avg_spacing = average_line_spacing(&lines);
    let mut blocks: Vec<Vec<String>> = Vec::new();
    let mut prev: Option<&TextLine> = None;

    for line in &lines {
        let start_block = match prev {
            Some(prev_line) => should_break_block(prev_line, line, avg_spacing),
            None => true,
        };
        if start_block {
            blocks.push(Vec::new());
        }
        if let Some(block) = blocks.last_mut() {
            block.push(line.text());
        }
        prev = Some(line);
    }

    blocks
        .iter()
        .map(|block| block.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Y-based line grouping, top to bottom.
fn group_spans_into_lines(mut spans: Vec<PositionedSpan>) -> Vec<TextLine> {
    // PDF Y grows upwards
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<PositionedSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(TextLine::from_spans(current));
    }

    lines
}

fn average_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &TextLine, curr: &TextLine, avg_spacing: f32) -> bool {
    (prev.y - curr.y).abs() > avg_spacing * 1.5
        || (prev.font_size - curr.font_size).abs() > 1.0
        || (prev.x - curr.x).abs() > 20.0
}

/// Text matrix for tracking position in content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, [a, b, c, d, e, f]: [f32; 6]) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Length of the text-space y axis.
    fn scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs
    (0x4E00..=0x9FFF).contains(&code)
    // Extension A
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana and Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::backend::decode_text_simple;
    use std::collections::BTreeMap;

    /// Backend over a fixed operation list for a single page.
    struct OpsBackend {
        ops: Vec<ContentOp>,
    }

    impl PdfBackend for OpsBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (1, 0))])
        }

        fn page_content(&self, _page: PageId) -> Result<Vec<u8>> {
            Ok(b"stub".to_vec())
        }

        fn decode_content(&self, _data: &[u8]) -> Result<Vec<ContentOp>> {
            Ok(self.ops.clone())
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            decode_text_simple(bytes)
        }

        fn extract_text(&self, _page_number: u32) -> Result<String> {
            Ok(String::new())
        }

        fn is_encrypted(&self) -> bool {
            false
        }
    }

    fn op(operator: &str, operands: Vec<PdfValue>) -> ContentOp {
        ContentOp {
            operator: operator.to_string(),
            operands,
        }
    }

    fn num(n: f32) -> PdfValue {
        PdfValue::Real(n)
    }

    fn s(text: &str) -> PdfValue {
        PdfValue::Str(text.as_bytes().to_vec())
    }

    fn font(size: f32) -> ContentOp {
        op("Tf", vec![PdfValue::Name(b"F1".to_vec()), num(size)])
    }

    fn spans_for(ops: Vec<ContentOp>) -> Vec<PositionedSpan> {
        let backend = OpsBackend { ops };
        LayoutAnalyzer::new(&backend).extract_page_spans(1).unwrap()
    }

    #[test]
    fn test_spans_in_stream_order() {
        let spans = spans_for(vec![
            op("BT", vec![]),
            font(24.0),
            op("Td", vec![num(72.0), num(700.0)]),
            op("Tj", vec![s("Title")]),
            font(11.0),
            op("Td", vec![num(0.0), num(-30.0)]),
            op("Tj", vec![s("Body")]),
            op("ET", vec![]),
        ]);

        assert_eq!(
            spans,
            vec![
                PositionedSpan::new("Title", 72.0, 700.0, 24.0),
                PositionedSpan::new("Body", 72.0, 670.0, 11.0),
            ]
        );
    }

    #[test]
    fn test_text_matrix_scales_font_size() {
        let spans = spans_for(vec![
            op("BT", vec![]),
            font(1.0),
            op("Tm", vec![num(18.0), num(0.0), num(0.0), num(18.0), num(50.0), num(500.0)]),
            op("Tj", vec![s("Scaled")]),
            op("ET", vec![]),
        ]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].font_size, 18.0);
        assert_eq!((spans[0].x, spans[0].y), (50.0, 500.0));
    }

    #[test]
    fn test_tj_array_spacing() {
        let spans = spans_for(vec![
            op("BT", vec![]),
            font(12.0),
            op(
                "TJ",
                vec![PdfValue::Array(vec![
                    s("Hel"),
                    PdfValue::Integer(-20),
                    s("lo"),
                    PdfValue::Integer(-250),
                    s("World"),
                ])],
            ),
            op("ET", vec![]),
        ]);
        assert_eq!(spans[0].text, "Hello World");
    }

    #[test]
    fn test_text_outside_bt_ignored() {
        let spans = spans_for(vec![
            op("Tj", vec![s("stray")]),
            op("BT", vec![]),
            op("Tj", vec![s("   ")]),
            op("ET", vec![]),
        ]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_quote_operators_advance_line() {
        let spans = spans_for(vec![
            op("BT", vec![]),
            font(10.0),
            op("TL", vec![num(14.0)]),
            op("Td", vec![num(0.0), num(100.0)]),
            op("'", vec![s("one")]),
            op("\"", vec![num(0.0), num(0.0), s("two")]),
            op("ET", vec![]),
        ]);
        let ys: Vec<f32> = spans.iter().map(|s| s.y).collect();
        assert_eq!(ys, vec![86.0, 72.0]);
    }

    #[test]
    fn test_page_out_of_range() {
        let backend = OpsBackend { ops: vec![] };
        let err = LayoutAnalyzer::new(&backend).extract_page_spans(3).unwrap_err();
        assert!(matches!(err, Error::PageOutOfRange(3, 1)));
    }

    #[test]
    fn test_layout_text_blocks() {
        let spans = vec![
            PositionedSpan::new("Heading", 72.0, 800.0, 20.0),
            PositionedSpan::new("first line", 72.0, 770.0, 11.0),
            PositionedSpan::new("second line", 72.0, 756.0, 11.0),
            PositionedSpan::new("next paragraph", 72.0, 700.0, 11.0),
        ];
        assert_eq!(
            layout_text(&spans),
            "Heading\n\nfirst line\nsecond line\n\nnext paragraph"
        );
    }

    #[test]
    fn test_layout_text_joins_same_baseline() {
        let spans = vec![
            PositionedSpan::new("world", 120.0, 500.0, 12.0),
            PositionedSpan::new("Hello", 72.0, 501.0, 12.0),
            PositionedSpan::new("日本", 72.0, 400.0, 12.0),
            PositionedSpan::new("語", 96.0, 400.0, 12.0),
        ];
        let text = layout_text(&spans);
        assert!(text.starts_with("Hello world"));
        assert!(text.ends_with("日本語"));
    }

    #[test]
    fn test_layout_text_empty() {
        assert_eq!(layout_text(&[]), "");
    }

    #[test]
    fn test_spaceless_script() {
        assert!(is_spaceless_script_char('日'));
        assert!(is_spaceless_script_char('カ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
