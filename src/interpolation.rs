//! Detection and splitting of `${...}` interpolation spans.
//!
//! Spans are matched one level deep: the inner text runs up to the first `}`.

use regex::Regex;
use std::sync::OnceLock;

const SPAN_PATTERN: &str = r"\$\{([^}]*)\}";

fn span_regex() -> &'static Regex {
    static SPAN: OnceLock<Regex> = OnceLock::new();
    SPAN.get_or_init(|| Regex::new(SPAN_PATTERN).expect("span pattern is a valid regex"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Expression(&'a str),
}

/// True when the trimmed text contains at least one `${...}` span.
pub fn has_interpolation_spans(text: &str) -> bool {
    span_regex().is_match(text.trim())
}

/// True when the trimmed text is a single `${...}` span and nothing else.
pub fn is_single_span_expression(text: &str) -> bool {
    let text = text.trim();
    text.starts_with("${") && text.ends_with('}') && span_regex().find_iter(text).count() == 1
}

/// The inner source of a single-span expression, without the `${` `}` delimiters.
pub fn single_span_source(text: &str) -> Option<&str> {
    let text = text.trim();
    if is_single_span_expression(text) {
        Some(&text[2..text.len() - 1])
    } else {
        None
    }
}

/// Splits text into literal and expression segments, left to right.
///
/// The literal text before every span is kept even when empty; trailing text only when present.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut parts = Vec::new();
    let mut last = 0;
    for captures in span_regex().captures_iter(text) {
        let (whole, inner) = match (captures.get(0), captures.get(1)) {
            (Some(whole), Some(inner)) => (whole, inner),
            _ => continue,
        };
        parts.push(Segment::Text(&text[last..whole.start()]));
        parts.push(Segment::Expression(inner.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        parts.push(Segment::Text(&text[last..]));
    }
    parts
}
