// src/util/text.rs
use crate::domain::HighlightSpan;
use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

lazy_static! {
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>")
        .expect("Failed to compile HTML tag regex");

    // {{c1::payload}} or {{c1::payload::hint}}
    static ref CLOZE_REGEX: Regex = Regex::new(r"\{\{c\d+::([^}]+?)(?:::[^}]*)?\}\}")
        .expect("Failed to compile cloze regex");
}

/// Reduce raw field HTML to the plain text a user reads on the card.
///
/// This function:
/// 1. Removes all HTML tags
/// 2. Unwraps cloze deletions, dropping any hint
/// 3. Decodes HTML entities (e.g., &amp; → &)
///
/// # Examples
///
/// ```
/// use ankifind::util::text::clean_field_content;
///
/// assert_eq!(clean_field_content("This is {{c1::hidden}} text"), "This is hidden text");
/// assert_eq!(clean_field_content("<b>Trees</b> &amp; Graphs"), "Trees & Graphs");
/// ```
pub fn clean_field_content(raw: &str) -> String {
    let no_tags = TAG_REGEX.replace_all(raw, "");
    let no_clozes = CLOZE_REGEX.replace_all(&no_tags, "$1");
    decode_html_entities(&no_clozes).into_owned()
}

/// Split `content` into spans, marking every case-insensitive occurrence of
/// `search`.
///
/// Concatenating the span texts always yields `content` again. Empty content
/// gives no spans; an empty or unmatched search gives one plain span.
pub fn highlight_matches(content: &str, search: &str) -> Vec<HighlightSpan> {
    if content.is_empty() {
        return Vec::new();
    }
    if search.is_empty() {
        return vec![HighlightSpan::plain(content)];
    }

    let matcher = match RegexBuilder::new(&regex::escape(search))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        // Only reachable when the escaped pattern exceeds the regex size limit.
        Err(_) => return vec![HighlightSpan::plain(content)],
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for m in matcher.find_iter(content) {
        if m.start() > last {
            spans.push(HighlightSpan::plain(&content[last..m.start()]));
        }
        spans.push(HighlightSpan::marked(m.as_str()));
        last = m.end();
    }
    if last < content.len() {
        spans.push(HighlightSpan::plain(&content[last..]));
    }
    spans
}

/// Case-insensitive substring test used to pick the field that shows a match.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
