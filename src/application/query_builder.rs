// src/application/query_builder.rs
use crate::domain::SearchRule;

fn escape(s: &str) -> String {
    s.replace('"', "\\\"")
}

/// Anki search query for one rule.
///
/// The whole `search_text` is matched as one substring phrase, scoped to the
/// rule's field when it has one, and ANDed with the deck and note type
/// filters. Text that is empty or only whitespace yields an empty query.
pub fn build_rule_query(search_text: &str, rule: &SearchRule) -> String {
    if search_text.split_whitespace().next().is_none() {
        return String::new();
    }

    let text = escape(search_text);
    let mut parts = Vec::with_capacity(3);

    match rule.field() {
        Some(field) => parts.push(format!(r#"{}:"*{}*""#, field, text)),
        None => parts.push(format!(r#""*{}*""#, text)),
    }
    if let Some(deck) = rule.deck() {
        parts.push(format!(r#"deck:"{}""#, escape(deck)));
    }
    if let Some(note_type) = rule.note_type() {
        parts.push(format!(r#"note:"{}""#, escape(note_type)));
    }

    parts.join(" ")
}

/// Single query covering all rules, ORing each rule's clause.
///
/// Only used for display; searching issues one query per rule so every hit
/// can be attributed to the rule that found it.
pub fn build_search_query(search_text: &str, rules: &[SearchRule]) -> String {
    match rules {
        [] => format!("*{}*", escape(search_text)),
        [rule] => build_rule_query(search_text, rule),
        _ => {
            let queries: Vec<_> = rules
                .iter()
                .map(|rule| build_rule_query(search_text, rule))
                .collect();
            format!("({})", queries.join(") OR ("))
        }
    }
}
