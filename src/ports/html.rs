// src/ports/html.rs
use crate::domain::{CardResult, HighlightSpan};
use html_escape::encode_text;
use tracing::instrument;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Field content with every highlighted span wrapped in `<mark>`.
    pub fn render_spans(&self, spans: &[HighlightSpan]) -> String {
        spans
            .iter()
            .map(|span| {
                let text = encode_text(&span.text);
                if span.highlighted {
                    format!("<mark>{}</mark>", text)
                } else {
                    text.into_owned()
                }
            })
            .collect()
    }

    fn render_card(&self, result: &CardResult) -> String {
        let rule = result
            .matched_rule_index
            .map(|i| format!(r#"<span class="rule">rule {}</span>"#, i + 1))
            .unwrap_or_default();

        format!(
            r#"        <div class="card">
            <div class="card-meta">
                <span class="deck">{deck}</span>
                <span class="note-type">{note_type}</span>
                {rule}
            </div>
            <div class="field-name">{field_name}</div>
            <div class="field-content">{content}</div>
            <div class="card-id">Card ID: {card_id} &middot; Note ID: {note_id}</div>
        </div>
"#,
            deck = encode_text(&result.deck_name),
            note_type = encode_text(&result.note_type),
            rule = rule,
            field_name = encode_text(&result.field_name),
            content = self.render_spans(&result.highlighted_content),
            card_id = result.card_id,
            note_id = result.note_id,
        )
    }

    #[instrument(level = "debug", skip(self, results), fields(count = results.len()))]
    pub fn render(&self, search_text: &str, results: &[CardResult]) -> String {
        let cards: String = if results.is_empty() {
            r#"        <div class="empty">No matching cards</div>
"#
            .to_string()
        } else {
            results.iter().map(|r| self.render_card(r)).collect()
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Anki cards matching "{title}"</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            padding: 1rem 1.5rem;
            margin-bottom: 1rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .card-meta {{
            font-size: 0.85em;
            color: #666;
        }}
        .card-meta span {{
            display: inline-block;
            background: #e9ecef;
            padding: 2px 8px;
            border-radius: 4px;
            margin-right: 4px;
        }}
        .field-name {{
            margin-top: 0.5rem;
            font-weight: bold;
        }}
        .card-id {{
            margin-top: 0.5rem;
            font-size: 0.8em;
            color: #999;
        }}
        mark {{
            background-color: #ffe066;
            padding: 0 2px;
            border-radius: 2px;
        }}
    </style>
</head>
<body>
    <h2>{count} card(s) matching "{title}"</h2>
    <div class="results">
{cards}    </div>
</body>
</html>"#,
            title = encode_text(search_text),
            count = results.len(),
            cards = cards,
        )
    }
}
