// src/ports/terminal.rs
use crate::domain::CardResult;

const ANSI_HIGHLIGHT: &str = "\x1b[1;33m";
const ANSI_RESET: &str = "\x1b[0m";

/// Plain text listing of search results.
#[derive(Debug)]
pub struct TerminalPresenter {
    color: bool,
}

impl TerminalPresenter {
    /// `color` selects ANSI highlighting; without it matches are wrapped in `**`.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render_content(&self, result: &CardResult) -> String {
        let (open, close) = if self.color {
            (ANSI_HIGHLIGHT, ANSI_RESET)
        } else {
            ("**", "**")
        };

        result
            .highlighted_content
            .iter()
            .map(|span| {
                if span.highlighted {
                    format!("{}{}{}", open, span.text, close)
                } else {
                    span.text.clone()
                }
            })
            .collect()
    }

    pub fn render(&self, results: &[CardResult]) -> String {
        if results.is_empty() {
            return "No matching cards\n".to_string();
        }

        let mut out = String::new();
        for result in results {
            let rule = result
                .matched_rule_index
                .map(|i| format!("  [rule {}]", i + 1))
                .unwrap_or_default();
            out.push_str(&format!(
                "{}\t{} | {}{}\n  {}: {}\n",
                result.card_id,
                result.deck_name,
                result.note_type,
                rule,
                result.field_name,
                self.render_content(result).replace('\n', " "),
            ));
        }
        out
    }
}
