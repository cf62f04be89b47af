// src/domain/rule.rs
use serde::{Deserialize, Serialize};

/// A filter narrowing a search to a field, deck and/or note type.
///
/// Every dimension is optional. Empty strings count as unset, so a rule
/// written as `field_name = ""` matches across all fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_type_name: Option<String>,
}

impl SearchRule {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn with_deck(mut self, deck_name: impl Into<String>) -> Self {
        self.deck_name = Some(deck_name.into());
        self
    }

    pub fn with_note_type(mut self, note_type_name: impl Into<String>) -> Self {
        self.note_type_name = Some(note_type_name.into());
        self
    }

    pub fn field(&self) -> Option<&str> {
        non_empty(&self.field_name)
    }

    pub fn deck(&self) -> Option<&str> {
        non_empty(&self.deck_name)
    }

    pub fn note_type(&self) -> Option<&str> {
        non_empty(&self.note_type_name)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
