// src/domain/card.rs
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Raw content of one note field as returned by AnkiConnect.
///
/// `cardsInfo` reports fields as `{"value": "...", "order": 0}`, older or
/// third-party bridges may send a bare string or use `text`/`plain`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Structured(StructuredField),
    Other(serde_json::Value),
}

/// Object-shaped field. Keys are kept untyped so a malformed key does not
/// hide the ones after it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StructuredField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<serde_json::Value>,
}

impl FieldValue {
    /// Text content of the field: the string itself, else the first of
    /// `value`, `text`, `plain` holding a string, else empty.
    pub fn plain_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Structured(f) => [&f.value, &f.text, &f.plain]
                .into_iter()
                .find_map(|key| key.as_ref().and_then(|v| v.as_str()))
                .unwrap_or(""),
            FieldValue::Other(_) => "",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// Note fields in the order AnkiConnect reported them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardFields(Vec<(String, FieldValue)>);

impl CardFields {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field, keeping the position of an existing name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn first(&self) -> Option<(&str, &FieldValue)> {
        self.0.first().map(|(n, v)| (n.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for CardFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = CardFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field names to field contents")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut fields = CardFields::new();
                while let Some((name, value)) = map.next_entry::<String, FieldValue>()? {
                    fields.insert(name, value);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

impl Serialize for CardFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// A card as reported by AnkiConnect `cardsInfo`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CardRecord {
    #[serde(rename = "cardId")]
    pub card_id: i64,
    #[serde(rename = "noteId", alias = "note", default)]
    pub note_id: i64,
    #[serde(rename = "deckName", default)]
    pub deck_name: String,
    #[serde(rename = "modelName", alias = "noteType", default)]
    pub note_type: String,
    #[serde(default)]
    pub fields: CardFields,
}

/// A contiguous piece of cleaned field content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub text: String,
    pub highlighted: bool,
}

impl HighlightSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    pub fn marked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// One matching card, reduced to the field that best shows the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardResult {
    pub card_id: i64,
    pub note_id: i64,
    pub deck_name: String,
    pub note_type: String,
    pub field_name: String,
    pub field_content: String,
    pub highlighted_content: Vec<HighlightSpan>,
    pub matched_rule_index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_cards_info_entry_when_deserializing_then_keeps_field_order() {
        let raw = json!({
            "cardId": 101,
            "note": 55,
            "deckName": "Science::Biology",
            "modelName": "Basic",
            "fields": {
                "Front": {"value": "Q", "order": 0},
                "Back": {"value": "A", "order": 1},
                "Extra": {"value": "", "order": 2}
            }
        });

        let card: CardRecord = serde_json::from_value(raw).unwrap();

        assert_eq!(card.card_id, 101);
        assert_eq!(card.note_id, 55);
        assert_eq!(card.note_type, "Basic");
        let names: Vec<_> = card.fields.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Front", "Back", "Extra"]);
    }

    #[test]
    fn given_bare_string_field_when_reading_plain_text_then_returns_string() {
        let value: FieldValue = serde_json::from_value(json!("hello")).unwrap();

        assert_eq!(value.plain_text(), "hello");
    }

    #[test]
    fn given_structured_field_when_reading_plain_text_then_prefers_value_over_text_and_plain() {
        let value: FieldValue =
            serde_json::from_value(json!({"text": "t", "plain": "p", "value": "v"})).unwrap();
        assert_eq!(value.plain_text(), "v");

        let value: FieldValue =
            serde_json::from_value(json!({"plain": "p", "text": "t"})).unwrap();
        assert_eq!(value.plain_text(), "t");

        let value: FieldValue = serde_json::from_value(json!({"plain": "p"})).unwrap();
        assert_eq!(value.plain_text(), "p");
    }

    #[test]
    fn given_non_string_value_key_when_reading_plain_text_then_falls_through_to_text() {
        let value: FieldValue =
            serde_json::from_value(json!({"value": 42, "text": "t"})).unwrap();
        assert_eq!(value.plain_text(), "t");

        let value: FieldValue =
            serde_json::from_value(json!({"value": null, "text": ["x"], "plain": "p", "order": "first"}))
                .unwrap();
        assert_eq!(value.plain_text(), "p");
    }

    #[test]
    fn given_unrecognized_field_shape_when_reading_plain_text_then_returns_empty() {
        let value: FieldValue = serde_json::from_value(json!({"value": 42})).unwrap();
        assert_eq!(value.plain_text(), "");

        let value: FieldValue = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(value.plain_text(), "");
    }

    #[test]
    fn given_existing_field_when_inserting_again_then_replaces_in_place() {
        let mut fields = CardFields::new().with("Front", "a").with("Back", "b");

        fields.insert("Front", "c");

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.first().map(|(n, v)| (n, v.plain_text())), Some(("Front", "c")));
    }
}
