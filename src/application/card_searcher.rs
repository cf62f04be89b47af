// src/application/card_searcher.rs
use crate::application::query_builder::{build_rule_query, build_search_query};
use crate::constants::{DECK_DISPLAY_SEPARATOR, DECK_HIERARCHY_SEPARATOR};
use crate::domain::{CardRecord, CardResult, LookupError, SearchRule};
use crate::util::text::{clean_field_content, contains_ignore_case, highlight_matches};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Source of card data, normally a running Anki instance.
#[async_trait]
pub trait CardLookup: Send + Sync {
    /// Ids of all cards matching an Anki search query.
    async fn find_card_ids(&self, query: &str) -> Result<Vec<i64>, LookupError>;

    async fn card_details(&self, card_ids: &[i64]) -> Result<Vec<CardRecord>, LookupError>;

    /// Point subsequent calls at another endpoint. Sources without one ignore this.
    fn set_endpoint(&mut self, _endpoint: &str) {}
}

/// Opens cards in the flashcard application's own browser window.
#[async_trait]
pub trait CardBrowser: Send + Sync {
    async fn browse(&self, query: &str) -> Result<Vec<i64>, LookupError>;
}

/// Insertion-ordered result accumulator keyed by card id.
///
/// The first insert for a card id wins; later inserts for it are ignored.
#[derive(Debug, Default)]
struct ResultSet {
    seen: HashSet<i64>,
    results: Vec<CardResult>,
}

impl ResultSet {
    fn contains(&self, card_id: i64) -> bool {
        self.seen.contains(&card_id)
    }

    fn insert(&mut self, result: CardResult) -> bool {
        if !self.seen.insert(result.card_id) {
            return false;
        }
        self.results.push(result);
        true
    }

    fn len(&self) -> usize {
        self.results.len()
    }

    fn into_vec(self) -> Vec<CardResult> {
        self.results
    }
}

/// Multi-rule search over a `CardLookup`.
///
/// Rules run one after another. A card is reported once, attributed to the
/// first rule that found it. Any lookup failure aborts the whole search.
pub struct CardSearcher<'a, L: CardLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: CardLookup + ?Sized> CardSearcher<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    #[instrument(level = "debug", skip(self, rules), fields(rules = rules.len()))]
    pub async fn search(
        &self,
        search_text: &str,
        rules: &[SearchRule],
    ) -> Result<Vec<CardResult>, LookupError> {
        let mut found = ResultSet::default();

        if rules.is_empty() {
            let query = build_search_query(search_text, rules);
            self.collect(&query, search_text, &SearchRule::any(), None, &mut found)
                .await?;
        }

        for (rule_index, rule) in rules.iter().enumerate() {
            let query = build_rule_query(search_text, rule);
            self.collect(&query, search_text, rule, Some(rule_index), &mut found)
                .await?;
        }

        info!(results = found.len(), "Search complete");
        Ok(found.into_vec())
    }

    async fn collect(
        &self,
        query: &str,
        search_text: &str,
        rule: &SearchRule,
        rule_index: Option<usize>,
        found: &mut ResultSet,
    ) -> Result<(), LookupError> {
        debug!(?rule_index, query, "Running rule query");
        let card_ids = self.lookup.find_card_ids(query).await?;
        if card_ids.is_empty() {
            debug!(?rule_index, "No cards matched");
            return Ok(());
        }

        let cards = self.lookup.card_details(&card_ids).await?;
        for card in cards {
            if found.contains(card.card_id) {
                continue;
            }
            found.insert(to_card_result(&card, search_text, rule, rule_index));
        }
        Ok(())
    }
}

/// Name of the field that best shows the match on `card`.
///
/// The rule's field wins when it exists on the card. Without one, the first
/// field containing the search text is taken, else the first field.
fn select_field<'c>(card: &'c CardRecord, search_text: &str, rule: &SearchRule) -> &'c str {
    let first = card.fields.first().map(|(name, _)| name).unwrap_or("");

    let chosen = match rule.field() {
        Some(name) => card.fields.iter().map(|(n, _)| n).find(|n| *n == name),
        None => card
            .fields
            .iter()
            .find(|(_, value)| contains_ignore_case(value.plain_text(), search_text))
            .map(|(name, _)| name),
    };

    chosen.unwrap_or(first)
}

fn to_card_result(
    card: &CardRecord,
    search_text: &str,
    rule: &SearchRule,
    rule_index: Option<usize>,
) -> CardResult {
    let field_name = select_field(card, search_text, rule);
    let raw = card
        .fields
        .get(field_name)
        .map(|value| value.plain_text())
        .unwrap_or("");
    let field_content = clean_field_content(raw);
    let highlighted_content = highlight_matches(&field_content, search_text);

    CardResult {
        card_id: card.card_id,
        note_id: card.note_id,
        deck_name: card
            .deck_name
            .replace(DECK_HIERARCHY_SEPARATOR, DECK_DISPLAY_SEPARATOR),
        note_type: card.note_type.clone(),
        field_name: field_name.to_string(),
        field_content,
        highlighted_content,
        matched_rule_index: rule_index,
    }
}
