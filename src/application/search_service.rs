// src/application/search_service.rs
use crate::application::{CardBrowser, CardLookup, CardSearcher};
use crate::domain::{CardResult, DomainError, Profile, Settings};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Outcome of a profile search as handed to a frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Results { results: Vec<CardResult> },
    Error { error: String },
}

impl SearchResponse {
    pub fn results(&self) -> &[CardResult] {
        match self {
            SearchResponse::Results { results } => results,
            SearchResponse::Error { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchResponse::Results { .. } => None,
            SearchResponse::Error { error } => Some(error),
        }
    }
}

/// Resolves profiles to rule sets and runs searches against a lookup source.
pub struct SearchService<L: CardLookup> {
    lookup: L,
    settings: Settings,
    profiles: Vec<Profile>,
}

impl<L: CardLookup> SearchService<L> {
    pub fn new(lookup: L, settings: Settings, profiles: Vec<Profile>) -> Self {
        Self {
            lookup,
            settings,
            profiles,
        }
    }

    pub fn profile(&self, profile_id: &str) -> Result<&Profile, DomainError> {
        self.profiles
            .iter()
            .find(|p| p.id == profile_id)
            .ok_or_else(|| DomainError::ProfileNotFound(profile_id.to_string()))
    }

    /// Search with the rules of `profile_id`, or the active profile.
    pub async fn search_cards(
        &mut self,
        search_text: &str,
        profile_id: Option<&str>,
    ) -> Result<Vec<CardResult>, DomainError> {
        let profile_id = profile_id
            .unwrap_or(&self.settings.active_profile_id)
            .to_string();
        let rules = self.profile(&profile_id)?.search_rules.clone();

        if !self.settings.anki_connect_endpoint.is_empty() {
            let endpoint = self.settings.anki_connect_endpoint.clone();
            self.lookup.set_endpoint(&endpoint);
        }

        info!(profile = %profile_id, rules = rules.len(), "Searching cards");
        let results = CardSearcher::new(&self.lookup)
            .search(search_text, &rules)
            .await?;
        Ok(results)
    }

    /// Like `search_cards`, but folds any failure into the response.
    #[instrument(level = "debug", skip(self))]
    pub async fn search(&mut self, search_text: &str, profile_id: Option<&str>) -> SearchResponse {
        match self.search_cards(search_text, profile_id).await {
            Ok(results) => SearchResponse::Results { results },
            Err(e) => {
                error!(error = %e, "Search failed");
                SearchResponse::Error {
                    error: e.to_string(),
                }
            }
        }
    }
}

impl<L: CardLookup + CardBrowser> SearchService<L> {
    /// Show a single card in Anki's card browser.
    pub async fn open_card(&self, card_id: i64) -> Result<(), DomainError> {
        let query = format!("cid:{}", card_id);
        debug!(%query, "Opening card in Anki browser");
        self.lookup.browse(&query).await?;
        Ok(())
    }
}
