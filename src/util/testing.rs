// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{CardBrowser, CardLookup};
use crate::domain::{CardFields, CardRecord, LookupError};

/// Build a `CardRecord` with note id `card_id * 10` and note type "Basic".
pub fn card(card_id: i64, deck_name: &str, fields: CardFields) -> CardRecord {
    CardRecord {
        card_id,
        note_id: card_id * 10,
        deck_name: deck_name.to_string(),
        note_type: "Basic".to_string(),
        fields,
    }
}

/// Shared mock lookup source for testing searches without a running Anki.
///
/// Queries without a configured result match nothing. Every call is
/// recorded so tests can assert which queries were issued.
///
/// # Examples
///
/// ```
/// use ankifind::domain::CardFields;
/// use ankifind::util::testing::{card, MockCardLookup};
///
/// let mock = MockCardLookup::builder()
///     .with_query_result(r#"Front:"*atp*""#, vec![101])
///     .with_card(card(101, "Biology", CardFields::new().with("Front", "ATP")))
///     .build();
/// ```
pub struct MockCardLookup {
    query_results: HashMap<String, Result<Vec<i64>, LookupError>>,
    cards: HashMap<i64, CardRecord>,
    details_failure: Option<LookupError>,
    queries: Mutex<Vec<String>>,
    detail_requests: Mutex<Vec<Vec<i64>>>,
    browsed: Mutex<Vec<String>>,
    endpoint: Option<String>,
}

impl MockCardLookup {
    pub fn builder() -> MockCardLookupBuilder {
        MockCardLookupBuilder::new()
    }

    /// Queries passed to `find_card_ids`, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Id lists passed to `card_details`, in call order
    pub fn detail_requests(&self) -> Vec<Vec<i64>> {
        self.detail_requests.lock().map(|d| d.clone()).unwrap_or_default()
    }

    pub fn browsed(&self) -> Vec<String> {
        self.browsed.lock().map(|b| b.clone()).unwrap_or_default()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

#[async_trait]
impl CardLookup for MockCardLookup {
    async fn find_card_ids(&self, query: &str) -> Result<Vec<i64>, LookupError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        self.query_results
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn card_details(&self, card_ids: &[i64]) -> Result<Vec<CardRecord>, LookupError> {
        if let Ok(mut requests) = self.detail_requests.lock() {
            requests.push(card_ids.to_vec());
        }
        if let Some(e) = &self.details_failure {
            return Err(e.clone());
        }
        Ok(card_ids
            .iter()
            .filter_map(|id| self.cards.get(id).cloned())
            .collect())
    }

    fn set_endpoint(&mut self, endpoint: &str) {
        self.endpoint = Some(endpoint.to_string());
    }
}

#[async_trait]
impl CardBrowser for MockCardLookup {
    async fn browse(&self, query: &str) -> Result<Vec<i64>, LookupError> {
        if let Ok(mut browsed) = self.browsed.lock() {
            browsed.push(query.to_string());
        }
        Ok(Vec::new())
    }
}

/// Builder for MockCardLookup
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockCardLookupBuilder {
    query_results: HashMap<String, Result<Vec<i64>, LookupError>>,
    cards: HashMap<i64, CardRecord>,
    details_failure: Option<LookupError>,
}

impl MockCardLookupBuilder {
    pub fn new() -> Self {
        Self {
            query_results: HashMap::new(),
            cards: HashMap::new(),
            details_failure: None,
        }
    }

    /// Configure the card ids returned for an exact query string
    pub fn with_query_result(mut self, query: &str, card_ids: Vec<i64>) -> Self {
        self.query_results.insert(query.to_string(), Ok(card_ids));
        self
    }

    /// Configure `find_card_ids` to fail for an exact query string
    pub fn with_query_failure(mut self, query: &str, error: LookupError) -> Self {
        self.query_results.insert(query.to_string(), Err(error));
        self
    }

    /// Add a card that `card_details` can return
    pub fn with_card(mut self, card: CardRecord) -> Self {
        self.cards.insert(card.card_id, card);
        self
    }

    /// Configure every `card_details` call to fail
    pub fn with_details_failure(mut self, error: LookupError) -> Self {
        self.details_failure = Some(error);
        self
    }

    pub fn build(self) -> MockCardLookup {
        MockCardLookup {
            query_results: self.query_results,
            cards: self.cards,
            details_failure: self.details_failure,
            queries: Mutex::new(Vec::new()),
            detail_requests: Mutex::new(Vec::new()),
            browsed: Mutex::new(Vec::new()),
            endpoint: None,
        }
    }
}

impl Default for MockCardLookupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "want"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
