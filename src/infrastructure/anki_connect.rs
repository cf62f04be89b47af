// src/infrastructure/anki_connect.rs
use crate::application::{CardBrowser, CardLookup};
use crate::constants::{ANKI_CONNECT_VERSION, DEFAULT_ANKI_CONNECT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::domain::{CardRecord, LookupError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

#[derive(Debug, Serialize)]
struct Request<'a> {
    action: &'a str,
    version: u8,
    params: Value,
}

/// AnkiConnect reply: exactly one of `result` and `error` is meaningful.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

impl<T> Envelope<T> {
    fn into_result(self, action: &str) -> Result<T, LookupError> {
        if let Some(message) = self.error {
            return Err(LookupError::Api(message));
        }
        self.result
            .ok_or_else(|| LookupError::Decode(format!("'{}' returned no result", action)))
    }
}

/// Client for the AnkiConnect add-on's HTTP API.
#[derive(Debug, Clone)]
pub struct AnkiConnectClient {
    client: Client,
    endpoint: String,
}

impl AnkiConnectClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn with_default_endpoint() -> Result<Self, LookupError> {
        Self::new(
            DEFAULT_ANKI_CONNECT_ENDPOINT,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(level = "debug", skip(self, params))]
    async fn invoke<T: DeserializeOwned>(&self, action: &str, params: Value) -> Result<T, LookupError> {
        let request = Request {
            action,
            version: ANKI_CONNECT_VERSION,
            params,
        };

        let result = self.send(&request).await;
        if let Err(e) = &result {
            error!(action, error = %e, "AnkiConnect request failed");
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, request: &Request<'_>) -> Result<T, LookupError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;
        envelope.into_result(request.action)
    }

    pub async fn find_cards(&self, query: &str) -> Result<Vec<i64>, LookupError> {
        self.invoke("findCards", json!({ "query": query })).await
    }

    /// Details for `card_ids`. Ids Anki doesn't know come back as `{}` and
    /// are dropped.
    pub async fn cards_info(&self, card_ids: &[i64]) -> Result<Vec<CardRecord>, LookupError> {
        let raw: Vec<Value> = self.invoke("cardsInfo", json!({ "cards": card_ids })).await?;
        parse_cards_info(raw)
    }

    pub async fn deck_names(&self) -> Result<Vec<String>, LookupError> {
        self.invoke("deckNames", json!({})).await
    }

    pub async fn model_names(&self) -> Result<Vec<String>, LookupError> {
        self.invoke("modelNames", json!({})).await
    }

    pub async fn model_field_names(&self, model_name: &str) -> Result<Vec<String>, LookupError> {
        self.invoke("modelFieldNames", json!({ "modelName": model_name }))
            .await
    }

    /// Open Anki's card browser on `query`; returns the ids it shows.
    pub async fn gui_browse(&self, query: &str) -> Result<Vec<i64>, LookupError> {
        self.invoke("guiBrowse", json!({ "query": query })).await
    }

    pub async fn version(&self) -> Result<u32, LookupError> {
        self.invoke("version", json!({})).await
    }
}

fn parse_cards_info(raw: Vec<Value>) -> Result<Vec<CardRecord>, LookupError> {
    let total = raw.len();
    let cards = raw
        .into_iter()
        .filter(|entry| entry.get("cardId").is_some())
        .map(|entry| serde_json::from_value(entry).map_err(|e| LookupError::Decode(e.to_string())))
        .collect::<Result<Vec<CardRecord>, _>>()?;

    if cards.len() < total {
        warn!(missing = total - cards.len(), "Some cards were not found");
    }
    debug!(count = cards.len(), "Parsed card details");
    Ok(cards)
}

#[async_trait]
impl CardLookup for AnkiConnectClient {
    async fn find_card_ids(&self, query: &str) -> Result<Vec<i64>, LookupError> {
        self.find_cards(query).await
    }

    async fn card_details(&self, card_ids: &[i64]) -> Result<Vec<CardRecord>, LookupError> {
        self.cards_info(card_ids).await
    }

    fn set_endpoint(&mut self, endpoint: &str) {
        debug!(endpoint, "Setting AnkiConnect endpoint");
        self.endpoint = endpoint.to_string();
    }
}

#[async_trait]
impl CardBrowser for AnkiConnectClient {
    async fn browse(&self, query: &str) -> Result<Vec<i64>, LookupError> {
        self.gui_browse(query).await
    }
}
