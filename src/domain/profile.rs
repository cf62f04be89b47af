// src/domain/profile.rs
use crate::constants::{DEFAULT_ANKI_CONNECT_ENDPOINT, DEFAULT_PROFILE_ID, DEFAULT_TIMEOUT_SECS};
use crate::domain::SearchRule;
use serde::{Deserialize, Serialize};

/// Named, ordered set of search rules.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub search_rules: Vec<SearchRule>,
}

impl Profile {
    /// The profile installed on first use: one rule that matches any field.
    pub fn default_profile() -> Self {
        Self {
            id: DEFAULT_PROFILE_ID.to_string(),
            name: "Default".to_string(),
            search_rules: vec![SearchRule::any().with_field("")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_endpoint")]
    pub anki_connect_endpoint: String,
    #[serde(default = "default_profile_id")]
    pub active_profile_id: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String { DEFAULT_ANKI_CONNECT_ENDPOINT.to_string() }
fn default_profile_id() -> String { DEFAULT_PROFILE_ID.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

impl Default for Settings {
    fn default() -> Self {
        Self {
            anki_connect_endpoint: default_endpoint(),
            active_profile_id: default_profile_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
