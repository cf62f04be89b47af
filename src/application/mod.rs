// src/application/mod.rs
pub mod card_searcher;
pub mod query_builder;
pub mod search_service;

pub use card_searcher::{CardBrowser, CardLookup, CardSearcher};
pub use search_service::{SearchResponse, SearchService};
