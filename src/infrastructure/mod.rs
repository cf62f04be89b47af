// src/infrastructure/mod.rs
pub mod anki_connect;
pub mod config;
pub mod renderer;

pub use anki_connect::AnkiConnectClient;
pub use config::Config;
