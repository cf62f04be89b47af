// src/domain/error.rs
use thiserror::Error;

/// Failure of a call to the card lookup collaborator.
///
/// Display strings carry the collaborator's message unchanged so callers can
/// show it to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{0}")]
    Transport(String),
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },
    #[error("{0}")]
    Api(String),
    #[error("Invalid AnkiConnect response: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Config error: {0}")]
    ConfigError(String),
}
