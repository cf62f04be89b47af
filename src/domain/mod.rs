// src/domain/mod.rs
pub mod card;
pub mod error;
pub mod profile;
pub mod rule;

pub use card::{CardFields, CardRecord, CardResult, FieldValue, HighlightSpan};
pub use error::{DomainError, LookupError};
pub use profile::{Profile, Settings};
pub use rule::SearchRule;
