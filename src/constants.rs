// src/constants.rs
//
// Application-wide constants. Each constant is documented with its purpose
// and usage context.

/// Endpoint AnkiConnect listens on out of the box.
///
/// Used in: `domain/profile.rs`, `infrastructure/anki_connect.rs`
pub const DEFAULT_ANKI_CONNECT_ENDPOINT: &str = "http://localhost:8765";

/// AnkiConnect API version sent with every request.
///
/// Version 6 is the first one that wraps every reply in a `{result, error}`
/// envelope, which `AnkiConnectClient` relies on.
///
/// Used in: `infrastructure/anki_connect.rs`
pub const ANKI_CONNECT_VERSION: u8 = 6;

/// Request timeout for AnkiConnect calls.
///
/// Used in: `domain/profile.rs`
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Id of the profile created when no configuration exists.
///
/// Used in: `domain/profile.rs`
pub const DEFAULT_PROFILE_ID: &str = "default";

/// Separator Anki uses between parent and child deck names.
///
/// Used in: `application/card_searcher.rs`
pub const DECK_HIERARCHY_SEPARATOR: &str = "::";

/// Separator shown to users in place of `DECK_HIERARCHY_SEPARATOR`.
///
/// Used in: `application/card_searcher.rs`
pub const DECK_DISPLAY_SEPARATOR: &str = " / ";

/// Delay in milliseconds after launching the browser before the process may
/// exit and remove the temporary HTML file.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
