//! # mediawiki-api
//!
//! A blocking client library for the MediaWiki action api.
//!
//! This library provides utilities for:
//! - Issuing GET/POST actions against an `api.php` endpoint
//! - Turning embedded api error payloads into typed errors
//! - Authenticating a user session (legacy two-step login, logout)
//! - Fetching and caching anti-forgery tokens per token type
//!
//! Cookie handling lives in the HTTP transport; the default transport is a
//! cookie-enabled reqwest client, and anything else implementing
//! [`ApiTransport`] can be injected instead.
//!
//! ## Usage
//!
//! ```no_run
//! use mediawiki_api::{ApiUser, MediawikiApi};
//!
//! let mut api = MediawikiApi::new("https://en.wikipedia.org/w/api.php")
//!     .expect("Failed to create api client");
//!
//! api.login(&ApiUser::new("Alice", "hunter2"))
//!     .expect("Failed to log in");
//!
//! let token = api.get_edit_token().expect("Failed to fetch edit token");
//! let response = api
//!     .post_action("edit", &[
//!         ("title", "Sandbox"),
//!         ("text", "Hello"),
//!         ("token", &token),
//!     ])
//!     .expect("Failed to edit");
//! # let _ = response;
//! ```

pub mod errors;
pub mod networking;
pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used items for convenience
pub use errors::MediawikiError;
pub use networking::{
    ApiTransport, ApiUser, HttpTransport, MediawikiApi, MediawikiSession, create_client,
};
