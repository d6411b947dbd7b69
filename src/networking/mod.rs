//! # Networking
//!
//! Networking for the MediaWiki action api.
//!
//! This module provides:
//! - HTTP client configuration with cookie support
//! - GET/POST action dispatch with api error checking
//! - Authentication (login, logout, token management)
//!
//! ## Usage - Blocking (default)
//!
//! ```no_run
//! use mediawiki_api::networking::{ApiUser, MediawikiApi};
//!
//! // Create an api client for a wiki
//! let mut api = MediawikiApi::new("https://en.wikipedia.org/w/api.php")
//!     .expect("Failed to create api client");
//!
//! // Log in
//! api.login(&ApiUser::new("Alice", "hunter2"))
//!     .expect("Failed to log in");
//!
//! // Fetch an edit token for write actions
//! let token = api.get_edit_token().expect("Failed to fetch edit token");
//! ```

// Module declarations
pub mod auth;
pub mod client;

// Re-export commonly used items for convenience
pub use auth::blocking::{ApiUser, MediawikiSession};
pub use client::blocking::{ApiTransport, HttpTransport, MediawikiApi, create_client};

// Re-export types from dependencies for convenience
pub use reqwest::Error as NetworkError;
pub use reqwest::blocking::Client;
