//! Authentication and session state for the api client

pub mod blocking;

pub use blocking::{ApiUser, MediawikiSession};
