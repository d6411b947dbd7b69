//! HTTP dispatch for the api client

pub mod blocking;

pub use blocking::{ApiTransport, HttpTransport, MediawikiApi, create_client};
