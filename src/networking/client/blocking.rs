//! Blocking HTTP dispatch for the MediaWiki action api

use crate::errors::MediawikiError;
use crate::networking::auth::blocking::MediawikiSession;
use crate::utils::merge_action;
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Create a configured HTTP client for api operations
///
/// Cookie persistence is required for session continuity: the wiki tracks
/// the authenticated session through cookies set during login.
///
/// # Returns
/// * Returns a configured reqwest Client
///
/// # Example
/// ```no_run
/// use mediawiki_api::networking::create_client;
/// let client = create_client("my-bot/0.1").expect("Failed to create client");
/// ```
pub fn create_client(useragent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .cookie_store(true)
        .timeout(Duration::new(30, 0))
        .user_agent(useragent)
        .build()
}

/// A transport able to deliver a flat parameter map to the api endpoint and
/// hand back the decoded JSON body.
///
/// The default implementation is [`HttpTransport`]; tests and embedders with
/// their own HTTP stack can inject anything else through
/// [`MediawikiApi::with_transport`].
pub trait ApiTransport {
    /// Send the parameters as a GET query string.
    fn get(&self, params: &HashMap<String, String>) -> Result<Value, MediawikiError>;
    /// Send the parameters as a POST form body.
    fn post(&self, params: &HashMap<String, String>) -> Result<Value, MediawikiError>;
}

/// reqwest-backed [`ApiTransport`] pointed at a single `api.php` endpoint.
pub struct HttpTransport {
    client: Client,
    api_url: Url,
}

impl HttpTransport {
    pub fn new(client: Client, api_url: Url) -> Self {
        HttpTransport { client, api_url }
    }

    // The api answers in its legacy XML format unless told otherwise.
    fn wire_params(&self, params: &HashMap<String, String>) -> HashMap<String, String> {
        let mut wire = params.clone();
        wire.entry("format".to_string())
            .or_insert_with(|| "json".to_string());
        wire
    }
}

impl ApiTransport for HttpTransport {
    fn get(&self, params: &HashMap<String, String>) -> Result<Value, MediawikiError> {
        debug!("GET {} {:?}", self.api_url, params);
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&self.wire_params(params))
            .send()?;
        Ok(response.json()?)
    }

    fn post(&self, params: &HashMap<String, String>) -> Result<Value, MediawikiError> {
        debug!("POST {} {:?}", self.api_url, params);
        let response = self
            .client
            .post(self.api_url.clone())
            .form(&self.wire_params(params))
            .send()?;
        Ok(response.json()?)
    }
}

/// Error payload embedded in an otherwise well-formed api response.
#[derive(Deserialize, Debug)]
struct ApiErrorPayload {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

/// Client for the MediaWiki action api.
///
/// Dispatches named actions over GET or POST, converts embedded error
/// payloads into [`MediawikiError::Usage`], and owns the session state
/// (login identity and token cache).
///
/// State-mutating operations take `&mut self`; wrap the value in a lock to
/// share it across threads.
///
/// # Example
/// ```no_run
/// use mediawiki_api::MediawikiApi;
///
/// let mut api = MediawikiApi::new("https://en.wikipedia.org/w/api.php")
///     .expect("Failed to create api client");
/// let response = api.get_action("query", &[("meta", "siteinfo")])
///     .expect("Failed to query siteinfo");
/// ```
pub struct MediawikiApi {
    transport: Box<dyn ApiTransport>,
    pub(crate) session: MediawikiSession,
}

impl std::fmt::Debug for MediawikiApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediawikiApi")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl MediawikiApi {
    /// Build a client for the given `api.php` endpoint with the default
    /// cookie-enabled transport.
    ///
    /// Fails before any network activity if the url does not parse or the
    /// HTTP client cannot be constructed.
    pub fn new(api_url: &str) -> Result<Self, MediawikiError> {
        let api_url = Url::parse(api_url)?;
        let useragent = concat!("mediawiki-api-rs/", env!("CARGO_PKG_VERSION"));
        let client = create_client(useragent)?;
        Ok(Self::with_transport(Box::new(HttpTransport::new(
            client, api_url,
        ))))
    }

    /// Build a client around a caller-supplied transport.
    pub fn with_transport(transport: Box<dyn ApiTransport>) -> Self {
        MediawikiApi {
            transport,
            session: MediawikiSession::new(),
        }
    }

    /// Perform a GET action against the api
    ///
    /// # Arguments
    /// * `action` - the api action name, e.g. `"query"`
    /// * `params` - additional parameters for the action
    ///
    /// # Returns
    /// * Returns the decoded response, or a `Usage` error if the wiki
    ///   answered with an error payload
    pub fn get_action(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, MediawikiError> {
        let result = self.transport.get(&merge_action(action, params))?;
        check_for_usage_error(result)
    }

    /// Perform a POST action against the api
    ///
    /// # Arguments
    /// * `action` - the api action name, e.g. `"edit"`
    /// * `params` - additional parameters for the action
    ///
    /// # Returns
    /// * Returns the decoded response, or a `Usage` error if the wiki
    ///   answered with an error payload
    pub fn post_action(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, MediawikiError> {
        let result = self.transport.post(&merge_action(action, params))?;
        check_for_usage_error(result)
    }
}

/// Every response goes through here before it reaches the caller.
fn check_for_usage_error(result: Value) -> Result<Value, MediawikiError> {
    if let Some(payload) = result.as_object().and_then(|object| object.get("error")) {
        let payload: ApiErrorPayload = serde_json::from_value(payload.clone())?;
        return Err(MediawikiError::usage(payload.code, payload.info));
    }
    Ok(result)
}
