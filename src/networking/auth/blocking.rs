//! Blocking authentication and session state for the api client
use crate::errors::MediawikiError;
use crate::networking::client::blocking::MediawikiApi;
use crate::utils::str_field;
use log::debug;
use std::collections::HashMap;

/// Credentials for api authentication
#[derive(Debug, Clone)]
pub struct ApiUser {
    pub username: Box<str>,
    pub password: Box<str>,
}

impl ApiUser {
    pub fn new(username: impl Into<Box<str>>, password: impl Into<Box<str>>) -> Self {
        ApiUser {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Authenticated-user state and the token cache.
///
/// Owned by [`MediawikiApi`]; mutations go through the login, logout and
/// token operations so the two fields stay consistent.
#[derive(Debug, Default)]
pub struct MediawikiSession {
    logged_in: Option<String>,
    tokens: HashMap<String, String>,
}

impl MediawikiSession {
    pub fn new() -> Self {
        MediawikiSession::default()
    }

    /// The username of the authenticated user, if any.
    pub fn is_logged_in(&self) -> Option<&str> {
        self.logged_in.as_deref()
    }

    pub(crate) fn cached_token(&self, token_type: &str) -> Option<&str> {
        self.tokens.get(token_type).map(String::as_str)
    }

    pub(crate) fn cache_token(&mut self, token_type: &str, token: String) {
        self.tokens.insert(token_type.to_string(), token);
    }

    pub(crate) fn clear_tokens(&mut self) {
        self.tokens.clear();
    }

    pub(crate) fn set_logged_in(&mut self, username: String) {
        self.logged_in = Some(username);
    }

    // Dropping the identity invalidates every cached token with it.
    pub(crate) fn set_logged_out(&mut self) {
        self.logged_in = None;
        self.tokens.clear();
    }
}

impl MediawikiApi {
    /// Log in to the wiki
    ///
    /// Performs the legacy two-step handshake: if the first attempt answers
    /// `NeedToken`, the credentials are re-sent exactly once with the
    /// `lgtoken` from that response. Any final result other than `Success`
    /// fails with a `Usage` error whose code is `login-` plus the result.
    ///
    /// # Example
    /// ```no_run
    /// use mediawiki_api::{ApiUser, MediawikiApi};
    /// let mut api = MediawikiApi::new("https://en.wikipedia.org/w/api.php").unwrap();
    /// api.login(&ApiUser::new("Alice", "hunter2")).expect("Failed to log in");
    /// ```
    pub fn login(&mut self, user: &ApiUser) -> Result<(), MediawikiError> {
        // A fresh attempt invalidates whatever session came before it.
        self.session.set_logged_out();

        let first = self.post_action(
            "login",
            &[("lgname", &user.username), ("lgpassword", &user.password)],
        )?;

        let final_response = if login_result(&first)? == "NeedToken" {
            let Some(token) = str_field(&first, &["login", "token"]).map(str::to_string) else {
                return Err(classify_login_failure("NeedToken"));
            };
            debug!("Login needs a token, retrying with lgtoken");
            self.post_action(
                "login",
                &[
                    ("lgname", &user.username),
                    ("lgpassword", &user.password),
                    ("lgtoken", &token),
                ],
            )?
        } else {
            first
        };

        let result = login_result(&final_response)?;
        if result == "Success" {
            debug!("Logged in as {}", user.username);
            self.session.set_logged_in(user.username.to_string());
            return Ok(());
        }
        self.session.set_logged_out();
        Err(classify_login_failure(result))
    }

    /// Log out of the wiki
    ///
    /// # Returns
    /// * Returns true and clears the session state if the wiki confirmed the
    ///   logout with an empty payload; any other payload leaves the session
    ///   untouched and returns false
    pub fn logout(&mut self) -> Result<bool, MediawikiError> {
        let result = self.post_action("logout", &[])?;
        let confirmed = match &result {
            serde_json::Value::Object(members) => members.is_empty(),
            serde_json::Value::Array(items) => items.is_empty(),
            _ => false,
        };
        if confirmed {
            debug!("Logged out");
            self.session.set_logged_out();
            return Ok(true);
        }
        Ok(false)
    }

    /// Get a token of the given type for the current session
    ///
    /// Served from the cache when possible; otherwise fetched through the
    /// `tokens` action and cached for subsequent calls.
    ///
    /// # Arguments
    /// * `token_type` - the token type, e.g. `"edit"` or `"delete"`
    pub fn get_token(&mut self, token_type: &str) -> Result<String, MediawikiError> {
        if let Some(token) = self.session.cached_token(token_type) {
            debug!("Token cache hit for {token_type}");
            return Ok(token.to_string());
        }
        let result = self.post_action("tokens", &[("type", token_type)])?;
        let field = format!("{token_type}token");
        let token = str_field(&result, &["tokens", &field])
            .ok_or_else(|| {
                MediawikiError::GenericError(format!("token response missing tokens.{field}"))
            })?
            .to_string();
        debug!("Fetched {token_type} token");
        self.session.cache_token(token_type, token.clone());
        Ok(token)
    }

    /// Get an edit token, the type most actions need
    pub fn get_edit_token(&mut self) -> Result<String, MediawikiError> {
        self.get_token("edit")
    }

    /// Clears all tokens stored by the api
    pub fn clear_tokens(&mut self) {
        self.session.clear_tokens();
    }

    /// The username of the authenticated user, if any
    pub fn is_logged_in(&self) -> Option<&str> {
        self.session.is_logged_in()
    }
}

fn login_result(response: &serde_json::Value) -> Result<&str, MediawikiError> {
    str_field(response, &["login", "result"]).ok_or_else(|| {
        MediawikiError::GenericError("login response missing login.result".to_string())
    })
}

fn classify_login_failure(result: &str) -> MediawikiError {
    let message = match result {
        "Illegal" => "You provided an illegal username",
        "NotExists" => "The username you provided does not exist",
        "WrongPass" => "The password you provided is incorrect",
        "WrongPluginPass" => "An authentication plugin rejected the password",
        "CreateBlocked" => {
            "The wiki tried to automatically create a new account for you, \
             but your IP address has been blocked from account creation"
        }
        "Throttled" => "You've logged in too many times in a short time",
        "Blocked" => "User is blocked",
        "NeedToken" => "Either you did not provide the login token or the sessionid cookie",
        other => other,
    };
    MediawikiError::usage(format!("login-{result}"), message)
}
