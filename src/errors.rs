use thiserror::Error;

/// Errors surfaced by the api client.
///
/// `Usage` is the recoverable case: the wiki answered, but with an error
/// payload (or a classifiable login failure). Everything else is either a
/// transport problem or a malformed response.
#[derive(Error, Debug)]
pub enum MediawikiError {
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("api error {code}: {message}")]
    Usage { code: String, message: String },
    #[error("invalid api url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("{0}")]
    GenericError(String),
}

impl MediawikiError {
    /// Build a `Usage` error from the code/info pair of an api error payload.
    pub fn usage(code: impl Into<String>, message: impl Into<String>) -> Self {
        MediawikiError::Usage {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The machine-readable error code, for `Usage` errors.
    pub fn code(&self) -> Option<&str> {
        match self {
            MediawikiError::Usage { code, .. } => Some(code),
            _ => None,
        }
    }
}
