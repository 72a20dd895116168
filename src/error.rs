use thiserror::Error;

/// Message shown when the backend fails without saying why.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Everything that can end a single search. None of these are fatal to the
/// front-end; the controller returns to idle after each one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Please enter a question")]
    EmptyQuestion,

    /// Connect, DNS, TLS or timeout failure.
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered but reported a non-success status.
    #[error("{0}")]
    Application(String),

    #[error("Invalid response: {0}")]
    MalformedResponse(String),

    #[error("unknown search mode: {0}")]
    InvalidMode(String),

    #[error("unknown transport: {0} (expected `http` or `hosted`)")]
    InvalidTransport(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SearchError::MalformedResponse(e.to_string())
        } else {
            SearchError::Transport(e.to_string())
        }
    }
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;
