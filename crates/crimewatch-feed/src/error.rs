/// Why a fetch produced no records.
///
/// Every variant ends up in the same place: the controller clears the
/// records, logs the error, and the list shows its empty state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx response without an `"error"` field.
    #[error("request failed with HTTP status {status}")]
    Status { status: u16 },

    /// The payload carried an `"error"` field, whatever the status.
    #[error("server reported an error: {message}")]
    Application { message: String },

    /// The body was not a usable `{"data": [...]}` envelope.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The request never produced a response (connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
