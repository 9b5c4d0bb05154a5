use thiserror::Error;

/// Failure of a single provider call.
///
/// Every variant is terminal for the call that produced it; callers log it
/// and substitute fallback data instead of retrying.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx response (`status` set) or network failure (`status` empty)
    #[error("transport error: {message}")]
    Transport { status: Option<u16>, message: String },

    /// Client-side timeout fired and the request was aborted
    #[error("request aborted after {after_ms}ms")]
    Timeout { after_ms: u64 },

    /// Response body did not have the expected shape
    #[error("invalid response: {0}")]
    Schema(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Schema(e.to_string())
        } else {
            FetchError::Transport {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        }
    }
}
