use http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between the proxy and the origin.
///
/// None of these ever reach the store: a failed fetch caches nothing.
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("failed to build origin client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid origin URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("origin request timed out")]
    Timeout,

    #[error("origin request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("origin responded with status {0}")]
    Status(StatusCode),

    #[error("origin response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
}

impl From<reqwest::Error> for OriginError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            OriginError::Timeout
        } else {
            OriginError::Transport(e)
        }
    }
}

impl OriginError {
    /// Status relayed to the client: the origin's own status when one was
    /// received, otherwise a generic server error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            OriginError::Status(status) => *status,
            OriginError::Transport(e) => e.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            OriginError::BodyTooLarge { .. } => StatusCode::BAD_GATEWAY,
            OriginError::ClientBuild(_) | OriginError::InvalidUrl { .. } | OriginError::Timeout => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
