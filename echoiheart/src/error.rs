//! Error types for the station directory client

/// Result type alias for station directory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the station directory client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed (connection, timeout, non-2xx status, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response did not match the expected JSON shape
    ///
    /// Carries the raw payload for diagnosis.
    #[error("Failed to parse JSON: {payload}")]
    Parse {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The station detail endpoint returned no hit for a search result
    #[error("Station not found: {0}")]
    StationNotFound(i64),

    /// Configuration error (from echoconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a parse error from the offending payload
    pub fn parse(payload: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            payload: payload.into(),
            source,
        }
    }
}

impl From<Error> for echosource::ClientError {
    fn from(err: Error) -> Self {
        echosource::ClientError::extension(err)
    }
}
