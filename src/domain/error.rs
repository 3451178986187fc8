//! Client Errors
//!
//! Every failure the client can surface. Nothing here is retried internally;
//! the caller decides what to do with each variant.

/// Errors returned by the AMap client and its cache-aside executor.
#[derive(Debug, thiserror::Error)]
pub enum AmapError {
    /// Cache key parameters could not be serialized.
    #[error("failed to encode cache key parameters: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("http request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-200 status.
    #[error("unexpected http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// HTTP 200 but the API reported a logical failure.
    #[error("api error: {info} (code: {infocode})")]
    UpstreamApi { info: String, infocode: String },

    /// A successful response carried a body that does not match the schema.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl AmapError {
    /// Whether repeating the same call might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AmapError::Network(_))
    }
}
