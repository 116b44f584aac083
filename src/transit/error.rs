//! Errors from fetching and normalizing departures.

use thiserror::Error;

/// Failure while getting departures from the provider.
///
/// Nothing here is retried; each variant reaches the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitError {
    /// No provider credentials are configured.
    #[error("no API key configured (set METROLINX_API_KEY or transit.api_key)")]
    MissingApiKey,

    /// Network failure or timeout talking to the provider.
    #[error("request to departure provider failed: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("departure provider returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The provider's body was not JSON.
    #[error("departure provider returned invalid JSON: {0}")]
    Body(String),

    /// A departure carried a time that does not match `YYYY-MM-DD HH:MM:SS`.
    #[error("departure time '{time}' does not match YYYY-MM-DD HH:MM:SS")]
    InvalidTime {
        /// The raw time string.
        time: String,
    },
}
