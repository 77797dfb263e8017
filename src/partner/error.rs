//! Errors returned by the Steam partner client.

use thiserror::Error;

/// Errors that can occur while building, sending or decoding a partner request.
///
/// Nothing is recovered internally: every variant surfaces to the caller of
/// [`SteamPartner`](crate::partner::SteamPartner) as-is.
#[derive(Debug, Error)]
pub enum PartnerError {
    /// The client was constructed with an unusable configuration.
    #[error("invalid partner configuration: {0}")]
    Configuration(String),

    /// The HTTP request failed (connection, timeout or non-success status).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body is not valid JSON or does not match the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A call contract was violated, e.g. an empty endpoint name.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// No achievement was supplied to a stats submission.
    #[error("at least one achievement is required")]
    EmptyAchievements,
}
