//! Error types for taylor-chat

use thiserror::Error;

/// Result type alias using taylor-chat Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a chat turn
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint rejected the request for rate limiting
    #[error("Rate limited: too many requests")]
    RateLimited,

    /// Endpoint rejected the request for quota/billing exhaustion
    #[error("Quota exhausted: payment required")]
    QuotaExhausted,

    /// Endpoint returned a non-success response
    #[error("API error: {message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// A turn was started while another was still streaming
    #[error("A turn is already in progress")]
    TurnInProgress,
}

impl Error {
    /// Classify a failed response by status code and message tokens.
    ///
    /// Rate limiting and quota exhaustion get distinct variants so callers
    /// can present them separately; everything else is a generic API error.
    pub fn classify(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        let msg = message.to_lowercase();

        if status == Some(429)
            || msg.contains("429")
            || msg.contains("too many requests")
            || msg.contains("rate limit")
        {
            return Error::RateLimited;
        }
        if status == Some(402)
            || msg.contains("402")
            || msg.contains("payment required")
            || msg.contains("quota")
            || msg.contains("billing")
        {
            return Error::QuotaExhausted;
        }

        Error::Api { status, message }
    }

    /// Check if this is a rate-limit failure
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited)
    }

    /// Check if this is a quota/billing failure
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, Error::QuotaExhausted)
    }
}
