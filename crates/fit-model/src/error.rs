//! Model client error types.

use thiserror::Error;

/// Errors that can occur while asking the generative model for content.
///
/// Every variant means the model could not be used for this attempt; none of
/// them says anything about the quality of a reply.
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP transport error, including request timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The endpoint returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response envelope could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model produced no candidate (typically a blocked prompt).
    #[error("model returned no candidates (block reason: {})", .block_reason.as_deref().unwrap_or("none"))]
    NoCandidates {
        /// Block reason reported in the prompt feedback, if any.
        block_reason: Option<String>,
    },
}
