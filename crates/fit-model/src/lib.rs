//! # fit-model
//!
//! The generative text model boundary for fitgen.
//!
//! [`GenerativeModel`] is the prompt-in/text-out seam the routine generator
//! depends on; it is injected at construction time so tests can substitute a
//! scripted double. [`GeminiClient`] implements it against the Gemini
//! `generateContent` REST endpoint.
//!
//! The client makes exactly one request per call: no retry, no caching, no
//! deduplication. Nothing here judges the returned text; callers must
//! validate it before trusting it.

mod error;
mod gemini;
mod http;

pub use error::ModelError;
pub use gemini::GeminiClient;

use std::future::Future;

/// A generative text model: one prompt in, one raw text reply out.
pub trait GenerativeModel: Send + Sync {
    /// Send `prompt` and return the model's raw reply text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when the service cannot be reached, rejects the
    /// request, or returns an envelope without a candidate.
    fn generate_content(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;
}
