//! Generative model endpoint configuration.

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

/// Default request timeout in seconds. A generation that exceeds it is
/// reported as a model failure.
const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// API key sent with every `generateContent` request.
    #[serde(default)]
    pub api_key: String,

    /// Model name (e.g., `gemini-1.5-flash`).
    #[serde(default = "default_model")]
    pub model: String,

    /// Endpoint root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    /// Check if the model config has the minimum required fields for a request.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.model.is_empty() && !self.base_url.is_empty()
    }
}
