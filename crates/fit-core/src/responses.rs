//! Response types handed back to the layer that triggered generation.
//!
//! Field names are camelCase on the wire to match what HTTP clients of the
//! wider application already consume.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of a successful `generate_routine` call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub routine_id: i64,
    pub routine_name: String,
    pub description: String,
    pub exercises_count: usize,
}

/// Machine-readable failure body for a failed `generate_routine` call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerationFailure {
    /// Stable snake_case error code (e.g. `no_valid_exercises`).
    pub error: String,
    /// Pipeline stage that failed.
    pub stage: String,
    /// Human-readable message.
    pub message: String,
}
