//! Cross-cutting error types for fitgen.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ModelError`) are defined in
//! their respective crates. The caller-visible `GenerationError` lives in
//! `fit-routine` where all pipeline errors converge.

use thiserror::Error;

/// Errors that can be raised by any fitgen crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A stored or supplied value is not a member of a closed vocabulary.
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}
