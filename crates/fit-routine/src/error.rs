//! Generation error types and pipeline stages.
//!
//! [`GenerationError`] is the single caller-visible failure type of the
//! pipeline. Component errors (`DatabaseError`, `ModelError`,
//! [`ValidationError`]) are mapped into it by the generator and nowhere else.

use std::fmt;

use fit_core::responses::GenerationFailure;
use fit_db::error::DatabaseError;
use fit_model::ModelError;
use thiserror::Error;

use crate::validate::ValidationError;

/// States of one generation run, in order. A failure in any of them ends the
/// run; the error's [`GenerationError::stage`] tells which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadingContext,
    ComposingPrompt,
    CallingModel,
    Validating,
    Persisting,
    Done,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadingContext => "loading_context",
            Self::ComposingPrompt => "composing_prompt",
            Self::CallingModel => "calling_model",
            Self::Validating => "validating",
            Self::Persisting => "persisting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a routine could not be generated.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The requesting user does not exist.
    #[error("user {user_id} not found")]
    NotFound { user_id: i64 },

    /// The exercise catalog is empty, so nothing could be validated.
    #[error("exercise catalog is empty")]
    EmptyCatalog,

    /// A generation for this user is already running in this process.
    #[error("a routine is already being generated for user {user_id}")]
    AlreadyGenerating { user_id: i64 },

    /// Reading the user or catalog failed.
    #[error("failed to load generation context: {0}")]
    ContextUnavailable(#[source] DatabaseError),

    /// The model could not be reached or refused the request.
    #[error("generative model unavailable: {0}")]
    ModelUnavailable(#[source] ModelError),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model response is not valid JSON: {0}")]
    MalformedResponse(String),

    #[error("model response has an invalid shape: {0}")]
    InvalidShape(String),

    /// Every generated exercise referenced an id outside the catalog.
    #[error("none of the {dropped} generated exercises exist in the catalog")]
    NoValidExercises { dropped: usize },

    /// Writing the routine failed; the transaction was rolled back.
    #[error("failed to persist routine: {0}")]
    Persistence(#[source] DatabaseError),
}

impl GenerationError {
    /// Stable snake_case code for API responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::EmptyCatalog => "empty_catalog",
            Self::AlreadyGenerating { .. } => "already_generating",
            Self::ContextUnavailable(_) => "context_unavailable",
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::EmptyResponse => "empty_response",
            Self::MalformedResponse(_) => "malformed_response",
            Self::InvalidShape(_) => "invalid_shape",
            Self::NoValidExercises { .. } => "no_valid_exercises",
            Self::Persistence(_) => "persistence_failure",
        }
    }

    /// The stage the run was in when it failed. Admission (the per-user
    /// guard) counts as part of loading context.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::NotFound { .. }
            | Self::EmptyCatalog
            | Self::AlreadyGenerating { .. }
            | Self::ContextUnavailable(_) => Stage::LoadingContext,
            Self::ModelUnavailable(_) => Stage::CallingModel,
            Self::EmptyResponse
            | Self::MalformedResponse(_)
            | Self::InvalidShape(_)
            | Self::NoValidExercises { .. } => Stage::Validating,
            Self::Persistence(_) => Stage::Persisting,
        }
    }

    /// Whether retrying the whole generation may succeed without any change
    /// on the caller's side.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotFound { .. } | Self::EmptyCatalog)
    }

    /// Serializable failure body for the triggering layer.
    #[must_use]
    pub fn to_failure(&self) -> GenerationFailure {
        GenerationFailure {
            error: self.kind().to_string(),
            stage: self.stage().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<ValidationError> for GenerationError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyResponse => Self::EmptyResponse,
            ValidationError::Malformed(msg) => Self::MalformedResponse(msg),
            ValidationError::InvalidShape(msg) => Self::InvalidShape(msg),
            ValidationError::NoValidExercises { dropped } => Self::NoValidExercises { dropped },
        }
    }
}
