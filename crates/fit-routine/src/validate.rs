//! Validation and normalization of raw model output.
//!
//! Model output is untrusted. It is first read into [`GeneratedDraft`], a
//! shape where every field is optional and loosely typed, and only then
//! turned into [`ValidatedExercise`]s by checking each referenced exercise id
//! against the catalog. Entries with unknown ids are dropped one by one; a
//! draft where nothing survives is rejected as a whole.

use std::collections::HashSet;

use fit_core::entities::{CatalogEntry, ValidatedExercise};
use serde::Deserialize;
use serde_json::{Number, Value};
use thiserror::Error;

pub const DEFAULT_ROUTINE_NAME: &str = "Personalized routine";
pub const DEFAULT_DESCRIPTION: &str = "Routine auto-generated from your profile";
pub const DEFAULT_SETS: i64 = 3;
pub const DEFAULT_REPS: &str = "10";
pub const DEFAULT_REST_SECS: i64 = 90;

const FENCE: &str = "```";

/// Why a model reply was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model response is not valid JSON: {0}")]
    Malformed(String),

    #[error("model response has an invalid shape: {0}")]
    InvalidShape(String),

    #[error("none of the {dropped} generated exercises exist in the catalog")]
    NoValidExercises { dropped: usize },
}

/// One exercise reference exactly as the model claimed it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DraftExercise {
    pub id_exercise: Option<Value>,
    pub sets: Option<Value>,
    pub reps: Option<Value>,
    pub rest: Option<Value>,
    pub reason: Option<Value>,
}

/// The model's reply before any catalog check.
///
/// Entries that are not even objects are kept as `None` so positions and
/// drop counts still reflect what the model sent.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDraft {
    pub routine_name: String,
    pub description: String,
    pub exercises: Vec<Option<DraftExercise>>,
}

/// A fully validated reply, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRoutine {
    pub routine_name: String,
    pub description: String,
    pub exercises: Vec<ValidatedExercise>,
}

/// Validate a raw model reply against the catalog.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the reply is empty, is not JSON, has no
/// usable `exercises` list, or references no catalog exercise at all.
pub fn validate_response(
    raw: &str,
    catalog: &[CatalogEntry],
) -> Result<ValidatedRoutine, ValidationError> {
    let draft = parse_draft(raw)?;
    let exercises = normalize_exercises(&draft.exercises, catalog)?;
    Ok(ValidatedRoutine {
        routine_name: draft.routine_name,
        description: draft.description,
        exercises,
    })
}

/// Remove surrounding whitespace and Markdown code fences (with an optional
/// language tag such as `json`).
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(FENCE) {
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

/// Read raw text into a [`GeneratedDraft`].
///
/// # Errors
///
/// [`ValidationError::EmptyResponse`], [`ValidationError::Malformed`], or
/// [`ValidationError::InvalidShape`] when there is no non-empty `exercises`
/// array.
pub fn parse_draft(raw: &str) -> Result<GeneratedDraft, ValidationError> {
    let text = strip_code_fences(raw);
    if text.is_empty() {
        return Err(ValidationError::EmptyResponse);
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    let Value::Object(mut root) = value else {
        return Err(ValidationError::InvalidShape(
            "expected a JSON object at the top level".into(),
        ));
    };

    let routine_name =
        non_empty_text(root.get("routineName")).unwrap_or_else(|| DEFAULT_ROUTINE_NAME.into());
    let description =
        non_empty_text(root.get("description")).unwrap_or_else(|| DEFAULT_DESCRIPTION.into());

    let exercises = match root.remove("exercises") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => {
            return Err(ValidationError::InvalidShape("\"exercises\" is empty".into()));
        }
        Some(_) => {
            return Err(ValidationError::InvalidShape(
                "\"exercises\" is not an array".into(),
            ));
        }
        None => {
            return Err(ValidationError::InvalidShape(
                "missing \"exercises\" field".into(),
            ));
        }
    };

    Ok(GeneratedDraft {
        routine_name,
        description,
        exercises: exercises
            .into_iter()
            .map(|item| serde_json::from_value(item).ok())
            .collect(),
    })
}

/// Keep the draft entries whose id is in the catalog, in their original
/// order, renumbered from 1, with defaults filled in.
///
/// # Errors
///
/// [`ValidationError::NoValidExercises`] if no entry survives.
pub fn normalize_exercises(
    drafts: &[Option<DraftExercise>],
    catalog: &[CatalogEntry],
) -> Result<Vec<ValidatedExercise>, ValidationError> {
    let whitelist: HashSet<i64> = catalog.iter().map(|entry| entry.id).collect();

    let mut kept = Vec::with_capacity(drafts.len());
    let mut dropped = Vec::new();
    let mut order_index = 0_i64;

    for (position, draft) in drafts.iter().enumerate() {
        let id = draft
            .as_ref()
            .and_then(|d| d.id_exercise.as_ref())
            .and_then(coerce_integer)
            .filter(|id| whitelist.contains(id));
        let (Some(draft), Some(id_exercise)) = (draft, id) else {
            dropped.push(position + 1);
            continue;
        };

        order_index += 1;
        kept.push(ValidatedExercise {
            id_exercise,
            sets: positive_or(draft.sets.as_ref(), DEFAULT_SETS),
            reps: reps_text(draft.reps.as_ref()),
            rest: positive_or(draft.rest.as_ref(), DEFAULT_REST_SECS),
            order_index,
            reason: match &draft.reason {
                Some(Value::String(s)) => s.clone(),
                _ => String::new(),
            },
        });
    }

    if !dropped.is_empty() {
        tracing::warn!(
            dropped_positions = ?dropped,
            kept = kept.len(),
            "discarded generated exercises not present in the catalog"
        );
    }
    if kept.is_empty() {
        return Err(ValidationError::NoValidExercises {
            dropped: dropped.len(),
        });
    }
    Ok(kept)
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Integers, integral floats, and numeric strings (`7`, `7.0`, `" 7 "`).
#[allow(clippy::cast_possible_truncation)]
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Absent, zero, negative, or non-numeric values take the default.
fn positive_or(value: Option<&Value>, default: i64) -> i64 {
    value
        .and_then(coerce_integer)
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn reps_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f > 0.0) => number_text(n),
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => DEFAULT_REPS.to_string(),
    }
}

/// Decimal form of a JSON number; integral floats drop the trailing `.0`.
#[allow(clippy::cast_possible_truncation)]
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}
