use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;

/// A generated exercise reference that passed catalog validation, with
/// defaults applied. `order_index` is 1-based and gap-free.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ValidatedExercise {
    pub id_exercise: i64,
    pub sets: i64,
    pub reps: String,
    pub rest: i64,
    pub order_index: i64,
    pub reason: String,
}

/// A persisted routine. Never exists without at least one `RoutineExercise`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Routine {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub difficulty_level: Difficulty,
    pub created_at: DateTime<Utc>,
}

/// A persisted exercise slot within a routine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoutineExercise {
    pub id: i64,
    pub routine_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: String,
    pub rest_seconds: i64,
    pub order_index: i64,
    pub reason: String,
}

/// A routine together with its exercises in `order_index` order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoutineDetail {
    pub routine: Routine,
    pub exercises: Vec<RoutineExercise>,
}
