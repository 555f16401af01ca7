//! Routine repository: atomic creation of a routine with its exercises,
//! plus readback.
//!
//! A routine row must never be observable without its exercise rows. Both are
//! written inside one transaction on a dedicated connection; if any statement
//! fails the transaction is rolled back before the error is returned, and the
//! connection is released on every path when it goes out of scope.

use chrono::{DateTime, Utc};

use fit_core::entities::{Routine, RoutineDetail, RoutineExercise, UserContext, ValidatedExercise};
use fit_core::enums::Difficulty;

use crate::FitDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};

/// Goal stored when the profile has none.
pub const FALLBACK_GOAL: &str = "maintain";

const ROUTINE_COLS: &str = "id, user_id, name, description, goal, difficulty_level, created_at";

const EXERCISE_COLS: &str =
    "id, routine_id, exercise_id, sets, reps, rest_seconds, order_index, reason";

fn row_to_routine(row: &libsql::Row) -> Result<Routine, DatabaseError> {
    Ok(Routine {
        id: row.get(0)?,
        user_id: row.get::<Option<i64>>(1)?,
        name: row.get(2)?,
        description: get_opt_string(row, 3)?.unwrap_or_default(),
        goal: row.get(4)?,
        difficulty_level: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn row_to_exercise(row: &libsql::Row) -> Result<RoutineExercise, DatabaseError> {
    Ok(RoutineExercise {
        id: row.get(0)?,
        routine_id: row.get(1)?,
        exercise_id: row.get(2)?,
        sets: row.get(3)?,
        reps: row.get(4)?,
        rest_seconds: row.get(5)?,
        order_index: row.get(6)?,
        reason: get_opt_string(row, 7)?.unwrap_or_default(),
    })
}

/// Values for the parent row, resolved before the transaction opens.
struct NewRoutine<'a> {
    user_id: i64,
    name: &'a str,
    description: &'a str,
    goal: &'a str,
    difficulty: Difficulty,
    created_at: DateTime<Utc>,
}

impl FitDb {
    /// Persist a generated routine and all of its exercises atomically.
    ///
    /// The routine is assigned to `user`, stores the user's goal (or
    /// [`FALLBACK_GOAL`]), and keeps each exercise's `order_index`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if `exercises` is empty (a routine
    /// may not exist without exercises), or any libSQL error raised while
    /// writing. On error nothing is persisted.
    pub async fn create_routine(
        &self,
        user: &UserContext,
        exercises: &[ValidatedExercise],
        name: &str,
        description: &str,
        difficulty: Difficulty,
    ) -> Result<Routine, DatabaseError> {
        if exercises.is_empty() {
            return Err(DatabaseError::InvalidState(
                "a routine needs at least one exercise".into(),
            ));
        }

        let new = NewRoutine {
            user_id: user.user_id,
            name,
            description,
            goal: user
                .goal
                .as_deref()
                .filter(|g| !g.trim().is_empty())
                .unwrap_or(FALLBACK_GOAL),
            difficulty,
            created_at: Utc::now(),
        };

        // IMMEDIATE takes the write lock up front so a concurrent writer waits
        // on the busy timeout instead of failing at lock upgrade.
        let conn = self.connect().await?;
        let tx = conn
            .transaction_with_behavior(libsql::TransactionBehavior::Immediate)
            .await?;

        let routine_id = match insert_routine_rows(&tx, &new, exercises).await {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!(user_id = new.user_id, %error, "routine write failed, rolling back");
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::error!(%rollback_error, "rollback failed");
                }
                return Err(error);
            }
        };
        if let Err(error) = tx.commit().await {
            // A failed COMMIT can leave the transaction open on the connection,
            // which for an in-memory database is the shared primary one.
            tracing::warn!(user_id = new.user_id, %error, "routine commit failed, rolling back");
            if let Err(rollback_error) = conn.execute_batch("ROLLBACK").await {
                tracing::debug!(%rollback_error, "no transaction left to roll back");
            }
            return Err(error.into());
        }

        tracing::info!(
            user_id = new.user_id,
            routine_id,
            exercises = exercises.len(),
            "routine persisted"
        );

        Ok(Routine {
            id: routine_id,
            user_id: Some(new.user_id),
            name: new.name.to_string(),
            description: new.description.to_string(),
            goal: new.goal.to_string(),
            difficulty_level: new.difficulty,
            created_at: new.created_at,
        })
    }

    /// Load a routine with its exercises in `order_index` order.
    pub async fn get_routine(&self, id: i64) -> Result<RoutineDetail, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {ROUTINE_COLS} FROM routines WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let routine = row_to_routine(&row)?;

        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {EXERCISE_COLS} FROM routine_exercises
                     WHERE routine_id = ?1 ORDER BY order_index"
                ),
                [id],
            )
            .await?;
        let mut exercises = Vec::new();
        while let Some(row) = rows.next().await? {
            exercises.push(row_to_exercise(&row)?);
        }

        Ok(RoutineDetail { routine, exercises })
    }

    /// A user's routines, newest first.
    pub async fn list_routines_for_user(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<Routine>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {ROUTINE_COLS} FROM routines
                     WHERE user_id = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2"
                ),
                libsql::params![user_id, limit],
            )
            .await?;

        let mut routines = Vec::new();
        while let Some(row) = rows.next().await? {
            routines.push(row_to_routine(&row)?);
        }
        Ok(routines)
    }
}

/// Columns bound per `routine_exercises` row.
const EXERCISE_PARAMS: usize = 7;

/// Rows per multi-row insert, kept well below SQLite's bound-parameter limit.
const EXERCISE_ROWS_PER_INSERT: usize = 100;

/// Step 1: the routine row. Step 2: the exercise rows, batched into
/// multi-row inserts on the same transaction.
async fn insert_routine_rows(
    tx: &libsql::Transaction,
    new: &NewRoutine<'_>,
    exercises: &[ValidatedExercise],
) -> Result<i64, DatabaseError> {
    tx.execute(
        "INSERT INTO routines (user_id, name, description, goal, difficulty_level, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        libsql::params![
            new.user_id,
            new.name,
            new.description,
            new.goal,
            new.difficulty.as_str(),
            new.created_at.to_rfc3339()
        ],
    )
    .await?;
    let routine_id = tx.last_insert_rowid();

    for batch in exercises.chunks(EXERCISE_ROWS_PER_INSERT) {
        insert_exercise_batch(tx, routine_id, batch).await?;
    }

    Ok(routine_id)
}

async fn insert_exercise_batch(
    tx: &libsql::Transaction,
    routine_id: i64,
    batch: &[ValidatedExercise],
) -> Result<(), DatabaseError> {
    let placeholders: Vec<String> = (0..batch.len())
        .map(|row| {
            let cols: Vec<String> = (1..=EXERCISE_PARAMS)
                .map(|col| format!("?{}", row * EXERCISE_PARAMS + col))
                .collect();
            format!("({})", cols.join(", "))
        })
        .collect();

    let mut params: Vec<libsql::Value> = Vec::with_capacity(batch.len() * EXERCISE_PARAMS);
    for exercise in batch {
        params.push(routine_id.into());
        params.push(exercise.id_exercise.into());
        params.push(exercise.sets.into());
        params.push(exercise.reps.clone().into());
        params.push(exercise.rest.into());
        params.push(exercise.order_index.into());
        params.push(exercise.reason.clone().into());
    }

    tx.execute(
        &format!(
            "INSERT INTO routine_exercises
             (routine_id, exercise_id, sets, reps, rest_seconds, order_index, reason)
             VALUES {}",
            placeholders.join(", ")
        ),
        libsql::params_from_iter(params),
    )
    .await?;
    Ok(())
}
