//! The generation orchestrator.

use fit_core::enums::Difficulty;
use fit_core::responses::GenerationResult;
use fit_db::FitDb;
use fit_model::GenerativeModel;

use crate::context::load_context;
use crate::error::{GenerationError, Stage};
use crate::guard::GenerationGuard;
use crate::prompt::compose_prompt;
use crate::validate::validate_response;

/// Runs the load → prompt → model → validate → persist pipeline.
///
/// Steps run strictly in order and the first failure ends the run; no later
/// step is attempted. Only the persist step writes, so a failed run leaves
/// storage untouched.
pub struct RoutineGenerator<M> {
    db: FitDb,
    model: M,
    guard: GenerationGuard,
}

impl<M: GenerativeModel> RoutineGenerator<M> {
    pub fn new(db: FitDb, model: M) -> Self {
        Self {
            db,
            model,
            guard: GenerationGuard::new(),
        }
    }

    #[must_use]
    pub const fn db(&self) -> &FitDb {
        &self.db
    }

    #[must_use]
    pub const fn guard(&self) -> &GenerationGuard {
        &self.guard
    }

    /// Generate and persist one routine for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the [`GenerationError`] of the first stage that failed, or
    /// [`GenerationError::AlreadyGenerating`] if a run for the same user is
    /// still in flight.
    pub async fn generate_routine(&self, user_id: i64) -> Result<GenerationResult, GenerationError> {
        let result = self.run(user_id).await;
        if let Err(err) = &result {
            tracing::warn!(
                user_id,
                kind = err.kind(),
                stage = %err.stage(),
                error = %err,
                "routine generation failed"
            );
        }
        result
    }

    async fn run(&self, user_id: i64) -> Result<GenerationResult, GenerationError> {
        let _permit = self
            .guard
            .try_acquire(user_id)
            .ok_or(GenerationError::AlreadyGenerating { user_id })?;

        tracing::debug!(user_id, stage = %Stage::LoadingContext, "generation started");
        let ctx = load_context(&self.db, user_id).await?;

        tracing::debug!(
            user_id,
            stage = %Stage::ComposingPrompt,
            catalog = ctx.catalog.len()
        );
        let prompt = compose_prompt(&ctx.user, &ctx.catalog);

        tracing::debug!(user_id, stage = %Stage::CallingModel, prompt_chars = prompt.len());
        let raw = self
            .model
            .generate_content(&prompt)
            .await
            .map_err(GenerationError::ModelUnavailable)?;

        tracing::debug!(user_id, stage = %Stage::Validating, reply_chars = raw.len());
        let routine = validate_response(&raw, &ctx.catalog)?;

        let difficulty = Difficulty::for_experience(ctx.user.experience_level.as_deref());
        tracing::debug!(
            user_id,
            stage = %Stage::Persisting,
            exercises = routine.exercises.len(),
            %difficulty
        );
        let persisted = self
            .db
            .create_routine(
                &ctx.user,
                &routine.exercises,
                &routine.routine_name,
                &routine.description,
                difficulty,
            )
            .await
            .map_err(GenerationError::Persistence)?;

        tracing::debug!(user_id, routine_id = persisted.id, stage = %Stage::Done);
        Ok(GenerationResult {
            routine_id: persisted.id,
            routine_name: persisted.name,
            description: persisted.description,
            exercises_count: routine.exercises.len(),
        })
    }
}
