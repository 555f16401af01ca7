//! End-to-end generation runs against a file-backed database and scripted
//! model doubles.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fit_config::ModelConfig;
use fit_core::entities::CatalogEntry;
use fit_core::enums::Difficulty;
use fit_db::FitDb;
use fit_db::repos::user::ProfileFields;
use fit_model::{GeminiClient, GenerativeModel, ModelError};
use fit_routine::{GenerationError, RoutineGenerator, Stage};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tokio::sync::Notify;

// ── Doubles ────────────────────────────────────────────────────────

/// Replies from a fixed script and records every prompt it was sent.
#[derive(Clone, Default)]
struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<Result<String, ModelError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedModel {
    fn replying(reply: &str) -> Self {
        let model = Self::default();
        model.push(Ok(reply.to_string()));
        model
    }

    fn failing(err: ModelError) -> Self {
        let model = Self::default();
        model.push(Err(err));
        model
    }

    fn push(&self, reply: Result<String, ModelError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl GenerativeModel for ScriptedModel {
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Parse("script exhausted".into())))
    }
}

/// Signals when called, then blocks until released.
struct GatedModel {
    entered: Arc<Notify>,
    release: Arc<Notify>,
    reply: String,
}

impl GenerativeModel for GatedModel {
    async fn generate_content(&self, _prompt: &str) -> Result<String, ModelError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.reply.clone())
    }
}

/// Removes a catalog exercise while "thinking", so the reply references a
/// row that no longer exists by the time it is persisted.
struct CatalogShrinkingModel {
    db_path: String,
    removed_id: i64,
    reply: String,
}

impl GenerativeModel for CatalogShrinkingModel {
    async fn generate_content(&self, _prompt: &str) -> Result<String, ModelError> {
        let db = FitDb::open_local(&self.db_path).await.unwrap();
        db.conn()
            .execute("DELETE FROM exercises WHERE id = ?1", [self.removed_id])
            .await
            .unwrap();
        Ok(self.reply.clone())
    }
}

// ── Fixtures ───────────────────────────────────────────────────────

const PLAN_A: &str = r#"{"routineName":"Plan A","description":"d","exercises":[{"id_exercise":1,"sets":4,"reps":"8-10","rest":60,"reason":"core"},{"id_exercise":99,"sets":3}]}"#;

async fn open_db() -> (TempDir, String, FitDb) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fitgen.db").to_str().unwrap().to_string();
    let db = FitDb::open_local(&path).await.unwrap();
    (dir, path, db)
}

async fn seed_catalog(db: &FitDb, ids: &[i64]) {
    for &id in ids {
        db.create_exercise(&CatalogEntry {
            id,
            name: format!("Exercise {id}"),
            difficulty: Some("medium".into()),
        })
        .await
        .unwrap();
    }
}

async fn seed_user(db: &FitDb, experience: Option<&str>) -> i64 {
    let user_id = db.create_user("Ana").await.unwrap();
    db.upsert_profile(
        user_id,
        &ProfileFields {
            goal: Some("lose_weight".into()),
            experience_level: experience.map(Into::into),
            lifestyle: Some("active".into()),
            gender: Some("female".into()),
        },
    )
    .await
    .unwrap();
    user_id
}

async fn count(db: &FitDb, table: &str) -> i64 {
    let mut rows = db
        .conn()
        .query(&format!("SELECT COUNT(*) FROM {table}"), ())
        .await
        .unwrap();
    rows.next().await.unwrap().unwrap().get(0).unwrap()
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn plan_a_persists_only_catalog_exercises() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1, 2]).await;
    let user_id = seed_user(&db, Some("beginner")).await;
    let model = ScriptedModel::replying(PLAN_A);

    let generator = RoutineGenerator::new(db, model.clone());
    let result = generator.generate_routine(user_id).await.unwrap();

    assert_eq!(result.routine_name, "Plan A");
    assert_eq!(result.description, "d");
    assert_eq!(result.exercises_count, 1);

    let detail = generator.db().get_routine(result.routine_id).await.unwrap();
    assert_eq!(detail.routine.user_id, Some(user_id));
    assert_eq!(detail.routine.goal, "lose_weight");
    assert_eq!(detail.routine.difficulty_level, Difficulty::Easy);
    assert_eq!(detail.exercises.len(), 1);

    let ex = &detail.exercises[0];
    assert_eq!(ex.exercise_id, 1);
    assert_eq!(ex.sets, 4);
    assert_eq!(ex.reps, "8-10");
    assert_eq!(ex.rest_seconds, 60);
    assert_eq!(ex.order_index, 1);
    assert_eq!(ex.reason, "core");

    let prompt = model.last_prompt();
    assert!(prompt.contains("- id: 1 | name: Exercise 1 | difficulty: medium"));
    assert!(prompt.contains("- id: 2 | name: Exercise 2 | difficulty: medium"));
}

#[tokio::test]
async fn advanced_user_gets_hard_routine() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1]).await;
    let user_id = seed_user(&db, Some("advanced")).await;

    let generator = RoutineGenerator::new(db, ScriptedModel::replying(PLAN_A));
    let result = generator.generate_routine(user_id).await.unwrap();

    let detail = generator.db().get_routine(result.routine_id).await.unwrap();
    assert_eq!(detail.routine.difficulty_level, Difficulty::Hard);
}

#[tokio::test]
async fn unknown_experience_gets_medium_routine() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1]).await;
    let user_id = seed_user(&db, Some("weekend warrior")).await;

    let generator = RoutineGenerator::new(db, ScriptedModel::replying(PLAN_A));
    let result = generator.generate_routine(user_id).await.unwrap();

    let detail = generator.db().get_routine(result.routine_id).await.unwrap();
    assert_eq!(detail.routine.difficulty_level, Difficulty::Medium);
}

#[tokio::test]
async fn malformed_reply_persists_nothing() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1, 2]).await;
    let user_id = seed_user(&db, None).await;

    let generator = RoutineGenerator::new(db, ScriptedModel::replying("not json"));
    let err = generator.generate_routine(user_id).await.unwrap_err();

    assert!(matches!(err, GenerationError::MalformedResponse(_)));
    assert_eq!(err.stage(), Stage::Validating);
    assert_eq!(count(generator.db(), "routines").await, 0);
}

#[tokio::test]
async fn fully_hallucinated_reply_persists_nothing() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1, 2, 3]).await;
    let user_id = seed_user(&db, None).await;
    let reply = r#"{"exercises":[{"id_exercise":10},{"id_exercise":11},{"id_exercise":12},{"id_exercise":13},{"id_exercise":14}]}"#;

    let generator = RoutineGenerator::new(db, ScriptedModel::replying(reply));
    let err = generator.generate_routine(user_id).await.unwrap_err();

    assert!(matches!(err, GenerationError::NoValidExercises { dropped: 5 }));
    assert_eq!(count(generator.db(), "routines").await, 0);
    assert_eq!(count(generator.db(), "routine_exercises").await, 0);
}

#[tokio::test]
async fn model_failure_is_model_unavailable() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1]).await;
    let user_id = seed_user(&db, None).await;
    let model = ScriptedModel::failing(ModelError::Api {
        status: 503,
        message: "overloaded".into(),
    });

    let generator = RoutineGenerator::new(db, model.clone());
    let err = generator.generate_routine(user_id).await.unwrap_err();

    assert_eq!(err.kind(), "model_unavailable");
    assert_eq!(err.stage(), Stage::CallingModel);
    assert_eq!(model.calls(), 1, "no retry");
    assert_eq!(count(generator.db(), "routines").await, 0);
}

#[tokio::test]
async fn model_timeout_is_model_unavailable() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1]).await;
    let user_id = seed_user(&db, None).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });
    let client = GeminiClient::new(&ModelConfig {
        api_key: "k".into(),
        base_url: format!("http://{addr}"),
        timeout_secs: 1,
        ..ModelConfig::default()
    })
    .unwrap();

    let generator = RoutineGenerator::new(db, client);
    let err = generator.generate_routine(user_id).await.unwrap_err();
    server.abort();

    match &err {
        GenerationError::ModelUnavailable(ModelError::Http(e)) => assert!(e.is_timeout()),
        other => panic!("expected model timeout, got {other:?}"),
    }
    assert_eq!(err.kind(), "model_unavailable");
    assert_eq!(err.stage(), Stage::CallingModel);
    assert_eq!(count(generator.db(), "routines").await, 0);
}

#[tokio::test]
async fn missing_user_never_calls_model() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1]).await;
    let model = ScriptedModel::replying(PLAN_A);

    let generator = RoutineGenerator::new(db, model.clone());
    let err = generator.generate_routine(12345).await.unwrap_err();

    assert!(matches!(err, GenerationError::NotFound { user_id: 12345 }));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn empty_catalog_never_calls_model() {
    let (_dir, _path, db) = open_db().await;
    let user_id = seed_user(&db, None).await;
    let model = ScriptedModel::replying(PLAN_A);

    let generator = RoutineGenerator::new(db, model.clone());
    let err = generator.generate_routine(user_id).await.unwrap_err();

    assert!(matches!(err, GenerationError::EmptyCatalog));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn persistence_failure_rolls_back_routine() {
    let (_dir, path, db) = open_db().await;
    seed_catalog(&db, &[1, 2]).await;
    let user_id = seed_user(&db, None).await;
    let model = CatalogShrinkingModel {
        db_path: path,
        removed_id: 2,
        reply: r#"{"exercises":[{"id_exercise":1},{"id_exercise":2}]}"#.into(),
    };

    let generator = RoutineGenerator::new(db, model);
    let err = generator.generate_routine(user_id).await.unwrap_err();

    assert_eq!(err.kind(), "persistence_failure");
    assert_eq!(err.stage(), Stage::Persisting);
    assert_eq!(count(generator.db(), "routines").await, 0);
    assert_eq!(count(generator.db(), "routine_exercises").await, 0);
}

#[tokio::test]
async fn concurrent_run_for_same_user_is_rejected() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1]).await;
    let user_id = seed_user(&db, None).await;
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let model = GatedModel {
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
        reply: PLAN_A.into(),
    };
    let generator = RoutineGenerator::new(db, model);

    let (first, second) = tokio::join!(generator.generate_routine(user_id), async {
        entered.notified().await;
        let second = generator.generate_routine(user_id).await;
        release.notify_one();
        second
    });

    assert!(first.is_ok());
    assert!(matches!(
        second,
        Err(GenerationError::AlreadyGenerating { user_id: id }) if id == user_id
    ));
    assert!(!generator.guard().is_active(user_id));
    assert_eq!(count(generator.db(), "routines").await, 1);
}

#[tokio::test]
async fn permit_is_released_after_failure() {
    let (_dir, _path, db) = open_db().await;
    seed_catalog(&db, &[1]).await;
    let user_id = seed_user(&db, None).await;
    let model = ScriptedModel::replying("");
    model.push(Ok(PLAN_A.to_string()));

    let generator = RoutineGenerator::new(db, model);
    let err = generator.generate_routine(user_id).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));

    let result = generator.generate_routine(user_id).await.unwrap();
    assert_eq!(result.exercises_count, 1);
}
