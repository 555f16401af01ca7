//! Shared test utilities for fit-db unit tests.

use fit_core::entities::CatalogEntry;
use tempfile::TempDir;

use crate::FitDb;
use crate::repos::user::ProfileFields;

/// Open a file-backed database in a fresh temp dir.
///
/// The `TempDir` must outlive the database.
pub async fn file_db() -> (TempDir, FitDb) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fitgen.db");
    let db = FitDb::open_local(path.to_str().unwrap()).await.unwrap();
    (dir, db)
}

/// Insert catalog entries with the given ids, named `exercise-<id>`.
pub async fn seed_catalog(db: &FitDb, ids: &[i64]) {
    for &id in ids {
        db.create_exercise(&CatalogEntry {
            id,
            name: format!("exercise-{id}"),
            difficulty: Some("medium".into()),
        })
        .await
        .unwrap();
    }
}

/// Create a user with a profile at the given experience level.
pub async fn seed_user(db: &FitDb, experience_level: Option<&str>) -> i64 {
    let user_id = db.create_user("Test User").await.unwrap();
    db.upsert_profile(
        user_id,
        &ProfileFields {
            goal: Some("gain_muscle".into()),
            experience_level: experience_level.map(String::from),
            lifestyle: Some("active".into()),
            gender: None,
        },
    )
    .await
    .unwrap();
    user_id
}
