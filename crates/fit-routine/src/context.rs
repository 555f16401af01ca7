//! Context loading: the user profile and the exercise catalog.

use fit_core::entities::{CatalogEntry, UserContext};
use fit_db::FitDb;

use crate::error::GenerationError;

/// Everything the rest of the pipeline reads from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    pub user: UserContext,
    pub catalog: Vec<CatalogEntry>,
}

/// Load the user's context and the full catalog. Both are read fresh on
/// every call.
///
/// # Errors
///
/// [`GenerationError::NotFound`] for an unknown user,
/// [`GenerationError::EmptyCatalog`] when the catalog has no rows, and
/// [`GenerationError::ContextUnavailable`] if either read fails.
pub async fn load_context(db: &FitDb, user_id: i64) -> Result<GenerationContext, GenerationError> {
    let user = db
        .find_user_context(user_id)
        .await
        .map_err(GenerationError::ContextUnavailable)?
        .ok_or(GenerationError::NotFound { user_id })?;

    let catalog = db
        .list_catalog()
        .await
        .map_err(GenerationError::ContextUnavailable)?;
    if catalog.is_empty() {
        return Err(GenerationError::EmptyCatalog);
    }

    Ok(GenerationContext { user, catalog })
}
