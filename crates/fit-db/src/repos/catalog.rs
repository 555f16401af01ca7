//! Exercise catalog repository.
//!
//! The catalog is the closed vocabulary generated routines may reference.
//! It is read fresh for every generation.

use fit_core::entities::CatalogEntry;

use crate::FitDb;
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;

fn row_to_entry(row: &libsql::Row) -> Result<CatalogEntry, DatabaseError> {
    Ok(CatalogEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        difficulty: get_opt_string(row, 2)?,
    })
}

impl FitDb {
    pub async fn create_exercise(&self, entry: &CatalogEntry) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO exercises (id, name, difficulty) VALUES (?1, ?2, ?3)",
                libsql::params![entry.id, entry.name.as_str(), entry.difficulty.as_deref()],
            )
            .await?;
        Ok(())
    }

    /// Every catalog entry, ordered by id.
    pub async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT id, name, difficulty FROM exercises ORDER BY id", ())
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }
}
