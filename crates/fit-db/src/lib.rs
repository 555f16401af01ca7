//! # fit-db
//!
//! libSQL storage for fitgen.
//!
//! Holds the relational state the routine generator reads and writes: users
//! and their profiles, the exercise catalog, and generated routines with
//! their ordered exercises. A routine and its exercises are only ever written
//! together inside one transaction (see [`repos::routine`]).

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

use error::DatabaseError;
use fit_config::DatabaseConfig;
use libsql::Builder;

const MEMORY_PATH: &str = ":memory:";

/// Central database handle for fitgen state.
///
/// Wraps a libSQL database and a primary connection used for reads. Writes
/// that need a transaction take their own connection via [`FitDb::connect`]
/// so concurrent generations never share a transaction scope.
pub struct FitDb {
    db: libsql::Database,
    conn: libsql::Connection,
    busy_timeout_ms: u64,
    in_memory: bool,
}

impl FitDb {
    /// Open a local database at the given path with the default busy timeout.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open(&DatabaseConfig {
            path: path.to_string(),
            ..DatabaseConfig::default()
        })
        .await
    }

    /// Open the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened, the
    /// connection pragmas fail, or migrations fail.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(&config.path).build().await?;
        let conn = db.connect()?;
        configure_connection(&conn, config.busy_timeout_ms).await?;

        let fit_db = Self {
            db,
            conn,
            busy_timeout_ms: config.busy_timeout_ms,
            in_memory: config.path == MEMORY_PATH,
        };
        fit_db.run_migrations().await?;
        tracing::debug!(path = %config.path, "database opened");
        Ok(fit_db)
    }

    /// Access the primary libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Acquire a connection dedicated to one unit of work.
    ///
    /// An in-memory database only exists behind its primary connection, so
    /// that connection is shared instead; concurrent transactions against an
    /// in-memory database are therefore not supported.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be opened or
    /// configured.
    pub async fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        if self.in_memory {
            return Ok(self.conn.clone());
        }
        let conn = self.db.connect()?;
        configure_connection(&conn, self.busy_timeout_ms).await?;
        Ok(conn)
    }
}

/// Foreign keys and busy timeout are per-connection settings in SQLite.
async fn configure_connection(
    conn: &libsql::Connection,
    busy_timeout_ms: u64,
) -> Result<(), DatabaseError> {
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {busy_timeout_ms};"
    ))
    .await
    .map_err(|e| DatabaseError::Migration(format!("connection pragmas: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod test_support;
