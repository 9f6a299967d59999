//! SQLite persistence layer.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime.

mod encode;
mod repository;
mod schema;

use std::path::Path;

use crate::error::AppError;

/// The records store, backed by a single SQLite connection.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) a store at `path` and run schema initialization.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let conn = tokio_rusqlite::Connection::open(path).await?;
        let db = Self { conn };
        db.init_schema().await?;
        Ok(db)
    }

    /// Open an in-memory store — useful for testing.
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let conn = tokio_rusqlite::Connection::open_in_memory().await?;
        let db = Self { conn };
        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), AppError> {
        self.conn
            .call(|conn| {
                conn.execute_batch(schema::SCHEMA)?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Cheap connectivity probe for the health endpoint.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.conn
            .call(|conn| {
                conn.query_row("SELECT 1", [], |_| Ok(()))?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}
