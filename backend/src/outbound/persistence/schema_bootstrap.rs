//! One-shot schema creation for a fresh catalog database.
//!
//! The catalog has no migration history; tables are created at startup when
//! absent and left untouched otherwise.

use diesel_async::SimpleAsyncConnection;
use tracing::info;

use super::pool::{DbPool, PoolError};

const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS "user" (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name TEXT NOT NULL,
    email TEXT NOT NULL,
    picture TEXT
);
CREATE UNIQUE INDEX IF NOT EXISTS user_email_key ON "user" (email);
CREATE TABLE IF NOT EXISTS category (
    category_id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_name TEXT NOT NULL,
    user_id INTEGER NOT NULL REFERENCES "user" (user_id)
);
CREATE TABLE IF NOT EXISTS item (
    item_id INTEGER PRIMARY KEY AUTOINCREMENT,
    item_name TEXT NOT NULL,
    item_description TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES category (category_id),
    user_id INTEGER NOT NULL REFERENCES "user" (user_id)
);
CREATE INDEX IF NOT EXISTS item_category_idx ON item (category_id);
"#;

/// Errors raised while creating the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaBootstrapError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("failed to create catalog schema: {message}")]
    Ddl { message: String },
}

/// Create the catalog tables if they do not exist yet.
///
/// # Errors
///
/// Returns an error when no connection is available or the DDL fails.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), SchemaBootstrapError> {
    let mut conn = pool.get().await?;
    conn.batch_execute(CREATE_SCHEMA)
        .await
        .map_err(|err| SchemaBootstrapError::Ddl {
            message: err.to_string(),
        })?;
    info!("catalog schema ready");
    Ok(())
}
