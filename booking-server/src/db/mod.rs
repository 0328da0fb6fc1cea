//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) holding reservation documents.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "koenji";
const DATABASE: &str = "booking";

/// Open (or create) the embedded database at the given path
pub async fn open(path: &Path) -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    tracing::info!("Database ready (embedded SurrealDB at {})", path.display());
    Ok(db)
}
