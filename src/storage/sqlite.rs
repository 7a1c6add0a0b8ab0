// ABOUTME: SQLite storage backend persisting each record family as one JSON document row
// ABOUTME: Creates its table on connect and upserts documents with ON CONFLICT
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{RecordFamily, StorageBackend};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// Storage backend over a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Connect to `database_url`, creating the file and table when missing
    ///
    /// In-memory URLs get a single long-lived connection, since every SQLite
    /// connection to `:memory:` opens a distinct database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be opened,
    /// or the schema cannot be created
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::config(format!("Invalid database URL {database_url}: {e}"))
            })?
            .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open {database_url}: {e}")))?;

        let backend = Self::new(pool);
        backend.migrate().await?;
        info!(database_url, "Mapping store database ready");
        Ok(backend)
    }

    /// Wrap an existing pool; call [`Self::migrate`] before use
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the family table if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_mapping_families (
                family TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create mapping table: {e}")))?;
        Ok(())
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageBackend for SqliteBackend {
    async fn read_family(&self, family: RecordFamily) -> AppResult<Option<String>> {
        let row = sqlx::query(
            r"
            SELECT payload
            FROM exercise_mapping_families
            WHERE family = $1
            ",
        )
        .bind(family.key())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read {family}: {e}")))?;

        row.map(|r| r.try_get::<String, _>("payload"))
            .transpose()
            .map_err(|e| AppError::database(format!("Failed to decode {family}: {e}")))
    }

    async fn write_family(&self, family: RecordFamily, payload: &str) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO exercise_mapping_families (family, payload, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(family) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(family.key())
        .bind(payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to write {family}: {e}")))?;

        debug!(%family, bytes = payload.len(), "Persisted record family");
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM exercise_mapping_families")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear mapping table: {e}")))?;
        Ok(())
    }
}
