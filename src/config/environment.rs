// ABOUTME: Environment configuration for the exercise resolver
// ABOUTME: Resolves database URL, catalog source, and fallback exercise id with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::catalog::{default_catalog, ExerciseCatalog, InMemoryCatalog};
use crate::constants::{env_config, exercise_ids, storage};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::storage::SqliteBackend;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// SQLite URL of the mapping store
    pub database_url: String,
    /// JSON catalog file; the built-in catalog is used when `None`
    pub catalog_path: Option<PathBuf>,
    /// Exercise returned by the generic fallback stage
    pub fallback_exercise_id: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            database_url: Self::default_database_url(),
            catalog_path: None,
            fallback_exercise_id: exercise_ids::GENERIC_FALLBACK.to_owned(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but empty
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let database_url = non_empty_var(env_config::DATABASE_URL)?
            .unwrap_or(defaults.database_url);
        let catalog_path = non_empty_var(env_config::CATALOG_PATH)?.map(PathBuf::from);
        let fallback_exercise_id = non_empty_var(env_config::FALLBACK_EXERCISE_ID)?
            .unwrap_or(defaults.fallback_exercise_id);

        let config = Self {
            database_url,
            catalog_path,
            fallback_exercise_id,
        };
        debug!(?config, "Resolver configuration loaded from environment");
        Ok(config)
    }

    /// Ephemeral configuration backed by an in-memory database
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: storage::IN_MEMORY_DATABASE_URL.to_owned(),
            ..Self::default()
        }
    }

    /// `sqlite:` URL under the platform data directory, or `./data` when unknown
    #[must_use]
    pub fn default_database_url() -> String {
        let base = dirs::data_dir().map_or_else(
            || PathBuf::from("./data"),
            |dir| dir.join(storage::DATA_DIR_NAME),
        );
        format!("sqlite:{}", base.join(storage::DATABASE_FILE_NAME).display())
    }

    /// Check the configuration against the catalog it will run with
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback exercise is not in the catalog
    pub fn validate(&self, catalog: &dyn ExerciseCatalog) -> AppResult<()> {
        if catalog.contains(&self.fallback_exercise_id) {
            Ok(())
        } else {
            Err(AppError::new(
                ErrorCode::ConfigInvalid,
                format!(
                    "Fallback exercise '{}' is not in the catalog",
                    self.fallback_exercise_id
                ),
            ))
        }
    }

    /// Load the configured catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed
    pub async fn load_catalog(&self) -> AppResult<InMemoryCatalog> {
        match &self.catalog_path {
            Some(path) => InMemoryCatalog::from_json_file(path).await,
            None => Ok(default_catalog()),
        }
    }

    /// Open the configured SQLite database, creating its directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created
    pub async fn open_storage(&self) -> AppResult<SqliteBackend> {
        if let Some(dir) = self.database_dir() {
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                AppError::storage(format!("Cannot create {}: {e}", dir.display())).with_source(e)
            })?;
        }
        info!(database_url = %self.database_url, "Opening mapping store");
        SqliteBackend::connect(&self.database_url).await
    }

    fn database_dir(&self) -> Option<PathBuf> {
        if self.database_url.contains(":memory:") {
            return None;
        }
        let path = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = path.split('?').next().unwrap_or(path);
        Path::new(path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

fn non_empty_var(name: &str) -> AppResult<Option<String>> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(AppError::new(
            ErrorCode::ConfigMissing,
            format!("{name} is set but empty"),
        )),
        Ok(value) => Ok(Some(value.trim().to_owned())),
        Err(_) => Ok(None),
    }
}
