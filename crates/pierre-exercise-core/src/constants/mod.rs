// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for matching thresholds, fixed catalog ids, and configuration keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! The confidence literals and keyword tables here are tuned values that
//! downstream workout construction depends on. Change them only together
//! with the callers that rely on their exact values.

/// Confidence literals and thresholds of the resolution pipeline
pub mod matching;

/// Fixed catalog ids referenced by the pipeline
pub mod exercise_ids;

/// Movement-pattern keyword tables and stop-words
pub mod keywords;

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Database URL for the mapping store
    pub const DATABASE_URL: &str = "EXERCISE_RESOLVER_DATABASE_URL";
    /// Optional path to a JSON exercise catalog
    pub const CATALOG_PATH: &str = "EXERCISE_CATALOG_PATH";
    /// Optional override of the generic fallback exercise id
    pub const FALLBACK_EXERCISE_ID: &str = "EXERCISE_FALLBACK_ID";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the resolver service
    pub const EXERCISE_RESOLVER: &str = "pierre-exercise-resolver";
}

/// Durable storage defaults
pub mod storage {
    /// Directory (under the platform data dir) holding the mapping database
    pub const DATA_DIR_NAME: &str = "pierre";
    /// File name of the mapping database
    pub const DATABASE_FILE_NAME: &str = "exercise_mappings.db";
    /// In-memory SQLite URL
    pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";
    /// Version written into export documents
    pub const EXPORT_FORMAT_VERSION: u32 = 1;
}
