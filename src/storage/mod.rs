// ABOUTME: Durable storage abstraction for the mapping store's three record families
// ABOUTME: Async backend trait with SQLite and in-memory implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Durable storage
//!
//! Each record family is stored as one serialized document under a stable
//! key. Backends know nothing about the documents' contents; parsing and
//! corruption handling live in the mapping store.

/// In-memory backend with fault injection
pub mod memory;
/// SQLite backend
pub mod sqlite;

pub use memory::InMemoryBackend;
pub use sqlite::SqliteBackend;

use crate::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Independently persisted record families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFamily {
    /// Learned query → exercise bindings
    UserMappings,
    /// Queries that fell through to the generic fallback
    Unmapped,
    /// The statistics singleton
    Statistics,
}

impl RecordFamily {
    /// Every family
    pub const ALL: [Self; 3] = [Self::UserMappings, Self::Unmapped, Self::Statistics];

    /// Storage key
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::UserMappings => "exercise_user_mappings",
            Self::Unmapped => "exercise_unmapped",
            Self::Statistics => "exercise_mapping_stats",
        }
    }
}

impl fmt::Display for RecordFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Key-value persistence for record family documents
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read a family's document, `None` if it was never written
    async fn read_family(&self, family: RecordFamily) -> AppResult<Option<String>>;

    /// Replace a family's document
    async fn write_family(&self, family: RecordFamily, payload: &str) -> AppResult<()>;

    /// Remove every family's document
    async fn clear(&self) -> AppResult<()>;
}
