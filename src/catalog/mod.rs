// ABOUTME: Interfaces to the external exercise catalog, similarity primitive, and text extractor
// ABOUTME: Provides in-memory adapters and the built-in default catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Catalog collaborators
//!
//! The resolver never owns exercise data. It reads from an [`ExerciseCatalog`],
//! asks a [`SimilarityMatcher`] for the best alias hit, and receives candidate
//! strings from an [`ExerciseNameExtractor`]. All three are local, synchronous
//! lookups.

/// Built-in catalog of common exercises
pub mod defaults;
/// Candidate exercise-name extraction from workout text
pub mod extraction;
/// In-memory catalog and exact alias matcher
pub mod memory;

pub use defaults::default_catalog;
pub use extraction::LineExtractor;
pub use memory::{ExactAliasMatcher, InMemoryCatalog};

use crate::models::{AliasMatch, ExerciseRecord};

/// Read-only dictionary of canonical exercises
pub trait ExerciseCatalog: Send + Sync {
    /// Look up an exercise by catalog id
    fn get_by_id(&self, id: &str) -> Option<ExerciseRecord>;

    /// Exercises matching any of the tokens, best match first
    fn search_by_keywords(&self, tokens: &[String]) -> Vec<ExerciseRecord>;

    /// Whether `id` resolves to a record
    fn contains(&self, id: &str) -> bool {
        self.get_by_id(id).is_some()
    }
}

/// Scores free text against catalog aliases
pub trait SimilarityMatcher: Send + Sync {
    /// Best alias match for `free_text`, if any
    fn best_alias_match(&self, free_text: &str) -> Option<AliasMatch>;
}

/// Splits a workout description into candidate exercise names
pub trait ExerciseNameExtractor: Send + Sync {
    /// Candidate names in the order they appear in `text`
    fn extract(&self, text: &str) -> Vec<String>;
}
