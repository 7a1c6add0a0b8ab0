// ABOUTME: Core data models for exercise-name resolution
// ABOUTME: Re-exports catalog records, learned mapping records, and resolution results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Catalog records and similarity-primitive output
pub mod exercise;

/// Persisted records: user mappings, unmapped observations, statistics
pub mod mapping;

/// Per-call resolution output
pub mod resolution;

pub use exercise::{AliasMatch, ExerciseRecord};
pub use mapping::{Alternative, MappingSource, MappingStatistics, UnmappedObservation, UserMapping};
pub use resolution::{BatchResolution, MatchType, ResolutionResult};

/// Normalize a free-text exercise name into a mapping key
///
/// Lower-cases and trims; inner whitespace is preserved.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
