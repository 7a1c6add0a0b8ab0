// ABOUTME: Exercise catalog record and the similarity primitive's match output
// ABOUTME: Read-only values handed out by the external catalog collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::iter;

/// A canonical exercise in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Stable catalog identifier (e.g. `bench-press`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Alternative names users and generators use for this exercise
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Primary muscles worked, informational only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_muscles: Vec<String>,
}

impl ExerciseRecord {
    /// Create a record with the given id, name, and aliases
    pub fn new(id: impl Into<String>, name: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: aliases.iter().map(|a| (*a).to_owned()).collect(),
            primary_muscles: Vec::new(),
        }
    }

    /// Attach primary muscles
    #[must_use]
    pub fn with_muscles(mut self, muscles: &[&str]) -> Self {
        self.primary_muscles = muscles.iter().map(|m| (*m).to_owned()).collect();
        self
    }

    /// Name followed by every alias
    pub fn names(&self) -> impl Iterator<Item = &str> {
        iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Best alias match reported by a similarity primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasMatch {
    /// Catalog id of the matched exercise
    pub catalog_id: String,
    /// The alias (or name) that matched
    pub alias: String,
    /// Which strategy produced the match, e.g. `exact_alias`
    pub matched_by: String,
    /// Similarity score, 0.0-1.0
    pub score: f64,
}
