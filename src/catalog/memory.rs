// ABOUTME: In-memory exercise catalog with keyword search, loadable from JSON files
// ABOUTME: Also provides ExactAliasMatcher, a lookup-only similarity matcher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ExerciseCatalog, SimilarityMatcher};
use crate::errors::{AppError, AppResult};
use crate::matching::tokens::tokenize;
use crate::models::{normalize_query, AliasMatch, ExerciseRecord};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: HashMap<String, ExerciseRecord>,
}

impl InMemoryCatalog {
    /// Build a catalog from records; later duplicates of an id replace earlier ones
    #[must_use]
    pub fn new(records: Vec<ExerciseRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self { records }
    }

    /// Parse a JSON array of exercise records
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid record array
    pub fn from_json(json: &str) -> AppResult<Self> {
        let records: Vec<ExerciseRecord> = serde_json::from_str(json)
            .map_err(|e| AppError::invalid_format(format!("Invalid exercise catalog: {e}")))?;
        Ok(Self::new(records))
    }

    /// Load a JSON catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub async fn from_json_file(path: &Path) -> AppResult<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::config(format!("Cannot read catalog {}: {e}", path.display()))
                .with_source(e)
        })?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), exercises = catalog.len(), "Loaded exercise catalog");
        Ok(catalog)
    }

    /// Number of exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record, in no particular order
    pub fn records(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.records.values()
    }

    /// Wrap in an `Arc` for sharing with the resolver
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn keyword_hits(record: &ExerciseRecord, tokens: &[String]) -> usize {
        let haystack: Vec<String> = record.names().map(str::to_lowercase).collect();
        tokens
            .iter()
            .filter(|token| haystack.iter().any(|name| name.contains(token.as_str())))
            .count()
    }
}

impl ExerciseCatalog for InMemoryCatalog {
    fn get_by_id(&self, id: &str) -> Option<ExerciseRecord> {
        self.records.get(id).cloned()
    }

    fn search_by_keywords(&self, tokens: &[String]) -> Vec<ExerciseRecord> {
        let tokens: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &ExerciseRecord)> = self
            .records
            .values()
            .map(|record| (Self::keyword_hits(record, &tokens), record))
            .filter(|(hits, _)| *hits > 0)
            .collect();

        scored.sort_by(|(a_hits, a), (b_hits, b)| {
            b_hits.cmp(a_hits).then_with(|| a.name.cmp(&b.name))
        });
        debug!(tokens = ?tokens, hits = scored.len(), "Catalog keyword search");

        scored.into_iter().map(|(_, record)| record.clone()).collect()
    }
}

/// Similarity matcher that only reports exact name or alias hits
///
/// Queries are compared after normalization and token re-joining, so
/// `"Bench-Press"` matches the alias `"bench press"`. A hit scores 1.0.
#[derive(Debug, Clone)]
pub struct ExactAliasMatcher {
    index: HashMap<String, (String, String)>,
}

impl ExactAliasMatcher {
    /// Index every name and alias of the catalog
    #[must_use]
    pub fn new(catalog: &InMemoryCatalog) -> Self {
        let mut index = HashMap::new();
        let mut records: Vec<&ExerciseRecord> = catalog.records().collect();
        // Deterministic winner when two exercises share an alias
        records.sort_by(|a, b| b.id.cmp(&a.id));
        for record in records {
            for name in record.names() {
                index.insert(Self::key(name), (record.id.clone(), name.to_owned()));
            }
        }
        Self { index }
    }

    fn key(text: &str) -> String {
        tokenize(&normalize_query(text)).join(" ")
    }
}

impl SimilarityMatcher for ExactAliasMatcher {
    fn best_alias_match(&self, free_text: &str) -> Option<AliasMatch> {
        let key = Self::key(free_text);
        if key.is_empty() {
            return None;
        }
        self.index.get(&key).map(|(catalog_id, alias)| AliasMatch {
            catalog_id: catalog_id.clone(),
            alias: alias.clone(),
            matched_by: "exact_alias".to_owned(),
            score: 1.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            ExerciseRecord::new("bench-press", "Bench Press", &["bench", "flat bench"]),
            ExerciseRecord::new("incline-bench-press", "Incline Bench Press", &["incline bench"]),
            ExerciseRecord::new("deadlift", "Deadlift", &["conventional deadlift"]),
        ])
    }

    #[test]
    fn test_keyword_search_ranks_by_hits_then_name() {
        let results = catalog().search_by_keywords(&["bench".into(), "incline".into()]);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["incline-bench-press", "bench-press"]);
    }

    #[test]
    fn test_keyword_search_empty_tokens() {
        assert!(catalog().search_by_keywords(&[]).is_empty());
    }

    #[test]
    fn test_exact_alias_matcher_normalizes() {
        let matcher = ExactAliasMatcher::new(&catalog());
        let hit = matcher.best_alias_match("  Flat-Bench ").unwrap();
        assert_eq!(hit.catalog_id, "bench-press");
        assert!((hit.score - 1.0).abs() < f64::EPSILON);
        assert!(matcher.best_alias_match("bench pres").is_none());
        assert!(matcher.best_alias_match("").is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(InMemoryCatalog::from_json("{\"id\": 1}").is_err());
        let catalog =
            InMemoryCatalog::from_json(r#"[{"id": "plank", "name": "Plank"}]"#).unwrap();
        assert!(catalog.contains("plank"));
    }
}
