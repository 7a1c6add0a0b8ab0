// ABOUTME: Builds ranked alternative exercises offered next to a resolution result
// ABOUTME: Combines the similarity primitive, keyword search, and popular backfill
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::catalog::{ExerciseCatalog, SimilarityMatcher};
use crate::constants::exercise_ids;
use crate::constants::matching::{
    EXHAUSTIVE_KEYWORD_ALTERNATIVE_LIMIT, EXHAUSTIVE_MIN_ALTERNATIVES,
    KEYWORD_ALTERNATIVE_CONFIDENCE, KEYWORD_ALTERNATIVE_LIMIT, POPULAR_ALTERNATIVE_CONFIDENCE,
};
use crate::models::Alternative;
use std::cmp::Ordering;
use std::sync::Arc;

/// Reason attached to keyword-search alternatives
pub const KEYWORD_REASON: &str = "keyword match";
/// Reason attached to popular backfill alternatives
pub const POPULAR_REASON: &str = "popular alternative";

/// Generates ranked alternatives for a query
#[derive(Clone)]
pub struct AlternativeGenerator {
    catalog: Arc<dyn ExerciseCatalog>,
    matcher: Arc<dyn SimilarityMatcher>,
}

impl AlternativeGenerator {
    /// Create a generator over the given collaborators
    #[must_use]
    pub fn new(catalog: Arc<dyn ExerciseCatalog>, matcher: Arc<dyn SimilarityMatcher>) -> Self {
        Self { catalog, matcher }
    }

    /// Ranked alternatives for `query`, never containing `exclude_id`
    ///
    /// Exhaustive mode takes more keyword hits and backfills popular
    /// exercises so the caller has something to pick from.
    #[must_use]
    pub fn generate(&self, query: &str, exclude_id: &str, exhaustive: bool) -> Vec<Alternative> {
        let mut alternatives: Vec<Alternative> = Vec::new();

        if let Some(hit) = self.matcher.best_alias_match(query) {
            if hit.catalog_id != exclude_id && self.catalog.contains(&hit.catalog_id) {
                alternatives.push(Alternative {
                    exercise_id: hit.catalog_id,
                    confidence: hit.score.clamp(0.0, 1.0),
                    reason: format!("similarity match on alias '{}'", hit.alias),
                });
            }
        }

        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if !tokens.is_empty() {
            let limit = if exhaustive {
                EXHAUSTIVE_KEYWORD_ALTERNATIVE_LIMIT
            } else {
                KEYWORD_ALTERNATIVE_LIMIT
            };
            let keyword_hits: Vec<Alternative> = self
                .catalog
                .search_by_keywords(&tokens)
                .into_iter()
                .filter(|record| {
                    record.id != exclude_id && !Self::is_present(&alternatives, &record.id)
                })
                .take(limit)
                .map(|record| Alternative {
                    exercise_id: record.id,
                    confidence: KEYWORD_ALTERNATIVE_CONFIDENCE,
                    reason: KEYWORD_REASON.to_owned(),
                })
                .collect();
            alternatives.extend(keyword_hits);
        }

        if exhaustive {
            self.backfill_popular(&mut alternatives, exclude_id);
        }

        Self::rank(alternatives)
    }

    fn backfill_popular(&self, alternatives: &mut Vec<Alternative>, exclude_id: &str) {
        for id in exercise_ids::POPULAR {
            if alternatives.len() >= EXHAUSTIVE_MIN_ALTERNATIVES {
                break;
            }
            if *id == exclude_id || Self::is_present(alternatives, id) || !self.catalog.contains(id)
            {
                continue;
            }
            alternatives.push(Alternative {
                exercise_id: (*id).to_owned(),
                confidence: POPULAR_ALTERNATIVE_CONFIDENCE,
                reason: POPULAR_REASON.to_owned(),
            });
        }
    }

    fn is_present(alternatives: &[Alternative], id: &str) -> bool {
        alternatives.iter().any(|a| a.exercise_id == id)
    }

    /// De-duplicate by exercise id (first occurrence wins) and sort by confidence, descending
    fn rank(alternatives: Vec<Alternative>) -> Vec<Alternative> {
        let mut ranked: Vec<Alternative> = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            if !Self::is_present(&ranked, &alternative.exercise_id) {
                ranked.push(alternative);
            }
        }
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }
}
