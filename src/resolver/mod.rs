// ABOUTME: Exercise-name resolution service with the staged matching pipeline
// ABOUTME: User mapping, similarity, contextual, semantic, then generic fallback; first hit wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Resolver
//!
//! [`ExerciseResolver`] is an explicitly constructed service object owning
//! its mapping store handle. Callers receive it by injection; there is no
//! global instance.
//!
//! Stages run in strict priority order:
//!
//! 1. stored user mapping
//! 2. similarity primitive (score above the accept threshold)
//! 3. contextual keyword search (only with a context)
//! 4. movement-pattern group default
//! 5. generic fallback, which also records an unmapped observation
//!
//! A stage whose chosen exercise does not resolve in the catalog is a miss,
//! so a returned result always carries a real catalog record.

/// Batch resolution of workout exercise lists
mod batch;
/// User mappings and the correction feedback loop
mod learning;
/// Export and import of learned state
mod transfer;

pub use transfer::ImportSummary;

use crate::catalog::{ExactAliasMatcher, ExerciseCatalog, SimilarityMatcher};
use crate::config::ResolverConfig;
use crate::constants::matching::{
    CONTEXTUAL_CONFIDENCE, GENERIC_FALLBACK_CONFIDENCE, SIMILARITY_ACCEPT_THRESHOLD,
    SIMILARITY_EXACT_THRESHOLD, SIMILARITY_REVIEW_THRESHOLD, USER_MAPPING_CONFIDENCE_BOOST,
    USER_MAPPING_CONFIDENCE_CAP,
};
use crate::errors::{AppError, AppResult};
use crate::matching::tokens::contextual_keywords;
use crate::matching::{AlternativeGenerator, SemanticGrouper};
use crate::models::{normalize_query, ExerciseRecord, MatchType, ResolutionResult};
use crate::store::MappingStore;
use std::sync::Arc;
use tracing::{debug, field, info, instrument, warn, Span};

/// Resolves free-text exercise names into catalog exercises
pub struct ExerciseResolver {
    catalog: Arc<dyn ExerciseCatalog>,
    matcher: Arc<dyn SimilarityMatcher>,
    store: Arc<MappingStore>,
    alternatives: AlternativeGenerator,
    grouper: SemanticGrouper,
    fallback_exercise: ExerciseRecord,
}

impl ExerciseResolver {
    /// Create a resolver
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config.fallback_exercise_id` is
    /// not in the catalog
    pub fn new(
        catalog: Arc<dyn ExerciseCatalog>,
        matcher: Arc<dyn SimilarityMatcher>,
        store: Arc<MappingStore>,
        config: &ResolverConfig,
    ) -> AppResult<Self> {
        config.validate(catalog.as_ref())?;
        let fallback_exercise = catalog
            .get_by_id(&config.fallback_exercise_id)
            .ok_or_else(|| {
                AppError::config(format!(
                    "Fallback exercise '{}' could not be loaded",
                    config.fallback_exercise_id
                ))
            })?;

        Ok(Self {
            alternatives: AlternativeGenerator::new(Arc::clone(&catalog), Arc::clone(&matcher)),
            catalog,
            matcher,
            store,
            grouper: SemanticGrouper,
            fallback_exercise,
        })
    }

    /// Build a resolver from configuration: catalog, exact alias matcher, SQLite store
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded, the database cannot
    /// be opened, or the configuration is invalid for the catalog
    pub async fn from_config(config: &ResolverConfig) -> AppResult<Self> {
        let catalog = config.load_catalog().await?;
        let matcher = ExactAliasMatcher::new(&catalog);
        let backend = config.open_storage().await?;
        let store = Arc::new(MappingStore::new(Arc::new(backend)));
        store.load().await;

        info!(
            fallback = %config.fallback_exercise_id,
            exercises = catalog.len(),
            "Exercise resolver ready"
        );
        Self::new(catalog.into_shared(), Arc::new(matcher), store, config)
    }

    /// Shared handle to the mapping store
    #[must_use]
    pub fn mapping_store(&self) -> Arc<MappingStore> {
        Arc::clone(&self.store)
    }

    /// Wait until learned state queued so far has reached durable storage
    pub async fn flush(&self) {
        self.store.flush().await;
    }

    /// The catalog this resolver reads from
    #[must_use]
    pub fn catalog(&self) -> &dyn ExerciseCatalog {
        self.catalog.as_ref()
    }

    /// Resolve one free-text exercise name
    ///
    /// Never fails: the generic fallback guarantees a result for any input,
    /// including the empty string.
    #[instrument(skip(self), fields(match_type = field::Empty))]
    pub async fn resolve(&self, query: &str, context: Option<&str>) -> ResolutionResult {
        self.store
            .update_statistics(|stats| stats.total_attempts += 1)
            .await;

        let staged = match self.user_mapping_stage(query).await {
            Some(result) => Some(result),
            None => self
                .similarity_stage(query)
                .or_else(|| context.and_then(|c| self.contextual_stage(query, c)))
                .or_else(|| self.semantic_stage(query)),
        };

        let result = match staged {
            Some(result) => {
                self.store
                    .update_statistics(|stats| stats.successful_matches += 1)
                    .await;
                result
            }
            None => self.fallback_stage(query, context).await,
        };

        Span::current().record("match_type", result.match_type.as_str());
        debug!(
            exercise_id = %result.exercise_id,
            confidence = result.confidence,
            needs_review = result.needs_review,
            "Resolved exercise name"
        );
        result
    }

    async fn user_mapping_stage(&self, query: &str) -> Option<ResolutionResult> {
        let normalized = normalize_query(query);
        let mapping = self.store.get_user_mapping(&normalized).await?;
        let Some(exercise) = self.catalog.get_by_id(&mapping.exercise_id) else {
            warn!(
                query = %normalized,
                exercise_id = %mapping.exercise_id,
                "User mapping points at an exercise missing from the catalog"
            );
            return None;
        };

        let mapping = self
            .store
            .touch_user_mapping(&normalized)
            .await
            .unwrap_or(mapping);
        let confidence =
            (mapping.confidence + USER_MAPPING_CONFIDENCE_BOOST).min(USER_MAPPING_CONFIDENCE_CAP);

        Some(ResolutionResult {
            exercise_id: exercise.id.clone(),
            exercise,
            confidence,
            match_type: MatchType::UserMapping,
            match_reason: format!(
                "User mapping ({}, used {} times)",
                mapping.source.as_str(),
                mapping.usage_count
            ),
            alternatives: Vec::new(),
            needs_review: false,
        })
    }

    fn similarity_stage(&self, query: &str) -> Option<ResolutionResult> {
        let hit = self.matcher.best_alias_match(query)?;
        if hit.score <= SIMILARITY_ACCEPT_THRESHOLD {
            debug!(
                score = hit.score,
                catalog_id = %hit.catalog_id,
                "Similarity score below threshold"
            );
            return None;
        }
        let exercise = self.catalog.get_by_id(&hit.catalog_id)?;

        let match_type = if hit.score > SIMILARITY_EXACT_THRESHOLD {
            MatchType::Exact
        } else {
            MatchType::Fuzzy
        };

        Some(ResolutionResult {
            alternatives: self.alternatives.generate(query, &exercise.id, false),
            exercise_id: exercise.id.clone(),
            exercise,
            confidence: hit.score.clamp(0.0, 1.0),
            match_type,
            match_reason: format!(
                "Matched alias '{}' by {} (score {:.2})",
                hit.alias, hit.matched_by, hit.score
            ),
            needs_review: hit.score < SIMILARITY_REVIEW_THRESHOLD,
        })
    }

    fn contextual_stage(&self, query: &str, context: &str) -> Option<ResolutionResult> {
        let keywords = contextual_keywords(query, context);
        if keywords.is_empty() {
            return None;
        }
        let exercise = self.catalog.search_by_keywords(&keywords).into_iter().next()?;

        Some(ResolutionResult {
            alternatives: self.alternatives.generate(query, &exercise.id, false),
            exercise_id: exercise.id.clone(),
            exercise,
            confidence: CONTEXTUAL_CONFIDENCE,
            match_type: MatchType::Contextual,
            match_reason: format!("Contextual keyword match on [{}]", keywords.join(", ")),
            needs_review: true,
        })
    }

    fn semantic_stage(&self, query: &str) -> Option<ResolutionResult> {
        let hit = self.grouper.classify(query)?;
        let Some(exercise) = self.catalog.get_by_id(&hit.exercise_id) else {
            warn!(
                group = hit.group.as_str(),
                exercise_id = %hit.exercise_id,
                "Movement group default is missing from the catalog"
            );
            return None;
        };

        Some(ResolutionResult {
            alternatives: self.alternatives.generate(query, &exercise.id, false),
            exercise_id: exercise.id.clone(),
            exercise,
            confidence: hit.confidence,
            match_type: MatchType::Semantic,
            match_reason: format!("Semantic match: {} movement pattern", hit.group.as_str()),
            needs_review: true,
        })
    }

    async fn fallback_stage(&self, query: &str, context: Option<&str>) -> ResolutionResult {
        let exercise = self.fallback_exercise.clone();
        let alternatives = self.alternatives.generate(query, &exercise.id, true);

        if normalize_query(query).is_empty() {
            debug!("Empty query, not recording an unmapped observation");
        } else {
            self.store
                .record_unmapped(query, context, &alternatives)
                .await;
        }

        ResolutionResult {
            exercise_id: exercise.id.clone(),
            exercise,
            confidence: GENERIC_FALLBACK_CONFIDENCE,
            match_type: MatchType::Generic,
            match_reason: format!("No confident match for \"{query}\"; using generic exercise"),
            alternatives,
            needs_review: true,
        }
    }
}
