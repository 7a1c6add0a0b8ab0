// ABOUTME: User mapping management and the correction feedback loop
// ABOUTME: Corrections become high-confidence mappings that supersede every later pipeline stage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseResolver;
use crate::constants::matching::CORRECTION_CONFIDENCE;
use crate::errors::{AppError, AppResult};
use crate::models::{
    normalize_query, MappingSource, MappingStatistics, UnmappedObservation, UserMapping,
};
use tracing::info;

impl ExerciseResolver {
    /// Bind `query` to `exercise_id`
    ///
    /// Confidence is clamped to 0.0-1.0. Any unmapped observation for the
    /// same normalized query is removed, and corrections are counted in the
    /// statistics.
    ///
    /// # Errors
    ///
    /// Returns an error without mutating state if `exercise_id` is not in
    /// the catalog, the query is blank, or the confidence is not a number
    pub async fn create_user_mapping(
        &self,
        query: &str,
        exercise_id: &str,
        confidence: f64,
        source: MappingSource,
    ) -> AppResult<UserMapping> {
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            return Err(AppError::invalid_input("Cannot map an empty exercise name"));
        }
        if confidence.is_nan() {
            return Err(AppError::invalid_input("Mapping confidence must be a number"));
        }
        if !self.catalog.contains(exercise_id) {
            return Err(AppError::not_found(format!("Exercise '{exercise_id}'")));
        }

        let mapping = UserMapping::new(normalized.clone(), exercise_id, confidence, source);
        self.store.upsert_user_mapping(mapping.clone()).await;
        self.store.remove_unmapped(&normalized).await;
        if source == MappingSource::Correction {
            self.store
                .update_statistics(|stats| stats.user_corrections += 1)
                .await;
        }

        info!(
            query = %normalized,
            exercise_id,
            source = source.as_str(),
            confidence = mapping.confidence,
            "Created user mapping"
        );
        Ok(mapping)
    }

    /// Learn from a user correcting a resolution of `query`
    ///
    /// # Errors
    ///
    /// Returns an error if `corrected_exercise_id` is not in the catalog or
    /// the query is blank
    pub async fn learn_from_correction(
        &self,
        query: &str,
        corrected_exercise_id: &str,
    ) -> AppResult<UserMapping> {
        self.create_user_mapping(
            query,
            corrected_exercise_id,
            CORRECTION_CONFIDENCE,
            MappingSource::Correction,
        )
        .await
    }

    /// Remove the mapping for `query`; true if one existed
    pub async fn remove_user_mapping(&self, query: &str) -> bool {
        self.store.remove_user_mapping(query).await
    }

    /// Stored mapping for `query`, if any
    pub async fn get_user_mapping(&self, query: &str) -> Option<UserMapping> {
        self.store.get_user_mapping(query).await
    }

    /// Every user mapping, most used first
    pub async fn list_user_mappings(&self) -> Vec<UserMapping> {
        self.store.list_user_mappings().await
    }

    /// Every unmapped observation, most frequent first
    pub async fn list_unmapped(&self) -> Vec<UnmappedObservation> {
        self.store.list_unmapped().await
    }

    /// Current resolution statistics
    pub async fn get_statistics(&self) -> MappingStatistics {
        self.store.statistics().await
    }

    /// Wipe all learned state, in memory and on disk
    pub async fn clear_all_data(&self) {
        self.store.clear_all().await;
    }
}
