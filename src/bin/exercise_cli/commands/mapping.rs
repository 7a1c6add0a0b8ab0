// ABOUTME: User mapping commands for pierre-exercise-cli
// ABOUTME: Handles create, correct, remove, and list operations for learned mappings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::print_json;
use pierre_exercise_resolver::{
    errors::{AppError, AppResult},
    models::MappingSource,
    ExerciseResolver,
};
use serde_json::json;

/// Create a manual mapping
pub async fn create(
    resolver: &ExerciseResolver,
    query: &str,
    exercise_id: &str,
    confidence: f64,
) -> AppResult<()> {
    let mapping = resolver
        .create_user_mapping(query, exercise_id, confidence, MappingSource::Manual)
        .await?;
    print_json(&mapping)
}

/// Learn from a correction
pub async fn correct(resolver: &ExerciseResolver, query: &str, exercise_id: &str) -> AppResult<()> {
    let mapping = resolver.learn_from_correction(query, exercise_id).await?;
    print_json(&mapping)
}

/// Remove a mapping
pub async fn remove(resolver: &ExerciseResolver, query: &str) -> AppResult<()> {
    if !resolver.remove_user_mapping(query).await {
        return Err(AppError::not_found(format!("User mapping for '{query}'")));
    }
    print_json(&json!({ "removed": query }))
}

/// List mappings
pub async fn list(resolver: &ExerciseResolver) -> AppResult<()> {
    let mappings = resolver.list_user_mappings().await;
    print_json(&mappings)
}
