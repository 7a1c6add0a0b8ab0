// ABOUTME: Resolution commands for pierre-exercise-cli
// ABOUTME: Resolves a single name or every line of a workout file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{print_json, read_file};
use pierre_exercise_resolver::{
    catalog::LineExtractor, errors::AppResult, ExerciseResolver,
};
use std::path::Path;
use tracing::info;

/// Resolve one name
pub async fn single(
    resolver: &ExerciseResolver,
    query: &str,
    context: Option<&str>,
) -> AppResult<()> {
    let result = resolver.resolve(query, context).await;
    print_json(&result)
}

/// Resolve every candidate name in a workout file
pub async fn workout(
    resolver: &ExerciseResolver,
    file: &Path,
    context: Option<&str>,
) -> AppResult<()> {
    let text = read_file(file).await?;
    let batch = resolver
        .resolve_workout(&text, &LineExtractor, context)
        .await;
    info!(
        exercises = batch.results.len(),
        needs_review = batch.needs_review,
        "Resolved workout file"
    );
    print_json(&batch)
}
