// ABOUTME: Learned-state commands for pierre-exercise-cli
// ABOUTME: Handles unmapped review, statistics, export, import, and clear
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{print_json, read_file};
use pierre_exercise_resolver::{
    errors::{AppError, AppResult},
    ExerciseResolver,
};
use serde_json::json;
use std::path::Path;
use tracing::{info, warn};

/// List unmapped observations
pub async fn unmapped(resolver: &ExerciseResolver) -> AppResult<()> {
    let observations = resolver.list_unmapped().await;
    print_json(&observations)
}

/// Show statistics with the derived success rate
pub async fn stats(resolver: &ExerciseResolver) -> AppResult<()> {
    let statistics = resolver.get_statistics().await;
    print_json(&json!({
        "statistics": statistics,
        "success_rate": statistics.success_rate(),
    }))
}

/// Export learned state to stdout or a file
pub async fn export(resolver: &ExerciseResolver, output: Option<&Path>) -> AppResult<()> {
    let document = resolver.export_all().await?;
    match output {
        Some(path) => {
            tokio::fs::write(path, &document).await.map_err(|e| {
                AppError::storage(format!("Cannot write {}: {e}", path.display())).with_source(e)
            })?;
            info!(path = %path.display(), "Exported learned state");
            print_json(&json!({ "exported_to": path.display().to_string() }))
        }
        None => print_json(&serde_json::from_str::<serde_json::Value>(&document)?),
    }
}

/// Import learned state from an export file
pub async fn import(resolver: &ExerciseResolver, file: &Path) -> AppResult<()> {
    let document = read_file(file).await?;
    let summary = resolver.import_all(&document).await?;
    print_json(&summary)
}

/// Wipe learned state
pub async fn clear(resolver: &ExerciseResolver, confirmed: bool) -> AppResult<()> {
    if !confirmed {
        warn!("Refusing to clear learned state without --yes");
        return Err(AppError::invalid_input("Pass --yes to delete all learned state"));
    }
    resolver.clear_all_data().await;
    print_json(&json!({ "cleared": true }))
}
