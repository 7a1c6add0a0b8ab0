// ABOUTME: Command modules for pierre-exercise-cli and shared JSON output
// ABOUTME: Every command writes exactly one JSON document to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod data;
pub mod mapping;
pub mod resolve;

use pierre_exercise_resolver::errors::{AppError, AppResult};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Write `value` as pretty JSON followed by a newline
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
        .map_err(|e| AppError::internal(format!("Failed to write output: {e}")).with_source(e))
}

/// Read a UTF-8 file into memory
pub async fn read_file(path: &Path) -> AppResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}: {e}", path.display())).with_source(e)
    })
}
