// ABOUTME: Export and import of the resolver's learned state as one JSON document
// ABOUTME: Import is all-or-nothing per family and leaves state untouched on malformed input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseResolver;
use crate::errors::AppResult;
use crate::store::ExportSnapshot;
use serde::Serialize;
use tracing::info;

/// Families overwritten by an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Imported user mappings, `None` if the document had none
    pub user_mappings: Option<usize>,
    /// Imported unmapped observations, `None` if the document had none
    pub unmapped: Option<usize>,
    /// Whether statistics were imported
    pub statistics: bool,
}

impl ExerciseResolver {
    /// Serialize every family plus an export timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub async fn export_all(&self) -> AppResult<String> {
        let snapshot = self.store.export_snapshot().await;
        snapshot.to_json()
    }

    /// Overwrite the families present in `document`
    ///
    /// # Errors
    ///
    /// Returns an error, leaving state untouched, if the document is malformed
    pub async fn import_all(&self, document: &str) -> AppResult<ImportSummary> {
        let snapshot = ExportSnapshot::from_json(document)?;
        let summary = ImportSummary {
            user_mappings: snapshot.user_mappings.as_ref().map(Vec::len),
            unmapped: snapshot.unmapped.as_ref().map(Vec::len),
            statistics: snapshot.statistics.is_some(),
        };
        self.store.apply_snapshot(snapshot).await;
        info!(?summary, "Imported mapping snapshot");
        Ok(summary)
    }
}
