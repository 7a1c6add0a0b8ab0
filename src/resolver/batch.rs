// ABOUTME: Batch adapter resolving every exercise name of a workout in input order
// ABOUTME: Aggregates the needs-review flag and wires in upstream text extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseResolver;
use crate::catalog::ExerciseNameExtractor;
use crate::models::BatchResolution;
use tracing::debug;

impl ExerciseResolver {
    /// Resolve each query in order
    ///
    /// The batch needs review iff any single result does.
    pub async fn resolve_all<S: AsRef<str> + Sync>(
        &self,
        queries: &[S],
        context: Option<&str>,
    ) -> BatchResolution {
        let mut results = Vec::with_capacity(queries.len());
        for query in queries {
            results.push(self.resolve(query.as_ref(), context).await);
        }
        let batch = BatchResolution::from_results(results);
        debug!(
            count = batch.results.len(),
            needs_review = batch.needs_review,
            "Resolved exercise batch"
        );
        batch
    }

    /// Extract candidate names from a workout description and resolve them
    pub async fn resolve_workout(
        &self,
        text: &str,
        extractor: &dyn ExerciseNameExtractor,
        context: Option<&str>,
    ) -> BatchResolution {
        let candidates = extractor.extract(text);
        self.resolve_all(&candidates, context).await
    }
}
