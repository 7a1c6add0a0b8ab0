// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides resolver construction over fault-injectable storage and a scripted matcher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pierre_exercise_resolver`

use pierre_exercise_resolver::{
    catalog::{default_catalog, ExactAliasMatcher, SimilarityMatcher},
    config::ResolverConfig,
    models::AliasMatch,
    storage::InMemoryBackend,
    store::MappingStore,
    ExerciseResolver,
};
use std::collections::HashMap;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Similarity matcher with canned scores, deferring to exact alias matching otherwise
pub struct ScriptedMatcher {
    scripted: HashMap<String, AliasMatch>,
    fallback: ExactAliasMatcher,
}

impl ScriptedMatcher {
    pub fn new() -> Self {
        Self {
            scripted: HashMap::new(),
            fallback: ExactAliasMatcher::new(&default_catalog()),
        }
    }

    /// Report `catalog_id` with `score` whenever `query` is looked up
    pub fn with_score(mut self, query: &str, catalog_id: &str, score: f64) -> Self {
        self.scripted.insert(
            query.to_lowercase(),
            AliasMatch {
                catalog_id: catalog_id.to_owned(),
                alias: query.to_lowercase(),
                matched_by: "scripted".to_owned(),
                score,
            },
        );
        self
    }
}

impl SimilarityMatcher for ScriptedMatcher {
    fn best_alias_match(&self, free_text: &str) -> Option<AliasMatch> {
        self.scripted
            .get(&free_text.trim().to_lowercase())
            .cloned()
            .or_else(|| self.fallback.best_alias_match(free_text))
    }
}

/// Resolver over the default catalog and the given matcher
pub fn resolver_with_matcher(
    matcher: Arc<dyn SimilarityMatcher>,
) -> (ExerciseResolver, Arc<InMemoryBackend>) {
    init_test_logging();
    let backend = Arc::new(InMemoryBackend::new());
    let store = Arc::new(MappingStore::new(backend.clone()));
    let resolver = ExerciseResolver::new(
        default_catalog().into_shared(),
        matcher,
        store,
        &ResolverConfig::in_memory(),
    )
    .expect("default catalog contains the fallback exercise");
    (resolver, backend)
}

/// Resolver over the default catalog with exact alias matching
pub fn create_test_resolver() -> (ExerciseResolver, Arc<InMemoryBackend>) {
    resolver_with_matcher(Arc::new(ExactAliasMatcher::new(&default_catalog())))
}

/// Store over a fresh in-memory backend
pub fn create_test_store() -> (MappingStore, Arc<InMemoryBackend>) {
    init_test_logging();
    let backend = Arc::new(InMemoryBackend::new());
    (MappingStore::new(backend.clone()), backend)
}
