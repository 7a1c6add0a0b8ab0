// ABOUTME: Integration tests for the mapping store's load, persistence, and degradation paths
// ABOUTME: Uses the in-memory backend to inject corrupt data and storage faults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use common::{create_test_store, init_test_logging};
use pierre_exercise_resolver::catalog::{default_catalog, ExactAliasMatcher};
use pierre_exercise_resolver::config::ResolverConfig;
use pierre_exercise_resolver::errors::AppResult;
use pierre_exercise_resolver::models::{MappingSource, UserMapping};
use pierre_exercise_resolver::storage::{InMemoryBackend, RecordFamily, StorageBackend};
use pierre_exercise_resolver::store::MappingStore;
use pierre_exercise_resolver::ExerciseResolver;
use std::sync::Arc;
use std::time::{Duration, Instant};

const SLOW_WRITE: Duration = Duration::from_millis(300);

/// Backend whose writes take `SLOW_WRITE` each
#[derive(Default)]
struct SlowBackend {
    inner: InMemoryBackend,
}

#[async_trait]
impl StorageBackend for SlowBackend {
    async fn read_family(&self, family: RecordFamily) -> AppResult<Option<String>> {
        self.inner.read_family(family).await
    }

    async fn write_family(&self, family: RecordFamily, payload: &str) -> AppResult<()> {
        tokio::time::sleep(SLOW_WRITE).await;
        self.inner.write_family(family, payload).await
    }

    async fn clear(&self) -> AppResult<()> {
        self.inner.clear().await
    }
}

#[tokio::test]
async fn test_load_reads_each_family_once() {
    let (store, backend) = create_test_store();

    store.load().await;
    store.load().await;
    store.list_user_mappings().await;

    assert_eq!(backend.read_count(), RecordFamily::ALL.len());
}

#[tokio::test]
async fn test_concurrent_first_use_shares_one_load() {
    let (store, backend) = create_test_store();

    tokio::join!(
        store.get_user_mapping("a"),
        store.list_unmapped(),
        store.statistics(),
        store.get_unmapped("b"),
    );

    assert_eq!(backend.read_count(), RecordFamily::ALL.len());
}

#[tokio::test]
async fn test_corrupt_family_does_not_affect_others() {
    let backend = Arc::new(InMemoryBackend::new());
    let writer = MappingStore::new(backend.clone());
    writer.record_unmapped("zzqx", None, &[]).await;
    writer
        .upsert_user_mapping(UserMapping::new("db row", "dumbbell-row", 1.0, MappingSource::Manual))
        .await;
    writer.flush().await;

    backend
        .seed(RecordFamily::UserMappings, "{ definitely not json")
        .await;

    let reader = MappingStore::new(backend.clone());
    assert!(reader.list_user_mappings().await.is_empty());
    assert_eq!(reader.list_unmapped().await.len(), 1);
    assert_eq!(reader.statistics().await.unmapped_count, 1);
}

#[tokio::test]
async fn test_state_survives_reload_through_backend() {
    let backend = Arc::new(InMemoryBackend::new());
    let writer = MappingStore::new(backend.clone());
    writer
        .upsert_user_mapping(UserMapping::new("DB Row", "dumbbell-row", 0.8, MappingSource::Manual))
        .await;
    writer
        .update_statistics(|stats| {
            stats.total_attempts += 3;
            stats.successful_matches += 2;
        })
        .await;
    writer.flush().await;

    let reader = MappingStore::new(backend);
    let mapping = reader.get_user_mapping("db row").await.unwrap();
    assert_eq!(mapping.query, "db row");
    assert_eq!(mapping.exercise_id, "dumbbell-row");
    let stats = reader.statistics().await;
    assert_eq!(stats.total_attempts, 3);
    assert_eq!(stats.successful_matches, 2);
}

#[tokio::test]
async fn test_write_faults_degrade_to_memory() {
    let (store, backend) = create_test_store();
    backend.set_fail_writes(true);

    store
        .upsert_user_mapping(UserMapping::new("db row", "dumbbell-row", 1.0, MappingSource::Manual))
        .await;
    store.flush().await;

    assert!(store.get_user_mapping("db row").await.is_some());
    assert!(store.persist_failures() >= 1);
    assert!(backend.document(RecordFamily::UserMappings).await.is_none());

    backend.set_fail_writes(false);
    store.touch_user_mapping("db row").await;
    store.flush().await;
    assert!(backend.document(RecordFamily::UserMappings).await.is_some());
}

#[tokio::test]
async fn test_read_faults_start_empty() {
    let backend = Arc::new(InMemoryBackend::new());
    backend.set_fail_reads(true);
    let store = MappingStore::new(backend);

    assert!(store.list_user_mappings().await.is_empty());
    store.record_unmapped("zzqx", Some("monday"), &[]).await;
    assert_eq!(store.list_unmapped().await.len(), 1);
}

#[tokio::test]
async fn test_listing_order() {
    let (store, _) = create_test_store();
    for query in ["alpha", "beta"] {
        store
            .upsert_user_mapping(UserMapping::new(query, "plank", 1.0, MappingSource::Manual))
            .await;
    }
    store.touch_user_mapping("beta").await;
    store.touch_user_mapping("beta").await;
    store.touch_user_mapping("alpha").await;

    let queries: Vec<String> = store
        .list_user_mappings()
        .await
        .into_iter()
        .map(|m| m.query)
        .collect();
    assert_eq!(queries, vec!["beta", "alpha"]);

    store.record_unmapped("once", None, &[]).await;
    store.record_unmapped("twice", None, &[]).await;
    store.record_unmapped("twice", None, &[]).await;
    let unmapped: Vec<String> = store
        .list_unmapped()
        .await
        .into_iter()
        .map(|o| o.query)
        .collect();
    assert_eq!(unmapped, vec!["twice", "once"]);
}

#[tokio::test]
async fn test_remove_unmapped_updates_count() {
    let (store, _) = create_test_store();
    store.record_unmapped("zzqx", None, &[]).await;

    assert!(store.remove_unmapped(" ZZQX").await);
    assert!(!store.remove_unmapped("zzqx").await);
    assert_eq!(store.statistics().await.unmapped_count, 0);
}

#[tokio::test]
async fn test_slow_storage_does_not_block_mutations() {
    init_test_logging();
    let backend = Arc::new(SlowBackend::default());
    let store = MappingStore::new(backend.clone());
    store.load().await;

    let started = Instant::now();
    store
        .upsert_user_mapping(UserMapping::new("db row", "dumbbell-row", 1.0, MappingSource::Manual))
        .await;
    store.update_statistics(|stats| stats.total_attempts += 1).await;
    store.record_unmapped("zzqx", None, &[]).await;
    assert!(started.elapsed() < SLOW_WRITE);
    assert!(store.get_user_mapping("db row").await.is_some());

    store.flush().await;
    assert!(backend
        .inner
        .document(RecordFamily::UserMappings)
        .await
        .is_some());
    assert!(backend.inner.document(RecordFamily::Unmapped).await.is_some());
    assert_eq!(store.persist_failures(), 0);
}

#[tokio::test]
async fn test_slow_storage_does_not_block_resolution() {
    init_test_logging();
    let catalog = default_catalog();
    let matcher = Arc::new(ExactAliasMatcher::new(&catalog));
    let store = Arc::new(MappingStore::new(Arc::new(SlowBackend::default())));
    let resolver = ExerciseResolver::new(
        catalog.into_shared(),
        matcher,
        store,
        &ResolverConfig::in_memory(),
    )
    .unwrap();
    resolver.mapping_store().load().await;

    let started = Instant::now();
    let result = resolver.resolve("bench", None).await;
    assert!(started.elapsed() < SLOW_WRITE);
    assert_eq!(result.exercise_id, "bench-press");

    resolver.flush().await;
    assert_eq!(resolver.get_statistics().await.successful_matches, 1);
}
