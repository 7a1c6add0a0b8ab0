// ABOUTME: Mapping store owning user mappings, unmapped observations, and statistics
// ABOUTME: Lazy single-shot load from durable storage, in-memory authority, best-effort writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Mapping Store
//!
//! The store is the only owner of persisted resolver state. Every operation
//! first awaits the one-time load; concurrent first callers share the same
//! in-flight load through a [`OnceCell`].
//!
//! In-memory state is authoritative. After each mutation the affected
//! family is serialized under the state lock and queued for a single
//! writer task, so callers never wait on storage and families reach the
//! backend in mutation order. A failed write is logged and counted, never
//! retried, and never surfaced to the caller. [`MappingStore::flush`]
//! waits for the queue to drain.

/// Export/import document
pub mod snapshot;

pub use snapshot::ExportSnapshot;

use crate::models::{
    normalize_query, Alternative, MappingStatistics, UnmappedObservation, UserMapping,
};
use crate::storage::{RecordFamily, StorageBackend};
use chrono::Utc;
use serde::de::DeserializeOwned;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{oneshot, OnceCell, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct StoreState {
    user_mappings: HashMap<String, UserMapping>,
    unmapped: HashMap<String, UnmappedObservation>,
    statistics: MappingStatistics,
}

impl StoreState {
    fn statistics(&self) -> MappingStatistics {
        let mut statistics = self.statistics.clone();
        statistics.unmapped_count = self.unmapped.len() as u64;
        statistics
    }

    fn serialize(&self, family: RecordFamily) -> serde_json::Result<String> {
        match family {
            RecordFamily::UserMappings => {
                let mut records: Vec<&UserMapping> = self.user_mappings.values().collect();
                records.sort_by(|a, b| a.query.cmp(&b.query));
                serde_json::to_string(&records)
            }
            RecordFamily::Unmapped => {
                let mut records: Vec<&UnmappedObservation> = self.unmapped.values().collect();
                records.sort_by(|a, b| a.query.cmp(&b.query));
                serde_json::to_string(&records)
            }
            RecordFamily::Statistics => serde_json::to_string(&self.statistics()),
        }
    }
}

/// Work queued for the background writer
#[derive(Debug)]
enum WriteCommand {
    Write {
        family: RecordFamily,
        payload: String,
    },
    Clear,
    Flush(oneshot::Sender<()>),
}

/// Drains the write queue in order until every sender is gone
async fn run_writer(
    backend: Arc<dyn StorageBackend>,
    mut commands: UnboundedReceiver<WriteCommand>,
    failures: Arc<AtomicU64>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            WriteCommand::Write { family, payload } => {
                if let Err(e) = backend.write_family(family, &payload).await {
                    failures.fetch_add(1, Ordering::Relaxed);
                    warn!(%family, error = %e, "Failed to persist family, continuing in memory");
                }
            }
            WriteCommand::Clear => {
                if let Err(e) = backend.clear().await {
                    failures.fetch_add(1, Ordering::Relaxed);
                    warn!(error = %e, "Failed to clear durable storage, continuing in memory");
                }
            }
            WriteCommand::Flush(done) => {
                // Receiver gone means the flusher stopped waiting
                let _ = done.send(());
            }
        }
    }
    debug!("Mapping store writer stopped");
}

/// Durable owner of learned resolver state
pub struct MappingStore {
    backend: Arc<dyn StorageBackend>,
    state: RwLock<StoreState>,
    loaded: OnceCell<()>,
    writes: UnboundedSender<WriteCommand>,
    pending_writer: Mutex<Option<UnboundedReceiver<WriteCommand>>>,
    persist_failures: Arc<AtomicU64>,
}

impl MappingStore {
    /// Create a store over `backend`; nothing is read until first use
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let (writes, receiver) = mpsc::unbounded_channel();
        Self {
            backend,
            state: RwLock::new(StoreState::default()),
            loaded: OnceCell::new(),
            writes,
            pending_writer: Mutex::new(Some(receiver)),
            persist_failures: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Load every family from durable storage, once
    ///
    /// Missing or corrupt data for a family leaves that family empty and is
    /// logged; the other families still load. Later calls are no-ops. The
    /// background writer starts with the load.
    pub async fn load(&self) {
        self.loaded
            .get_or_init(|| async {
                let user_mappings: Vec<UserMapping> =
                    self.read_family(RecordFamily::UserMappings).await.unwrap_or_default();
                let unmapped: Vec<UnmappedObservation> =
                    self.read_family(RecordFamily::Unmapped).await.unwrap_or_default();
                let statistics: MappingStatistics =
                    self.read_family(RecordFamily::Statistics).await.unwrap_or_default();

                self.start_writer();

                let mut state = self.state.write().await;
                state.user_mappings = user_mappings
                    .into_iter()
                    .map(|m| (normalize_query(&m.query), m))
                    .collect();
                state.unmapped = unmapped
                    .into_iter()
                    .map(|o| (normalize_query(&o.query), o))
                    .collect();
                state.statistics = statistics;
                state.statistics.unmapped_count = state.unmapped.len() as u64;

                info!(
                    user_mappings = state.user_mappings.len(),
                    unmapped = state.unmapped.len(),
                    total_attempts = state.statistics.total_attempts,
                    "Mapping store loaded"
                );
            })
            .await;
    }

    fn start_writer(&self) {
        let receiver = match self.pending_writer.lock() {
            Ok(mut pending) => pending.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(receiver) = receiver {
            tokio::spawn(run_writer(
                Arc::clone(&self.backend),
                receiver,
                Arc::clone(&self.persist_failures),
            ));
        }
    }

    async fn read_family<T: DeserializeOwned>(&self, family: RecordFamily) -> Option<T> {
        match self.backend.read_family(family).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!(%family, error = %e, "Corrupt persisted data, starting family empty");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(%family, error = %e, "Failed to read family, starting empty");
                None
            }
        }
    }

    /// Queue the current contents of `family`; called with the state lock held
    fn persist(&self, state: &StoreState, family: RecordFamily) {
        match state.serialize(family) {
            Ok(payload) => self.enqueue(WriteCommand::Write { family, payload }),
            Err(e) => {
                self.persist_failures.fetch_add(1, Ordering::Relaxed);
                warn!(%family, error = %e, "Failed to serialize family, continuing in memory");
            }
        }
    }

    fn enqueue(&self, command: WriteCommand) {
        if self.writes.send(command).is_err() {
            self.persist_failures.fetch_add(1, Ordering::Relaxed);
            warn!("Mapping store writer is gone, continuing in memory");
        }
    }

    /// Wait until every write queued so far has reached the backend
    pub async fn flush(&self) {
        self.load().await;
        let (done, wait) = oneshot::channel();
        self.enqueue(WriteCommand::Flush(done));
        if wait.await.is_err() {
            warn!("Mapping store writer stopped before flushing");
        }
    }

    /// Number of durable writes that failed since construction
    #[must_use]
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }

    // ========================================================================
    // User mappings
    // ========================================================================

    /// Mapping for `query` (normalized before lookup)
    pub async fn get_user_mapping(&self, query: &str) -> Option<UserMapping> {
        self.load().await;
        self.state
            .read()
            .await
            .user_mappings
            .get(&normalize_query(query))
            .cloned()
    }

    /// Insert or replace the mapping for `mapping.query`
    pub async fn upsert_user_mapping(&self, mut mapping: UserMapping) {
        self.load().await;
        mapping.query = normalize_query(&mapping.query);
        let mut state = self.state.write().await;
        debug!(query = %mapping.query, exercise_id = %mapping.exercise_id, "Upserting user mapping");
        state.user_mappings.insert(mapping.query.clone(), mapping);
        self.persist(&state, RecordFamily::UserMappings);
    }

    /// Count a winning use of the mapping for `query`, returning the updated mapping
    pub async fn touch_user_mapping(&self, query: &str) -> Option<UserMapping> {
        self.load().await;
        let mut state = self.state.write().await;
        let mapping = state.user_mappings.get_mut(&normalize_query(query))?;
        mapping.touch();
        let touched = mapping.clone();
        self.persist(&state, RecordFamily::UserMappings);
        Some(touched)
    }

    /// Remove the mapping for `query`; true if one existed
    pub async fn remove_user_mapping(&self, query: &str) -> bool {
        self.load().await;
        let mut state = self.state.write().await;
        let removed = state.user_mappings.remove(&normalize_query(query)).is_some();
        if removed {
            self.persist(&state, RecordFamily::UserMappings);
        }
        removed
    }

    /// Every mapping, most used first
    pub async fn list_user_mappings(&self) -> Vec<UserMapping> {
        self.load().await;
        let mut mappings: Vec<UserMapping> =
            self.state.read().await.user_mappings.values().cloned().collect();
        mappings.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then_with(|| a.query.cmp(&b.query))
        });
        mappings
    }

    // ========================================================================
    // Unmapped observations
    // ========================================================================

    /// Record a failed resolution of `query`
    ///
    /// `suggested_alternatives` is stored only when the observation is new.
    pub async fn record_unmapped(
        &self,
        query: &str,
        context: Option<&str>,
        suggested_alternatives: &[Alternative],
    ) {
        self.load().await;
        let key = normalize_query(query);
        let mut state = self.state.write().await;
        match state.unmapped.get_mut(&key) {
            Some(observation) => observation.record_occurrence(context),
            None => {
                let observation = UnmappedObservation::first_seen(
                    key.clone(),
                    context,
                    suggested_alternatives.to_vec(),
                );
                state.unmapped.insert(key, observation);
            }
        }
        state.statistics.unmapped_count = state.unmapped.len() as u64;
        state.statistics.last_updated_at = Utc::now();
        self.persist(&state, RecordFamily::Unmapped);
        self.persist(&state, RecordFamily::Statistics);
    }

    /// Forget the observation for `query`; true if one existed
    pub async fn remove_unmapped(&self, query: &str) -> bool {
        self.load().await;
        let mut state = self.state.write().await;
        let removed = state.unmapped.remove(&normalize_query(query)).is_some();
        if removed {
            state.statistics.unmapped_count = state.unmapped.len() as u64;
            state.statistics.last_updated_at = Utc::now();
            self.persist(&state, RecordFamily::Unmapped);
            self.persist(&state, RecordFamily::Statistics);
        }
        removed
    }

    /// Observation for `query`, if any
    pub async fn get_unmapped(&self, query: &str) -> Option<UnmappedObservation> {
        self.load().await;
        self.state
            .read()
            .await
            .unmapped
            .get(&normalize_query(query))
            .cloned()
    }

    /// Every observation, most frequent first
    pub async fn list_unmapped(&self) -> Vec<UnmappedObservation> {
        self.load().await;
        let mut observations: Vec<UnmappedObservation> =
            self.state.read().await.unmapped.values().cloned().collect();
        observations.sort_by_key(|o| (Reverse(o.occurrence_count), o.query.clone()));
        observations
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Current statistics
    pub async fn statistics(&self) -> MappingStatistics {
        self.load().await;
        self.state.read().await.statistics()
    }

    /// Apply `update` to the statistics and persist them
    pub async fn update_statistics<F>(&self, update: F)
    where
        F: FnOnce(&mut MappingStatistics) + Send,
    {
        self.load().await;
        let mut state = self.state.write().await;
        update(&mut state.statistics);
        state.statistics.last_updated_at = Utc::now();
        self.persist(&state, RecordFamily::Statistics);
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Wipe every family in memory and in durable storage
    pub async fn clear_all(&self) {
        self.load().await;
        let mut state = self.state.write().await;
        *state = StoreState::default();
        self.enqueue(WriteCommand::Clear);
        info!("Mapping store cleared");
    }

    /// Snapshot of every family
    pub async fn export_snapshot(&self) -> ExportSnapshot {
        let user_mappings = self.list_user_mappings().await;
        let unmapped = self.list_unmapped().await;
        let statistics = self.statistics().await;
        ExportSnapshot::new(user_mappings, unmapped, statistics)
    }

    /// Overwrite each family present in `snapshot`; absent families are untouched
    ///
    /// Imported user mappings supersede unmapped observations for the same
    /// query, whichever family they came from.
    pub async fn apply_snapshot(&self, snapshot: ExportSnapshot) {
        self.load().await;
        let mut state = self.state.write().await;

        let mut unmapped_changed = false;
        if let Some(unmapped) = snapshot.unmapped {
            state.unmapped = unmapped
                .into_iter()
                .map(|mut o| {
                    o.query = normalize_query(&o.query);
                    (o.query.clone(), o)
                })
                .collect();
            unmapped_changed = true;
        }

        if let Some(user_mappings) = snapshot.user_mappings {
            state.user_mappings = user_mappings
                .into_iter()
                .map(|mut m| {
                    m.query = normalize_query(&m.query);
                    (m.query.clone(), m)
                })
                .collect();
            self.persist(&state, RecordFamily::UserMappings);
        }

        let StoreState {
            user_mappings,
            unmapped,
            ..
        } = &mut *state;
        let before = unmapped.len();
        unmapped.retain(|query, _| !user_mappings.contains_key(query));
        unmapped_changed |= unmapped.len() != before;
        if unmapped_changed {
            self.persist(&state, RecordFamily::Unmapped);
        }

        if let Some(statistics) = snapshot.statistics {
            state.statistics = statistics;
            state.statistics.unmapped_count = state.unmapped.len() as u64;
            self.persist(&state, RecordFamily::Statistics);
        } else if unmapped_changed {
            state.statistics.unmapped_count = state.unmapped.len() as u64;
            self.persist(&state, RecordFamily::Statistics);
        }
    }
}
