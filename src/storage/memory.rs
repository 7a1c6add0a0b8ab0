// ABOUTME: In-memory storage backend for tests and ephemeral resolver instances
// ABOUTME: Supports seeding raw documents and injecting read/write faults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{RecordFamily, StorageBackend};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Storage backend that keeps documents in a map
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    documents: RwLock<HashMap<RecordFamily, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryBackend {
    /// Empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw document, bypassing serialization (useful for corrupt-data tests)
    pub async fn seed(&self, family: RecordFamily, payload: impl Into<String>) {
        self.documents.write().await.insert(family, payload.into());
    }

    /// Raw document currently stored for `family`
    pub async fn document(&self, family: RecordFamily) -> Option<String> {
        self.documents.read().await.get(&family).cloned()
    }

    /// Make every read fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write and clear fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `read_family` calls so far
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `write_family` calls so far
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn read_family(&self, family: RecordFamily) -> AppResult<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("Injected read fault for {family}")));
        }
        Ok(self.documents.read().await.get(&family).cloned())
    }

    async fn write_family(&self, family: RecordFamily, payload: &str) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("Injected write fault for {family}")));
        }
        self.documents
            .write()
            .await
            .insert(family, payload.to_owned());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::storage("Injected clear fault"));
        }
        self.documents.write().await.clear();
        Ok(())
    }
}
