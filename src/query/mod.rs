// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-based query cache behind the data-fetching services.
//!
//! Same shape as the token cache pattern used for access tokens:
//! 1. Serve a fresh entry without I/O
//! 2. Take a per-key lock so identical fetches run once
//! 3. Re-check after the lock: a fetch that finished while we waited wins
//! 4. Otherwise fetch (with retry), store, return
//!
//! Errors are never cached. A result whose key was invalidated while the
//! fetch was in flight is returned to its caller but not stored, so later
//! readers never see data from before a mutation.

use crate::error::Result;
use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Cache key: ordered segments, e.g. `["report", "42"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// True if `prefix` matches the leading segments of this key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
}

/// Fetch lock of one key plus a counter bumped by every invalidation that
/// hits the key while the slot exists.
#[derive(Default)]
struct KeySlot {
    lock: Mutex<()>,
    epoch: AtomicU64,
}

/// Query behaviour shared by every key.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// How long a result is served without refetching
    pub stale_time: Duration,
    /// How long an unused result is kept at all
    pub gc_time: Duration,
    /// Extra attempts after a retryable failure
    pub retry: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(300),
            retry: 0,
        }
    }
}

/// Cheap-to-clone handle to the shared cache.
#[derive(Clone, Default)]
pub struct QueryClient {
    inner: Arc<QueryCache>,
}

#[derive(Default)]
struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    slots: DashMap<QueryKey, Arc<KeySlot>>,
    options: QueryOptions,
}

impl QueryCache {
    fn slot(&self, key: &QueryKey) -> Arc<KeySlot> {
        self.slots.entry(key.clone()).or_default().clone()
    }

    /// Drop entries older than the GC window.
    fn collect_garbage(&self) {
        let gc_time = self.options.gc_time;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.fetched_at.elapsed() < gc_time);
        let evicted = before.saturating_sub(self.entries.len());
        if evicted > 0 {
            tracing::debug!(evicted, "Expired queries evicted");
        }
    }
}

/// Removes the key's slot once nobody holds or waits on it.
struct SlotRelease<'a> {
    cache: &'a QueryCache,
    key: &'a QueryKey,
}

impl Drop for SlotRelease<'_> {
    fn drop(&mut self) {
        self.cache
            .slots
            .remove_if(self.key, |_, slot| Arc::strong_count(slot) == 1);
    }
}

impl QueryClient {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            inner: Arc::new(QueryCache {
                entries: DashMap::new(),
                slots: DashMap::new(),
                options,
            }),
        }
    }

    pub fn options(&self) -> QueryOptions {
        self.inner.options
    }

    /// Resolve `key`, calling `fetcher` only when no usable entry exists.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let requested_at = Instant::now();
        let stale_time = self.inner.options.stale_time;

        if let Some(hit) = self.lookup::<T>(&key, |e| e.fetched_at.elapsed() < stale_time) {
            return Ok(hit);
        }

        // Drop order matters: the guard, then our slot handle, then the release.
        let _release = SlotRelease {
            cache: &self.inner,
            key: &key,
        };
        let slot = self.inner.slot(&key);
        let _guard = slot.lock.lock().await;

        if let Some(hit) = self.lookup::<T>(&key, |e| {
            e.fetched_at >= requested_at || e.fetched_at.elapsed() < stale_time
        }) {
            tracing::debug!(key = %key, "Query deduplicated");
            return Ok(hit);
        }

        let epoch = slot.epoch.load(Ordering::SeqCst);
        let value = self.run_with_retry(&key, &fetcher).await?;
        if slot.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!(key = %key, "Query invalidated in flight, result not cached");
            return Ok(value);
        }

        let stored: Arc<dyn Any + Send + Sync> = Arc::new(value.clone());
        self.inner.entries.insert(
            key.clone(),
            CacheEntry {
                value: stored.clone(),
                fetched_at: Instant::now(),
            },
        );
        // An invalidation that raced the insert bumped the epoch first.
        if slot.epoch.load(Ordering::SeqCst) != epoch {
            self.inner
                .entries
                .remove_if(&key, |_, entry| Arc::ptr_eq(&entry.value, &stored));
        }
        self.inner.collect_garbage();
        Ok(value)
    }

    /// Cached value for `key`, regardless of staleness.
    pub fn get_data<T: Clone + Send + Sync + 'static>(&self, key: &QueryKey) -> Option<T> {
        let gc_time = self.inner.options.gc_time;
        self.lookup(key, |e| e.fetched_at.elapsed() < gc_time)
    }

    /// Drop every entry whose key starts with `prefix`, and keep fetches of
    /// those keys already in flight from storing their results. Returns how
    /// many entries went.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        for slot in self.inner.slots.iter() {
            if slot.key().starts_with(prefix) {
                slot.epoch.fetch_add(1, Ordering::SeqCst);
            }
        }

        let before = self.inner.entries.len();
        self.inner.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before.saturating_sub(self.inner.entries.len());
        if removed > 0 {
            tracing::debug!(prefix = %prefix, removed, "Queries invalidated");
        }
        removed
    }

    /// Drop everything (used on logout).
    pub fn clear(&self) {
        for slot in self.inner.slots.iter() {
            slot.epoch.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.entries.clear();
    }

    fn lookup<T: Clone + Send + Sync + 'static>(
        &self,
        key: &QueryKey,
        usable: impl Fn(&CacheEntry) -> bool,
    ) -> Option<T> {
        let entry = self.inner.entries.get(key)?;
        if !usable(&entry) {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    async fn run_with_retry<T, F, Fut>(&self, key: &QueryKey, fetcher: &F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match fetcher().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.inner.options.retry => {
                    let delay = retry_delay(attempt);
                    tracing::warn!(
                        key = %key,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Query failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Backoff before retry `attempt` (0-based): 1s, 2s, 4s, ... capped at 30s.
pub fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis((1000u64 << attempt.min(5)).min(30_000))
}
