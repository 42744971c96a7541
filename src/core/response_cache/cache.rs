//! Response cache implementation
//!
//! A single-tier LRU cache with per-entry TTL. Capacity pressure evicts the
//! least recently used entry; expiry removes entries on read and during
//! maintenance sweeps, whichever comes first.

use super::types::{AtomicCacheStats, CacheEntry, CacheKey, CacheStats};
use crate::core::models::{PromptRequest, ProviderResponse};
use crate::core::providers::ProviderKind;
use crate::utils::error::{GatewayError, Result};
use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::{debug, info};

/// TTL + LRU cache for provider responses
pub struct ResponseCache {
    /// Entries in recency order, bounded by capacity
    entries: RwLock<LruCache<CacheKey, CacheEntry<ProviderResponse>>>,
    /// Time-to-live applied to every entry
    ttl: Duration,
    /// Cache statistics (lock-free atomics for hot path)
    stats: AtomicCacheStats,
}

impl ResponseCache {
    /// Create a new cache holding at most `max_size` entries
    pub fn new(max_size: usize, ttl: Duration) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_size).ok_or_else(|| {
            GatewayError::config("Invalid cache configuration: max_size must be greater than 0")
        })?;

        Ok(Self {
            entries: RwLock::new(LruCache::new(capacity)),
            ttl,
            stats: AtomicCacheStats::default(),
        })
    }

    /// Look up a cached response for this request.
    ///
    /// Ineligible requests bypass the cache entirely. An expired entry is
    /// removed here rather than waiting for the maintenance sweep, so reads
    /// never race a stale value.
    pub fn get(
        &self,
        provider: ProviderKind,
        workspace_id: &str,
        request: &PromptRequest,
    ) -> Option<ProviderResponse> {
        if !Self::is_cacheable_request(request) {
            return None;
        }

        let key = CacheKey::for_request(provider, workspace_id, request);
        let mut entries = self.entries.write();

        if let Some(entry) = entries.get_mut(&key) {
            if !entry.is_expired() {
                entry.mark_accessed();
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!(workspace_id, "cache hit");
                return Some(entry.value.clone());
            }

            if let Some(stale) = entries.pop(&key) {
                self.stats
                    .total_size_bytes
                    .fetch_sub(stale.size_bytes, Ordering::Relaxed);
                debug!(workspace_id, "removed expired entry on read");
            }
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a response for this request.
    ///
    /// Uses the same eligibility rules as [`get`](Self::get); additionally
    /// a response without usage metadata is never stored, since it cannot
    /// be attributed when replayed.
    pub fn set(
        &self,
        provider: ProviderKind,
        workspace_id: &str,
        request: &PromptRequest,
        response: &ProviderResponse,
    ) {
        if !Self::is_cacheable_request(request) || !Self::is_cacheable_response(response) {
            return;
        }

        let key = CacheKey::for_request(provider, workspace_id, request);
        let size_bytes = Self::estimate_size(response);
        let entry = CacheEntry::new(response.clone(), self.ttl, size_bytes);

        let mut entries = self.entries.write();
        if let Some((displaced_key, displaced)) = entries.push(key.clone(), entry) {
            self.stats
                .total_size_bytes
                .fetch_sub(displaced.size_bytes, Ordering::Relaxed);
            // A returned entry under a different key is a capacity
            // eviction; the same key is just a value replacement
            if displaced_key != key {
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(
                    workspace_id = %displaced_key.workspace_id,
                    "evicted least recently used entry"
                );
            }
        }
        self.stats
            .total_size_bytes
            .fetch_add(size_bytes, Ordering::Relaxed);
        self.stats.stores.fetch_add(1, Ordering::Relaxed);
    }

    /// Remove every entry and reset statistics
    pub fn clear(&self) {
        self.entries.write().clear();
        self.stats.reset();
        info!("response cache cleared");
    }

    /// Remove expired entries, returning how many were dropped.
    ///
    /// Reads already skip and remove expired entries; this sweep only
    /// reclaims memory for entries nobody asked for again.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write();

        let expired: Vec<CacheKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            if let Some(entry) = entries.pop(key) {
                self.stats
                    .total_size_bytes
                    .fetch_sub(entry.size_bytes, Ordering::Relaxed);
            }
        }

        if !expired.is_empty() {
            info!(purged = expired.len(), "purged expired cache entries");
        }

        expired.len()
    }

    /// Snapshot of cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.read().len())
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Streaming responses arrive incrementally and are never a single
    /// replayable value; such requests bypass the cache on both paths.
    fn is_cacheable_request(request: &PromptRequest) -> bool {
        !request.stream
    }

    /// Responses without usage metadata cannot be metered when replayed
    fn is_cacheable_response(response: &ProviderResponse) -> bool {
        response.usage.is_some()
    }

    /// Estimate the memory footprint of a response
    fn estimate_size(response: &ProviderResponse) -> usize {
        serde_json::to_vec(response).map(|v| v.len()).unwrap_or(512)
    }
}
