//! Response cache type definitions
//!
//! Cache keys, entry metadata, and the statistics counters shared by the
//! cache hot path.

use crate::core::models::PromptRequest;
use crate::core::providers::ProviderKind;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Fingerprint identifying one cacheable request.
///
/// Two requests map to the same key exactly when every field that can
/// change the provider's output matches: provider, workspace, model, the
/// ordered message list, temperature, and max tokens. The correlation id
/// is deliberately excluded so retries of the same prompt hit the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Upstream provider the response came from
    pub provider: ProviderKind,
    /// Workspace the response belongs to; never shared across tenants
    pub workspace_id: String,
    /// Hash of the output-affecting request fields
    pub request_hash: u64,
}

impl CacheKey {
    /// Build the fingerprint for a request
    pub fn for_request(provider: ProviderKind, workspace_id: &str, request: &PromptRequest) -> Self {
        Self {
            provider,
            workspace_id: workspace_id.to_string(),
            request_hash: Self::hash_request(request),
        }
    }

    /// Hash the request fields that determine the response
    fn hash_request(request: &PromptRequest) -> u64 {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();

        request.model.hash(&mut hasher);

        // Message order matters: the same messages in a different order
        // are a different conversation
        for message in &request.messages {
            message.role.as_str().hash(&mut hasher);
            message.content.hash(&mut hasher);
        }

        // Floats hash via their bit pattern
        request.temperature.map(|t| t.to_bits()).hash(&mut hasher);
        request.max_tokens.hash(&mut hasher);

        hasher.finish()
    }
}

/// Cache entry with freshness metadata
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// When the entry was created
    pub created_at: Instant,
    /// When the entry expires
    pub expires_at: Instant,
    /// Last access time
    pub last_accessed: Instant,
    /// Size in bytes (estimated)
    pub size_bytes: usize,
}

impl<T> CacheEntry<T> {
    /// Create a new cache entry
    pub fn new(value: T, ttl: Duration, size_bytes: usize) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
            last_accessed: now,
            size_bytes,
        }
    }

    /// Check if the entry is expired
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }

    /// Mark the entry as accessed
    pub fn mark_accessed(&mut self) {
        self.last_accessed = Instant::now();
    }
}

/// Atomic cache statistics for lock-free hot path updates
#[derive(Debug, Default)]
pub struct AtomicCacheStats {
    /// Lookups that returned a fresh entry
    pub hits: AtomicU64,
    /// Lookups that found nothing usable
    pub misses: AtomicU64,
    /// Entries written
    pub stores: AtomicU64,
    /// Entries displaced by capacity pressure
    pub evictions: AtomicU64,
    /// Estimated bytes held across all live entries
    pub total_size_bytes: AtomicUsize,
}

impl AtomicCacheStats {
    /// Create a snapshot of current stats
    pub fn snapshot(&self, size: usize) -> CacheStats {
        CacheStats {
            size,
            calculated_size: self.total_size_bytes.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Reset all stats to zero
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.stores.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.total_size_bytes.store(0, Ordering::Relaxed);
    }
}

/// Cache statistics snapshot (returned to callers)
#[derive(Debug, Default, Clone, Serialize)]
pub struct CacheStats {
    /// Live entries at snapshot time
    pub size: usize,
    /// Estimated bytes held across live entries
    pub calculated_size: usize,
    /// Lookups that returned a fresh entry
    pub hits: u64,
    /// Lookups that found nothing usable
    pub misses: u64,
    /// Entries written
    pub stores: u64,
    /// Entries displaced by capacity pressure
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups served from cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
