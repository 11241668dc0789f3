//! TTL- and capacity-bounded cache of final answers

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Clock, SystemClock};

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CachedAnswer {
    answer: String,
    /// Expiration timestamp (millis since epoch, per the injected clock)
    expires_at: u64,
}

/// Concurrent cache from question hash to final answer.
///
/// Capacity eviction is delegated to moka; expiry bookkeeping is done
/// against an injected [`Clock`] so TTL behavior is testable without
/// sleeping. Callers must only insert successful answers; fallback strings
/// must never land here.
#[derive(Debug)]
pub struct ResponseCache {
    cache: MokaCache<String, CachedAnswer>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(capacity: u64, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: MokaCache::builder().max_capacity(capacity).build(),
            ttl,
            clock,
        }
    }

    /// Live answer for the given question hash, if any.
    ///
    /// Expired entries are removed on read, matching their absence from the
    /// caller's point of view.
    pub async fn get(&self, question_hash: &str) -> Option<String> {
        let entry = self.cache.get(question_hash).await?;

        if self.clock.now_millis() >= entry.expires_at {
            debug!(key = question_hash, "response cache entry expired");
            self.cache.remove(question_hash).await;
            return None;
        }

        Some(entry.answer)
    }

    /// Store an answer with a fresh TTL
    pub async fn insert(&self, question_hash: String, answer: String) {
        let expires_at = self.clock.now_millis() + self.ttl.as_millis() as u64;
        self.cache
            .insert(question_hash, CachedAnswer { answer, expires_at })
            .await;
    }

    /// Entry count after flushing pending maintenance
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}
