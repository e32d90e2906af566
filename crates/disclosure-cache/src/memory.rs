//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use disclosure_core::{Result, Selection, SelectionCache};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    cached_at: chrono::DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

/// Keeps the current selection of each session in memory.
///
/// Sessions are independent: storing a selection for one session never touches
/// another. Entries are lost when the cache is dropped.
#[derive(Debug, Default)]
pub struct InMemorySelectionCache {
    sessions: RwLock<HashMap<String, CacheEntry<Selection>>>,
}

impl InMemorySelectionCache {
    /// Create a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of sessions holding a selection.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true when no session holds a selection.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SelectionCache for InMemorySelectionCache {
    #[instrument(skip(self))]
    async fn get(&self, session: &str) -> Result<Option<Selection>> {
        let sessions = self.sessions.read().await;
        match sessions.get(session) {
            Some(entry) => {
                debug!(company = entry.data.company.code(), "Cache hit for selection");
                Ok(Some(entry.data.clone()))
            }
            None => {
                debug!("Cache miss for selection");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, selection), fields(company = selection.company.code()))]
    async fn put(&self, session: &str, selection: &Selection) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.to_string(), CacheEntry::new(selection.clone()));
        debug!(lines = selection.statement.len(), "Cached selection");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, session: &str) -> Result<bool> {
        let removed = self.sessions.write().await.remove(session).is_some();
        debug!(removed, "Removed selection");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - sessions.len();

        if removed > 0 {
            debug!("Invalidated {} stale selections", removed);
        }

        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.sessions.write().await.clear();
        debug!("Cleared all selections");
        Ok(())
    }
}
