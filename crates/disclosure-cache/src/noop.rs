//! No-op cache implementation.

use async_trait::async_trait;
use disclosure_core::{Result, Selection, SelectionCache};
use std::time::Duration;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)` and `put` returns `Ok(())`, so every session
/// appears to have no selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSelectionCache;

impl NoopSelectionCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SelectionCache for NoopSelectionCache {
    async fn get(&self, _session: &str) -> Result<Option<Selection>> {
        trace!("NoopSelectionCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, _session: &str, _selection: &Selection) -> Result<()> {
        trace!("NoopSelectionCache: put called, doing nothing");
        Ok(())
    }

    async fn remove(&self, _session: &str) -> Result<bool> {
        Ok(false)
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}
