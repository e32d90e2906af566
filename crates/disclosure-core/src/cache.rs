//! Session-scoped selection cache.
//!
//! This module defines the [`SelectionCache`] trait. A session holds at most one
//! [`Selection`]: the company the user picked and the statement fetched for it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    error::Result,
    types::{CompanyRef, StatementResult},
};

/// The company selected in a session together with its statement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected company.
    pub company: CompanyRef,
    /// Statement retrieved for the company.
    pub statement: StatementResult,
}

/// Trait for one-slot-per-session storage of selections.
#[async_trait]
pub trait SelectionCache: Send + Sync {
    /// Retrieves the selection stored for a session.
    ///
    /// Returns `Ok(Some(selection))` if present, `Ok(None)` otherwise.
    async fn get(&self, session: &str) -> Result<Option<Selection>>;

    /// Stores a selection, replacing whatever the session held before.
    async fn put(&self, session: &str, selection: &Selection) -> Result<()>;

    /// Removes the selection of a session. Returns true if one was present.
    async fn remove(&self, session: &str) -> Result<bool>;

    /// Removes selections older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all sessions.
    async fn clear(&self) -> Result<()>;
}
