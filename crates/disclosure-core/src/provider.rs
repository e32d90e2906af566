//! Provider and transport traits.
//!
//! This module defines the seams of the workspace:
//!
//! - [`DisclosureProvider`] - Base trait for all registry providers
//! - [`DirectoryProvider`] - Company name to registry code lookup
//! - [`StatementProvider`] - Single-year statement retrieval
//! - [`Transport`] - Outbound GET primitive

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{CompanyRef, StatementResult},
};

/// Maximum number of candidates returned by a directory search.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Base trait for all disclosure providers.
pub trait DisclosureProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "OpenDART").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;
}

/// Provider for company directory lookups.
#[async_trait]
pub trait DirectoryProvider: DisclosureProvider {
    /// Searches the registry for companies whose name contains `query`.
    ///
    /// Matching is case-insensitive. At most [`MAX_SEARCH_RESULTS`] entries are
    /// returned, in registry order. No match is an empty vector, not an error.
    async fn search_companies(&self, query: &str) -> Result<Vec<CompanyRef>>;
}

/// Provider for financial statements.
#[async_trait]
pub trait StatementProvider: DisclosureProvider {
    /// Retrieves the annual statement of one company for one fiscal year.
    ///
    /// Fails with [`DisclosureError::StatementNotFound`](crate::DisclosureError::StatementNotFound)
    /// when no consolidation scope yields data for that year.
    async fn get_statement(&self, company_code: &str, fiscal_year: &str)
    -> Result<StatementResult>;
}

/// Outbound GET primitive.
///
/// Implementations bound every call with a timeout and report every network-layer
/// failure as [`DisclosureError::Transport`](crate::DisclosureError::Transport).
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Issues a GET request and returns the response body.
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Vec<u8>>;
}
