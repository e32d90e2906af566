#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/disclosure/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for financial-disclosure registry clients.
//!
//! This crate provides the foundational abstractions shared by every other crate:
//!
//! - [`DirectoryProvider`](provider::DirectoryProvider) - Company name to registry code lookup
//! - [`StatementProvider`](provider::StatementProvider) - Single-year statement retrieval
//! - [`Transport`](provider::Transport) - The outbound GET primitive
//! - [`SelectionCache`](cache::SelectionCache) - Session-scoped selection slot
//! - [`Status`](status::Status) - Classified upstream status codes

/// Session-scoped selection cache trait.
pub mod cache;
/// Error types for disclosure operations.
pub mod error;
/// Key financial metrics extracted from statement lines.
pub mod metrics;
/// Retrieval policy (scope order, candidate years).
pub mod policy;
/// Provider and transport traits.
pub mod provider;
/// Report kind and consolidation scope definitions.
pub mod report;
/// Upstream status code classification.
pub mod status;
/// Core data types (CompanyRef, StatementResult, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{Selection, SelectionCache};
pub use error::{DisclosureError, Result};
pub use metrics::{FinancialRatios, KeyMetrics, PeriodPair};
pub use policy::RetrievalPolicy;
pub use provider::{DirectoryProvider, DisclosureProvider, StatementProvider, Transport};
pub use report::{ConsolidationScope, ReportKind};
pub use status::Status;
pub use types::{AccountLine, CompanyRef, StatementQuery, StatementResult};
