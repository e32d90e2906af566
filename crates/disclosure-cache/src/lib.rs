#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/disclosure/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Session selection caches.
//!
//! This crate provides implementations of the [`SelectionCache`] trait from `disclosure-core`:
//!
//! - [`InMemorySelectionCache`] - One selection per session, held in memory
//! - [`NoopSelectionCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use disclosure_core::SelectionCache;

pub use memory::InMemorySelectionCache;
pub use noop::NoopSelectionCache;
