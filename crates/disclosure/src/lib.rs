#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/disclosure/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Company search, statement retrieval and analysis over the Korean electronic
//! disclosure system.
//!
//! This crate re-exports the core types and the provider implementations, and provides
//! a [`StatementService`] that applies the fiscal-year fallback on top of a
//! [`StatementProvider`] and keeps one selected company per session.
//!
//! # Features
//!
//! - `dart` - OpenDART provider for directory search and statements
//! - `analysis` - Generative-language analyses of statements
//!
//! # Example
//!
//! ```rust,ignore
//! use disclosure::{DartProvider, DirectoryProvider, RetrievalPolicy, StatementService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> disclosure::Result<()> {
//!     let provider = Arc::new(DartProvider::new("your_api_key")?);
//!     let service = StatementService::new(provider.clone(), RetrievalPolicy::default());
//!
//!     let companies = provider.search_companies("삼성전자").await?;
//!     if let Some(company) = companies.into_iter().next() {
//!         let selection = service.select("cli", company).await?;
//!         println!("{} lines", selection.statement.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use disclosure_core::*;

// Cache implementations
pub use disclosure_cache::{InMemorySelectionCache, NoopSelectionCache};

// Providers
#[cfg(feature = "dart")]
pub use disclosure_dart::{DartProvider, HttpTransport};

// Analysis
#[cfg(feature = "analysis")]
pub use disclosure_analysis::{
    AnalysisKind, Analyzer, GeminiClient, TextGenerator, generator::DEFAULT_MODEL as DEFAULT_GEMINI_MODEL,
    sanitize_input,
};

mod service;
pub use service::StatementService;
