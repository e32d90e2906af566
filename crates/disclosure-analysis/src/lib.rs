#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/disclosure/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Generative-language analyses of financial statements.
//!
//! # Example
//!
//! ```no_run
//! use disclosure_analysis::{Analyzer, GeminiClient};
//! # use disclosure_core::Selection;
//!
//! # async fn run(selection: Selection) -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::new(GeminiClient::new("your_gemini_key")?);
//! let report = analyzer.financial_analysis(&selection).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

/// Analyses over a selected statement.
pub mod analyzer;
/// Text generation trait and the Gemini client.
pub mod generator;
/// Prompt templates.
pub mod prompts;
/// Input sanitizing and response tidying.
pub mod sanitize;

pub use analyzer::Analyzer;
pub use generator::{GeminiClient, GenerationConfig, TextGenerator};
pub use prompts::AnalysisKind;
pub use sanitize::{sanitize_input, tidy_response};
