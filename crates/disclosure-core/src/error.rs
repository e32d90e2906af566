//! Error types for disclosure operations.
//!
//! This module defines [`DisclosureError`] which covers every failure that can occur
//! when searching the registry, retrieving statements, or generating analyses.

use thiserror::Error;

/// Errors that can occur during disclosure operations.
#[derive(Error, Debug)]
pub enum DisclosureError {
    /// Network-layer failure (connection refused, timeout, non-2xx status).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The registry payload could not be unpacked, decoded or parsed.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The upstream explicitly rejected the request.
    #[error("Rejected by upstream (status {code}): {message}")]
    Rejected {
        /// Raw upstream status code.
        code: String,
        /// Upstream message.
        message: String,
    },

    /// The company directory could not be fetched or read.
    #[error("Directory unavailable: {0}")]
    DirectoryUnavailable(#[source] Box<DisclosureError>),

    /// No statement scope yielded data for a single fiscal year.
    #[error("No statement found for {company_code} in fiscal year {fiscal_year}")]
    StatementNotFound {
        /// Registry code of the company.
        company_code: String,
        /// The fiscal year that was attempted.
        fiscal_year: String,
    },

    /// Every candidate year and scope was exhausted without data.
    #[error(
        "No statements found for {company_code} in the recent window ({})",
        .attempted_years.join(", ")
    )]
    DataNotFound {
        /// Registry code of the company.
        company_code: String,
        /// Fiscal years that were attempted, in attempt order.
        attempted_years: Vec<String>,
    },

    /// Missing or ill-formed input, rejected before any network call.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The generative-language service failed.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A client could not be configured (missing credential, bad HTTP client).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DisclosureError {
    /// Wraps this error as a directory failure.
    ///
    /// Errors that already are [`DisclosureError::DirectoryUnavailable`] are returned as-is.
    #[must_use]
    pub fn into_directory_unavailable(self) -> Self {
        match self {
            Self::DirectoryUnavailable(_) => self,
            other => Self::DirectoryUnavailable(Box::new(other)),
        }
    }

    /// Returns true for the errors a retrieval caller sees when nothing was found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StatementNotFound { .. } | Self::DataNotFound { .. }
        )
    }
}

/// Result type alias using [`DisclosureError`].
pub type Result<T> = std::result::Result<T, DisclosureError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_directory_unavailable_keeps_source() {
        let err = DisclosureError::Transport("connection refused".to_string())
            .into_directory_unavailable();

        assert!(matches!(err, DisclosureError::DirectoryUnavailable(_)));
        assert!(err.to_string().contains("connection refused"));
        assert!(err.source().is_some());

        // Wrapping twice does not nest.
        let again = err.into_directory_unavailable();
        match again {
            DisclosureError::DirectoryUnavailable(inner) => {
                assert!(matches!(*inner, DisclosureError::Transport(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_data_not_found_lists_years() {
        let err = DisclosureError::DataNotFound {
            company_code: "00126380".to_string(),
            attempted_years: vec!["2024".to_string(), "2023".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "No statements found for 00126380 in the recent window (2024, 2023)"
        );
        assert!(err.is_not_found());
        assert!(!DisclosureError::Validation("x".to_string()).is_not_found());
    }
}
