//! Core data types for registry lookups and statement retrieval.
//!
//! - [`CompanyRef`] - A registry entry resolved from a company name
//! - [`StatementQuery`] - Parameters of a single statement request
//! - [`AccountLine`] - One account line of a statement
//! - [`StatementResult`] - A validated statement plus envelope metadata

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::report::{ConsolidationScope, ReportKind};

/// Identifies a company in the disclosure registry.
///
/// Names are not unique: several historical or shell entities can share one, so the
/// registry `code` is the only key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyRef {
    code: String,
    name: String,
    listing_symbol: String,
}

impl CompanyRef {
    /// Creates a company reference. An unlisted company has an empty listing symbol.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        listing_symbol: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            listing_symbol: listing_symbol.into(),
        }
    }

    /// Returns the registry code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the public-market ticker, empty when unlisted.
    #[must_use]
    pub fn listing_symbol(&self) -> &str {
        &self.listing_symbol
    }

    /// Returns true if the company has a public-market ticker.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        !self.listing_symbol.trim().is_empty()
    }
}

impl fmt::Display for CompanyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_listed() {
            write!(f, "{} ({}, {})", self.name, self.code, self.listing_symbol)
        } else {
            write!(f, "{} ({})", self.name, self.code)
        }
    }
}

/// Parameters of one statement request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StatementQuery {
    /// Registry code of the company.
    pub company_code: String,
    /// Four-digit fiscal year.
    pub fiscal_year: String,
    /// Report the statement is taken from.
    pub report_kind: ReportKind,
    /// Accounting scope requested.
    pub consolidation_scope: ConsolidationScope,
}

impl StatementQuery {
    /// Creates an annual-report query.
    #[must_use]
    pub fn annual(
        company_code: impl Into<String>,
        fiscal_year: impl Into<String>,
        consolidation_scope: ConsolidationScope,
    ) -> Self {
        Self {
            company_code: company_code.into(),
            fiscal_year: fiscal_year.into(),
            report_kind: ReportKind::Annual,
            consolidation_scope,
        }
    }
}

/// One account line of a statement.
///
/// Only the name and the two period amounts are typed; every other upstream field is
/// kept verbatim in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountLine {
    /// Account name.
    #[serde(rename = "account_nm", default)]
    pub account_name: String,
    /// Current-period amount as reported.
    #[serde(rename = "thstrm_amount", default)]
    pub current_amount: Option<String>,
    /// Prior-period amount as reported.
    #[serde(rename = "frmtrm_amount", default)]
    pub prior_amount: Option<String>,
    /// Remaining upstream fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AccountLine {
    /// Creates an account line with the typed fields only.
    #[must_use]
    pub fn new(
        account_name: impl Into<String>,
        current_amount: impl Into<String>,
        prior_amount: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            current_amount: Some(current_amount.into()),
            prior_amount: Some(prior_amount.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// Returns the scope this line is tagged with, if the upstream row carries one.
    #[must_use]
    pub fn scope(&self) -> Option<ConsolidationScope> {
        self.extra
            .get("fs_div")
            .and_then(|v| v.as_str())
            .and_then(ConsolidationScope::from_code)
    }
}

/// A validated financial statement plus its envelope metadata.
///
/// Only constructed for a successful status with at least one account line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    /// Registry code of the company.
    pub company_code: String,
    /// Upstream status code.
    pub status_code: String,
    /// Upstream status message.
    pub status_message: String,
    /// Scope the data was found under.
    pub consolidation_scope_used: ConsolidationScope,
    /// Fiscal year the data was found for.
    pub fiscal_year_used: String,
    /// Account lines in upstream order.
    pub lines: Vec<AccountLine>,
}

impl StatementResult {
    /// Returns the first line whose account name contains `needle`.
    ///
    /// Lines tagged with a scope other than [`Self::consolidation_scope_used`] are skipped;
    /// untagged lines always qualify.
    #[must_use]
    pub fn find_line(&self, needle: &str) -> Option<&AccountLine> {
        self.lines.iter().find(|l| {
            l.account_name.contains(needle)
                && l.scope().is_none_or(|s| s == self.consolidation_scope_used)
        })
    }

    /// Returns the number of account lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if there are no account lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
