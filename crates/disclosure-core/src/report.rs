//! Report kind and consolidation scope definitions.
//!
//! This module defines [`ReportKind`] for the periodic report a statement is taken from
//! and [`ConsolidationScope`] for the accounting scope of the figures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Periodic report a statement is taken from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    /// Annual business report.
    #[default]
    Annual,
    /// Half-year report.
    HalfYear,
    /// First-quarter report.
    FirstQuarter,
    /// Third-quarter report.
    ThirdQuarter,
}

impl ReportKind {
    /// Returns the upstream report code (`reprt_code`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Annual => "11011",
            Self::HalfYear => "11012",
            Self::FirstQuarter => "11013",
            Self::ThirdQuarter => "11014",
        }
    }
}

/// Accounting scope of a financial statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsolidationScope {
    /// Consolidated figures, subsidiaries included.
    Consolidated,
    /// Standalone figures of the parent entity only.
    Standalone,
}

impl ConsolidationScope {
    /// Returns the upstream scope code (`fs_div`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Consolidated => "CFS",
            Self::Standalone => "OFS",
        }
    }

    /// Parses an upstream scope code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CFS" => Some(Self::Consolidated),
            "OFS" => Some(Self::Standalone),
            _ => None,
        }
    }
}

impl fmt::Display for ConsolidationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consolidated => write!(f, "consolidated"),
            Self::Standalone => write!(f, "standalone"),
        }
    }
}
