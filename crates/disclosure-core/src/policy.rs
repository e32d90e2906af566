//! Retrieval policy: which scopes and fiscal years are tried, and in what order.

use chrono::{Datelike, Utc};
use std::time::Duration;

use crate::error::{DisclosureError, Result};
use crate::report::ConsolidationScope;

/// Number of fiscal years tried by the default policy.
pub const DEFAULT_YEAR_WINDOW: u16 = 3;

/// Ordered retrieval policy.
///
/// Scopes are tried in order within each year; years are tried in order (most recent
/// first by default). The first attempt that yields data wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetrievalPolicy {
    scopes: Vec<ConsolidationScope>,
    candidate_years: Vec<String>,
    deadline: Option<Duration>,
}

impl Default for RetrievalPolicy {
    fn default() -> Self {
        Self {
            scopes: vec![ConsolidationScope::Consolidated, ConsolidationScope::Standalone],
            candidate_years: Self::recent_years(Utc::now().year(), DEFAULT_YEAR_WINDOW),
            deadline: None,
        }
    }
}

impl RetrievalPolicy {
    /// Creates the default policy: consolidated before standalone, the three most
    /// recent completed fiscal years, no overall deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `count` completed fiscal years before `current_year`, most recent first.
    #[must_use]
    pub fn recent_years(current_year: i32, count: u16) -> Vec<String> {
        (1..=i32::from(count))
            .map(|offset| (current_year - offset).to_string())
            .collect()
    }

    /// Replaces the candidate fiscal years.
    ///
    /// Every year must be four ASCII digits and the list must not be empty.
    pub fn with_years<I, S>(mut self, years: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let years: Vec<String> = years.into_iter().map(Into::into).collect();
        if years.is_empty() {
            return Err(DisclosureError::Validation(
                "At least one candidate fiscal year is required".to_string(),
            ));
        }
        for year in &years {
            validate_fiscal_year(year)?;
        }
        self.candidate_years = years;
        Ok(self)
    }

    /// Replaces the scope order.
    pub fn with_scopes(mut self, scopes: Vec<ConsolidationScope>) -> Result<Self> {
        if scopes.is_empty() {
            return Err(DisclosureError::Validation(
                "At least one consolidation scope is required".to_string(),
            ));
        }
        self.scopes = scopes;
        Ok(self)
    }

    /// Sets an overall budget for the year loop.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the scope order.
    #[must_use]
    pub fn scopes(&self) -> &[ConsolidationScope] {
        &self.scopes
    }

    /// Returns the candidate fiscal years in attempt order.
    #[must_use]
    pub fn candidate_years(&self) -> &[String] {
        &self.candidate_years
    }

    /// Returns the overall budget, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

/// Checks that a fiscal year is exactly four ASCII digits.
pub fn validate_fiscal_year(year: &str) -> Result<()> {
    if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(DisclosureError::Validation(format!(
            "Fiscal year must be four digits, got {year:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_years_descending() {
        assert_eq!(
            RetrievalPolicy::recent_years(2025, 3),
            vec!["2024", "2023", "2022"]
        );
        assert!(RetrievalPolicy::recent_years(2025, 0).is_empty());
    }

    #[test]
    fn test_recent_years_large_window() {
        let years = RetrievalPolicy::recent_years(2025, u16::MAX);
        assert_eq!(years.len(), usize::from(u16::MAX));
        assert_eq!(years.last().map(String::as_str), Some("-63510"));
    }

    #[test]
    fn test_default_policy() {
        let policy = RetrievalPolicy::default();
        assert_eq!(
            policy.scopes(),
            &[ConsolidationScope::Consolidated, ConsolidationScope::Standalone]
        );
        assert_eq!(policy.candidate_years().len(), usize::from(DEFAULT_YEAR_WINDOW));
        assert!(policy.deadline().is_none());

        let years: Vec<i32> = policy
            .candidate_years()
            .iter()
            .map(|y| y.parse().unwrap())
            .collect();
        assert!(years.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_with_years_validates() {
        let policy = RetrievalPolicy::new().with_years(["2024", "2023"]).unwrap();
        assert_eq!(policy.candidate_years(), &["2024", "2023"]);

        assert!(RetrievalPolicy::new().with_years(["24"]).is_err());
        assert!(RetrievalPolicy::new().with_years(Vec::<String>::new()).is_err());
        assert!(RetrievalPolicy::new().with_scopes(Vec::new()).is_err());
    }

    #[test]
    fn test_validate_fiscal_year() {
        assert!(validate_fiscal_year("2023").is_ok());
        assert!(validate_fiscal_year("２０２３").is_err());
        assert!(validate_fiscal_year("20231").is_err());
        assert!(validate_fiscal_year("").is_err());
    }
}
