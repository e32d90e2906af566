//! Key financial metrics extracted from statement lines.
//!
//! Account names are matched by substring, so "매출액" also matches a line labelled
//! "매출액(수익)". Lines tagged with a different scope than the statement's are skipped,
//! and among the rest the first matching line wins.

use serde::{Deserialize, Serialize};

use crate::types::{AccountLine, StatementResult};

const REVENUE: &str = "매출액";
const OPERATING_INCOME: &str = "영업이익";
const NET_INCOME: &str = "당기순이익";
const TOTAL_ASSETS: &str = "자산총계";
const TOTAL_LIABILITIES: &str = "부채총계";

/// Current and prior amount of one account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPair {
    /// Current-period amount.
    pub current: Option<i64>,
    /// Prior-period amount.
    pub prior: Option<i64>,
}

impl PeriodPair {
    fn from_line(line: &AccountLine) -> Self {
        Self {
            current: line.current_amount.as_deref().and_then(parse_amount),
            prior: line.prior_amount.as_deref().and_then(parse_amount),
        }
    }
}

/// Key financial metrics of one statement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// Revenue.
    pub revenue: PeriodPair,
    /// Operating income.
    pub operating_income: PeriodPair,
    /// Net income.
    pub net_income: PeriodPair,
    /// Total assets.
    pub total_assets: PeriodPair,
    /// Total liabilities.
    pub total_liabilities: PeriodPair,
}

impl KeyMetrics {
    /// Extracts the key metrics from a statement.
    #[must_use]
    pub fn from_statement(statement: &StatementResult) -> Self {
        let pair = |needle: &str| {
            statement
                .find_line(needle)
                .map(PeriodPair::from_line)
                .unwrap_or_default()
        };

        Self {
            revenue: pair(REVENUE),
            operating_income: pair(OPERATING_INCOME),
            net_income: pair(NET_INCOME),
            total_assets: pair(TOTAL_ASSETS),
            total_liabilities: pair(TOTAL_LIABILITIES),
        }
    }

    /// Computes the ratios derivable from these metrics.
    #[must_use]
    pub fn ratios(&self) -> FinancialRatios {
        FinancialRatios {
            debt_ratio: percent(self.total_liabilities.current, self.total_assets.current),
            revenue_growth: match (self.revenue.current, self.revenue.prior) {
                (Some(current), Some(prior)) if prior > 0 => {
                    Some((current as f64 - prior as f64) / prior as f64 * 100.0)
                }
                _ => None,
            },
            operating_margin: percent(self.operating_income.current, self.revenue.current),
        }
    }
}

/// Ratios in percent. A ratio is absent when its denominator is missing or not positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    /// Total liabilities over total assets.
    pub debt_ratio: Option<f64>,
    /// Year-over-year revenue change.
    pub revenue_growth: Option<f64>,
    /// Operating income over revenue.
    pub operating_margin: Option<f64>,
}

fn percent(numerator: Option<i64>, denominator: Option<i64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d > 0 => Some(n as f64 / d as f64 * 100.0),
        _ => None,
    }
}

/// Parses an upstream amount such as `"1,234,567"` or `"-12,000"`.
///
/// Returns `None` for blanks, dashes and anything else that is not an integer.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<i64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    cleaned.parse().ok()
}
