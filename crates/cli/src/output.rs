//! Terminal rendering.

use disclosure::{CompanyRef, FinancialRatios, KeyMetrics, PeriodPair, StatementResult};

const EOK: i64 = 100_000_000;
const MAN: i64 = 10_000;

/// Groups the digits of `value` in threes.
pub(crate) fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a won amount in the largest of 억 / 만 units it reaches.
pub(crate) fn format_won(amount: i64) -> String {
    let magnitude = amount.unsigned_abs();
    if magnitude >= EOK.unsigned_abs() {
        format!("{}억 원", group_digits(amount / EOK))
    } else if magnitude >= MAN.unsigned_abs() {
        format!("{}만 원", group_digits(amount / MAN))
    } else {
        format!("{} 원", group_digits(amount))
    }
}

fn pair(pair: PeriodPair) -> String {
    let show = |v: Option<i64>| v.map_or_else(|| "-".to_string(), format_won);
    format!("{:>20} {:>20}", show(pair.current), show(pair.prior))
}

fn ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}%"))
}

pub(crate) fn print_companies(companies: &[CompanyRef]) {
    if companies.is_empty() {
        println!("No matching companies.");
        return;
    }
    for (i, company) in companies.iter().enumerate() {
        println!("{:>2}. {company}", i + 1);
    }
}

pub(crate) fn print_statement(company: &CompanyRef, statement: &StatementResult) {
    println!(
        "{} - fiscal year {} ({} statement, {} lines)",
        company.name(),
        statement.fiscal_year_used,
        statement.consolidation_scope_used,
        statement.len()
    );
    println!();

    let metrics = KeyMetrics::from_statement(statement);
    println!("{:<12} {:>20} {:>20}", "", "current", "prior");
    println!("{:<12} {}", "매출액", pair(metrics.revenue));
    println!("{:<12} {}", "영업이익", pair(metrics.operating_income));
    println!("{:<12} {}", "당기순이익", pair(metrics.net_income));
    println!("{:<12} {}", "자산총계", pair(metrics.total_assets));
    println!("{:<12} {}", "부채총계", pair(metrics.total_liabilities));
    println!();

    let FinancialRatios {
        debt_ratio,
        revenue_growth,
        operating_margin,
    } = metrics.ratios();
    println!(
        "debt ratio {}  revenue growth {}  operating margin {}",
        ratio(debt_ratio),
        ratio(revenue_growth),
        ratio(operating_margin)
    );
}
