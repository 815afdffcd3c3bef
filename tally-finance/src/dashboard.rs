//! Dashboard pipeline: load the ledger, categorize every row, and reduce
//! the result into the figures the dashboard shows.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::category_rules::categorize_all;
use tally_core::{
    category_spending, monthly_spending, summary_totals, AmountOverflow, CategoryTotal,
    MonthlyTotal, SummaryTotals, Transaction,
};
use tally_ingest::{load_ledger_with, LoadOptions, MalformedLedger};

/// Decimal places shown on the dashboard
pub const DISPLAY_DP: u32 = 2;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Ledger(#[from] MalformedLedger),
    #[error(transparent)]
    Overflow(#[from] AmountOverflow),
}

/// Everything the dashboard needs, derived from one ledger snapshot.
/// All amounts are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub transaction_count: usize,
    pub totals: SummaryTotals,
    pub monthly_spending: Vec<MonthlyTotal>,
    pub category_spending: Vec<CategoryTotal>,
}

/// Round half to even at two decimals, the same way for every figure shown
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(DISPLAY_DP)
}

impl DashboardReport {
    pub fn from_transactions(txns: &[Transaction]) -> Result<Self, AmountOverflow> {
        let exact = summary_totals(txns)?;

        let monthly_spending = monthly_spending(txns)?
            .into_iter()
            .map(|m| MonthlyTotal {
                total: round_money(m.total),
                ..m
            })
            .collect();
        let category_spending = category_spending(txns)?
            .into_iter()
            .map(|c| CategoryTotal {
                total: round_money(c.total),
                ..c
            })
            .collect();

        Ok(Self {
            transaction_count: txns.len(),
            totals: SummaryTotals {
                income: round_money(exact.income),
                expenses: round_money(exact.expenses),
                savings: round_money(exact.savings),
            },
            monthly_spending,
            category_spending,
        })
    }

    /// Bar chart input: one bar per month, height = money spent in cents.
    pub fn chart_bars(&self) -> Vec<(String, u64)> {
        self.monthly_spending
            .iter()
            .map(|m| (m.month.to_string(), to_cents(-m.total)))
            .collect()
    }
}

/// Bar heights saturate at `u64::MAX`; the bar label still carries the
/// real amount.
fn to_cents(amount: Decimal) -> u64 {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.round().to_u64())
        .unwrap_or(u64::MAX)
}

/// Run the whole pipeline over a ledger file. The file is read fresh on
/// every call.
pub fn build_dashboard(
    path: impl AsRef<Path>,
    opts: &LoadOptions,
) -> Result<DashboardReport, DashboardError> {
    let path = path.as_ref();
    let rows = load_ledger_with(path, opts)?;
    let txns = categorize_all(rows);
    let report = DashboardReport::from_transactions(&txns)?;

    info!(
        path = %path.display(),
        transactions = report.transaction_count,
        months = report.monthly_spending.len(),
        "built dashboard"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use tally_core::{Category, LedgerRow};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn txn(date: &str, description: &str, amount: &str) -> Transaction {
        crate::category_rules::categorize_row(LedgerRow {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: description.to_string(),
            amount: dec(amount),
        })
    }

    #[test]
    fn test_totals_rounded_to_two_places() {
        let txns = vec![
            txn("2024-01-01", "Paycheck", "1000.005"),
            txn("2024-01-02", "Coffee", "-3.333"),
        ];
        let report = DashboardReport::from_transactions(&txns).unwrap();
        // banker's rounding on the midpoint
        assert_eq!(report.totals.income, dec("1000.00"));
        assert_eq!(report.totals.expenses, dec("-3.33"));
        assert_eq!(report.totals.savings, dec("996.67"));
        assert_eq!(report.category_spending[0].total, dec("-3.33"));
    }

    #[test]
    fn test_series_round_like_totals() {
        let txns = vec![txn("2024-01-02", "Coffee", "-3.336")];
        let report = DashboardReport::from_transactions(&txns).unwrap();

        assert_eq!(report.totals.expenses, dec("-3.34"));
        assert_eq!(report.monthly_spending[0].total, dec("-3.34"));
        assert_eq!(report.category_spending[0].total, dec("-3.34"));
        assert_eq!(report.chart_bars(), vec![("2024-01".to_string(), 334)]);
    }

    #[test]
    fn test_round_money_half_even() {
        assert_eq!(round_money(dec("2.675")), dec("2.68"));
        assert_eq!(round_money(dec("2.665")), dec("2.66"));
        assert_eq!(round_money(dec("-54.2")), dec("-54.20"));
    }

    #[test]
    fn test_chart_bars_are_spend_in_cents() {
        let txns = vec![
            txn("2024-01-15", "Supermarket ABC", "-54.20"),
            txn("2024-01-31", "Paycheck", "2000.00"),
            txn("2024-02-02", "Monthly rent", "-1200.00"),
        ];
        let report = DashboardReport::from_transactions(&txns).unwrap();
        assert_eq!(
            report.chart_bars(),
            vec![("2024-01".to_string(), 5420), ("2024-02".to_string(), 120000)]
        );
        assert_eq!(report.category_spending[0].category, Category::Groceries);
    }

    #[test]
    fn test_huge_month_bar_saturates() {
        let txns = vec![txn("2024-01-15", "Yacht", "-1000000000000000000000000000")];
        let report = DashboardReport::from_transactions(&txns).unwrap();
        assert_eq!(report.chart_bars(), vec![("2024-01".to_string(), u64::MAX)]);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = "-50000000000000000000000000000";
        let txns = vec![txn("2024-01-15", "Yacht", huge), txn("2024-01-16", "Jet", huge)];
        let err = DashboardReport::from_transactions(&txns).unwrap_err();
        assert_eq!(err, AmountOverflow("expenses"));
    }

    #[test]
    fn test_empty_report() {
        let report = DashboardReport::from_transactions(&[]).unwrap();
        assert_eq!(report.transaction_count, 0);
        assert_eq!(report.totals, SummaryTotals::default());
        assert!(report.chart_bars().is_empty());
        assert!(report.category_spending.is_empty());
    }
}
