//! Reductions over categorized transactions: summary totals, spending by
//! month, and spending by category.
//!
//! Each reduction is independent and works on exact decimals. Rounding is
//! left to whoever presents the numbers.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::transaction::{Category, Transaction, YearMonth};

/// A running sum left the range a Decimal can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount overflow while summing {0}")]
pub struct AmountOverflow(pub &'static str);

/// Income, expenses and net savings over a whole ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct SummaryTotals {
    /// Sum of strictly positive amounts
    pub income: Decimal,
    /// Sum of strictly negative amounts (zero or negative)
    pub expenses: Decimal,
    /// `income + expenses`, i.e. net cash flow
    pub savings: Decimal,
}

/// Spending for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Decimal,
}

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

fn add(acc: Decimal, amount: Decimal, what: &'static str) -> Result<Decimal, AmountOverflow> {
    acc.checked_add(amount).ok_or(AmountOverflow(what))
}

fn sum_where(
    txns: &[Transaction],
    keep: fn(&Transaction) -> bool,
    what: &'static str,
) -> Result<Decimal, AmountOverflow> {
    txns.iter()
        .filter(|t| keep(t))
        .try_fold(Decimal::ZERO, |acc, t| add(acc, t.amount, what))
}

pub fn summary_totals(txns: &[Transaction]) -> Result<SummaryTotals, AmountOverflow> {
    let income = sum_where(txns, Transaction::is_income, "income")?;
    let expenses = sum_where(txns, Transaction::is_expense, "expenses")?;
    let savings = add(income, expenses, "savings")?;

    debug!(%income, %expenses, count = txns.len(), "summary totals");

    Ok(SummaryTotals {
        income,
        expenses,
        savings,
    })
}

/// Expenses grouped by calendar month, oldest month first.
pub fn monthly_spending(txns: &[Transaction]) -> Result<Vec<MonthlyTotal>, AmountOverflow> {
    let mut months: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.is_expense()) {
        let total = months.entry(t.month()).or_default();
        *total = add(*total, t.amount, "monthly spending")?;
    }

    Ok(months
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect())
}

/// Expenses grouped by category, ordered by category label.
pub fn category_spending(txns: &[Transaction]) -> Result<Vec<CategoryTotal>, AmountOverflow> {
    let mut groups: BTreeMap<&'static str, (Category, Decimal)> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.is_expense()) {
        let (_, total) = groups
            .entry(t.category.label())
            .or_insert((t.category, Decimal::ZERO));
        *total = add(*total, t.amount, "category spending")?;
    }

    Ok(groups
        .into_values()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect())
}
