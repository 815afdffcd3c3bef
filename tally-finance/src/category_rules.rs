//! Deterministic keyword rules mapping a transaction to a spending Category.
//!
//! Rules are checked top to bottom and the first hit wins, so a description
//! like "Rent and Gym fee" is Housing, never Health & Fitness. Keywords match
//! as lower-case substrings, not whole words.

use rust_decimal::Decimal;
use tally_core::{Category, LedgerRow, Transaction};
use tracing::debug;

/// Ordered expense rules. Checked only for non-positive amounts.
const EXPENSE_RULES: &[(Category, &[&str])] = &[
    (Category::Housing, &["rent"]),
    (Category::Utilities, &["electricity", "internet"]),
    (Category::Groceries, &["supermarket"]),
    (Category::Dining, &["restaurant", "coffee"]),
    (Category::HealthFitness, &["gym"]),
];

/// Categorize one transaction. Total: every input gets exactly one category.
pub fn categorize(description: &str, amount: Decimal) -> Category {
    if amount > Decimal::ZERO {
        return Category::Income;
    }

    let desc = description.to_lowercase();
    EXPENSE_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| desc.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::OtherExpenses)
}

pub fn categorize_row(row: LedgerRow) -> Transaction {
    let category = categorize(&row.description, row.amount);
    Transaction::new(row, category)
}

/// Categorize every row, keeping ledger order.
pub fn categorize_all(rows: Vec<LedgerRow>) -> Vec<Transaction> {
    let txns: Vec<Transaction> = rows.into_iter().map(categorize_row).collect();
    debug!(count = txns.len(), "categorized transactions");
    txns
}
