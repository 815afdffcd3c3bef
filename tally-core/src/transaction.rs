//! Ledger record types: raw rows, categorized transactions, and the
//! closed set of spending categories.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One ledger row as read from disk, before categorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Free-text description, kept exactly as stored
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: Decimal,
}

/// A categorized transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    /// Derived by the categorizer, never read from the ledger
    pub category: Category,
}

impl Transaction {
    pub fn new(row: LedgerRow, category: Category) -> Self {
        Self {
            date: row.date,
            description: row.description,
            amount: row.amount,
            category,
        }
    }

    /// Returns true if this is income (strictly positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if this is an expense (strictly negative amount).
    /// Zero amounts are neither income nor expense.
    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Calendar month this transaction falls in
    pub fn month(&self) -> YearMonth {
        YearMonth::from(self.date)
    }
}

/// Spending categories assigned by the keyword rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Housing")]
    Housing,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Dining")]
    Dining,
    #[serde(rename = "Health & Fitness")]
    HealthFitness,
    #[serde(rename = "Other Expenses")]
    OtherExpenses,
}

impl Category {
    /// Display label, as shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Groceries => "Groceries",
            Category::Dining => "Dining",
            Category::HealthFitness => "Health & Fitness",
            Category::OtherExpenses => "Other Expenses",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Year + month grouping key. Orders chronologically, prints as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
