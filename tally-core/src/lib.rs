//! tally-core: ledger record types and the spending reductions

pub mod aggregate;
pub mod transaction;

pub use aggregate::{
    category_spending, monthly_spending, summary_totals, AmountOverflow, CategoryTotal, MonthlyTotal,
    SummaryTotals,
};
pub use transaction::{Category, LedgerRow, Transaction, YearMonth};
