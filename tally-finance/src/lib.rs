//! tally-finance: keyword categorizer and the dashboard pipeline

pub mod category_rules;
pub mod dashboard;

pub use category_rules::{categorize, categorize_all, categorize_row};
pub use dashboard::{build_dashboard, round_money, DashboardError, DashboardReport};
