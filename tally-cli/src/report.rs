//! Plain-text renderings of a dashboard report for stdout.

use rust_decimal::Decimal;

use tally_finance::{round_money, DashboardReport};

/// Two decimal places, rounded half-to-even like the report values.
pub fn money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

pub fn render_totals(report: &DashboardReport) -> String {
    let t = &report.totals;
    let mut out = format!("Transactions:   {}\n", report.transaction_count);
    out.push_str(&format!("Total income:   {:>12}\n", money(t.income)));
    out.push_str(&format!("Total expenses: {:>12}\n", money(t.expenses)));
    out.push_str(&format!("Total savings:  {:>12}\n", money(t.savings)));
    out
}

pub fn render_months(report: &DashboardReport) -> String {
    if report.monthly_spending.is_empty() {
        return "No expenses.\n".to_string();
    }
    let mut out = String::from("Monthly spending\n");
    for m in &report.monthly_spending {
        out.push_str(&format!("  {}  {:>12}\n", m.month, money(m.total)));
    }
    out
}

pub fn render_categories(report: &DashboardReport) -> String {
    if report.category_spending.is_empty() {
        return "No expenses.\n".to_string();
    }
    let mut out = String::from("Spending by category\n");
    for c in &report.category_spending {
        out.push_str(&format!("  {:<18}{:>12}\n", c.category.label(), money(c.total)));
    }
    out
}

pub fn render_summary(report: &DashboardReport) -> String {
    format!("{}\n{}", render_totals(report), render_categories(report))
}
