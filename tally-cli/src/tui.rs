//! Full-screen dashboard: headline totals, the monthly spending bar chart
//! and the category breakdown on one screen.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

use crate::report::money;
use tally_finance::DashboardReport;

/// Raw mode plus alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Nothing useful to do with a failure while unwinding
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

pub fn run_dashboard(report: &DashboardReport) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    event_loop(&mut terminal, report)
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, report: &DashboardReport) -> Result<()> {
    loop {
        terminal.draw(|f| draw_dashboard(f, report))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
        }
    }
}

pub fn draw_dashboard(f: &mut Frame, report: &DashboardReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(f.area());

    draw_totals(f, chunks[0], report);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    draw_monthly_chart(f, body[0], report);
    draw_categories(f, body[1], report);
}

fn draw_totals(f: &mut Frame, area: Rect, report: &DashboardReport) {
    let t = &report.totals;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let savings_color = if t.savings.is_sign_negative() { Color::Red } else { Color::Green };

    let line = Line::from(vec![
        Span::raw("Income "),
        Span::styled(money(t.income), bold.fg(Color::Green)),
        Span::raw("   Expenses "),
        Span::styled(money(t.expenses), bold.fg(Color::Red)),
        Span::raw("   Savings "),
        Span::styled(money(t.savings), bold.fg(savings_color)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" tally · q to quit ");
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_monthly_chart(f: &mut Frame, area: Rect, report: &DashboardReport) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Monthly Spending ")
        .title_bottom(" Month / Total Expenses ");

    if report.monthly_spending.is_empty() {
        f.render_widget(Paragraph::new("No expenses").block(block), area);
        return;
    }

    let bars: Vec<Bar> = report
        .chart_bars()
        .into_iter()
        .zip(&report.monthly_spending)
        .map(|((label, cents), m)| {
            Bar::default()
                .value(cents)
                .label(Line::from(label))
                .text_value(money(m.total))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Red))
        .value_style(Style::default().fg(Color::White).bg(Color::Red));
    f.render_widget(chart, area);
}

fn draw_categories(f: &mut Frame, area: Rect, report: &DashboardReport) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Spending by Category ");

    let rows: Vec<Row> = report
        .category_spending
        .iter()
        .map(|c| Row::new(vec![c.category.label().to_string(), money(c.total)]))
        .collect();

    let table = Table::new(rows, [Constraint::Min(18), Constraint::Length(12)])
        .header(
            Row::new(vec!["Category", "Amount"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block);
    f.render_widget(table, area);
}
