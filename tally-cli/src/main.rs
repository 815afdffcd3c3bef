use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use tally_finance::{build_dashboard, categorize, DashboardReport};
use tally_ingest::parse_decimal;

mod config;
mod logging;
mod report;
mod state;
mod tui;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Personal finance dashboard over a CSV ledger")]
struct Cli {
    /// Config file (default: ~/.tally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct LedgerArgs {
    /// Ledger CSV (defaults to ledger.path from config, then ./transactions.csv)
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Income, expenses, savings and the category breakdown
    Summary(LedgerArgs),

    /// Expenses per calendar month, oldest first
    Months(LedgerArgs),

    /// Expenses per category
    Categories(LedgerArgs),

    /// Full-screen dashboard with the monthly spending chart
    Dashboard {
        #[arg(long)]
        ledger: Option<PathBuf>,
    },

    /// Show which category a description/amount pair falls into
    Classify {
        description: String,

        /// Signed amount, e.g. -12.50
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    // The dashboard owns the terminal; stderr logging would tear the screen
    if !matches!(cli.command, Command::Dashboard { .. }) {
        logging::init_tracing(&cfg.log.filter, cli.verbose);
    }

    match cli.command {
        Command::Summary(args) => {
            let report = load_report(&cfg, args.ledger)?;
            if args.json {
                print_json(&report)?;
            } else {
                print!("{}", report::render_summary(&report));
            }
        }

        Command::Months(args) => {
            let report = load_report(&cfg, args.ledger)?;
            if args.json {
                print_json(&report.monthly_spending)?;
            } else {
                print!("{}", report::render_months(&report));
            }
        }

        Command::Categories(args) => {
            let report = load_report(&cfg, args.ledger)?;
            if args.json {
                print_json(&report.category_spending)?;
            } else {
                print!("{}", report::render_categories(&report));
            }
        }

        Command::Dashboard { ledger } => {
            let report = load_report(&cfg, ledger)?;
            tui::run_dashboard(&report)?;
        }

        Command::Classify { description, amount } => {
            let amount = parse_decimal(amount.trim())
                .with_context(|| format!("invalid amount: {}", amount))?;
            println!("{}", categorize(&description, amount));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                let (path, created) = config::init_config()?;
                if created {
                    println!("Wrote {}", path.display());
                } else {
                    println!("Config already exists: {}", path.display());
                }
            }
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn load_report(cfg: &Config, ledger: Option<PathBuf>) -> Result<DashboardReport> {
    let path = cfg.ledger_path(ledger);
    let opts = cfg.load_options()?;
    debug!(path = %path.display(), "loading ledger");

    build_dashboard(&path, &opts).with_context(|| format!("loading ledger {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
