use std::path::PathBuf;
use thiserror::Error;

/// A ledger that could not be loaded. Any variant aborts the whole load.
#[derive(Debug, Error)]
pub enum MalformedLedger {
    #[error("cannot read ledger {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ledger has no header row")]
    MissingHeader,
    #[error("ledger is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: invalid date `{value}` (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: invalid amount `{value}`")]
    InvalidAmount { row: usize, value: String },
}
