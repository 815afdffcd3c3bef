//! tally-ingest: ledger file loading and the malformed-ledger error.

pub mod error;
pub mod ledger;

pub use error::MalformedLedger;
pub use ledger::{load_ledger, load_ledger_with, parse_decimal, parse_ledger, LoadOptions};
