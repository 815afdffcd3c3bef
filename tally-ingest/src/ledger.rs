//! Parse a transaction ledger (delimited text with a header row) into
//! typed rows.
//!
//! Required header columns: date,description,amount
//! Column order is free and extra columns are ignored. Any bad row fails the
//! whole load.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::MalformedLedger;
use tally_core::LedgerRow;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_COLUMN: &str = "date";
const DESCRIPTION_COLUMN: &str = "description";
const AMOUNT_COLUMN: &str = "amount";

/// Reader settings that come from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Load a ledger file with default options.
pub fn load_ledger(path: impl AsRef<Path>) -> Result<Vec<LedgerRow>, MalformedLedger> {
    load_ledger_with(path, &LoadOptions::default())
}

pub fn load_ledger_with(
    path: impl AsRef<Path>,
    opts: &LoadOptions,
) -> Result<Vec<LedgerRow>, MalformedLedger> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MalformedLedger::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = parse_ledger(file, opts)?;
    debug!(path = %path.display(), rows = rows.len(), "loaded ledger");
    Ok(rows)
}

/// Parse ledger text from any reader, preserving row order.
pub fn parse_ledger<R: Read>(reader: R, opts: &LoadOptions) -> Result<Vec<LedgerRow>, MalformedLedger> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| MalformedLedger::Csv { row: 0, source })?
        .clone();
    if headers.is_empty() {
        return Err(MalformedLedger::MissingHeader);
    }

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(MalformedLedger::MissingColumn(name))
    };
    let date_idx = column(DATE_COLUMN)?;
    let desc_idx = column(DESCRIPTION_COLUMN)?;
    let amount_idx = column(AMOUNT_COLUMN)?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|source| MalformedLedger::Csv { row, source })?;

        // Non-flexible reader guarantees every record matches the header width
        let field = |idx: usize| record.get(idx).unwrap_or("");

        rows.push(LedgerRow {
            date: parse_date(field(date_idx), row)?,
            description: field(desc_idx).to_string(),
            amount: parse_amount(field(amount_idx), row)?,
        });
    }

    Ok(rows)
}

fn parse_date(value: &str, row: usize) -> Result<NaiveDate, MalformedLedger> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| MalformedLedger::InvalidDate {
        row,
        value: value.to_string(),
    })
}

/// Plain (`-54.20`) or scientific (`1.5e3`) decimal notation.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

fn parse_amount(value: &str, row: usize) -> Result<Decimal, MalformedLedger> {
    parse_decimal(value).ok_or_else(|| MalformedLedger::InvalidAmount {
        row,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(text: &str) -> Result<Vec<LedgerRow>, MalformedLedger> {
        parse_ledger(text.as_bytes(), &LoadOptions::default())
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_basic_ledger_in_file_order() {
        let text = "\
date,description,amount
2024-01-15,Supermarket ABC,-54.20
2024-01-31,Paycheck,2000.00
2024-02-02,Monthly rent,-1200.00
";
        let rows = parse(text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(rows[0].description, "Supermarket ABC");
        assert_eq!(rows[0].amount, dec("-54.20"));
        assert_eq!(rows[1].amount, dec("2000.00"));
        assert_eq!(rows[2].description, "Monthly rent");
    }

    #[test]
    fn test_columns_located_by_name() {
        let text = "\
amount,account,description,date
-3.50,Checking,Coffee corner,2024-03-04
";
        let rows = parse(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Coffee corner");
        assert_eq!(rows[0].amount, dec("-3.50"));
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn test_quoted_description_with_delimiter() {
        let text = "date,description,amount\n2024-01-02,\"Rent, January\",-900\n";
        let rows = parse(text).unwrap();
        assert_eq!(rows[0].description, "Rent, January");
    }

    #[test]
    fn test_header_only_is_empty_not_error() {
        let rows = parse("date,description,amount\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_no_header_at_all() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, MalformedLedger::MissingHeader));
    }

    #[test]
    fn test_missing_column() {
        let err = parse("date,description\n2024-01-01,Paycheck\n").unwrap_err();
        assert!(matches!(err, MalformedLedger::MissingColumn("amount")));
    }

    #[test]
    fn test_non_numeric_amount_fails_whole_load() {
        let text = "\
date,description,amount
2024-01-15,Supermarket ABC,-54.20
2024-01-16,Gym,abc
2024-01-17,Coffee,-3.00
";
        let err = parse(text).unwrap_err();
        match err {
            MalformedLedger::InvalidAmount { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_amount_is_invalid() {
        let err = parse("date,description,amount\n2024-01-15,Gym,\n").unwrap_err();
        assert!(matches!(err, MalformedLedger::InvalidAmount { row: 1, .. }));
    }

    #[test]
    fn test_invalid_date_format() {
        let err = parse("date,description,amount\n01/15/2024,Gym,-30\n").unwrap_err();
        assert!(matches!(err, MalformedLedger::InvalidDate { row: 1, .. }));
        assert!(err.to_string().contains("01/15/2024"));
    }

    #[test]
    fn test_impossible_calendar_date() {
        let err = parse("date,description,amount\n2023-02-30,Gym,-30\n").unwrap_err();
        assert!(matches!(err, MalformedLedger::InvalidDate { .. }));
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let err = parse("date,description,amount\n2024-01-01,Gym\n").unwrap_err();
        assert!(matches!(err, MalformedLedger::Csv { row: 1, .. }));
    }

    #[test]
    fn test_scientific_amount() {
        let rows = parse("date,description,amount\n2024-01-01,Bonus,1.5e3\n").unwrap();
        assert_eq!(rows[0].amount, dec("1500"));
    }

    #[test]
    fn test_parse_decimal_notations() {
        assert_eq!(parse_decimal("-54.20"), Some(dec("-54.20")));
        assert_eq!(parse_decimal("1e2"), Some(dec("100")));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn test_custom_delimiter() {
        let text = "date;description;amount\n2024-01-01;Internet bill;-45,00\n";
        let opts = LoadOptions { delimiter: b';' };
        let err = parse_ledger(text.as_bytes(), &opts).unwrap_err();
        // decimal comma is not a decimal number
        assert!(matches!(err, MalformedLedger::InvalidAmount { .. }));

        let text = "date;description;amount\n2024-01-01;Internet bill;-45.00\n";
        let rows = parse_ledger(text.as_bytes(), &opts).unwrap();
        assert_eq!(rows[0].amount, dec("-45.00"));
    }

    #[test]
    fn test_load_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "date,description,amount\n2024-06-01,Electricity,-80.10\n").unwrap();

        let rows = load_ledger(tmp.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, dec("-80.10"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_ledger("does-not-exist.csv").unwrap_err();
        assert!(matches!(err, MalformedLedger::Io { .. }));
        assert!(err.to_string().contains("does-not-exist.csv"));
    }
}
