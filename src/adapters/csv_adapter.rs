//! CSV file adapters for closes and the transaction log.

use crate::domain::error::OptfolioError;
use crate::domain::price::{PriceBar, PriceSeries};
use crate::domain::transaction::{sort_transactions, Transaction};
use crate::ports::price_port::PricePort;
use crate::ports::transaction_port::TransactionPort;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a date, dropping any time-of-day component.
pub fn parse_date(value: &str) -> Result<NaiveDate, OptfolioError> {
    let value = value.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.date());
        }
    }
    Err(OptfolioError::Data {
        reason: format!("invalid date format: {value:?}"),
    })
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(alias = "Date", alias = "Period")]
    date: String,
    #[serde(alias = "Close")]
    close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TransactionRow {
    #[serde(alias = "Date", alias = "TransactionDate")]
    date: String,
    #[serde(alias = "Quantity")]
    quantity: f64,
    #[serde(default, alias = "Symbol")]
    symbol: Option<String>,
}

fn read_file(path: &PathBuf) -> Result<String, OptfolioError> {
    fs::read_to_string(path).map_err(|e| OptfolioError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })
}

/// Reads `<base_path>/<SYMBOL>.csv` with `date` and `close` columns.
///
/// Blank closes are kept as NaN so that valuation reports them as missing.
pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl PricePort for CsvPriceAdapter {
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, OptfolioError> {
        let path = self.csv_path(symbol);
        let content = read_file(&path)?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.deserialize::<PriceRow>() {
            let row = result.map_err(|e| OptfolioError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            let date = parse_date(&row.date)?;

            if start_date.is_some_and(|s| date < s) || end_date.is_some_and(|e| date > e) {
                continue;
            }

            bars.push(PriceBar {
                date,
                close: row.close.unwrap_or(f64::NAN),
            });
        }

        bars.sort_by_key(|b| b.date);
        log::debug!("loaded {} closes for {} from {}", bars.len(), symbol, path.display());
        PriceSeries::new(symbol, bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, OptfolioError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| OptfolioError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| OptfolioError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

/// Reads one trade log with `date` and `quantity` columns.
///
/// An optional `symbol` column restricts rows to the requested instrument;
/// files without it are taken to hold a single instrument.
pub struct CsvTransactionAdapter {
    path: PathBuf,
}

impl CsvTransactionAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TransactionPort for CsvTransactionAdapter {
    fn load_transactions(&self, instrument: &str) -> Result<Vec<Transaction>, OptfolioError> {
        let content = read_file(&self.path)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut transactions = Vec::new();
        let mut skipped = 0usize;

        for result in rdr.deserialize::<TransactionRow>() {
            let row = result.map_err(|e| OptfolioError::Data {
                reason: format!("CSV parse error in {}: {}", self.path.display(), e),
            })?;
            if let Some(symbol) = row.symbol.as_deref().map(str::trim) {
                if !symbol.is_empty() && symbol != instrument {
                    skipped += 1;
                    continue;
                }
            }
            transactions.push(Transaction {
                date: parse_date(&row.date)?,
                quantity: row.quantity,
            });
        }

        if skipped > 0 {
            log::debug!("skipped {} transactions for other instruments", skipped);
        }
        sort_transactions(&mut transactions);
        Ok(transactions)
    }
}
