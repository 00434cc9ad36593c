#![allow(dead_code)]

use chrono::NaiveDate;
use optfolio::domain::error::OptfolioError;
use optfolio::domain::price::{PriceBar, PriceSeries};
use optfolio::domain::transaction::Transaction;
use optfolio::ports::price_port::PricePort;
use optfolio::ports::transaction_port::TransactionPort;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_closes(mut self, symbol: &str, start: &str, closes: &[f64]) -> Self {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar::new(start + chrono::Duration::days(i as i64), close))
            .collect();
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, OptfolioError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(OptfolioError::Data {
                reason: reason.clone(),
            });
        }
        let bars = self.data.get(symbol).cloned().unwrap_or_default();
        PriceSeries::new(symbol, bars).map(|s| s.restrict(start_date, end_date))
    }

    fn list_symbols(&self) -> Result<Vec<String>, OptfolioError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub struct MockTransactionPort {
    pub transactions: Vec<Transaction>,
}

impl MockTransactionPort {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

impl TransactionPort for MockTransactionPort {
    fn load_transactions(&self, _instrument: &str) -> Result<Vec<Transaction>, OptfolioError> {
        Ok(self.transactions.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn tx(date: &str, quantity: f64) -> Transaction {
    Transaction::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        quantity,
    )
}

/// Consecutive calendar days starting at `start`.
pub fn series(symbol: &str, start: &str, closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    let dates: Vec<NaiveDate> = (0..closes.len())
        .map(|i| start + chrono::Duration::days(i as i64))
        .collect();
    PriceSeries::from_closes(symbol, &dates, closes).unwrap()
}
