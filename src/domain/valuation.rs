//! Valuation pipeline: positions, portfolio and benchmarks for one instrument.
//!
//! `ValuationConfig` carries the run parameters; `run_valuation` wires the
//! tracker, valuator and simulator together over already-fetched series.

use chrono::NaiveDate;

use super::benchmark::{simulate, BenchmarkSeries};
use super::error::OptfolioError;
use super::portfolio::{value, PortfolioSeries};
use super::position::{track, PositionSeries};
use super::price::PriceSeries;
use super::transaction::{validate_transactions, Transaction};

pub const DEFAULT_MULTIPLIER: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct ValuationConfig {
    pub instrument: String,
    pub multiplier: f64,
    pub initial_capital: f64,
    pub benchmarks: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ValuationConfig {
    pub fn new(instrument: impl Into<String>) -> Self {
        ValuationConfig {
            instrument: instrument.into(),
            multiplier: DEFAULT_MULTIPLIER,
            initial_capital: 0.0,
            benchmarks: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValuationResult {
    pub instrument: String,
    pub positions: PositionSeries,
    pub portfolio: PortfolioSeries,
    /// Period returns of the instrument's own closes, one per index date.
    pub close_returns: Vec<Option<f64>>,
    pub benchmarks: Vec<BenchmarkSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub name: String,
    pub initial_value: f64,
    pub final_value: f64,
    pub cumulative_return: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: usize,
    pub portfolio: SeriesSummary,
    pub benchmarks: Vec<SeriesSummary>,
}

impl ValuationResult {
    pub fn summary(&self) -> Option<ValuationSummary> {
        let first = self.portfolio.first()?;
        let last = self.portfolio.last()?;
        let benchmarks = self
            .benchmarks
            .iter()
            .filter_map(|b| {
                let (head, tail) = (b.points.first()?, b.points.last()?);
                Some(SeriesSummary {
                    name: b.symbol.clone(),
                    initial_value: head.value,
                    final_value: tail.value,
                    cumulative_return: tail.cumulative_return,
                })
            })
            .collect();
        Some(ValuationSummary {
            start_date: first.date,
            end_date: last.date,
            days: self.portfolio.len(),
            portfolio: SeriesSummary {
                name: self.instrument.clone(),
                initial_value: first.total,
                final_value: last.total,
                cumulative_return: last.cumulative_return,
            },
            benchmarks,
        })
    }
}

/// Runs the full valuation for one instrument.
///
/// The instrument's own closes (restricted to the configured window) form the
/// date index. Trades dated after `end_date` are outside the window and are
/// dropped; a trade inside the window but after the last close is still an
/// `Alignment` error. Benchmark series must cover every index date; gaps are
/// not filled here.
pub fn run_valuation(
    transactions: &[Transaction],
    instrument_prices: &PriceSeries,
    benchmark_prices: &[PriceSeries],
    config: &ValuationConfig,
) -> Result<ValuationResult, OptfolioError> {
    let prices = instrument_prices.restrict(config.start_date, config.end_date);
    if prices.is_empty() {
        return Err(OptfolioError::invalid_input(format!(
            "no closes for {} in the requested window",
            config.instrument
        )));
    }
    let index = prices.dates();
    log::debug!(
        "valuing {} over {} dates ({} to {})",
        config.instrument,
        index.len(),
        index[0],
        index[index.len() - 1]
    );

    let aligned = benchmark_prices
        .iter()
        .map(|series| series.align_to(&index))
        .collect::<Result<Vec<_>, _>>()?;

    validate_transactions(transactions)?;
    let in_window: Vec<Transaction> = transactions
        .iter()
        .filter(|t| config.end_date.is_none_or(|end| t.date <= end))
        .copied()
        .collect();
    if in_window.len() < transactions.len() {
        log::debug!(
            "ignoring {} trades after the window end",
            transactions.len() - in_window.len()
        );
    }

    let positions = track(&in_window, &index)?;
    let portfolio = value(
        &positions,
        &prices,
        config.multiplier,
        config.initial_capital,
    )?;

    let target = portfolio
        .initial_total()
        .ok_or_else(|| OptfolioError::invalid_input("portfolio series is empty"))?;
    let benchmarks = aligned
        .iter()
        .map(|series| simulate(series, target))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValuationResult {
        instrument: config.instrument.clone(),
        positions,
        portfolio,
        close_returns: prices.returns(),
        benchmarks,
    })
}
