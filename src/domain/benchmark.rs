//! Buy-and-hold benchmark simulation.

use chrono::NaiveDate;

use super::error::OptfolioError;
use super::price::PriceSeries;
use super::returns::{cumulative_returns, period_returns};

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub period_return: Option<f64>,
    pub cumulative_return: f64,
}

/// A static position in one comparison asset.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSeries {
    pub symbol: String,
    pub shares: f64,
    pub points: Vec<BenchmarkPoint>,
}

impl BenchmarkSeries {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn final_cumulative_return(&self) -> Option<f64> {
        self.points.last().map(|p| p.cumulative_return)
    }
}

/// Sizes a fixed share count so the benchmark starts at `target_initial_value`.
pub fn simulate(
    asset_prices: &PriceSeries,
    target_initial_value: f64,
) -> Result<BenchmarkSeries, OptfolioError> {
    let symbol = asset_prices.symbol.clone();
    let first = asset_prices
        .first()
        .ok_or_else(|| OptfolioError::invalid_input(format!("no closes for {symbol}")))?;
    if !target_initial_value.is_finite() {
        return Err(OptfolioError::invalid_input(format!(
            "benchmark target for {symbol} is not finite"
        )));
    }
    if first.close == 0.0 {
        return Err(OptfolioError::DivisionByZero { symbol });
    }
    let seed = asset_prices.close_on(first.date)?;
    let shares = target_initial_value / seed;

    let values = asset_prices
        .bars()
        .iter()
        .map(|bar| asset_prices.close_on(bar.date).map(|close| shares * close))
        .collect::<Result<Vec<f64>, _>>()?;
    let period = period_returns(&values);
    let cumulative = cumulative_returns(&period);

    let points = asset_prices
        .bars()
        .iter()
        .zip(values)
        .zip(period.into_iter().zip(cumulative))
        .map(|((bar, value), (period_return, cumulative_return))| BenchmarkPoint {
            date: bar.date,
            value,
            period_return,
            cumulative_return,
        })
        .collect();

    Ok(BenchmarkSeries {
        symbol,
        shares,
        points,
    })
}
