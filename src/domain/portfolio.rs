//! Portfolio valuation: holdings, cash, total value and returns per date.

use chrono::NaiveDate;

use super::error::OptfolioError;
use super::position::PositionSeries;
use super::price::PriceSeries;
use super::returns::{cumulative_returns, period_returns};

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioPoint {
    pub date: NaiveDate,
    pub position: f64,
    pub close: f64,
    pub holdings: f64,
    pub cash: f64,
    pub total: f64,
    /// `None` on the first date.
    pub period_return: Option<f64>,
    /// `0.0` on the first date.
    pub cumulative_return: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSeries {
    pub multiplier: f64,
    pub initial_capital: f64,
    pub points: Vec<PortfolioPoint>,
}

impl PortfolioSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PortfolioPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PortfolioPoint> {
        self.points.last()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn totals(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total).collect()
    }

    pub fn initial_total(&self) -> Option<f64> {
        self.first().map(|p| p.total)
    }

    pub fn final_cumulative_return(&self) -> Option<f64> {
        self.last().map(|p| p.cumulative_return)
    }
}

/// Values a position series against daily closes.
///
/// The first date has no predecessor, so its position change is not charged
/// to cash; from the second date on, `cash -= delta * close * multiplier`.
pub fn value(
    positions: &PositionSeries,
    prices: &PriceSeries,
    multiplier: f64,
    initial_capital: f64,
) -> Result<PortfolioSeries, OptfolioError> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(OptfolioError::invalid_input(format!(
            "multiplier must be finite and positive, got {multiplier}"
        )));
    }
    if !initial_capital.is_finite() {
        return Err(OptfolioError::invalid_input(format!(
            "initial capital must be finite, got {initial_capital}"
        )));
    }

    let deltas = positions.deltas();
    let mut cash = initial_capital;
    let mut points = Vec::with_capacity(positions.len());

    for (point, delta) in positions.points.iter().zip(deltas) {
        let close = prices.close_on(point.date)?;
        if let Some(delta) = delta {
            cash -= delta * close * multiplier;
        }
        let holdings = point.quantity * close * multiplier;
        points.push(PortfolioPoint {
            date: point.date,
            position: point.quantity,
            close,
            holdings,
            cash,
            total: cash + holdings,
            period_return: None,
            cumulative_return: 0.0,
        });
    }

    let totals: Vec<f64> = points.iter().map(|p| p.total).collect();
    let period = period_returns(&totals);
    let cumulative = cumulative_returns(&period);
    for ((p, r), c) in points.iter_mut().zip(period).zip(cumulative) {
        p.period_return = r;
        p.cumulative_return = c;
    }

    Ok(PortfolioSeries {
        multiplier,
        initial_capital,
        points,
    })
}
