//! Daily cumulative position tracking.

use chrono::NaiveDate;

use super::error::OptfolioError;
use super::transaction::{validate_transactions, Transaction};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPoint {
    pub date: NaiveDate,
    pub quantity: f64,
}

/// Net quantity held on every date of a date index.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSeries {
    pub points: Vec<PositionPoint>,
}

impl PositionSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn quantities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.quantity).collect()
    }

    /// Day-over-day change; `None` for the first date.
    pub fn deltas(&self) -> Vec<Option<f64>> {
        let mut out = Vec::with_capacity(self.points.len());
        if self.points.is_empty() {
            return out;
        }
        out.push(None);
        out.extend(
            self.points
                .windows(2)
                .map(|w| Some(w[1].quantity - w[0].quantity)),
        );
        out
    }
}

/// Converts a sorted transaction log into a cumulative position per index date.
///
/// A transaction is absorbed by the first index date on or after its own date,
/// so records dated on non-trading days land on the next trading day. Records
/// after the last index date have nowhere to land and are an `Alignment` error.
pub fn track(
    transactions: &[Transaction],
    date_index: &[NaiveDate],
) -> Result<PositionSeries, OptfolioError> {
    if date_index.is_empty() {
        return Err(OptfolioError::invalid_input("date index is empty"));
    }
    if let Some(w) = date_index.windows(2).find(|w| w[1] <= w[0]) {
        return Err(OptfolioError::invalid_input(format!(
            "date index not strictly ascending at {} -> {}",
            w[0], w[1]
        )));
    }
    validate_transactions(transactions)?;

    let last = date_index[date_index.len() - 1];
    if let Some(t) = transactions.iter().find(|t| t.date > last) {
        return Err(OptfolioError::alignment(format!(
            "transaction on {} falls after the last priced date {}",
            t.date, last
        )));
    }

    let mut pending = transactions.iter().peekable();
    let mut running = 0.0_f64;
    let points = date_index
        .iter()
        .map(|&date| {
            while let Some(t) = pending.next_if(|t| t.date <= date) {
                running += t.quantity;
            }
            PositionPoint {
                date,
                quantity: running,
            }
        })
        .collect();

    Ok(PositionSeries { points })
}
