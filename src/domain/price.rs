//! Daily closing price series.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::error::OptfolioError;
use super::returns::period_returns;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PriceBar { date, close }
    }

    /// A close that can be used for valuation. Provider gaps arrive as NaN.
    pub fn has_close(&self) -> bool {
        self.close.is_finite()
    }
}

/// Closes for one symbol, strictly ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    bars: Vec<PriceBar>,
    date_index: HashMap<NaiveDate, usize>,
}

impl PriceSeries {
    /// Builds a series, rejecting unsorted or duplicated dates.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, OptfolioError> {
        let symbol = symbol.into();
        if let Some(w) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(OptfolioError::invalid_input(format!(
                "price series {} is not strictly ascending at {} -> {}",
                symbol, w[0].date, w[1].date
            )));
        }
        let date_index = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| (bar.date, i))
            .collect();
        Ok(PriceSeries {
            symbol,
            bars,
            date_index,
        })
    }

    pub fn from_closes(
        symbol: impl Into<String>,
        dates: &[NaiveDate],
        closes: &[f64],
    ) -> Result<Self, OptfolioError> {
        if dates.len() != closes.len() {
            return Err(OptfolioError::invalid_input(format!(
                "{} dates but {} closes",
                dates.len(),
                closes.len()
            )));
        }
        let bars = dates
            .iter()
            .zip(closes)
            .map(|(&date, &close)| PriceBar { date, close })
            .collect();
        Self::new(symbol, bars)
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&PriceBar> {
        self.date_index.get(&date).map(|&i| &self.bars[i])
    }

    /// Usable close on `date`, or `MissingPrice` if absent or NaN.
    pub fn close_on(&self, date: NaiveDate) -> Result<f64, OptfolioError> {
        match self.get(date) {
            Some(bar) if bar.has_close() => Ok(bar.close),
            _ => Err(OptfolioError::MissingPrice {
                symbol: self.symbol.clone(),
                date,
            }),
        }
    }

    /// Bars with `start <= date <= end`; either bound may be open.
    pub fn restrict(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> PriceSeries {
        let bars: Vec<PriceBar> = self
            .bars
            .iter()
            .filter(|b| start.is_none_or(|s| b.date >= s) && end.is_none_or(|e| b.date <= e))
            .copied()
            .collect();
        let date_index = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| (bar.date, i))
            .collect();
        PriceSeries {
            symbol: self.symbol.clone(),
            bars,
            date_index,
        }
    }

    /// Period returns of the closes; first entry is `None`.
    pub fn returns(&self) -> Vec<Option<f64>> {
        period_returns(&self.closes())
    }

    /// Selects exactly the closes for `index`.
    ///
    /// Fails with `Alignment` when no date of `index` exists in this series and
    /// with `MissingPrice` for the first index date that has no usable close.
    pub fn align_to(&self, index: &[NaiveDate]) -> Result<PriceSeries, OptfolioError> {
        if !index.is_empty() && index.iter().all(|d| self.get(*d).is_none()) {
            return Err(OptfolioError::alignment(format!(
                "{} has no closes within {}..={}",
                self.symbol,
                index[0],
                index[index.len() - 1]
            )));
        }
        let bars = index
            .iter()
            .map(|&date| self.close_on(date).map(|close| PriceBar { date, close }))
            .collect::<Result<Vec<_>, _>>()?;
        PriceSeries::new(self.symbol.clone(), bars)
    }

    /// Reindexes onto `index`, carrying the last usable close forward over gaps.
    ///
    /// Index dates before the first usable close have nothing to carry and fail
    /// with `MissingPrice`.
    pub fn forward_fill_onto(&self, index: &[NaiveDate]) -> Result<PriceSeries, OptfolioError> {
        let mut src = self.bars.iter().filter(|b| b.has_close()).peekable();
        let mut last: Option<f64> = None;
        let mut bars = Vec::with_capacity(index.len());

        for &date in index {
            while let Some(bar) = src.next_if(|b| b.date <= date) {
                last = Some(bar.close);
            }
            let close = last.ok_or_else(|| OptfolioError::MissingPrice {
                symbol: self.symbol.clone(),
                date,
            })?;
            bars.push(PriceBar { date, close });
        }

        PriceSeries::new(self.symbol.clone(), bars)
    }
}
