//! Price series provider port.

use crate::domain::error::OptfolioError;
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;

/// Supplies daily closes, ascending and de-duplicated, for a date window.
pub trait PricePort {
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, OptfolioError>;

    fn list_symbols(&self) -> Result<Vec<String>, OptfolioError>;
}
