//! Transaction records for a single instrument.

use chrono::NaiveDate;

use super::error::OptfolioError;

/// A signed trade: positive quantity acquires, negative disposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub quantity: f64,
}

impl Transaction {
    pub fn new(date: NaiveDate, quantity: f64) -> Self {
        Transaction { date, quantity }
    }
}

/// Stable sort by date; same-date records keep their relative order.
pub fn sort_transactions(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|t| t.date);
}

/// Checks ascending dates and finite quantities.
pub fn validate_transactions(transactions: &[Transaction]) -> Result<(), OptfolioError> {
    if let Some(w) = transactions.windows(2).find(|w| w[1].date < w[0].date) {
        return Err(OptfolioError::invalid_input(format!(
            "transactions not sorted by date: {} follows {}",
            w[1].date, w[0].date
        )));
    }
    if let Some(t) = transactions.iter().find(|t| !t.quantity.is_finite()) {
        return Err(OptfolioError::invalid_input(format!(
            "non-finite quantity on {}",
            t.date
        )));
    }
    Ok(())
}
