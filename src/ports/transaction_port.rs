//! Transaction log port.

use crate::domain::error::OptfolioError;
use crate::domain::transaction::Transaction;

/// Supplies the trade log for one instrument, sorted ascending by date.
pub trait TransactionPort {
    fn load_transactions(&self, instrument: &str) -> Result<Vec<Transaction>, OptfolioError>;
}
