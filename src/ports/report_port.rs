//! Report generation port.

use crate::domain::error::OptfolioError;
use crate::domain::valuation::ValuationResult;

/// Port for rendering a finished valuation.
pub trait ReportPort {
    fn write(&self, result: &ValuationResult, output_path: &str) -> Result<(), OptfolioError>;
}
