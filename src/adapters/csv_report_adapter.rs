//! CSV report adapter implementing ReportPort.
//!
//! One row per date with the portfolio columns followed by a value and a
//! cumulative return column for every benchmark.

use crate::domain::error::OptfolioError;
use crate::domain::valuation::ValuationResult;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::io::Write;

const PORTFOLIO_COLUMNS: [&str; 9] = [
    "date",
    "position",
    "close",
    "close_return",
    "holdings",
    "cash",
    "total",
    "period_return",
    "cumulative_return",
];

/// One report line. Money columns are pre-rounded to cents and returns to six
/// places; `None` returns serialize as empty cells.
#[derive(Debug, Serialize)]
struct ReportRow {
    date: String,
    position: String,
    close: String,
    close_return: Option<String>,
    holdings: String,
    cash: String,
    total: String,
    period_return: Option<String>,
    cumulative_return: String,
    benchmarks: Vec<String>,
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn ratio(value: f64) -> String {
    format!("{value:.6}")
}

fn report_error(err: impl std::fmt::Display) -> OptfolioError {
    OptfolioError::Report {
        reason: format!("failed to write report: {err}"),
    }
}

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Writes the report to any writer; `write` wraps this with a file.
    pub fn write_to<W: Write>(
        &self,
        result: &ValuationResult,
        writer: W,
    ) -> Result<(), OptfolioError> {
        // The header is dynamic, so it is written by hand and rows are
        // serialized without serde-derived headers.
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        let mut header: Vec<String> = PORTFOLIO_COLUMNS.iter().map(|c| c.to_string()).collect();
        for b in &result.benchmarks {
            header.push(format!("{}_value", b.symbol));
            header.push(format!("{}_cumulative_return", b.symbol));
        }
        wtr.write_record(&header).map_err(report_error)?;

        for (i, p) in result.portfolio.points.iter().enumerate() {
            let mut benchmarks = Vec::with_capacity(result.benchmarks.len() * 2);
            for b in &result.benchmarks {
                let point = b.points.get(i).filter(|bp| bp.date == p.date).ok_or_else(|| {
                    OptfolioError::Report {
                        reason: format!("benchmark {} has no row for {}", b.symbol, p.date),
                    }
                })?;
                benchmarks.push(money(point.value));
                benchmarks.push(ratio(point.cumulative_return));
            }
            let row = ReportRow {
                date: p.date.format("%Y-%m-%d").to_string(),
                position: p.position.to_string(),
                close: p.close.to_string(),
                close_return: result.close_returns.get(i).copied().flatten().map(ratio),
                holdings: money(p.holdings),
                cash: money(p.cash),
                total: money(p.total),
                period_return: p.period_return.map(ratio),
                cumulative_return: ratio(p.cumulative_return),
                benchmarks,
            };
            wtr.serialize(&row).map_err(report_error)?;
        }

        wtr.flush().map_err(report_error)
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &ValuationResult, output_path: &str) -> Result<(), OptfolioError> {
        let file = std::fs::File::create(output_path).map_err(|e| OptfolioError::Report {
            reason: format!("failed to create {output_path}: {e}"),
        })?;
        self.write_to(result, file)
    }
}
