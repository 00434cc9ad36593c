//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::{CsvPriceAdapter, CsvTransactionAdapter};
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart::SvgChartAdapter;
use crate::domain::config_validation::{
    parse_optional_date, parse_symbols, validate_data_config, validate_valuation_config,
};
use crate::domain::error::OptfolioError;
use crate::domain::price::PriceSeries;
use crate::domain::valuation::{
    run_valuation, ValuationConfig, ValuationResult, ValuationSummary, DEFAULT_MULTIPLIER,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use crate::ports::report_port::ReportPort;
use crate::ports::transaction_port::TransactionPort;

const DEFAULT_OUTPUT: &str = "valuation.csv";

#[derive(Parser, Debug)]
#[command(
    name = "optfolio",
    about = "Value an options position over time against buy-and-hold benchmarks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the valuation and write the report
    Value {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the prices directory
    Symbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Value {
            config,
            output,
            chart,
        } => run_value(&config, output.as_ref(), chart.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Symbols { config } => run_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn validate_config(adapter: &dyn ConfigPort) -> Result<(), OptfolioError> {
    validate_valuation_config(adapter)?;
    validate_data_config(adapter)
}

fn fail(err: OptfolioError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

pub fn build_valuation_config(adapter: &dyn ConfigPort) -> Result<ValuationConfig, OptfolioError> {
    let instrument = adapter
        .get_string("valuation", "instrument")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| OptfolioError::ConfigMissing {
            section: "valuation".into(),
            key: "instrument".into(),
        })?;

    let benchmarks = match adapter.get_string("valuation", "benchmarks") {
        Some(list) if !list.trim().is_empty() => {
            parse_symbols(&list).map_err(|reason| OptfolioError::ConfigInvalid {
                section: "valuation".into(),
                key: "benchmarks".into(),
                reason,
            })?
        }
        _ => Vec::new(),
    };

    Ok(ValuationConfig {
        instrument,
        multiplier: adapter.get_double("valuation", "multiplier", DEFAULT_MULTIPLIER),
        initial_capital: adapter.get_double("valuation", "initial_capital", 0.0),
        benchmarks,
        start_date: parse_optional_date(adapter, "valuation", "start_date")?,
        end_date: parse_optional_date(adapter, "valuation", "end_date")?,
    })
}

/// Fetches every input through the ports and runs the valuation.
///
/// With `fill_benchmark_gaps`, benchmark closes are forward-filled onto the
/// instrument's dates before the core sees them; otherwise a gap aborts.
pub fn run_valuation_pipeline(
    price_port: &dyn PricePort,
    transaction_port: &dyn TransactionPort,
    config: &ValuationConfig,
    fill_benchmark_gaps: bool,
) -> Result<ValuationResult, OptfolioError> {
    info!("Fetching closes for {}", config.instrument);
    let instrument_prices =
        price_port.fetch_closes(&config.instrument, config.start_date, config.end_date)?;

    let transactions = transaction_port.load_transactions(&config.instrument)?;
    info!(
        "Loaded {} closes and {} transactions",
        instrument_prices.len(),
        transactions.len()
    );

    let index = instrument_prices.dates();
    let mut benchmark_prices: Vec<PriceSeries> = Vec::with_capacity(config.benchmarks.len());
    for symbol in &config.benchmarks {
        // Earlier closes are kept so a leading gap can still be filled.
        let series = price_port.fetch_closes(symbol, None, config.end_date)?;
        let series = if fill_benchmark_gaps {
            let filled = series.forward_fill_onto(&index)?;
            let gaps = index.iter().filter(|d| series.get(**d).is_none()).count();
            if gaps > 0 {
                warn!("Filled {} missing closes for {}", gaps, symbol);
            }
            filled
        } else {
            series
        };
        benchmark_prices.push(series);
    }

    run_valuation(&transactions, &instrument_prices, &benchmark_prices, config)
}

pub fn print_summary(summary: &ValuationSummary) {
    eprintln!(
        "\n=== Valuation {} to {} ({} days) ===",
        summary.start_date, summary.end_date, summary.days
    );
    let rows = std::iter::once(&summary.portfolio).chain(summary.benchmarks.iter());
    for s in rows {
        eprintln!(
            "  {:<20} start ${:>12.2}  end ${:>12.2}  return {:>8.2}%",
            s.name,
            s.initial_value,
            s.final_value,
            s.cumulative_return * 100.0
        );
    }
}

fn run_value(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    chart_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load and validate config
    info!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_config(&adapter) {
        return fail(e);
    }
    let config = match build_valuation_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    // Stage 2: Wire adapters
    let prices_dir = adapter.get_string("data", "prices_dir").unwrap_or_default();
    let transactions_file = adapter
        .get_string("data", "transactions_file")
        .unwrap_or_default();
    let price_port = CsvPriceAdapter::new(PathBuf::from(prices_dir.trim()));
    let transaction_port = CsvTransactionAdapter::new(PathBuf::from(transactions_file.trim()));
    let fill_gaps = adapter.get_bool("data", "fill_benchmark_gaps", false);

    // Stage 3: Value
    let result =
        match run_valuation_pipeline(&price_port, &transaction_port, &config, fill_gaps) {
            Ok(r) => r,
            Err(e) => return fail(e),
        };
    if let Some(summary) = result.summary() {
        print_summary(&summary);
    }

    // Stage 4: Reports
    let output = output_path
        .cloned()
        .or_else(|| adapter.get_string("report", "output").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    if let Err(e) = CsvReportAdapter::new().write(&result, &output.to_string_lossy()) {
        return fail(e);
    }
    eprintln!("\nReport written to: {}", output.display());

    let chart = chart_path
        .cloned()
        .or_else(|| adapter.get_string("report", "chart").map(PathBuf::from));
    if let Some(chart) = chart {
        if let Err(e) = SvgChartAdapter.write(&result, &chart.to_string_lossy()) {
            return fail(e);
        }
        eprintln!("Chart written to: {}", chart.display());
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_config(&adapter) {
        return fail(e);
    }
    let config = match build_valuation_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    eprintln!("  Instrument:      {}", config.instrument);
    eprintln!("  Multiplier:      {}", config.multiplier);
    eprintln!("  Initial capital: {:.2}", config.initial_capital);
    if config.benchmarks.is_empty() {
        eprintln!("  Benchmarks:      (none)");
    } else {
        eprintln!("  Benchmarks:      {}", config.benchmarks.join(", "));
    }
    eprintln!("\nConfig is valid.");
    ExitCode::SUCCESS
}

fn run_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let Some(prices_dir) = adapter.get_string("data", "prices_dir") else {
        return fail(OptfolioError::ConfigMissing {
            section: "data".into(),
            key: "prices_dir".into(),
        });
    };

    match CsvPriceAdapter::new(PathBuf::from(prices_dir.trim())).list_symbols() {
        Ok(symbols) => {
            for s in symbols {
                println!("{s}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
