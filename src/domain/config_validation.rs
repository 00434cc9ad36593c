//! Configuration validation.
//!
//! Validates every config field before any data is loaded.

use crate::domain::error::OptfolioError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::collections::HashSet;

pub fn validate_valuation_config(config: &dyn ConfigPort) -> Result<(), OptfolioError> {
    validate_instrument(config)?;
    validate_multiplier(config)?;
    validate_initial_capital(config)?;
    validate_benchmarks(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), OptfolioError> {
    require_non_empty(config, "data", "prices_dir")?;
    require_non_empty(config, "data", "transactions_file")?;
    validate_flag(config, "data", "fill_benchmark_gaps")?;
    Ok(())
}

/// Boolean spellings accepted in config files.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Splits a comma-separated symbol list, rejecting empty tokens and duplicates.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, String> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let symbol = token.trim();
        if symbol.is_empty() {
            return Err("empty symbol in list".to_string());
        }
        if !seen.insert(symbol.to_string()) {
            return Err(format!("duplicate symbol {symbol}"));
        }
        symbols.push(symbol.to_string());
    }

    Ok(symbols)
}

/// Parses an optional YYYY-MM-DD value from `[section] key`.
pub fn parse_optional_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<NaiveDate>, OptfolioError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| OptfolioError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("invalid {key} format, expected YYYY-MM-DD"),
            }),
    }
}

fn require_non_empty(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), OptfolioError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(OptfolioError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

// `ConfigPort::get_double` falls back to the default on garbage, so numeric
// keys are parsed from the raw string here.
fn parse_number(config: &dyn ConfigPort, key: &str) -> Result<Option<f64>, OptfolioError> {
    match config.get_string("valuation", key) {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| OptfolioError::ConfigInvalid {
                section: "valuation".to_string(),
                key: key.to_string(),
                reason: format!("{key} must be a number"),
            }),
    }
}

fn validate_flag(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), OptfolioError> {
    match config.get_string(section, key) {
        Some(s) if parse_flag(&s).is_none() => Err(OptfolioError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be one of true/false, yes/no, on/off, 1/0"),
        }),
        _ => Ok(()),
    }
}

fn validate_instrument(config: &dyn ConfigPort) -> Result<(), OptfolioError> {
    require_non_empty(config, "valuation", "instrument")
}

fn validate_multiplier(config: &dyn ConfigPort) -> Result<(), OptfolioError> {
    if let Some(value) = parse_number(config, "multiplier")? {
        if !value.is_finite() || value <= 0.0 {
            return Err(OptfolioError::ConfigInvalid {
                section: "valuation".to_string(),
                key: "multiplier".to_string(),
                reason: "multiplier must be positive".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), OptfolioError> {
    if let Some(value) = parse_number(config, "initial_capital")? {
        if !value.is_finite() {
            return Err(OptfolioError::ConfigInvalid {
                section: "valuation".to_string(),
                key: "initial_capital".to_string(),
                reason: "initial_capital must be finite".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_benchmarks(config: &dyn ConfigPort) -> Result<(), OptfolioError> {
    let Some(list) = config.get_string("valuation", "benchmarks") else {
        return Ok(());
    };
    if list.trim().is_empty() {
        return Ok(());
    }
    parse_symbols(&list).map(|_| ()).map_err(|reason| OptfolioError::ConfigInvalid {
        section: "valuation".to_string(),
        key: "benchmarks".to_string(),
        reason,
    })
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), OptfolioError> {
    let start = parse_optional_date(config, "valuation", "start_date")?;
    let end = parse_optional_date(config, "valuation", "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(OptfolioError::ConfigInvalid {
                section: "valuation".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must not be after end_date".to_string(),
            });
        }
    }
    Ok(())
}
