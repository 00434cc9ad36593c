//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for optfolio.
///
/// Core variants (`InvalidInput`, `MissingPrice`, `DivisionByZero`, `Alignment`)
/// abort a valuation run; there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum OptfolioError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("missing price for {symbol} on {date}")]
    MissingPrice { symbol: String, date: NaiveDate },

    #[error("division by zero: first close of {symbol} is zero")]
    DivisionByZero { symbol: String },

    #[error("alignment error: {reason}")]
    Alignment { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OptfolioError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        OptfolioError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn alignment(reason: impl Into<String>) -> Self {
        OptfolioError::Alignment {
            reason: reason.into(),
        }
    }
}

impl From<&OptfolioError> for std::process::ExitCode {
    fn from(err: &OptfolioError) -> Self {
        let code: u8 = match err {
            OptfolioError::Io(_) => 1,
            OptfolioError::ConfigParse { .. }
            | OptfolioError::ConfigMissing { .. }
            | OptfolioError::ConfigInvalid { .. } => 2,
            OptfolioError::Data { .. } | OptfolioError::Csv(_) => 3,
            OptfolioError::InvalidInput { .. } | OptfolioError::Alignment { .. } => 4,
            OptfolioError::MissingPrice { .. } | OptfolioError::DivisionByZero { .. } => 5,
            OptfolioError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_price_message_names_symbol_and_date() {
        let err = OptfolioError::MissingPrice {
            symbol: "SPY".into(),
            date: NaiveDate::from_ymd_opt(2020, 3, 2).unwrap(),
        };
        assert_eq!(err.to_string(), "missing price for SPY on 2020-03-02");
    }

    #[test]
    fn helper_constructors() {
        let err = OptfolioError::invalid_input("transactions not sorted");
        assert!(matches!(err, OptfolioError::InvalidInput { .. }));
        assert_eq!(err.to_string(), "invalid input: transactions not sorted");

        let err = OptfolioError::alignment("disjoint");
        assert!(matches!(err, OptfolioError::Alignment { .. }));
    }

    #[test]
    fn exit_codes_are_distinct_per_family() {
        use std::process::ExitCode;
        let config = ExitCode::from(&OptfolioError::ConfigMissing {
            section: "valuation".into(),
            key: "instrument".into(),
        });
        let input = ExitCode::from(&OptfolioError::invalid_input("x"));
        let price = ExitCode::from(&OptfolioError::DivisionByZero {
            symbol: "AMD".into(),
        });
        assert_eq!(config, ExitCode::from(2));
        assert_eq!(input, ExitCode::from(4));
        assert_eq!(price, ExitCode::from(5));
    }
}
