//! INI file configuration adapter.

use crate::domain::config_validation::parse_flag;
use crate::domain::error::OptfolioError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OptfolioError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| OptfolioError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, OptfolioError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| OptfolioError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(parse_flag)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[valuation]
instrument = AMD_JAN_17_20_C10
multiplier = 100
initial_capital = 0.0
benchmarks = AMD,SPY

[data]
prices_dir = data/prices
transactions_file = data/AMD_transactions.csv
fill_benchmark_gaps = yes

[report]
output = out/valuation.csv
"#;

    #[test]
    fn from_string_reads_all_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("valuation", "instrument"),
            Some("AMD_JAN_17_20_C10".to_string())
        );
        assert_eq!(
            adapter.get_string("data", "prices_dir"),
            Some("data/prices".to_string())
        );
        assert_eq!(
            adapter.get_string("report", "output"),
            Some("out/valuation.csv".to_string())
        );
    }

    #[test]
    fn numeric_getters() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_double("valuation", "multiplier", 0.0), 100.0);
        assert_eq!(adapter.get_double("valuation", "initial_capital", 5.0), 0.0);
    }

    #[test]
    fn getters_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string("[valuation]\nmultiplier = abc\n").unwrap();
        assert_eq!(adapter.get_string("valuation", "missing"), None);
        assert_eq!(adapter.get_string("nope", "instrument"), None);
        assert_eq!(adapter.get_double("valuation", "multiplier", 99.9), 99.9);
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[data]\na = yes\nb = On\nc = 0\nd = maybe\n").unwrap();
        assert!(adapter.get_bool("data", "a", false));
        assert!(adapter.get_bool("data", "b", false));
        assert!(!adapter.get_bool("data", "c", true));
        assert!(adapter.get_bool("data", "d", true));
        assert!(!adapter.get_bool("data", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config(SAMPLE);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert!(adapter.get_bool("data", "fill_benchmark_gaps", false));
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/optfolio.ini").unwrap_err();
        assert!(
            matches!(err, OptfolioError::ConfigParse { file, .. } if file.contains("optfolio.ini"))
        );
    }
}
