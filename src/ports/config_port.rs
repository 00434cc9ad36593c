//! Configuration access port trait.

/// Section/key lookups over a loaded configuration.
///
/// Typed getters return `default` when the key is absent or does not parse;
/// validation that must reject bad values reads the raw string instead.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
