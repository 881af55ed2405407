//! A [`ConfigReader`] over a fixed key table, for tests of code that takes
//! its settings through the trait.
//!
//! Keys are looked up literally: `"server.port"` is a single key here, not a
//! path. An entry can hold an error instead of a value, which lets a test
//! exercise the caller's error handling for one key only.

use std::collections::HashMap;

use crate::config::ConfigReader;
use crate::convert::{Convert, Converter};
use crate::error::{ConfigError, Result};
use crate::value::Value;

enum Entry {
    Value(Value),
    Error(fn() -> ConfigError),
}

/// Test double implementing [`ConfigReader`].
///
/// ```
/// use golib_config::{ConfigError, ConfigReader, StaticConfig};
///
/// let cfg = StaticConfig::new()
///     .with_value("", "whole")
///     .with_error("broken", || ConfigError::NotMap);
///
/// let mut s = String::new();
/// cfg.get(&mut s)?;
/// assert_eq!(s, "whole");
/// assert!(matches!(cfg.get_by_key("broken", &mut s), Err(ConfigError::NotMap)));
/// assert!(cfg.get_by_key("absent", &mut s).unwrap_err().is_no_such_key());
/// # Ok::<(), ConfigError>(())
/// ```
#[derive(Default)]
pub struct StaticConfig {
    entries: HashMap<String, Entry>,
    converter: Converter,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `key` with `value`. The empty key is what [`ConfigReader::get`] reads.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), Entry::Value(value.into()));
        self
    }

    /// Answer `key` with the error built by `make`.
    pub fn with_error(mut self, key: impl Into<String>, make: fn() -> ConfigError) -> Self {
        self.entries.insert(key.into(), Entry::Error(make));
        self
    }
}

impl ConfigReader for StaticConfig {
    fn get<T: Convert + ?Sized>(&self, out: &mut T) -> Result<()> {
        self.get_by_key("", out)
    }

    fn get_by_key<T: Convert + ?Sized>(&self, key: &str, out: &mut T) -> Result<()> {
        if self.entries.is_empty() {
            return Err(ConfigError::NoData);
        }
        match self.entries.get(key) {
            None => Err(ConfigError::NoSuchKey),
            Some(Entry::Error(make)) => Err(make()),
            Some(Entry::Value(value)) => self.converter.convert(value, out),
        }
    }
}
