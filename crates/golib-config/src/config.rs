//! Configuration objects: an immutable parsed tree plus a converter.
//!
//! Typical usage:
//!
//! ```
//! use golib_config::{convert_struct, Config, ConfigReader, Format};
//!
//! #[derive(Debug, Default)]
//! struct Server { host: String, port: u16 }
//! convert_struct!(Server { host, port });
//!
//! let cfg = Config::from_bytes(br#"{"server": {"host": "localhost", "port": 8080}}"#,
//!                              Format::Json.encoder())?;
//!
//! let mut server = Server::default();
//! cfg.get_by_key("server", &mut server)?;
//! assert_eq!(server.port, 8080);
//! # Ok::<(), golib_config::ConfigError>(())
//! ```
//!
//! The destination is always passed as `&mut T`; handing over a value instead
//! of a reference does not compile:
//!
//! ```compile_fail
//! use golib_config::{mapping, Config, ConfigReader};
//!
//! let cfg = Config::from_raw(mapping! { "port" => 8080 });
//! let port: i64 = 0;
//! cfg.get_by_key("port", port).unwrap();
//! ```

use std::path::Path;

use crate::convert::{Convert, Converter};
use crate::encoder::Encoder;
use crate::error::{ConfigError, Result};
use crate::path::resolve;
use crate::value::{Mapping, Value};

/// The read side of a configuration, for code that only needs to fill
/// destinations and should not care where the data came from.
pub trait ConfigReader {
    /// Fill `out` from the whole configuration.
    fn get<T: Convert + ?Sized>(&self, out: &mut T) -> Result<()>;

    /// Fill `out` from the data under `key`.
    fn get_by_key<T: Convert + ?Sized>(&self, key: &str, out: &mut T) -> Result<()>;
}

/// An immutable configuration snapshot.
///
/// Cloning is a deep copy of the tree; the snapshot is never mutated after
/// construction, so sharing a `Config` between threads needs no locking.
#[derive(Debug, Clone)]
pub struct Config {
    // Always `Value::Mapping`.
    root: Value,
    converter: Converter,
}

impl Config {
    /// Parse `bytes` with `encoder` and wrap the result.
    pub fn from_bytes(bytes: &[u8], encoder: &dyn Encoder) -> Result<Self> {
        let data = encoder.encode(bytes)?;
        tracing::debug!(
            encoder = encoder.name(),
            keys = data.len(),
            "parsed configuration"
        );
        Ok(Self::from_raw(data))
    }

    /// Wrap an already parsed mapping.
    pub fn from_raw(data: Mapping) -> Self {
        Self {
            root: Value::Mapping(data),
            converter: *Converter::instance(),
        }
    }

    /// Read the file at `path` and parse it with `encoder`.
    pub fn from_file(path: impl AsRef<Path>, encoder: &dyn Encoder) -> Result<Self> {
        crate::source::read_file(path.as_ref(), encoder)
    }

    /// Replace the converter used by [`get`](ConfigReader::get) and friends.
    pub fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    /// The whole tree. Always a [`Value::Mapping`].
    pub fn raw(&self) -> &Value {
        &self.root
    }

    /// The top-level mapping.
    pub fn mapping(&self) -> &Mapping {
        match &self.root {
            Value::Mapping(map) => map,
            _ => unreachable!("configuration root is always a mapping"),
        }
    }

    /// The raw value under a dot-separated `key`; see [`crate::path`].
    pub fn raw_by_key(&self, key: &str) -> Result<&Value> {
        resolve(&self.root, key)
    }

    /// A new, independent configuration built from the mapping under `key`.
    ///
    /// Fails with [`ConfigError::NotMap`] if the value there is not a mapping.
    pub fn inner(&self, key: &str) -> Result<Config> {
        let Value::Mapping(data) = self.raw_by_key(key)? else {
            return Err(ConfigError::NotMap);
        };
        tracing::debug!(key, keys = data.len(), "derived inner configuration");
        Ok(Config {
            root: Value::Mapping(data.clone()),
            converter: self.converter,
        })
    }

    /// Like [`get_by_key`](ConfigReader::get_by_key), but a missing key
    /// leaves `out` untouched and returns `Ok(false)`.
    pub fn get_by_key_opt<T: Convert + ?Sized>(&self, key: &str, out: &mut T) -> Result<bool> {
        match self.raw_by_key(key) {
            Ok(value) => self.converter.convert(value, out).map(|()| true),
            Err(err) if err.is_no_such_key() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

impl ConfigReader for Config {
    fn get<T: Convert + ?Sized>(&self, out: &mut T) -> Result<()> {
        self.converter.convert(&self.root, out)
    }

    fn get_by_key<T: Convert + ?Sized>(&self, key: &str, out: &mut T) -> Result<()> {
        let value = self.raw_by_key(key)?;
        self.converter.convert(value, out)
    }
}
