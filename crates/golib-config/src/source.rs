//! Configuration sources: files on disk, and a source picked from
//! environment variables.
//!
//! # Environment variables
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `CONFIG_ENCODER` | `json`, `yaml` (or `yml`) or `toml` | `yaml` |
//! | `CONFIG_ETCD_ENDPOINTS` | comma-separated remote endpoints | |
//! | `CONFIG_ETCD_KEY` | key holding the configuration on the remote | |
//! | `CONFIG_FILE` | configuration file | `configs/config.<encoder>` |
//!
//! When both remote variables are set the remote source wins over the file.
//! Empty variables count as unset.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::encoder::{Encoder, Format};
use crate::error::{ConfigError, Result};

pub const ENV_ENCODER: &str = "CONFIG_ENCODER";
pub const ENV_ETCD_ENDPOINTS: &str = "CONFIG_ETCD_ENDPOINTS";
pub const ENV_ETCD_KEY: &str = "CONFIG_ETCD_KEY";
pub const ENV_FILE: &str = "CONFIG_FILE";

/// Format used when `CONFIG_ENCODER` is unset.
pub const DEFAULT_FORMAT: Format = Format::Yaml;

const DEFAULT_FILE_PREFIX: &str = "configs/config.";

pub(crate) fn read_file(path: &Path, encoder: &dyn Encoder) -> Result<Config> {
    tracing::debug!(path = %path.display(), encoder = encoder.name(), "reading configuration file");
    let bytes = std::fs::read(path).map_err(|source| ConfigError::File {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_bytes(&bytes, encoder)
}

/// A remote key-value store holding configuration documents (etcd and the like).
///
/// `Ok(None)` means the store answered but has nothing under `key`.
pub trait RemoteSource: Send + Sync {
    fn fetch(&self, endpoints: &[String], key: &str) -> Result<Option<Vec<u8>>>;
}

impl<F> RemoteSource for F
where
    F: Fn(&[String], &str) -> Result<Option<Vec<u8>>> + Send + Sync,
{
    fn fetch(&self, endpoints: &[String], key: &str) -> Result<Option<Vec<u8>>> {
        self(endpoints, key)
    }
}

/// Where [`EnvLoader`] will read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Remote { endpoints: Vec<String>, key: String },
    File(PathBuf),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Remote { endpoints, key } => {
                write!(f, "remote key '{}' at {}", key, endpoints.join(","))
            }
            Location::File(path) => write!(f, "file '{}'", path.display()),
        }
    }
}

/// Builds a [`Config`] from a source and encoder named by `CONFIG_*` variables.
///
/// ```
/// use golib_config::{ConfigReader, EnvLoader};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("app.toml");
/// std::fs::write(&path, "port = 8080")?;
///
/// let cfg = EnvLoader::from_vars([
///     ("CONFIG_ENCODER", "toml"),
///     ("CONFIG_FILE", path.to_str().unwrap()),
/// ])
/// .load()?;
///
/// let mut port = 0u16;
/// cfg.get_by_key("port", &mut port)?;
/// assert_eq!(port, 8080);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct EnvLoader {
    vars: HashMap<String, String>,
    remote: Option<Box<dyn RemoteSource>>,
}

impl EnvLoader {
    /// Snapshot the `CONFIG_*` variables of the current process.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(name, value)| {
            let name = name.into_string().ok()?;
            if !name.starts_with("CONFIG_") {
                return None;
            }
            Some((name, value.into_string().ok()?))
        }))
    }

    /// Use an explicit set of variables instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            remote: None,
        }
    }

    /// Register the client used when the remote variables are set.
    pub fn with_remote(mut self, remote: impl RemoteSource + 'static) -> Self {
        self.remote = Some(Box::new(remote));
        self
    }

    fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The format named by `CONFIG_ENCODER`.
    pub fn format(&self) -> Result<Format> {
        match self.var(ENV_ENCODER) {
            Some(name) => name.parse(),
            None => Ok(DEFAULT_FORMAT),
        }
    }

    /// Where the configuration will be read from, without reading it.
    pub fn location(&self) -> Result<Location> {
        let format = self.format()?;

        if let (Some(endpoints), Some(key)) = (self.var(ENV_ETCD_ENDPOINTS), self.var(ENV_ETCD_KEY))
        {
            return Ok(Location::Remote {
                endpoints: endpoints
                    .split(',')
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(String::from)
                    .collect(),
                key: key.to_string(),
            });
        }

        let file = match self.var(ENV_FILE) {
            Some(file) => PathBuf::from(file),
            None => PathBuf::from(format!("{DEFAULT_FILE_PREFIX}{}", format.extension())),
        };
        Ok(Location::File(file))
    }

    /// Read and parse the configuration.
    pub fn load(&self) -> Result<Config> {
        let format = self.format()?;
        let location = self.location()?;
        tracing::debug!(%format, %location, "loading configuration from environment");

        match location {
            Location::File(path) => read_file(&path, format.encoder()),
            Location::Remote { endpoints, key } => {
                let remote = self.remote.as_deref().ok_or(ConfigError::NoRemoteSource)?;
                let bytes = remote.fetch(&endpoints, &key)?.ok_or(ConfigError::NoData)?;
                Config::from_bytes(&bytes, format.encoder())
            }
        }
    }
}

impl fmt::Debug for EnvLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvLoader")
            .field("vars", &self.vars)
            .field("remote", &self.remote.is_some())
            .finish()
    }
}
