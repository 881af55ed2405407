//! Error types for configuration loading, lookup and conversion.
//!
//! Every failure in the crate is a [`ConfigError`]. Callers that only care
//! about the category (for example "is this a missing key?") match on
//! [`ConfigError::kind`] instead of the full variant, which keeps the
//! human-readable detail out of the comparison.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::Kind;

/// Boxed error produced by an underlying parser or remote client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while loading, resolving or converting configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A path segment is absent, or an intermediate segment is not a mapping.
    #[error("no such key")]
    NoSuchKey,

    /// An inner configuration was requested at a path that is not a mapping.
    #[error("data by key is not a map")]
    NotMap,

    /// A parsed document's root is something other than a mapping.
    #[error("{format} document root is not a map")]
    RootNotMap { format: &'static str },

    /// The source value has no defined coercion into the destination.
    #[error("mismatched types: expected {expected}, found {found}")]
    MismatchedTypes { expected: &'static str, found: Kind },

    /// A mapping in the source document is keyed by something other than strings.
    #[error("map keys must be strings")]
    MapKeyNotString,

    /// The destination struct has no field for this source key.
    #[error("unknown field '{key}'")]
    UnknownField { key: String },

    /// The source value has no conversion handler at all (e.g. `null`).
    #[error("unsupported type '{kind}'")]
    UnsupportedType { kind: Kind },

    /// A number does not fit into the destination integer type.
    #[error("number {value} is out of range for {target}")]
    NumberOutOfRange { value: String, target: &'static str },

    /// The raw bytes could not be parsed by the chosen encoder.
    #[error("{format} error ({source})")]
    Encoding {
        format: &'static str,
        #[source]
        source: BoxError,
    },

    /// The configuration file could not be read.
    #[error("can't read from file '{}' ({source})", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `CONFIG_ENCODER` (or a `--format` flag) names an encoder we don't have.
    #[error("unknown encoder '{0}'")]
    UnknownEncoder(String),

    /// A source answered but holds nothing under the requested key.
    #[error("no data")]
    NoData,

    /// Remote configuration was selected but no remote source is registered.
    #[error("remote configuration requested but no remote source is registered")]
    NoRemoteSource,

    /// The registered remote source failed.
    #[error("remote source error ({0})")]
    Remote(#[source] BoxError),
}

/// Coarse category of a [`ConfigError`], for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoSuchKey,
    NotMap,
    MismatchedTypes,
    MapKeyNotString,
    UnknownField,
    UnsupportedType,
    NumberOutOfRange,
    Encoding,
    File,
    UnknownEncoder,
    NoData,
    NoRemoteSource,
    Remote,
}

impl ConfigError {
    /// The category of this error, stripped of any detail.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::NoSuchKey => ErrorKind::NoSuchKey,
            ConfigError::NotMap | ConfigError::RootNotMap { .. } => ErrorKind::NotMap,
            ConfigError::MismatchedTypes { .. } => ErrorKind::MismatchedTypes,
            ConfigError::MapKeyNotString => ErrorKind::MapKeyNotString,
            ConfigError::UnknownField { .. } => ErrorKind::UnknownField,
            ConfigError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            ConfigError::NumberOutOfRange { .. } => ErrorKind::NumberOutOfRange,
            ConfigError::Encoding { .. } => ErrorKind::Encoding,
            ConfigError::File { .. } => ErrorKind::File,
            ConfigError::UnknownEncoder(_) => ErrorKind::UnknownEncoder,
            ConfigError::NoData => ErrorKind::NoData,
            ConfigError::NoRemoteSource => ErrorKind::NoRemoteSource,
            ConfigError::Remote(_) => ErrorKind::Remote,
        }
    }

    /// True when the error means "the key is not there", so the caller can
    /// fall back to a default.
    pub fn is_no_such_key(&self) -> bool {
        self.kind() == ErrorKind::NoSuchKey
    }

    pub(crate) fn encoding(format: &'static str, source: impl Into<BoxError>) -> Self {
        ConfigError::Encoding {
            format,
            source: source.into(),
        }
    }
}

/// Convenience alias used throughout golib-config.
pub type Result<T> = std::result::Result<T, ConfigError>;
