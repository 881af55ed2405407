//! Format adapters: raw bytes → untyped [`Value`] tree.
//!
//! Each encoder goes through its parser's own value type and then walks it
//! into a [`Mapping`]. The walk is where the format-specific rules live:
//!
//! - JSON numbers always become [`Value::Float`].
//! - YAML and TOML keep integers and floats apart.
//! - YAML merge keys (`<<: *anchor`) are applied before the walk.
//! - YAML mappings keyed by anything but strings are rejected.
//! - TOML datetimes are kept as their RFC 3339 text.
//!
//! The document root must be a mapping in every format. An empty YAML
//! document and a JSON `null` document both give an empty mapping.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, Result};
use crate::value::{Mapping, Value};

/// Converts source bytes into the structured representation of a configuration.
pub trait Encoder: Send + Sync {
    /// Short format name, also used in error messages.
    fn name(&self) -> &'static str;

    /// Parse `bytes` into a root mapping.
    fn encode(&self, bytes: &[u8]) -> Result<Mapping>;
}

/// JSON encoder (serde_json).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

/// YAML encoder (serde_yaml).
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

/// TOML encoder (toml).
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlEncoder;

impl Encoder for JsonEncoder {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, bytes: &[u8]) -> Result<Mapping> {
        let doc: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| ConfigError::encoding("json", e))?;
        match doc {
            // A literal `null` document decodes to an empty mapping, like empty YAML.
            serde_json::Value::Null => Ok(Mapping::new()),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| Ok((key, from_json(value)?)))
                .collect(),
            _ => Err(ConfigError::RootNotMap { format: "json" }),
        }
    }
}

fn from_json(value: serde_json::Value) -> Result<Value> {
    Ok(match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => Value::Float(f),
            None => {
                return Err(ConfigError::NumberOutOfRange {
                    value: n.to_string(),
                    target: "f64",
                })
            }
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Sequence(
            items
                .into_iter()
                .map(from_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_json::Value::Object(map) => Value::Mapping(
            map.into_iter()
                .map(|(key, value)| Ok((key, from_json(value)?)))
                .collect::<Result<Mapping>>()?,
        ),
    })
}

impl Encoder for YamlEncoder {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn encode(&self, bytes: &[u8]) -> Result<Mapping> {
        let mut doc: serde_yaml::Value =
            serde_yaml::from_slice(bytes).map_err(|e| ConfigError::encoding("yaml", e))?;
        doc.apply_merge().map_err(|e| ConfigError::encoding("yaml", e))?;
        match from_yaml(doc)? {
            // An empty document parses as null.
            Value::Null => Ok(Mapping::new()),
            Value::Mapping(map) => Ok(map),
            _ => Err(ConfigError::RootNotMap { format: "yaml" }),
        }
    }
}

fn from_yaml(value: serde_yaml::Value) -> Result<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Value::Integer(i),
                (None, Some(f)) if n.is_f64() => Value::Float(f),
                _ => {
                    return Err(ConfigError::NumberOutOfRange {
                        value: n.to_string(),
                        target: "i64",
                    })
                }
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut out = Mapping::new();
            for (key, value) in map {
                let serde_yaml::Value::String(key) = key else {
                    return Err(ConfigError::MapKeyNotString);
                };
                out.insert(key, from_yaml(value)?);
            }
            Value::Mapping(out)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

impl Encoder for TomlEncoder {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn encode(&self, bytes: &[u8]) -> Result<Mapping> {
        let text = std::str::from_utf8(bytes).map_err(|e| ConfigError::encoding("toml", e))?;
        let table: toml::Table =
            toml::from_str(text).map_err(|e| ConfigError::encoding("toml", e))?;
        Ok(table
            .into_iter()
            .map(|(key, value)| (key, from_toml(value)))
            .collect())
    }
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Integer(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(key, value)| (key, from_toml(value)))
                .collect(),
        ),
    }
}

static JSON: JsonEncoder = JsonEncoder;
static YAML: YamlEncoder = YamlEncoder;
static TOML: TomlEncoder = TomlEncoder;

/// The configuration formats this crate ships encoders for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    pub fn encoder(self) -> &'static dyn Encoder {
        match self {
            Format::Json => &JSON,
            Format::Yaml => &YAML,
            Format::Toml => &TOML,
        }
    }

    /// Canonical file extension, used for the default file name.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Format> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.to_ascii_lowercase().parse().ok()
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            other => Err(ConfigError::UnknownEncoder(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoder().name())
    }
}
