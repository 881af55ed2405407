//! # golib-config
//!
//! Configuration loading for backend services: parse JSON, YAML or TOML into an
//! untyped tree, select sub-trees with dot-separated key paths, and fill typed
//! Rust destinations from them.
//!
//! ## Quick start
//!
//! ```rust
//! use golib_config::{convert_struct, Config, ConfigReader, Format};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Child { name: String, weight: f32, age: i8 }
//! convert_struct!(Child { name, weight, age });
//!
//! let yaml = b"
//! profile:
//!   children:
//!     - name: George
//!       weight: 5.4
//!       age: 5
//! ";
//! let cfg = Config::from_bytes(yaml, Format::Yaml.encoder()).unwrap();
//!
//! let mut children: Vec<Child> = Vec::new();
//! cfg.get_by_key("profile.children", &mut children).unwrap();
//! assert_eq!(children, vec![Child { name: "George".into(), weight: 5.4, age: 5 }]);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` tree produced by the encoders
//! - [`encoder`]: JSON / YAML / TOML bytes → `Value`
//! - [`path`]: Dot-separated key lookup (`resolve`)
//! - [`convert`]: `Value` → typed destination (`Convert`, `Converter`, `convert_struct!`)
//! - [`config`]: `Config` snapshot and the `ConfigReader` trait
//! - [`source`]: File and environment-selected sources (`EnvLoader`)
//! - [`static_config`]: Fixed-table `ConfigReader` for tests
//! - [`error`]: Error types

pub mod config;
pub mod convert;
pub mod encoder;
pub mod error;
pub mod path;
pub mod source;
pub mod static_config;
pub mod value;

pub use config::{Config, ConfigReader};
pub use convert::{Convert, Converter};
pub use encoder::{Encoder, Format, JsonEncoder, TomlEncoder, YamlEncoder};
pub use error::{ConfigError, ErrorKind, Result};
pub use path::resolve;
pub use source::{EnvLoader, Location, RemoteSource};
pub use static_config::StaticConfig;
pub use value::{Kind, Mapping, Value};
