//! Dot-separated key paths into a configuration tree.
//!
//! # Path syntax
//!
//! - `""` -- the whole tree
//! - `"profile"` -- the value under the top-level key `profile`
//! - `"profile.children"` -- walk through `profile`, which must be a mapping
//! - `".profile"` -- empty segments do not consume a level, so a leading dot
//!   is ignored and `"."` is the whole tree
//!
//! Every segment before the last one must land on a mapping. A missing key and
//! a non-mapping intermediate are reported the same way, as
//! [`ConfigError::NoSuchKey`].

use crate::error::{ConfigError, Result};
use crate::value::{Mapping, Value};

/// Segment separator in key paths.
pub const SEPARATOR: char = '.';

/// Resolve `path` against `root` and borrow the value found there.
///
/// The tree is never copied; the returned reference points into `root`.
///
/// # Examples
///
/// ```
/// use golib_config::{mapping, resolve, Value};
///
/// let root = Value::from(mapping! { "db" => mapping! { "port" => 5432 } });
/// assert_eq!(resolve(&root, "db.port").unwrap(), &Value::Integer(5432));
/// assert_eq!(resolve(&root, ".db.port").unwrap(), &Value::Integer(5432));
/// assert!(resolve(&root, "db.port.more").unwrap_err().is_no_such_key());
/// ```
pub fn resolve<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    if path.is_empty() {
        return Ok(root);
    }

    // `current` is the mapping we are looking keys up in, `value` is the node
    // the last segment landed on.
    let mut current = root;
    let mut value = root;
    let mut segments = path.split(SEPARATOR).peekable();

    while let Some(segment) = segments.next() {
        if segment.is_empty() {
            value = current;
        } else {
            value = mapping_of(current)?
                .get(segment)
                .ok_or(ConfigError::NoSuchKey)?;
        }

        if segments.peek().is_some() {
            if value.as_mapping().is_none() {
                return Err(ConfigError::NoSuchKey);
            }
            current = value;
        }
    }

    Ok(value)
}

fn mapping_of(value: &Value) -> Result<&Mapping> {
    value.as_mapping().ok_or(ConfigError::NoSuchKey)
}
