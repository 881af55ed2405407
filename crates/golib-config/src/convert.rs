//! Type-directed conversion from an untyped [`Value`] into Rust destinations.
//!
//! The destination's type decides what is accepted:
//!
//! | Destination | Accepted source | Rule |
//! |---|---|---|
//! | `String` | string | copied |
//! | `i8`..`i64`, `u8`..`u64`, `isize`, `usize` | integer, float | floats truncated toward zero, out-of-range rejected |
//! | `f32`, `f64` | integer, float | integers widened |
//! | `bool` | bool | copied |
//! | `Vec<T>` | sequence | rebuilt element by element |
//! | [`Mapping`], `HashMap<String, Value>` | mapping | assigned as a whole, no recursion |
//! | structs declared with [`convert_struct!`] | mapping | key-by-key, see below |
//!
//! A `null` source is [`ConfigError::UnsupportedType`] for every destination.
//!
//! # Struct fields
//!
//! Each source key has its first character uppercased and is compared with the
//! field name after the same treatment. `"sex"` fills `sex`, and so does
//! `"Sex"`; `"userName"` does not fill `user_name`. A key without a matching
//! field is [`ConfigError::UnknownField`]. Fields with no key in the source
//! are left untouched, so defaults set before the call survive.
//!
//! # Errors and partial writes
//!
//! Conversion stops at the first error. Whatever was written into the
//! destination up to that point stays there and should not be relied upon.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{ConfigError, Result};
use crate::value::{Kind, Mapping, Value};

/// A destination that can be filled from a [`Value`].
///
/// Implement it for your own structs with [`convert_struct!`].
pub trait Convert {
    /// Overwrite `self` with the contents of `value`.
    ///
    /// Implementations recurse through [`Converter::convert`] rather than
    /// calling `convert_from` on children directly, so that the `null` check
    /// and key folding apply at every level.
    fn convert_from(&mut self, value: &Value, converter: &Converter) -> Result<()>;
}

/// Signature of the function that folds keys and field names before they
/// are compared.
pub type KeyFolding = for<'a> fn(&'a str) -> Cow<'a, str>;

/// Drives conversion and holds the field-matching policy.
///
/// The converter carries no mutable state, so one value can be shared freely
/// between threads and configuration objects.
#[derive(Clone, Copy)]
pub struct Converter {
    fold: KeyFolding,
}

impl Converter {
    /// A converter that uppercases the first character of keys and fields.
    pub const fn new() -> Self {
        Self { fold: upper_first }
    }

    /// A converter with a custom folding function.
    ///
    /// ```
    /// use std::borrow::Cow;
    /// use golib_config::{convert_struct, mapping, Converter, Value};
    ///
    /// #[derive(Default)]
    /// struct Db { max_conns: i64 }
    /// convert_struct!(Db { max_conns });
    ///
    /// fn snake(key: &str) -> Cow<'_, str> {
    ///     Cow::Owned(key.replace('-', "_"))
    /// }
    ///
    /// let mut db = Db::default();
    /// let value = Value::from(mapping! { "max-conns" => 8 });
    /// Converter::with_key_folding(snake).convert(&value, &mut db).unwrap();
    /// assert_eq!(db.max_conns, 8);
    /// ```
    pub const fn with_key_folding(fold: KeyFolding) -> Self {
        Self { fold }
    }

    /// Process-wide default converter, created on first use.
    pub fn instance() -> &'static Converter {
        static INSTANCE: OnceLock<Converter> = OnceLock::new();
        INSTANCE.get_or_init(Converter::new)
    }

    /// Convert `value` into `out`.
    pub fn convert<T: Convert + ?Sized>(&self, value: &Value, out: &mut T) -> Result<()> {
        if value.is_null() {
            return Err(ConfigError::UnsupportedType { kind: Kind::Null });
        }
        out.convert_from(value, self)
    }

    /// Whether the source `key` addresses the struct field `field`.
    pub fn matches_field(&self, key: &str, field: &str) -> bool {
        let field = field.strip_prefix("r#").unwrap_or(field);
        (self.fold)(key) == (self.fold)(field)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter::new()
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter").finish_non_exhaustive()
    }
}

/// Uppercase the first character if it is an ASCII lowercase letter.
pub fn upper_first(key: &str) -> Cow<'_, str> {
    match key.chars().next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut folded = String::with_capacity(key.len());
            folded.push(first.to_ascii_uppercase());
            folded.push_str(&key[1..]);
            Cow::Owned(folded)
        }
        _ => Cow::Borrowed(key),
    }
}

fn mismatch(expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::MismatchedTypes {
        expected,
        found: value.kind(),
    }
}

/// Borrow the entries of a mapping source, or fail with a type mismatch.
#[doc(hidden)]
pub fn expect_mapping(value: &Value) -> Result<&Mapping> {
    value.as_mapping().ok_or_else(|| mismatch("mapping", value))
}

fn truncate<T: TryFrom<i128>>(f: f64, target: &'static str) -> Result<T> {
    let out_of_range = || ConfigError::NumberOutOfRange {
        value: f.to_string(),
        target,
    };
    if !f.is_finite() {
        return Err(out_of_range());
    }
    // `as i128` saturates, and i128 is wider than every destination, so a
    // saturated value always fails the `try_from` below.
    T::try_from(f.trunc() as i128).map_err(|_| out_of_range())
}

macro_rules! convert_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Convert for $ty {
            fn convert_from(&mut self, value: &Value, _: &Converter) -> Result<()> {
                *self = match *value {
                    Value::Integer(i) => <$ty>::try_from(i).map_err(|_| {
                        ConfigError::NumberOutOfRange {
                            value: i.to_string(),
                            target: stringify!($ty),
                        }
                    })?,
                    Value::Float(f) => truncate(f, stringify!($ty))?,
                    _ => return Err(mismatch("integer", value)),
                };
                Ok(())
            }
        }
    )*};
}

convert_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Convert for f64 {
    fn convert_from(&mut self, value: &Value, _: &Converter) -> Result<()> {
        *self = match *value {
            Value::Integer(i) => i as f64,
            Value::Float(f) => f,
            _ => return Err(mismatch("float", value)),
        };
        Ok(())
    }
}

impl Convert for f32 {
    fn convert_from(&mut self, value: &Value, _: &Converter) -> Result<()> {
        *self = match *value {
            Value::Integer(i) => i as f32,
            Value::Float(f) => f as f32,
            _ => return Err(mismatch("float", value)),
        };
        Ok(())
    }
}

impl Convert for bool {
    fn convert_from(&mut self, value: &Value, _: &Converter) -> Result<()> {
        match *value {
            Value::Bool(b) => {
                *self = b;
                Ok(())
            }
            _ => Err(mismatch("bool", value)),
        }
    }
}

impl Convert for String {
    fn convert_from(&mut self, value: &Value, _: &Converter) -> Result<()> {
        match value {
            Value::String(s) => {
                self.clone_from(s);
                Ok(())
            }
            _ => Err(mismatch("string", value)),
        }
    }
}

impl<T: Convert + Default> Convert for Vec<T> {
    fn convert_from(&mut self, value: &Value, converter: &Converter) -> Result<()> {
        let items = value
            .as_sequence()
            .ok_or_else(|| mismatch("sequence", value))?;

        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let mut elem = T::default();
            converter.convert(item, &mut elem)?;
            out.push(elem);
        }
        *self = out;
        Ok(())
    }
}

impl Convert for Mapping {
    fn convert_from(&mut self, value: &Value, _: &Converter) -> Result<()> {
        self.clone_from(expect_mapping(value)?);
        Ok(())
    }
}

impl<S: std::hash::BuildHasher + Default> Convert for HashMap<String, Value, S> {
    fn convert_from(&mut self, value: &Value, _: &Converter) -> Result<()> {
        *self = expect_mapping(value)?
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(())
    }
}

/// Implement [`Convert`] for a struct by listing the fields a configuration
/// may fill.
///
/// Every listed field must itself implement [`Convert`]. Keys in the source
/// mapping are matched against the listed fields as described in the
/// [module docs](crate::convert); any other key is an error.
///
/// ```
/// use golib_config::{convert_struct, mapping, Converter, Value};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Child {
///     name: String,
///     age: i8,
/// }
/// convert_struct!(Child { name, age });
///
/// let mut child = Child::default();
/// let value = Value::from(mapping! { "name" => "George", "age" => 5.0 });
/// Converter::new().convert(&value, &mut child).unwrap();
/// assert_eq!(child, Child { name: "George".into(), age: 5 });
/// ```
#[macro_export]
macro_rules! convert_struct {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Convert for $ty {
            #[allow(unused_variables, clippy::never_loop)]
            fn convert_from(
                &mut self,
                value: &$crate::Value,
                converter: &$crate::Converter,
            ) -> $crate::Result<()> {
                for (key, entry) in $crate::convert::expect_mapping(value)? {
                    $(
                        if converter.matches_field(key, stringify!($field)) {
                            converter.convert(entry, &mut self.$field)?;
                            continue;
                        }
                    )*
                    return ::std::result::Result::Err($crate::ConfigError::UnknownField {
                        key: key.clone(),
                    });
                }
                ::std::result::Result::Ok(())
            }
        }
    };
}
