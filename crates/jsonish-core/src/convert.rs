//! Conversion between [`Value`] and ordinary Rust types.
//!
//! [`ToJson`] turns a Rust value into a [`Value`]; [`FromJson`] extracts a
//! Rust value back out, failing with a [`ShapeError`] on a type mismatch.
//! Both traits are implemented for the primitives, strings, `Option`,
//! `Vec`, slices, and string-keyed maps, and compose structurally: once
//! `T: ToJson`, every `Vec<T>`, `Option<T>`, and `BTreeMap<String, T>`
//! converts for free.
//!
//! External types opt in by implementing the traits themselves; trait
//! coherence then resolves which conversion applies to any given type, so
//! there is no ad-hoc precedence between conversions.
//!
//! ```rust
//! use jsonish_core::{FromJson, ToJson};
//!
//! let v = vec![1.5, 2.5].to_json();
//! assert_eq!(v.dump(), "[1.5,2.5]");
//!
//! let back = Vec::<f64>::from_json(&v).unwrap();
//! assert_eq!(back, vec![1.5, 2.5]);
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::error::ShapeError;
use crate::value::{Type, Value};

/// Types that can be converted into a JSON [`Value`].
pub trait ToJson {
    fn to_json(&self) -> Value;
}

/// Types that can be extracted from a JSON [`Value`].
///
/// Extraction is strict about types: a number is not silently read from a
/// string, and a `Vec<T>` fails if any element fails. The error names the
/// expected and actual types.
pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Result<Self, ShapeError>;
}

fn mismatch(expected: Type, value: &Value) -> ShapeError {
    ShapeError::Type {
        expected,
        actual: value.value_type(),
    }
}

// ============================================================================
// ToJson implementations
// ============================================================================

impl ToJson for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl ToJson for () {
    fn to_json(&self) -> Value {
        Value::Null
    }
}

macro_rules! to_json_via_from {
    ($($t:ty)*) => {
        $(
            impl ToJson for $t {
                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

to_json_via_from!(bool f32 f64 i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl ToJson for str {
    fn to_json(&self) -> Value {
        Value::from(self)
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(inner) => inner.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Value {
        self.iter().map(ToJson::to_json).collect()
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: ToJson> ToJson for BTreeMap<String, T> {
    fn to_json(&self) -> Value {
        self.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
    }
}

/// Hash maps convert too; the resulting object is sorted by key like every
/// other object, regardless of the map's iteration order.
impl<T: ToJson> ToJson for HashMap<String, T> {
    fn to_json(&self) -> Value {
        self.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
    }
}

// ============================================================================
// FromJson implementations
// ============================================================================

impl FromJson for Value {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        Ok(value.clone())
    }
}

impl FromJson for () {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::Null => Ok(()),
            other => Err(mismatch(Type::Null, other)),
        }
    }
}

impl FromJson for bool {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch(Type::Bool, other)),
        }
    }
}

impl FromJson for f64 {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::Number(n) => Ok(*n),
            other => Err(mismatch(Type::Number, other)),
        }
    }
}

impl FromJson for f32 {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        f64::from_json(value).map(|n| n as f32)
    }
}

/// Integers extract from the `f64` payload by truncation toward zero, with
/// saturation at the type's bounds, matching [`Value::int_value`].
macro_rules! integer_from_json {
    ($($t:ty)*) => {
        $(
            impl FromJson for $t {
                fn from_json(value: &Value) -> Result<Self, ShapeError> {
                    match value {
                        Value::Number(n) => Ok(*n as $t),
                        other => Err(mismatch(Type::Number, other)),
                    }
                }
            }
        )*
    };
}

integer_from_json!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl FromJson for String {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::String(s) => Ok(s.to_string()),
            other => Err(mismatch(Type::String, other)),
        }
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::Array(items) => items.iter().map(T::from_json).collect(),
            other => Err(mismatch(Type::Array, other)),
        }
    }
}

impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((k.clone(), T::from_json(v)?)))
                .collect(),
            other => Err(mismatch(Type::Object, other)),
        }
    }
}

impl<T: FromJson> FromJson for HashMap<String, T> {
    fn from_json(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((k.clone(), T::from_json(v)?)))
                .collect(),
            other => Err(mismatch(Type::Object, other)),
        }
    }
}
