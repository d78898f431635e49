//! The JSON value model: an immutable, cheaply clonable tree.
//!
//! [`Value`] is a six-variant enum covering the full JSON data model. Strings,
//! arrays, and objects hold their payloads behind [`Arc`], so cloning any
//! value (and therefore sharing subtrees between documents) is a reference
//! count bump, never a deep copy. Objects are [`BTreeMap`]s keyed by string,
//! which keeps fields sorted and makes serialization deterministic.
//!
//! Accessors never panic: asking a value for a type it does not hold returns
//! that type's zero value (`0.0`, `false`, `""`, empty array/object), and
//! indexing out of range or with a missing key returns null. Chained lookups
//! like `v["config"]["port"]` are safe on any value.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ParseError, ShapeError};

/// Shared null returned by out-of-range and missing-key indexing.
static NULL: Value = Value::Null;

/// Shared empty map returned by `object_items` on non-objects.
static EMPTY_OBJECT: BTreeMap<String, Value> = BTreeMap::new();

/// The type of a JSON value.
///
/// Declaration order defines the cross-type ordering used by [`Value`]'s
/// `Ord` implementation: null sorts before booleans, booleans before
/// numbers, and so on through objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Type::Null => "null",
            Type::Bool => "boolean",
            Type::Number => "number",
            Type::String => "string",
            Type::Array => "array",
            Type::Object => "object",
        })
    }
}

/// An immutable JSON value.
///
/// All numbers are stored as `f64`, mirroring the JSON data model (there is
/// no separate integer variant). Object keys are unique and sorted; building
/// an object from pairs with duplicate keys keeps the last value.
///
/// ```rust
/// use jsonish_core::Value;
///
/// let v = Value::from(vec![Value::from(1), Value::from("two")]);
/// assert_eq!(v[0].number_value(), 1.0);
/// assert_eq!(v[1].string_value(), "two");
/// assert!(v[2].is_null());
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(Arc<str>),
    Array(Arc<[Value]>),
    Object(Arc<BTreeMap<String, Value>>),
}

impl Value {
    /// The [`Type`] tag of this value.
    pub fn value_type(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Bool(_) => Type::Bool,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// The numeric payload, or `0.0` if this is not a number.
    pub fn number_value(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// The numeric payload truncated toward zero, or `0` if this is not a
    /// number. Values outside the `i64` range saturate; NaN becomes `0`.
    pub fn int_value(&self) -> i64 {
        self.number_value() as i64
    }

    /// The boolean payload, or `false` if this is not a boolean.
    pub fn bool_value(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            _ => false,
        }
    }

    /// The string payload, or `""` if this is not a string.
    pub fn string_value(&self) -> &str {
        match self {
            Value::String(s) => s,
            _ => "",
        }
    }

    /// The array elements, or an empty slice if this is not an array.
    pub fn array_items(&self) -> &[Value] {
        match self {
            Value::Array(items) => items,
            _ => &[],
        }
    }

    /// The object fields in sorted key order, or an empty map if this is
    /// not an object.
    pub fn object_items(&self) -> &BTreeMap<String, Value> {
        match self {
            Value::Object(map) => map,
            _ => &EMPTY_OBJECT,
        }
    }

    /// Serialize to canonical compact JSON. See [`crate::dump::dump`].
    pub fn dump(&self) -> String {
        crate::dump::dump(self)
    }

    /// Serialize to canonical compact JSON, appending to `out`.
    pub fn dump_to(&self, out: &mut String) {
        crate::dump::dump_to(self, out)
    }

    /// Check that this value is an object whose named fields have the given
    /// types.
    ///
    /// The check is flat: only the listed fields are inspected, extra fields
    /// are ignored, and nested structure is not descended into. A field
    /// absent from the object reads as null, so requiring it with any
    /// non-null type fails (and requiring `Type::Null` passes).
    ///
    /// ```rust
    /// use jsonish_core::{parse, Type};
    ///
    /// let v = parse(r#"{"id": 17, "name": "crate"}"#).unwrap();
    /// assert!(v.has_shape(&[("id", Type::Number), ("name", Type::String)]).is_ok());
    ///
    /// let err = v.has_shape(&[("name", Type::Bool)]).unwrap_err();
    /// assert!(err.to_string().contains("\"name\""));
    /// ```
    pub fn has_shape(&self, shape: &[(&str, Type)]) -> Result<(), ShapeError> {
        if !self.is_object() {
            return Err(ShapeError::Type {
                expected: Type::Object,
                actual: self.value_type(),
            });
        }
        for &(field, expected) in shape {
            let actual = self[field].value_type();
            if actual != expected {
                return Err(ShapeError::Field {
                    field: field.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Construction
// ============================================================================

impl From<()> for Value {
    fn from(_: ()) -> Value {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Value {
        Value::Number(n as f64)
    }
}

macro_rules! from_integer {
    ($($t:ty)*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Value {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_integer!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(Arc::from(s))
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Value {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::Array(items.into())
    }
}

impl From<&[Value]> for Value {
    fn from(items: &[Value]) -> Value {
        Value::Array(Arc::from(items))
    }
}

impl From<Arc<[Value]>> for Value {
    fn from(items: Arc<[Value]>) -> Value {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Value {
        Value::Object(Arc::new(map))
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Value {
        Value::Array(iter.into_iter().collect())
    }
}

/// Collecting key-value pairs builds an object; duplicate keys keep the
/// last value, matching the parser's treatment of duplicate object keys.
impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Value {
        Value::Object(Arc::new(iter.into_iter().collect()))
    }
}

impl<'a> FromIterator<(&'a str, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (&'a str, Value)>>(iter: I) -> Value {
        iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

// ============================================================================
// Indexing
// ============================================================================

/// Array indexing. Out-of-range positions and non-arrays yield null.
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Array(items) => items.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

/// Object field lookup. Missing keys and non-objects yield null.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self {
            Value::Object(map) => map.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Total order over all values.
///
/// Values of different types compare by type rank (see [`Type`]). Within a
/// type: booleans false < true, numbers by `f64::total_cmp`, strings
/// lexicographically by bytes, arrays element-wise, and objects by their
/// sorted key-value pairs. `total_cmp` keeps the order (and the matching
/// equality) lawful in the presence of NaN, at the cost of distinguishing
/// `0.0` from `-0.0`.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.as_ref().cmp(b.as_ref()),
            (Value::Array(a), Value::Array(b)) => a.iter().cmp(b.iter()),
            (Value::Object(a), Value::Object(b)) => a.iter().cmp(b.iter()),
            _ => self.value_type().cmp(&other.value_type()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

// ============================================================================
// Text conversion
// ============================================================================

/// `Display` is the canonical serialization, identical to [`Value::dump`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

/// `FromStr` is the lenient parser, identical to [`crate::parser::parse`].
impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Value, ParseError> {
        crate::parser::parse(s)
    }
}
