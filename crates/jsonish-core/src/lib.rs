//! # jsonish-core
//!
//! A small JSON library built around an immutable, cheaply clonable
//! [`Value`] model: a lenient parser in, one canonical compact rendering
//! out.
//!
//! The parser accepts standard JSON plus a fixed set of relaxations
//! (`//` and `/* */` comments, trailing commas, bareword object keys), so
//! hand-edited configuration files parse without ceremony. The serializer
//! goes the other way and is deliberately rigid: no whitespace, object keys
//! sorted, shortest-roundtrip numbers. Parsing any two texts of the same
//! document therefore yields equal values, and equal values always dump to
//! identical bytes.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonish_core::{parse, Type};
//!
//! // Lax input: comment, bareword key, trailing comma
//! let v = parse(r#"{ name: "Ada", "scores": [95, 87,] /* M2 */ }"#).unwrap();
//!
//! // Accessors never panic; wrong-type reads yield zero values
//! assert_eq!(v["name"].string_value(), "Ada");
//! assert_eq!(v["scores"][0].number_value(), 95.0);
//! assert!(v["missing"].is_null());
//!
//! // Canonical output: compact, keys sorted
//! assert_eq!(v.dump(), r#"{"name":"Ada","scores":[95,87]}"#);
//!
//! // Flat shape validation
//! v.has_shape(&[("name", Type::String), ("scores", Type::Array)]).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the [`Value`] tree, accessors, indexing, total ordering
//! - [`parser`] — lenient recursive-descent parser (`parse`, `parse_multi`)
//! - [`dump`] — canonical compact serializer
//! - [`convert`] — `ToJson` / `FromJson` conversion traits
//! - [`error`] — `ParseError` and `ShapeError`

pub mod convert;
pub mod dump;
pub mod error;
pub mod parser;
pub mod value;

mod serde;

pub use convert::{FromJson, ToJson};
pub use dump::{dump, dump_to};
pub use error::{ParseError, Result, ShapeError};
pub use parser::{parse, parse_multi, MAX_NESTING_DEPTH};
pub use value::{Type, Value};
