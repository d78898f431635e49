//! Canonical JSON serializer.
//!
//! Produces exactly one compact rendering per value:
//!
//! - No whitespace anywhere; object fields in sorted key order (a property
//!   of the `BTreeMap` payload, not a serializer pass)
//! - Numbers via `f64`'s `Display`: the shortest decimal form that parses
//!   back to the same bits, never scientific notation, integral values
//!   without a fractional part (`95.0` prints as `95`)
//! - Non-finite numbers (NaN, infinities) print as `null`, keeping the
//!   output inside the JSON grammar
//! - Strings escape the JSON two-character sequences, remaining control
//!   characters as `\u00xx`, and U+2028/U+2029 (so output can be embedded
//!   in JavaScript source); all other characters pass through as UTF-8
//!
//! Serialization is total: every value dumps successfully, so these
//! functions return `String` rather than `Result`.

use crate::value::Value;

/// Serialize a value to its canonical compact JSON text.
///
/// ```rust
/// use jsonish_core::{dump, parse};
///
/// let v = parse("{ \"b\": 2, \"a\": [1, 2.5, true], } // lax").unwrap();
/// assert_eq!(dump(&v), r#"{"a":[1,2.5,true],"b":2}"#);
/// ```
pub fn dump(value: &Value) -> String {
    let mut out = String::new();
    dump_to(value, &mut out);
    out
}

/// Serialize a value, appending to an existing buffer.
pub fn dump_to(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => dump_number(*n, out),
        Value::String(s) => dump_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                dump_to(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, val)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                dump_string(key, out);
                out.push(':');
                dump_to(val, out);
            }
            out.push('}');
        }
    }
}

/// Emit a number. Finite values use `Display` (shortest roundtrip form);
/// NaN and infinities have no JSON spelling and degrade to `null`.
fn dump_number(n: f64, out: &mut String) {
    if n.is_finite() {
        out.push_str(&n.to_string());
    } else {
        out.push_str("null");
    }
}

/// Emit a quoted, escaped JSON string.
fn dump_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            // Line/paragraph separators are legal in JSON strings but not in
            // JavaScript source; escaping them keeps the output embeddable.
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
