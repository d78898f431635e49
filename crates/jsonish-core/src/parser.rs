//! Lenient JSON parser.
//!
//! A recursive-descent parser over UTF-8 text that accepts standard JSON
//! plus three fixed relaxations, always enabled:
//!
//! - `//` line comments and `/* */` block comments wherever whitespace is
//!   allowed
//! - A trailing comma before `]` or `}`
//! - Bareword object keys matching `[A-Za-z_][A-Za-z0-9_]*`
//!
//! Everything else stays strict: leading zeros (`01`) are rejected, string
//! literals must escape control characters, `\u` surrogate halves must be
//! properly paired, and container nesting is capped at
//! [`MAX_NESTING_DEPTH`] to keep recursion bounded on adversarial input.
//!
//! Errors carry the byte offset where the problem was detected. Parsing
//! never panics and never mutates shared state; the only side channel is
//! the returned error.

use std::collections::BTreeMap;

use crate::error::{ParseError, Result};
use crate::value::Value;

/// Maximum container nesting the parser will follow before giving up.
pub const MAX_NESTING_DEPTH: usize = 200;

/// Parse a string holding exactly one JSON document.
///
/// Leading and trailing whitespace and comments are allowed; any other
/// trailing content is an error.
///
/// ```rust
/// use jsonish_core::parse;
///
/// let v = parse("{ a: 1, /* lax */ b: [2, 3,] }").unwrap();
/// assert_eq!(v.dump(), r#"{"a":1,"b":[2,3]}"#);
///
/// let err = parse(r#"{"a":01}"#).unwrap_err();
/// assert!(err.to_string().contains("leading zero"));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    let mut parser = Parser::new(input);
    let value = parser.parse_value(0)?;
    parser.skip_trivia()?;
    if !parser.at_end() {
        return Err(parser.error_here("unexpected trailing characters after value"));
    }
    Ok(value)
}

/// Parse a string holding zero or more JSON documents separated by
/// whitespace or comments.
///
/// Values are collected until the input is exhausted or a parse failure
/// occurs. On failure the values parsed so far are still returned,
/// together with the error; on success the error slot is `None`.
///
/// ```rust
/// use jsonish_core::parse_multi;
///
/// let (values, err) = parse_multi("1 [2] {} // done");
/// assert!(err.is_none());
/// assert_eq!(values.len(), 3);
/// assert_eq!(values[0].number_value(), 1.0);
/// ```
pub fn parse_multi(input: &str) -> (Vec<Value>, Option<ParseError>) {
    let mut parser = Parser::new(input);
    let mut values = Vec::new();
    loop {
        if let Err(err) = parser.skip_trivia() {
            return (values, Some(err));
        }
        if parser.at_end() {
            return (values, None);
        }
        match parser.parse_value(0) {
            Ok(value) => values.push(value),
            Err(err) => return (values, Some(err)),
        }
    }
}

/// Cursor over the input. `pos` is a byte offset and always sits on a
/// UTF-8 character boundary when parsing decisions are made.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser { input, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.pos)
    }

    /// Skip whitespace and comments. Fails on an unterminated block comment
    /// or a stray `/` that does not open a comment.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.pos += 1,
                Some(b'/') => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        let start = self.pos;
        match self.input.as_bytes().get(self.pos + 1) {
            Some(b'/') => {
                // Line comment: runs to the next newline or end of input.
                self.pos += 2;
                match self.input[self.pos..].find('\n') {
                    Some(n) => self.pos += n + 1,
                    None => self.pos = self.input.len(),
                }
                Ok(())
            }
            Some(b'*') => {
                self.pos += 2;
                match self.input[self.pos..].find("*/") {
                    Some(n) => {
                        self.pos += n + 2;
                        Ok(())
                    }
                    None => Err(ParseError::new("unterminated block comment", start)),
                }
            }
            _ => Err(ParseError::new("malformed comment", start)),
        }
    }

    /// Parse one value. `depth` counts container nesting from the document
    /// root; exceeding [`MAX_NESTING_DEPTH`] is a failure.
    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        if depth > MAX_NESTING_DEPTH {
            return Err(self.error_here("exceeded maximum nesting depth"));
        }
        self.skip_trivia()?;
        match self.peek() {
            None => Err(self.error_here("unexpected end of input")),
            Some(b'n') => self.expect_keyword("null", Value::Null),
            Some(b't') => self.expect_keyword("true", Value::Bool(true)),
            Some(b'f') => self.expect_keyword("false", Value::Bool(false)),
            Some(b'"') => {
                self.pos += 1;
                Ok(Value::from(self.parse_string()?))
            }
            Some(b'[') => self.parse_array(depth),
            Some(b'{') => self.parse_object(depth),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => {
                let ch = self.input[self.pos..].chars().next().unwrap_or('?');
                Err(self.error_here(format!("unexpected character '{ch}'")))
            }
        }
    }

    fn expect_keyword(&mut self, keyword: &str, value: Value) -> Result<Value> {
        if self.input[self.pos..].starts_with(keyword) {
            self.pos += keyword.len();
            Ok(value)
        } else {
            Err(self.error_here(format!("invalid literal, expected '{keyword}'")))
        }
    }

    /// Parse the body of a string literal; the opening quote has already
    /// been consumed. Returns the unescaped contents.
    ///
    /// Unescaped spans are appended in one `push_str` per run rather than
    /// char by char; the scan only stops on ASCII bytes, so the copied
    /// spans always end on character boundaries.
    fn parse_string(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            let chunk_start = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' {
                    break;
                }
                if b < 0x20 {
                    return Err(
                        self.error_here(format!("unescaped control character 0x{b:02x} in string"))
                    );
                }
                self.pos += 1;
            }
            out.push_str(&self.input[chunk_start..self.pos]);
            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    self.parse_escape(&mut out)?;
                }
                _ => return Err(self.error_here("unterminated string")),
            }
        }
    }

    /// Decode one escape sequence; the backslash has already been consumed.
    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let escape_pos = self.pos - 1;
        let code = match self.peek() {
            Some(b) => b,
            None => return Err(self.error_here("unterminated string")),
        };
        self.pos += 1;
        match code {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let cp = self.parse_hex4()?;
                if (0xDC00..=0xDFFF).contains(&cp) {
                    return Err(ParseError::new(
                        "unpaired low surrogate in \\u escape",
                        escape_pos,
                    ));
                }
                let cp = if (0xD800..=0xDBFF).contains(&cp) {
                    // High surrogate: a low-surrogate escape must follow
                    // immediately to form one supplementary code point.
                    if !self.input[self.pos..].starts_with("\\u") {
                        return Err(ParseError::new(
                            "unpaired high surrogate in \\u escape",
                            escape_pos,
                        ));
                    }
                    self.pos += 2;
                    let low = self.parse_hex4()?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(ParseError::new(
                            "unpaired high surrogate in \\u escape",
                            escape_pos,
                        ));
                    }
                    0x10000 + ((cp - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    cp
                };
                let decoded = char::from_u32(cp)
                    .ok_or_else(|| ParseError::new("invalid \\u escape", escape_pos))?;
                out.push(decoded);
            }
            other => {
                return Err(ParseError::new(
                    format!("invalid escape '\\{}'", other as char),
                    escape_pos,
                ));
            }
        }
        Ok(())
    }

    /// Read exactly four hex digits of a `\u` escape.
    fn parse_hex4(&mut self) -> Result<u32> {
        let start = self.pos;
        if self.input.len() < start + 4 {
            return Err(ParseError::new("truncated \\u escape", start));
        }
        let digits = match self.input.get(start..start + 4) {
            Some(d) if d.bytes().all(|b| b.is_ascii_hexdigit()) => d,
            // Non-hex digits, or a multibyte character straddling the
            // four-byte window.
            _ => {
                let excerpt: String = self.input[start..].chars().take(4).collect();
                return Err(ParseError::new(
                    format!("invalid \\u escape '{excerpt}'"),
                    start,
                ));
            }
        };
        let cp = u32::from_str_radix(digits, 16)
            .map_err(|_| ParseError::new(format!("invalid \\u escape '{digits}'"), start))?;
        self.pos += 4;
        Ok(cp)
    }

    /// Parse a number literal. The grammar (sign, integer, fraction,
    /// exponent) is validated here, including the leading-zero rule; the
    /// final conversion goes through `str::parse::<f64>`, which is
    /// correctly rounded. Magnitudes beyond `f64` overflow to infinity,
    /// which in turn serializes back as null.
    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        // Integer part: a lone 0, or a nonzero digit followed by digits.
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(ParseError::new(
                        "leading zeros are not permitted in numbers",
                        start,
                    ));
                }
            }
            Some(b'1'..=b'9') => {
                self.pos += 1;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            }
            _ => return Err(ParseError::new("expected digit in number", start)),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error_here("expected digit after decimal point"));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error_here("expected digit in exponent"));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }

        let lexeme = &self.input[start..self.pos];
        let n = lexeme
            .parse::<f64>()
            .map_err(|_| ParseError::new(format!("invalid number '{lexeme}'"), start))?;
        Ok(Value::Number(n))
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        self.pos += 1; // consume '['
        let mut items = Vec::new();
        self.skip_trivia()?;
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Value::from(items));
        }
        loop {
            items.push(self.parse_value(depth + 1)?);
            self.skip_trivia()?;
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::from(items));
                }
                Some(b',') => {
                    self.pos += 1;
                    self.skip_trivia()?;
                    // Trailing comma: the closing bracket may follow directly.
                    if self.peek() == Some(b']') {
                        self.pos += 1;
                        return Ok(Value::from(items));
                    }
                }
                _ => return Err(self.error_here("expected ',' or ']' in array")),
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        self.pos += 1; // consume '{'
        let mut map = BTreeMap::new();
        self.skip_trivia()?;
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::from(map));
        }
        loop {
            let key = self.parse_key()?;
            self.skip_trivia()?;
            if self.peek() != Some(b':') {
                return Err(self.error_here("expected ':' after object key"));
            }
            self.pos += 1;
            let value = self.parse_value(depth + 1)?;
            // Duplicate keys are not an error; the last occurrence wins.
            map.insert(key, value);
            self.skip_trivia()?;
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::from(map));
                }
                Some(b',') => {
                    self.pos += 1;
                    self.skip_trivia()?;
                    if self.peek() == Some(b'}') {
                        self.pos += 1;
                        return Ok(Value::from(map));
                    }
                }
                _ => return Err(self.error_here("expected ',' or '}' in object")),
            }
        }
    }

    /// Parse an object key: a quoted string, or a bareword matching
    /// `[A-Za-z_][A-Za-z0-9_]*`.
    fn parse_key(&mut self) -> Result<String> {
        self.skip_trivia()?;
        match self.peek() {
            Some(b'"') => {
                self.pos += 1;
                self.parse_string()
            }
            Some(b) if b == b'_' || b.is_ascii_alphabetic() => {
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if b == b'_' || b.is_ascii_alphanumeric() {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                Ok(self.input[start..self.pos].to_string())
            }
            _ => Err(self.error_here("expected object key")),
        }
    }
}
