//! Text and byte output for document values
//!
//! Two strategies:
//! - the native path hands the tree to `serde_json` after checking that every
//!   leaf has a JSON form, in pretty or compact layout;
//! - the raw path walks the tree by hand so that nulls render as an explicit
//!   `null` token, with a depth budget guarding against runaway nesting.
//!
//! Nulls always render as `null` on the native path as well. Values that are
//! absent in the source data must be dropped before a tree is built; neither
//! path can tell an explicit null from a missing one.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};
use crate::types::{Tag, Value};

/// Layout used by the native path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeMode {
    /// Two-space indented output
    #[default]
    Pretty,
    /// No insignificant whitespace
    Compact,
}

/// Character encoding of byte output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// 7-bit ASCII; text outside it is rejected
    Ascii,
}

impl TextEncoding {
    /// Encode `text`, failing with [`ErrorKind::InvalidDocument`] when it is
    /// not representable.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            TextEncoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            TextEncoding::Ascii if text.is_ascii() => Ok(text.as_bytes().to_vec()),
            TextEncoding::Ascii => Err(ErrorKind::InvalidDocument.into()),
        }
    }

    fn check(self, text: &str) -> Result<()> {
        match self {
            TextEncoding::Ascii if !text.is_ascii() => Err(ErrorKind::InvalidDocument.into()),
            _ => Ok(()),
        }
    }
}

/// Options for raw string output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Target encoding of the produced text
    pub encoding: TextEncoding,
    /// Nesting budget for the raw path; every value, leaves included, spends one level
    pub max_depth: usize,
    /// Render containers by hand with explicit `null` tokens instead of
    /// delegating them to the native path
    pub null_token: bool,
    /// Native layout used for containers when `null_token` is off
    pub native_mode: NativeMode,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf8,
            max_depth: 10,
            null_token: false,
            native_mode: NativeMode::Pretty,
        }
    }
}

impl WriteOptions {
    /// Native compact layout for containers
    pub fn compact() -> Self {
        Self {
            native_mode: NativeMode::Compact,
            ..Self::default()
        }
    }

    /// Hand-rolled output with explicit `null` tokens
    pub fn null_tokens() -> Self {
        Self {
            null_token: true,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

// ============================================================
// Native path
// ============================================================

impl Value {
    /// Serialize through `serde_json`.
    ///
    /// Fails with [`ErrorKind::InvalidDocument`] if the tree holds an
    /// unclassifiable value or a non-finite number.
    pub fn to_vec(&self, mode: NativeMode) -> Result<Vec<u8>> {
        check_native(self)?;
        let bytes = match mode {
            NativeMode::Pretty => serde_json::to_vec_pretty(self)?,
            NativeMode::Compact => serde_json::to_vec(self)?,
        };
        Ok(bytes)
    }

    pub fn to_vec_pretty(&self) -> Result<Vec<u8>> {
        self.to_vec(NativeMode::Pretty)
    }

    fn to_native_string(&self, mode: NativeMode) -> Result<String> {
        check_native(self)?;
        let text = match mode {
            NativeMode::Pretty => serde_json::to_string_pretty(self)?,
            NativeMode::Compact => serde_json::to_string(self)?,
        };
        Ok(text)
    }
}

fn check_native(v: &Value) -> Result<()> {
    match v {
        Value::Sentinel(ErrorKind::UnsupportedType) => Err(ErrorKind::InvalidDocument.into()),
        Value::Number(n) if !n.is_finite() => Err(ErrorKind::InvalidDocument.into()),
        Value::Array(items) => items.iter().try_for_each(check_native),
        Value::Object(map) => map.values().try_for_each(check_native),
        _ => Ok(()),
    }
}

// ============================================================
// Raw path
// ============================================================

impl Value {
    /// Render as text.
    ///
    /// Scalars render bare: a top-level string comes back without quotes,
    /// numbers and booleans as their literal text, nulls as `null`.
    /// Containers go through the native path unless `opts.null_token` is set,
    /// in which case they are written by hand as `{"key": value,...}` and
    /// `[value,...]`. Backslashes, double quotes and control characters are
    /// backslash-escaped; all other text is written as is.
    pub fn to_string_with(&self, opts: &WriteOptions) -> Result<String> {
        let text = match self {
            Value::String(s) if opts.max_depth > 0 => s.clone(),
            Value::Array(_) | Value::Object(_) if !opts.null_token && opts.max_depth > 0 => {
                self.to_native_string(opts.native_mode)?
            }
            _ => {
                let mut buf = String::new();
                write_raw(&mut buf, self, opts.max_depth)?;
                buf
            }
        };
        opts.encoding.check(&text)?;
        Ok(text)
    }

    /// [`Value::to_string_with`] encoded in `opts.encoding`.
    pub fn to_bytes_with(&self, opts: &WriteOptions) -> Result<Vec<u8>> {
        let text = self.to_string_with(opts)?;
        opts.encoding.encode(&text)
    }

    /// Lossy export with default options; `None` when serialization fails.
    pub fn raw_string(&self) -> Option<String> {
        self.to_string_with(&WriteOptions::default()).ok()
    }
}

fn write_raw(buf: &mut String, v: &Value, depth: usize) -> Result<()> {
    if depth == 0 {
        return Err(ErrorKind::ElementTooDeep.into());
    }

    match v {
        Value::Null => buf.push_str("null"),
        Value::Sentinel(_) if v.tag() == Tag::Null => buf.push_str("null"),
        Value::Sentinel(_) => return Err(ErrorKind::InvalidDocument.into()),
        Value::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) if n.is_finite() => buf.push_str(&n.to_string()),
        Value::Number(_) => return Err(ErrorKind::InvalidDocument.into()),
        Value::String(s) => quote_into(buf, s),
        Value::Array(items) => {
            buf.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(',');
                }
                write_raw(buf, item, depth - 1)?;
            }
            buf.push(']');
        }
        Value::Object(map) => {
            buf.push('{');
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    buf.push(',');
                }
                quote_into(buf, key);
                buf.push_str(": ");
                write_raw(buf, value, depth - 1)?;
            }
            buf.push('}');
        }
    }
    Ok(())
}

fn quote_into(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '\\' => buf.push_str("\\\\"),
            '"' => buf.push_str("\\\""),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{8}' => buf.push_str("\\b"),
            '\u{c}' => buf.push_str("\\f"),
            c if c < ' ' => {
                let _ = write!(buf, "\\u{:04x}", u32::from(c));
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw_string() {
            Some(text) => f.write_str(&text),
            None => f.write_str("unknown"),
        }
    }
}
