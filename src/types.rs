//! Core document value types

use std::collections::{btree_map, BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::ErrorKind;
use crate::json_bridge::{from_json, to_json};
use crate::number::Number;
use crate::path::Segment;

/// Object payload. Key order carries no meaning; a sorted map keeps output
/// deterministic.
pub type Map = BTreeMap<String, Value>;

static EMPTY_MAP: Map = BTreeMap::new();

/// A schema-less document value.
///
/// Exactly one variant is active. [`Value::Sentinel`] is a null that carries the
/// reason a lookup or classification failed; it reports [`Tag::Null`] (or
/// [`Tag::Unknown`] for [`ErrorKind::UnsupportedType`]) and `exists()` is false.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value, never conflated with the numbers 0 and 1
    Bool(bool),
    /// Numeric value
    Number(Number),
    /// String value
    String(String),
    /// Ordered list of values
    Array(Vec<Value>),
    /// String-keyed map of values
    Object(Map),
    /// Null carrying a navigation or classification error
    Sentinel(ErrorKind),
}

/// Active variant discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Unknown,
    Number,
    String,
    Bool,
    Array,
    Object,
    Null,
}

// ============================================================
// Construction
// ============================================================

impl Value {
    /// Create a null value
    pub const fn null() -> Self {
        Value::Null
    }

    /// Create a sentinel for the given error
    pub const fn sentinel(kind: ErrorKind) -> Self {
        Value::Sentinel(kind)
    }

    /// Classify arbitrary host data.
    ///
    /// The input is first projected onto the JSON data model by `serde_json`.
    /// Anything it rejects (non-string map keys, failing `Serialize` impls)
    /// yields an [`ErrorKind::UnsupportedType`] sentinel.
    pub fn classify<T: Serialize + ?Sized>(input: &T) -> Self {
        match serde_json::to_value(input) {
            Ok(json) => from_json(&json),
            Err(_) => Value::Sentinel(ErrorKind::UnsupportedType),
        }
    }

    /// Re-project the active variant into untyped `serde_json` form.
    ///
    /// Sentinels and non-finite numbers project to `null`.
    pub fn to_json(&self) -> JsonValue {
        to_json(self)
    }

    /// Replace the active variant by classifying `json`, clearing any error.
    pub fn set_json(&mut self, json: &JsonValue) {
        *self = from_json(json);
    }

    /// Copy of this value with any sentinel turned into a plain null.
    pub(crate) fn detached(&self) -> Value {
        match self {
            Value::Sentinel(_) => Value::Null,
            other => other.clone(),
        }
    }
}

// ============================================================
// Type checking
// ============================================================

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Null => Tag::Null,
            Value::Bool(_) => Tag::Bool,
            Value::Number(_) => Tag::Number,
            Value::String(_) => Tag::String,
            Value::Array(_) => Tag::Array,
            Value::Object(_) => Tag::Object,
            Value::Sentinel(ErrorKind::UnsupportedType) => Tag::Unknown,
            Value::Sentinel(_) => Tag::Null,
        }
    }

    /// Error attached to a sentinel.
    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            Value::Sentinel(kind) => Some(*kind),
            _ => None,
        }
    }

    /// False iff this value carries an error. Use instead of null checks.
    pub fn exists(&self) -> bool {
        self.error().is_none()
    }

    /// True for plain nulls and for null-tagged sentinels.
    pub fn is_null(&self) -> bool {
        self.tag() == Tag::Null
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Value::Sentinel(_))
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

    /// Number of children of a container, zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================
// Optional accessors
// ============================================================

impl Value {
    pub fn as_null(&self) -> Option<()> {
        self.is_null().then_some(())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.as_i64())
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(|n| n.as_u64())
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

// ============================================================
// Coerced accessors
// ============================================================

const TRUTHY: [&str; 5] = ["true", "y", "t", "yes", "1"];

impl Value {
    /// Best-effort boolean.
    ///
    /// Numbers are true when non-zero; strings are true when they match one of
    /// `true`, `y`, `t`, `yes`, `1` ignoring ASCII case. Everything else is false.
    pub fn bool_value(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => TRUTHY.iter().any(|t| s.eq_ignore_ascii_case(t)),
            _ => false,
        }
    }

    /// Best-effort number. Booleans map to 1/0, strings are parsed as decimals
    /// and fall back to zero.
    pub fn number_value(&self) -> Number {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => Number::Int(i64::from(*b)),
            Value::String(s) => Number::parse(s).unwrap_or_default(),
            _ => Number::default(),
        }
    }

    pub fn i64_value(&self) -> i64 {
        self.number_value().to_i64_lossy()
    }

    pub fn u64_value(&self) -> u64 {
        self.number_value().to_u64_lossy()
    }

    pub fn f64_value(&self) -> f64 {
        self.number_value().as_f64()
    }

    /// Best-effort string. Scalars are stringified; containers and nulls give
    /// an empty string.
    pub fn string_value(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Array elements, or an empty slice.
    pub fn array_value(&self) -> &[Value] {
        self.as_array().unwrap_or(&[])
    }

    /// Object entries, or an empty map.
    pub fn object_value(&self) -> &Map {
        self.as_object().unwrap_or(&EMPTY_MAP)
    }
}

// ============================================================
// Iteration
// ============================================================

/// Iterator over the children of a container, see [`Value::iter`].
pub enum Iter<'a> {
    Array(std::iter::Enumerate<std::slice::Iter<'a, Value>>),
    Object(btree_map::Iter<'a, String, Value>),
    Empty,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Segment, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Array(items) => items.next().map(|(i, v)| (Segment::Index(i), v)),
            Iter::Object(entries) => entries.next().map(|(k, v)| (Segment::Key(k.clone()), v)),
            Iter::Empty => None,
        }
    }
}

impl Value {
    /// Children paired with the segment that addresses them. Scalars have none.
    pub fn iter(&self) -> Iter<'_> {
        match self {
            Value::Array(items) => Iter::Array(items.iter().enumerate()),
            Value::Object(map) => Iter::Object(map.iter()),
            _ => Iter::Empty,
        }
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = (Segment, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================
// Conversions
// ============================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Number(Number::from(v))
            }
        })*
    };
}

value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(map: BTreeMap<String, T>) -> Self {
        Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(map: HashMap<String, T>) -> Self {
        Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        from_json(&json)
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        from_json(json)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
