//! Fail-soft navigation by index, key and compound path
//!
//! Reads never fail: a missing key, an out-of-range index or a lookup on the
//! wrong kind of value yields a sentinel carrying the reason. Once a sentinel is
//! produced, later segments keep its error.

use std::fmt;
use std::ops::Index;

use crate::error::ErrorKind;
use crate::types::Value;

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Array position
    Index(usize),
    /// Object key
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(i) => write!(f, "{}", i),
            Segment::Key(k) => f.write_str(k),
        }
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

// Negative indices address nothing, so they map to an index no array reaches.
impl From<i32> for Segment {
    fn from(i: i32) -> Self {
        Segment::Index(usize::try_from(i).unwrap_or(usize::MAX))
    }
}

impl From<&str> for Segment {
    fn from(k: &str) -> Self {
        Segment::Key(k.to_string())
    }
}

impl From<String> for Segment {
    fn from(k: String) -> Self {
        Segment::Key(k)
    }
}

impl From<&String> for Segment {
    fn from(k: &String) -> Self {
        Segment::Key(k.clone())
    }
}

/// Build a path from mixed index and key literals.
///
/// ```rust
/// use docvalue::{path, Segment};
///
/// let p = path!["objects", 0, "name"];
/// assert_eq!(p[1], Segment::Index(0));
/// ```
#[macro_export]
macro_rules! path {
    ($($seg:expr),* $(,)?) => {
        ::std::vec![$($crate::Segment::from($seg)),*]
    };
}

static UNSUPPORTED_TYPE: Value = Value::Sentinel(ErrorKind::UnsupportedType);
static INDEX_OUT_OF_BOUNDS: Value = Value::Sentinel(ErrorKind::IndexOutOfBounds);
static ELEMENT_TOO_DEEP: Value = Value::Sentinel(ErrorKind::ElementTooDeep);
static WRONG_TYPE: Value = Value::Sentinel(ErrorKind::WrongType);
static NOT_EXIST: Value = Value::Sentinel(ErrorKind::NotExist);
static INVALID_DOCUMENT: Value = Value::Sentinel(ErrorKind::InvalidDocument);

pub(crate) fn sentinel_ref(kind: ErrorKind) -> &'static Value {
    match kind {
        ErrorKind::UnsupportedType => &UNSUPPORTED_TYPE,
        ErrorKind::IndexOutOfBounds => &INDEX_OUT_OF_BOUNDS,
        ErrorKind::ElementTooDeep => &ELEMENT_TOO_DEEP,
        ErrorKind::WrongType => &WRONG_TYPE,
        ErrorKind::NotExist => &NOT_EXIST,
        ErrorKind::InvalidDocument => &INVALID_DOCUMENT,
    }
}

impl Value {
    /// Element at `index` of an array.
    pub fn get_index(&self, index: usize) -> &Value {
        match self {
            Value::Array(items) => items
                .get(index)
                .unwrap_or_else(|| sentinel_ref(ErrorKind::IndexOutOfBounds)),
            Value::Sentinel(kind) => sentinel_ref(*kind),
            _ => sentinel_ref(ErrorKind::WrongType),
        }
    }

    /// Entry `key` of an object.
    pub fn get_key(&self, key: &str) -> &Value {
        match self {
            Value::Object(map) => map
                .get(key)
                .unwrap_or_else(|| sentinel_ref(ErrorKind::NotExist)),
            Value::Sentinel(kind) => sentinel_ref(*kind),
            _ => sentinel_ref(ErrorKind::WrongType),
        }
    }

    pub fn get_segment(&self, segment: &Segment) -> &Value {
        match segment {
            Segment::Index(i) => self.get_index(*i),
            Segment::Key(k) => self.get_key(k),
        }
    }

    /// Resolve a compound path. An empty path resolves to `self`.
    pub fn get(&self, path: &[Segment]) -> &Value {
        path.iter().fold(self, |cur, segment| cur.get_segment(segment))
    }

    /// Mutable access to an existing node; `None` wherever `get` would give a
    /// sentinel.
    pub fn get_mut(&mut self, path: &[Segment]) -> Option<&mut Value> {
        path.iter()
            .try_fold(self, |cur, segment| cur.child_mut(segment))
    }

    fn child_mut(&mut self, segment: &Segment) -> Option<&mut Value> {
        match (self, segment) {
            (Value::Array(items), Segment::Index(i)) => items.get_mut(*i),
            (Value::Object(map), Segment::Key(k)) => map.get_mut(k.as_str()),
            _ => None,
        }
    }

    /// Write `value` at `path`, returning whether the write landed.
    ///
    /// The last segment may name a new object key, but intermediate
    /// containers are never created and array writes must be in range.
    /// An empty path is a no-op. Sentinels are stored as plain nulls.
    pub fn set(&mut self, path: &[Segment], value: impl Into<Value>) -> bool {
        match path.split_first() {
            None => false,
            Some((segment, [])) => self.set_segment(segment, value.into()),
            Some((segment, rest)) => match self.child_mut(segment) {
                Some(child) => child.set(rest, value),
                None => false,
            },
        }
    }

    fn set_segment(&mut self, segment: &Segment, value: Value) -> bool {
        let value = match value {
            Value::Sentinel(_) => Value::Null,
            other => other,
        };
        match (self, segment) {
            (Value::Array(items), Segment::Index(i)) => match items.get_mut(*i) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            (Value::Object(map), Segment::Key(k)) => {
                map.insert(k.clone(), value);
                true
            }
            _ => false,
        }
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get_key(key)
    }
}

impl Index<&Segment> for Value {
    type Output = Value;

    fn index(&self, segment: &Segment) -> &Value {
        self.get_segment(segment)
    }
}

impl Index<&[Segment]> for Value {
    type Output = Value;

    fn index(&self, path: &[Segment]) -> &Value {
        self.get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tag;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn project() -> Value {
        Value::from(json!({
            "rootObject": "ROOT",
            "objects": {
                "ROOT": {"isa": "PBXProject", "mainGroup": "GROUP"},
                "GROUP": {"isa": "PBXGroup", "children": ["A", "B"]}
            },
            "archiveVersion": 1
        }))
    }

    #[test]
    fn test_single_index() {
        let v = Value::from(vec![10, 20]);
        assert_eq!(v.get_index(1).as_i64(), Some(20));
        assert_eq!(v.get_index(2).error(), Some(ErrorKind::IndexOutOfBounds));
        assert_eq!(Value::from("x").get_index(0).error(), Some(ErrorKind::WrongType));
    }

    #[test]
    fn test_single_key() {
        let v = project();
        assert_eq!(v.get_key("rootObject").as_str(), Some("ROOT"));
        assert_eq!(v.get_key("missing").error(), Some(ErrorKind::NotExist));
        assert_eq!(Value::from(1).get_key("a").error(), Some(ErrorKind::WrongType));
    }

    #[test]
    fn test_sentinel_preserves_error() {
        let missing = Value::sentinel(ErrorKind::NotExist);
        assert_eq!(missing.get_key("x").error(), Some(ErrorKind::NotExist));
        assert_eq!(missing.get_index(0).error(), Some(ErrorKind::NotExist));
    }

    #[test]
    fn test_compound_read() {
        let v = project();
        let main = v.get(&path!["objects", "ROOT", "mainGroup"]).string_value();
        assert_eq!(main, "GROUP");
        assert_eq!(v.get(&path!["objects", main.as_str(), "children", 1]).as_str(), Some("B"));
        assert_eq!(v["objects"]["GROUP"]["isa"].as_str(), Some("PBXGroup"));
    }

    #[test]
    fn test_first_failure_propagates() {
        let v = project();
        let r = v.get(&path!["objects", "NOPE", "children", 0]);
        assert_eq!(r.error(), Some(ErrorKind::NotExist));
        assert_eq!(r.tag(), Tag::Null);

        let r = v.get(&path!["archiveVersion", "x", 3]);
        assert_eq!(r.error(), Some(ErrorKind::WrongType));

        let r = v.get(&path!["objects", "GROUP", "children", 9, "k"]);
        assert_eq!(r.error(), Some(ErrorKind::IndexOutOfBounds));
    }

    #[test]
    fn test_empty_path_is_identity() {
        let v = project();
        assert_eq!(v.get(&[]), &v);
    }

    #[test]
    fn test_negative_index_is_out_of_bounds() {
        let v = Value::from(vec![1]);
        assert_eq!(v.get(&path![-1]).error(), Some(ErrorKind::IndexOutOfBounds));
    }

    #[test]
    fn test_set_single_segment() {
        let mut v = project();
        assert!(v.set(&path!["rootObject"], "OTHER"));
        assert_eq!(v["rootObject"].as_str(), Some("OTHER"));

        assert!(v.set(&path!["newKey"], 5));
        assert_eq!(v["newKey"].as_i64(), Some(5));
    }

    #[test]
    fn test_set_nested() {
        let mut v = project();
        assert!(v.set(&path!["objects", "GROUP", "children", 0], "Z"));
        assert_eq!(v.get(&path!["objects", "GROUP", "children"]).to_json(), json!(["Z", "B"]));

        assert!(v.set(&path!["objects", "ROOT", "name"], "App"));
        assert_eq!(v.get(&path!["objects", "ROOT", "name"]).as_str(), Some("App"));
    }

    #[test]
    fn test_set_does_not_create_intermediates() {
        let mut v = project();
        let before = v.clone();
        assert!(!v.set(&path!["objects", "NEW", "isa"], "PBXGroup"));
        assert!(!v.get(&path!["objects", "NEW"]).exists());
        assert_eq!(v, before);
    }

    #[test]
    fn test_set_out_of_range_or_wrong_type() {
        let mut v = Value::from(vec![1, 2]);
        assert!(!v.set(&path![2], 3));
        assert!(!v.set(&path!["k"], 3));
        assert_eq!(v.to_json(), json!([1, 2]));

        let mut s = Value::from("scalar");
        assert!(!s.set(&path![0], 1));
        assert!(!s.set(&[], 1));
        assert_eq!(s.as_str(), Some("scalar"));
    }

    #[test]
    fn test_set_sentinel_stores_null() {
        let mut v = Value::from(json!({"a": 1}));
        assert!(v.set(&path!["a"], Value::sentinel(ErrorKind::NotExist)));
        assert!(v["a"].exists());
        assert_eq!(v["a"].tag(), Tag::Null);
    }

    #[test]
    fn test_get_mut() {
        let mut v = project();
        if let Some(children) = v
            .get_mut(&path!["objects", "GROUP", "children"])
            .and_then(Value::as_array_mut)
        {
            children.push(Value::from("C"));
        }
        assert_eq!(v.get(&path!["objects", "GROUP", "children"]).len(), 3);
        assert!(v.get_mut(&path!["objects", "NOPE"]).is_none());
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(Segment::from(3usize).to_string(), "3");
        assert_eq!(Segment::from("key").to_string(), "key");
    }
}
