//! Equality and partial ordering of document values
//!
//! Values compare only within matching tags. Numbers and strings are totally
//! ordered; booleans, nulls, arrays and objects only support equality, so
//! `<` and `>` are always false for them and `<=`/`>=` reduce to `==`.
//! Any cross-tag comparison is unequal and unordered.

use std::cmp::Ordering;

use crate::types::Value;

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use Value::*;

        let equal = |same: bool| same.then_some(Ordering::Equal);

        match (self, other) {
            (Number(a), Number(b)) => a.partial_cmp(b),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Bool(a), Bool(b)) => equal(a == b),
            (Array(a), Array(b)) => equal(a == b),
            (Object(a), Object(b)) => equal(a == b),
            _ if self.is_null() && other.is_null() => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}
