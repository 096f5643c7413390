//! Structural merge of document values
//!
//! Objects merge key by key, arrays concatenate, and any other pair of
//! matching tags is replaced by the incoming value. Below the top level a tag
//! mismatch is resolved by replacement; at the top level it is an error.

use crate::error::{ErrorKind, Result};
use crate::path::sentinel_ref;
use crate::types::Value;

impl Value {
    /// Merge `other` into `self`.
    ///
    /// Fails with [`ErrorKind::WrongType`] when the two values differ in tag,
    /// or when either side contains an unclassifiable value anywhere in its
    /// tree. On failure `self` is left untouched.
    pub fn merge(&mut self, other: &Value) -> Result<()> {
        *self = self.merged(other)?;
        Ok(())
    }

    /// Merged copy of `self` and `other`; see [`Value::merge`].
    pub fn merged(&self, other: &Value) -> Result<Value> {
        check_classified([self, other])?;
        merge_values(self, other, true)
    }
}

// Both trees are known to be free of unclassifiable values.
fn merge_values(existing: &Value, incoming: &Value, typecheck: bool) -> Result<Value> {
    if existing.tag() != incoming.tag() {
        if typecheck {
            return Err(ErrorKind::WrongType.into());
        }
        return Ok(incoming.detached());
    }

    match (existing, incoming) {
        (Value::Object(base), Value::Object(patch)) => {
            let mut out = base.clone();
            for (key, value) in patch {
                let slot = base
                    .get(key)
                    .unwrap_or_else(|| sentinel_ref(ErrorKind::NotExist));
                out.insert(key.clone(), merge_values(slot, value, false)?);
            }
            Ok(Value::Object(out))
        }
        (Value::Array(head), Value::Array(tail)) => {
            Ok(Value::Array(head.iter().chain(tail).cloned().collect()))
        }
        _ => Ok(incoming.detached()),
    }
}

fn check_classified<'a>(items: impl IntoIterator<Item = &'a Value>) -> Result<()> {
    for item in items {
        match item {
            Value::Sentinel(ErrorKind::UnsupportedType) => return Err(ErrorKind::WrongType.into()),
            Value::Array(children) => check_classified(children)?,
            Value::Object(map) => check_classified(map.values())?,
            _ => {}
        }
    }
    Ok(())
}
