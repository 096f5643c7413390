//! docvalue - Schema-less document values
//!
//! A single [`Value`] type represents any JSON or property-list shaped data:
//! null, boolean, number, string, ordered array and string-keyed object. Values
//! are navigated by path without ever failing hard, merged structurally,
//! compared within matching tags and serialized back to text or bytes.
//!
//! # Example
//!
//! ```rust
//! use docvalue::{path, Value, WriteOptions};
//! use serde_json::json;
//!
//! let mut project = Value::from(json!({"objects": {"ROOT": {"isa": "PBXProject"}}}));
//! assert_eq!(project.get(&path!["objects", "ROOT", "isa"]).as_str(), Some("PBXProject"));
//! assert!(!project.get(&path!["objects", "MISSING"]).exists());
//!
//! project.set(&path!["objects", "ROOT", "name"], "App");
//! let text = project.to_string_with(&WriteOptions::null_tokens()).unwrap();
//! assert_eq!(text, r#"{"objects": {"ROOT": {"isa": "PBXProject","name": "App"}}}"#);
//! ```

mod compare;
mod error;
mod json_bridge;
mod merge;
mod number;
mod path;
mod serde_bridge;
mod types;
mod write;

pub use error::*;
pub use json_bridge::*;
pub use number::*;
pub use path::Segment;
pub use types::*;
pub use write::*;
