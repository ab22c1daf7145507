//! Embedding-runtime object model for hostver.
//!
//! This crate models the parts of a scripting runtime that native bindings talk to: runtime values, record
//! (named-tuple) types registered once per process, record allocation, and the string marshalling helper used at
//! the native boundary.

#![deny(clippy::unwrap_used)]

pub mod errors;
pub mod marshal;
pub mod prelude;
pub mod record;
pub mod reflection;
pub mod runtime;
pub mod schema;
pub mod value;

#[cfg(feature = "json")]
pub mod json;

// Re-export commonly used items
pub use errors::{ErrorKind, RuntimeError};
pub use record::{ObjectId, Record, RecordBuilder};
pub use reflection::{FieldInfo, RecordValue};
pub use runtime::{Runtime, RuntimeConfig, TypeHandle};
pub use schema::RecordSchema;
pub use value::Value;

#[cfg(feature = "json")]
pub use json::record_to_json;
