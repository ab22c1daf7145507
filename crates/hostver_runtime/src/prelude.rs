//! Prelude module for common runtime imports.
//!
//! ```ignore
//! use hostver_runtime::prelude::*;
//! ```

pub use crate::errors::RuntimeError;
pub use crate::marshal::string_or_none;
pub use crate::record::{Record, RecordBuilder};
pub use crate::reflection::{FieldInfo, RecordValue};
pub use crate::runtime::{Runtime, RuntimeConfig, TypeHandle};
pub use crate::schema::RecordSchema;
pub use crate::value::{FromValue, Value};

// Re-export derive macros from hostver_derive
pub use hostver_derive::{FieldInfo as DeriveFieldInfo, RecordValue as DeriveRecordValue};
