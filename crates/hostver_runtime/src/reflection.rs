//! Reflection support for typed records.
//!
//! `FieldInfo` describes a Rust struct's fields so a record schema can be derived from it; `RecordValue` turns a
//! runtime [`Record`] back into that struct. Both are typically derived with `hostver_derive`.

use crate::errors::RuntimeError;
use crate::record::Record;

/// Provides reflection information about a type's fields.
///
/// # Examples
///
/// ```ignore
/// #[derive(FieldInfo)]
/// struct Pair {
///     first: Option<String>,
///     second: Option<String>,
/// }
///
/// assert_eq!(Pair::field_names(), vec!["first", "second"]);
/// ```
pub trait FieldInfo {
    /// Returns the names of all fields in declaration order.
    fn field_names() -> Vec<&'static str>;

    /// Returns the type names of all fields in declaration order.
    fn field_types() -> Vec<&'static str>;
}

/// Named destructuring of a runtime record into a Rust value.
pub trait RecordValue: Sized {
    /// Build `Self` by reading every field of `record` by name.
    ///
    /// ## Errors
    /// - `UnknownField` if the record's type lacks one of `Self`'s fields.
    /// - `TypeMismatch` if a slot holds a value the field type cannot represent.
    fn from_record(record: &Record) -> Result<Self, RuntimeError>;
}
