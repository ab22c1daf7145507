//! Runtime values stored in record slots.
//!
//! The record model only needs text and an explicit "no value" marker. `Value::None` and `Value::Str("")` are
//! different values and must stay different through every conversion.

use core::fmt;

use crate::errors::RuntimeError;

/// A value owned by the embedding runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// The runtime's "no value" marker (`None`).
    #[default]
    None,
    /// A runtime string.
    Str(String),
}

impl Value {
    /// Return true for the "no value" marker.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Borrow the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::None => None,
        }
    }

    /// Runtime type name, as a script would see it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Str(_) => "str",
        }
    }

    /// Render the value like Python's `repr()`: single quotes unless the text contains `'` and no `"`, with
    /// control characters escaped.
    pub fn repr(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Str(s) => {
                let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
                write!(f, "{quote}")?;
                for ch in s.chars() {
                    match ch {
                        c if c == quote => write!(f, "\\{c}")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "{quote}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

/// Convert a runtime value back into a Rust value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, RuntimeError>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, RuntimeError> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            other => Err(RuntimeError::TypeMismatch {
                expected: "str",
                found: other.type_name(),
            }),
        }
    }
}

impl FromValue for Option<String> {
    fn from_value(value: &Value) -> Result<Self, RuntimeError> {
        match value {
            Value::None => Ok(None),
            Value::Str(s) => Ok(Some(s.clone())),
        }
    }
}
