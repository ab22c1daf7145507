//! Runtime error taxonomy.
//!
//! Every error renders with a Python-like exception prefix (`MemoryError: ...`, `KeyError: ...`) so messages read the
//! same way the embedding runtime would report them to a script.

use thiserror::Error;

/// Exception category a [`RuntimeError`] surfaces as inside the embedding runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MemoryError,
    TypeError,
    KeyError,
    IndexError,
    UnicodeDecodeError,
    RuntimeError,
}

impl ErrorKind {
    /// Canonical exception name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MemoryError => "MemoryError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::KeyError => "KeyError",
            ErrorKind::IndexError => "IndexError",
            ErrorKind::UnicodeDecodeError => "UnicodeDecodeError",
            ErrorKind::RuntimeError => "RuntimeError",
        }
    }
}

/// Errors raised by the runtime's type registry, allocator and value conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("MemoryError: cannot allocate {type_name} instance (allocation limit {limit} reached)")]
    AllocationFailed { type_name: String, limit: u64 },

    #[error("RuntimeError: cannot register type {type_name}: type registry is full ({limit} types)")]
    RegistryExhausted { type_name: String, limit: usize },

    #[error("RuntimeError: type {0} is already registered")]
    DuplicateType(String),

    #[error("TypeError: invalid schema for {type_name}: {reason}")]
    InvalidSchema { type_name: String, reason: String },

    #[error("KeyError: {type_name} has no field '{field}'")]
    UnknownField { type_name: String, field: String },

    #[error("RuntimeError: field '{field}' of {type_name} assigned twice")]
    FieldAlreadySet { type_name: String, field: String },

    #[error("RuntimeError: field '{field}' of {type_name} was never assigned")]
    MissingField { type_name: String, field: String },

    #[error("IndexError: {type_name} index {index} out of range")]
    IndexOutOfRange { type_name: String, index: isize },

    #[error("TypeError: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },

    #[error("TypeError: expected {expected} instance, found {found}")]
    WrongRecordType { expected: String, found: String },

    #[error("TypeError: type {0} is not registered with this runtime")]
    UnregisteredType(String),

    #[error("UnicodeDecodeError: {0}")]
    InvalidText(String),
}

impl RuntimeError {
    /// The exception category this error is raised as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::AllocationFailed { .. } => ErrorKind::MemoryError,
            RuntimeError::InvalidSchema { .. }
            | RuntimeError::TypeMismatch { .. }
            | RuntimeError::WrongRecordType { .. }
            | RuntimeError::UnregisteredType(_) => ErrorKind::TypeError,
            RuntimeError::UnknownField { .. } => ErrorKind::KeyError,
            RuntimeError::IndexOutOfRange { .. } => ErrorKind::IndexError,
            RuntimeError::InvalidText(_) => ErrorKind::UnicodeDecodeError,
            RuntimeError::RegistryExhausted { .. }
            | RuntimeError::DuplicateType(_)
            | RuntimeError::FieldAlreadySet { .. }
            | RuntimeError::MissingField { .. } => ErrorKind::RuntimeError,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rendered_message_starts_with_kind() {
        let errors = [
            RuntimeError::AllocationFailed {
                type_name: "gcc.Version".to_string(),
                limit: 4,
            },
            RuntimeError::DuplicateType("gcc.Version".to_string()),
            RuntimeError::UnknownField {
                type_name: "gcc.Version".to_string(),
                field: "major".to_string(),
            },
            RuntimeError::IndexOutOfRange {
                type_name: "gcc.Version".to_string(),
                index: 7,
            },
            RuntimeError::TypeMismatch {
                expected: "str",
                found: "NoneType",
            },
            RuntimeError::InvalidText("invalid utf-8 sequence".to_string()),
        ];

        for err in errors {
            let rendered = err.to_string();
            assert!(
                rendered.starts_with(&format!("{}: ", err.kind().as_str())),
                "unexpected prefix in {rendered:?}"
            );
        }
    }

    #[test]
    fn allocation_failure_is_memory_error() {
        let err = RuntimeError::AllocationFailed {
            type_name: "gcc.Version".to_string(),
            limit: 0,
        };
        assert_eq!(err.kind(), ErrorKind::MemoryError);
        assert_eq!(
            err.to_string(),
            "MemoryError: cannot allocate gcc.Version instance (allocation limit 0 reached)"
        );
    }
}
