//! Native-to-runtime marshalling helpers.
//!
//! Native code hands text over as C strings. A missing handle (a null pointer on the native side) is `None` here and
//! becomes the runtime's `None`, never an empty string.

use core::ffi::CStr;

use crate::errors::RuntimeError;
use crate::value::Value;

/// Convert an optional native string into a runtime string, or `Value::None` when the handle is unset.
///
/// ## Errors
/// - `InvalidText` if the native bytes are not valid UTF-8.
pub fn string_or_none(text: Option<&CStr>) -> Result<Value, RuntimeError> {
    match text {
        None => Ok(Value::None),
        Some(text) => text
            .to_str()
            .map(Value::from)
            .map_err(|e| RuntimeError::InvalidText(e.to_string())),
    }
}
