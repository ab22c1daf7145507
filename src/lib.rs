#![forbid(unsafe_code)]
//! hostver: host compiler version records for an embedded scripting runtime
//!
//! A compiler plugin sees two version identities: the compiler release it was *built against* (baked in at build
//! time) and the compiler release it is *running inside* (handed over when the plugin loads). This crate exposes
//! both to the embedding runtime as immutable `gcc.Version` records.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Library modules deny
//!   `clippy::unwrap_used`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

#![deny(clippy::unwrap_used)]

pub mod accessor;
pub mod cli;
pub mod errors;
pub mod native;
pub mod plugin;
pub mod version;

pub use accessor::{VersionAccessor, to_record};
pub use errors::VersionError;
pub use native::{COMPILED_VERSION, OwnedPluginVersion, PluginVersion};
pub use plugin::{FUNCTIONS, FunctionInfo, Plugin};
pub use version::{VERSION_TYPE_NAME, VersionRecord, VersionRecordType};
