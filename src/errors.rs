//! Errors surfaced by the version subsystem.

use hostver_runtime::RuntimeError;
use thiserror::Error;

/// Errors returned by version record registration and the version queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The runtime refused to register `gcc.Version`. Fatal for plugin initialization.
    #[error("RuntimeError: failed to register gcc.Version ({0})")]
    Registration(#[source] RuntimeError),

    /// Allocation, marshalling or conversion failure inside the runtime.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// `get_gcc_version` was called before the startup sequence supplied the running compiler's version.
    #[error("RuntimeError: active compiler version queried before plugin initialization supplied it")]
    ActiveVersionUnset,

    /// The running compiler's version can only be supplied once.
    #[error("RuntimeError: active compiler version was already supplied")]
    ActiveVersionAlreadySet,

    /// A script called a function the `gcc` module does not expose.
    #[error("AttributeError: module 'gcc' has no function '{0}'")]
    UnknownFunction(String),
}
