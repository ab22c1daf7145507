//! Plugin startup and the functions exposed to scripts.
//!
//! [`Plugin::init`] is the one place the version subsystem is wired together: it registers `gcc.Version`, builds the
//! accessor and hands it the active compiler version. Everything after that is a read-only query.

use hostver_runtime::{Record, Runtime, TypeHandle, Value};

use crate::accessor::VersionAccessor;
use crate::errors::VersionError;
use crate::native::PluginVersion;
use crate::version::VersionRecordType;

/// A function exposed on the runtime's `gcc` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: &'static str,
    pub doc: &'static str,
}

/// Functions the plugin exposes, in registration order.
pub const FUNCTIONS: &[FunctionInfo] = &[
    FunctionInfo {
        name: "get_plugin_gcc_version",
        doc: "Get the gcc.Version that this plugin was compiled with",
    },
    FunctionInfo {
        name: "get_gcc_version",
        doc: "Get the gcc.Version for this version of GCC",
    },
];

/// The initialized plugin: runtime, record type and version accessor.
#[derive(Debug)]
pub struct Plugin<'h> {
    runtime: Runtime,
    accessor: VersionAccessor<'h>,
}

impl<'h> Plugin<'h> {
    /// Run the startup sequence with the version of the running compiler.
    ///
    /// ## Errors
    /// - `VersionError::Registration` if `gcc.Version` cannot be registered; the plugin must not load.
    #[tracing::instrument(skip_all)]
    pub fn init(runtime: Runtime, active: PluginVersion<'h>) -> Result<Self, VersionError> {
        Self::init_with(runtime, active, VersionAccessor::new)
    }

    /// Like [`Plugin::init`], but with an explicit compiled-in version.
    #[tracing::instrument(skip_all)]
    pub fn init_with_compiled(
        runtime: Runtime,
        active: PluginVersion<'h>,
        compiled: PluginVersion<'static>,
    ) -> Result<Self, VersionError> {
        Self::init_with(runtime, active, |ty| VersionAccessor::with_compiled(ty, compiled))
    }

    fn init_with(
        mut runtime: Runtime,
        active: PluginVersion<'h>,
        make_accessor: impl FnOnce(VersionRecordType) -> VersionAccessor<'h>,
    ) -> Result<Self, VersionError> {
        let version_type = VersionRecordType::initialize(&mut runtime).inspect_err(|err| {
            tracing::error!(error = %err, "version record type registration failed");
        })?;
        let accessor = make_accessor(version_type);
        accessor.set_active_version(active)?;

        tracing::debug!(
            type_name = accessor.version_type().handle().name(),
            functions = FUNCTIONS.len(),
            "version subsystem initialized"
        );
        Ok(Self { runtime, accessor })
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn accessor(&self) -> &VersionAccessor<'h> {
        &self.accessor
    }

    /// The `gcc.Version` type, for `isinstance` checks.
    pub fn version_type(&self) -> &TypeHandle {
        self.accessor.version_type().handle()
    }

    /// `gcc.get_plugin_gcc_version()`
    pub fn get_plugin_gcc_version(&self) -> Result<Record, VersionError> {
        self.accessor.query_compiled_version(&self.runtime)
    }

    /// `gcc.get_gcc_version()`
    pub fn get_gcc_version(&self) -> Result<Record, VersionError> {
        self.accessor.query_active_version(&self.runtime)
    }

    /// Call an exposed function by name. Arguments are accepted and ignored, as the script-facing functions take
    /// none.
    ///
    /// ## Errors
    /// - `UnknownFunction` for names not in [`FUNCTIONS`].
    pub fn call(&self, name: &str, _args: &[Value]) -> Result<Record, VersionError> {
        match name {
            "get_plugin_gcc_version" => self.get_plugin_gcc_version(),
            "get_gcc_version" => self.get_gcc_version(),
            other => Err(VersionError::UnknownFunction(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hostver_runtime::RuntimeConfig;

    #[test]
    fn call_dispatches_every_exposed_function() {
        let plugin = Plugin::init(Runtime::new(), PluginVersion::default()).unwrap();
        for function in FUNCTIONS {
            let record = plugin.call(function.name, &[]).unwrap();
            assert!(record.is_instance(plugin.version_type()));
        }
    }

    #[test]
    fn call_ignores_arguments() {
        let plugin = Plugin::init(Runtime::new(), PluginVersion::default()).unwrap();
        let with_args = plugin
            .call("get_gcc_version", &[Value::from("ignored"), Value::None])
            .unwrap();
        assert_eq!(with_args, plugin.get_gcc_version().unwrap());
    }

    #[test]
    fn unknown_function_is_reported() {
        let plugin = Plugin::init(Runtime::new(), PluginVersion::default()).unwrap();
        assert_eq!(
            plugin.call("get_gcc_versions", &[]).unwrap_err(),
            VersionError::UnknownFunction("get_gcc_versions".to_string())
        );
    }

    #[test]
    fn registration_failure_halts_init() {
        let runtime = Runtime::with_config(RuntimeConfig::new().with_max_types(0));
        let err = Plugin::init(runtime, PluginVersion::default()).unwrap_err();
        assert!(matches!(err, VersionError::Registration(_)));
    }
}
