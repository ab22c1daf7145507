//! Version queries: convert a native version struct into a fresh `gcc.Version` record.
//!
//! Every query allocates a new record; two calls never share an instance, even when their sources hold identical
//! values. Queries never mutate the record type or either source.

use std::sync::OnceLock;

use hostver_runtime::marshal::string_or_none;
use hostver_runtime::{Record, Runtime};

use crate::errors::VersionError;
use crate::native::{COMPILED_VERSION, PluginVersion};
use crate::version::VersionRecordType;

/// Build a `gcc.Version` record from a native version struct.
///
/// Each field is assigned by name: the marshalled string, or `None` when the native handle is unset.
///
/// ## Errors
/// - `RuntimeError::AllocationFailed` if the runtime cannot allocate another record.
/// - `RuntimeError::InvalidText` if a native string is not valid UTF-8.
pub fn to_record(
    runtime: &Runtime,
    version_type: &VersionRecordType,
    source: &PluginVersion<'_>,
) -> Result<Record, VersionError> {
    let mut record = runtime.new_record(version_type.handle())?;
    record
        .set("base_version", string_or_none(source.basever)?)?
        .set("date_stamp", string_or_none(source.datestamp)?)?
        .set("development_phase", string_or_none(source.devphase)?)?
        .set("revision", string_or_none(source.revision)?)?
        .set("configuration_arguments", string_or_none(source.configuration_arguments)?)?;
    Ok(record.finish()?)
}

/// Answers the two version queries.
///
/// The compiled-in version is fixed when the accessor is built. The active version is supplied exactly once by the
/// host's initialization sequence and only borrowed afterwards, so the accessor can be shared across threads.
#[derive(Debug)]
pub struct VersionAccessor<'h> {
    version_type: VersionRecordType,
    compiled: PluginVersion<'static>,
    active: OnceLock<PluginVersion<'h>>,
}

impl<'h> VersionAccessor<'h> {
    /// Accessor over the version this binding was built against.
    pub fn new(version_type: VersionRecordType) -> Self {
        Self::with_compiled(version_type, COMPILED_VERSION)
    }

    /// Accessor over an explicit compiled-in version.
    pub fn with_compiled(version_type: VersionRecordType, compiled: PluginVersion<'static>) -> Self {
        Self {
            version_type,
            compiled,
            active: OnceLock::new(),
        }
    }

    pub fn version_type(&self) -> &VersionRecordType {
        &self.version_type
    }

    pub fn compiled_version(&self) -> &PluginVersion<'static> {
        &self.compiled
    }

    /// The active version, once the host has supplied it.
    pub fn active_version(&self) -> Option<&PluginVersion<'h>> {
        self.active.get()
    }

    /// Store the version of the running compiler. Can only happen once.
    ///
    /// ## Errors
    /// - `ActiveVersionAlreadySet` on any call after the first.
    pub fn set_active_version(&self, version: PluginVersion<'h>) -> Result<(), VersionError> {
        self.active
            .set(version)
            .map_err(|_| VersionError::ActiveVersionAlreadySet)
    }

    /// Record for the version the binding was compiled against.
    pub fn query_compiled_version(&self, runtime: &Runtime) -> Result<Record, VersionError> {
        to_record(runtime, &self.version_type, &self.compiled)
    }

    /// Record for the version of the compiler currently running.
    ///
    /// ## Errors
    /// - `ActiveVersionUnset` if called before [`set_active_version`](Self::set_active_version).
    pub fn query_active_version(&self, runtime: &Runtime) -> Result<Record, VersionError> {
        let active = self.active.get().ok_or(VersionError::ActiveVersionUnset)?;
        to_record(runtime, &self.version_type, active)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hostver_runtime::{RuntimeConfig, RuntimeError, Value};

    const RELEASE_13: PluginVersion<'static> = PluginVersion {
        basever: Some(c"13.0.0"),
        datestamp: Some(c"20230101"),
        devphase: Some(c"release"),
        revision: None,
        configuration_arguments: Some(c"--enable-languages=c"),
    };

    fn setup() -> (Runtime, VersionRecordType) {
        let mut rt = Runtime::new();
        let ty = VersionRecordType::initialize(&mut rt).unwrap();
        (rt, ty)
    }

    #[test]
    fn to_record_fills_every_field() {
        let (rt, ty) = setup();
        let record = to_record(&rt, &ty, &RELEASE_13).unwrap();

        assert_eq!(
            record.values(),
            &[
                Value::from("13.0.0"),
                Value::from("20230101"),
                Value::from("release"),
                Value::None,
                Value::from("--enable-languages=c"),
            ]
        );
    }

    #[test]
    fn to_record_propagates_allocation_failure() {
        let mut rt = Runtime::with_config(RuntimeConfig::new().with_max_allocations(0));
        let ty = VersionRecordType::initialize(&mut rt).unwrap();

        let err = to_record(&rt, &ty, &RELEASE_13).unwrap_err();
        assert!(matches!(
            err,
            VersionError::Runtime(RuntimeError::AllocationFailed { limit: 0, .. })
        ));
    }

    #[test]
    fn active_query_before_initialization_is_checked() {
        let (rt, ty) = setup();
        let accessor = VersionAccessor::with_compiled(ty, RELEASE_13);

        assert_eq!(
            accessor.query_active_version(&rt).unwrap_err(),
            VersionError::ActiveVersionUnset
        );
        assert_eq!(rt.allocated_objects(), 0);
    }

    #[test]
    fn active_version_is_set_once() {
        let (rt, ty) = setup();
        let accessor = VersionAccessor::with_compiled(ty, RELEASE_13);

        accessor.set_active_version(RELEASE_13).unwrap();
        assert_eq!(
            accessor.set_active_version(PluginVersion::default()).unwrap_err(),
            VersionError::ActiveVersionAlreadySet
        );
        assert_eq!(accessor.active_version(), Some(&RELEASE_13));
        assert!(accessor.query_active_version(&rt).is_ok());
    }

    #[test]
    fn default_accessor_reports_build_constant() {
        let (rt, ty) = setup();
        let accessor = VersionAccessor::new(ty);
        assert_eq!(accessor.compiled_version(), &COMPILED_VERSION);
        assert!(accessor.query_compiled_version(&rt).is_ok());
    }
}
