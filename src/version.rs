//! The `gcc.Version` record type.
//!
//! [`VersionRecord`] is the typed view of a version record; its field declaration order *is* the record schema, so
//! positional access in the runtime always yields
//! `(base_version, date_stamp, development_phase, revision, configuration_arguments)`.

use hostver_runtime::prelude::*;

use crate::errors::VersionError;

/// Fully qualified name of the record type inside the embedding runtime.
pub const VERSION_TYPE_NAME: &str = "gcc.Version";

const VERSION_TYPE_DOC: &str = "Build identity of a host compiler: release version, date stamp, development phase, \
                                VCS revision and configure arguments. Absent fields are None.";

/// Typed view of a `gcc.Version` record.
///
/// Every field is optional: `None` means the host did not record the value, `Some(String::new())` means it recorded
/// an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, DeriveFieldInfo, DeriveRecordValue)]
pub struct VersionRecord {
    pub base_version: Option<String>,
    pub date_stamp: Option<String>,
    pub development_phase: Option<String>,
    pub revision: Option<String>,
    pub configuration_arguments: Option<String>,
}

/// The registered `gcc.Version` type.
///
/// Obtained once per runtime through [`VersionRecordType::initialize`]; records can only be built after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecordType {
    handle: TypeHandle,
}

impl VersionRecordType {
    /// Register `gcc.Version` with the runtime.
    ///
    /// ## Errors
    /// - `VersionError::Registration` if the runtime refuses the type, including when it is already registered.
    ///   This is fatal for plugin initialization.
    pub fn initialize(runtime: &mut Runtime) -> Result<Self, VersionError> {
        let schema = RecordSchema::new(VERSION_TYPE_NAME, VersionRecord::field_names()).with_doc(VERSION_TYPE_DOC);
        let handle = runtime.register_type(schema).map_err(VersionError::Registration)?;
        Ok(Self { handle })
    }

    /// Runtime handle, for `isinstance`-style checks by embedding code.
    pub fn handle(&self) -> &TypeHandle {
        &self.handle
    }

    /// Field names in positional order.
    pub fn fields(&self) -> &[&'static str] {
        self.handle.fields()
    }

    pub fn is_instance(&self, record: &Record) -> bool {
        record.is_instance(&self.handle)
    }

    /// Destructure a `gcc.Version` record into its typed view.
    ///
    /// ## Errors
    /// - `RuntimeError::WrongRecordType` if `record` is an instance of another type.
    pub fn unpack(&self, record: &Record) -> Result<VersionRecord, VersionError> {
        if !self.is_instance(record) {
            return Err(RuntimeError::WrongRecordType {
                expected: VERSION_TYPE_NAME.to_string(),
                found: record.record_type().name().to_string(),
            }
            .into());
        }
        Ok(VersionRecord::from_record(record)?)
    }
}
