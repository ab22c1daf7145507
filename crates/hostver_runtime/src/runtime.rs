//! The runtime's type registry and record allocator.
//!
//! Types are registered once during startup (`&mut Runtime`); afterwards the runtime is only read, so records can
//! be allocated from several threads through a shared `&Runtime`.

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::RuntimeError;
use crate::record::{ObjectId, RecordBuilder};
use crate::schema::RecordSchema;

/// Fault-injection limits for a [`Runtime`].
///
/// Both default to unlimited. They are counters, not a memory budget: nothing is given back when a record is
/// dropped. Their purpose is to drive the registration and allocation failure paths in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    max_types: Option<usize>,
    max_allocations: Option<u64>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of record types that can be registered.
    pub fn with_max_types(mut self, max_types: usize) -> Self {
        self.max_types = Some(max_types);
        self
    }

    /// Fail every `new_record` call after the first `max_allocations` over the runtime's lifetime. A call that
    /// succeeds counts even if the record is never finished.
    pub fn with_max_allocations(mut self, max_allocations: u64) -> Self {
        self.max_allocations = Some(max_allocations);
        self
    }
}

#[derive(Debug)]
struct RecordType {
    id: u32,
    schema: RecordSchema,
}

/// Handle to a registered record type.
///
/// Handles compare by identity: two handles are equal only if they refer to the same registration.
#[derive(Debug, Clone)]
pub struct TypeHandle(Arc<RecordType>);

impl TypeHandle {
    /// Fully qualified type name (e.g. `gcc.Version`).
    pub fn name(&self) -> &'static str {
        self.0.schema.name()
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.0.schema
    }

    /// Ordered field names.
    pub fn fields(&self) -> &[&'static str] {
        self.0.schema.fields()
    }

    pub fn doc(&self) -> Option<&'static str> {
        self.0.schema.doc()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
        self.0.schema.name().hash(state);
    }
}

/// The embedding runtime: owns registered record types and hands out record instances.
#[derive(Debug, Default)]
pub struct Runtime {
    config: RuntimeConfig,
    types: Vec<TypeHandle>,
    allocated: AtomicU64,
}

impl Runtime {
    /// Create a runtime without resource limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Register a record type.
    ///
    /// ## Errors
    /// - `InvalidSchema` if the schema fails validation.
    /// - `DuplicateType` if a type with the same name is already registered.
    /// - `RegistryExhausted` if the configured type limit has been reached.
    pub fn register_type(&mut self, schema: RecordSchema) -> Result<TypeHandle, RuntimeError> {
        schema.validate()?;

        if self.lookup_type(schema.name()).is_some() {
            return Err(RuntimeError::DuplicateType(schema.name().to_string()));
        }
        if let Some(limit) = self.config.max_types {
            if self.types.len() >= limit {
                return Err(RuntimeError::RegistryExhausted {
                    type_name: schema.name().to_string(),
                    limit,
                });
            }
        }

        let id = u32::try_from(self.types.len()).map_err(|_| RuntimeError::RegistryExhausted {
            type_name: schema.name().to_string(),
            limit: self.types.len(),
        })?;
        let handle = TypeHandle(Arc::new(RecordType { id, schema }));
        self.types.push(handle.clone());
        Ok(handle)
    }

    /// Find a registered type by its fully qualified name.
    pub fn lookup_type(&self, name: &str) -> Option<&TypeHandle> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// Registered types, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeHandle> {
        self.types.iter()
    }

    /// Allocate a new, unfilled instance of `ty`.
    ///
    /// ## Errors
    /// - `UnregisteredType` if `ty` was registered with a different runtime.
    /// - `AllocationFailed` if the configured allocation limit has been reached.
    pub fn new_record(&self, ty: &TypeHandle) -> Result<RecordBuilder, RuntimeError> {
        if !self.types.contains(ty) {
            return Err(RuntimeError::UnregisteredType(ty.name().to_string()));
        }

        let limit = self.config.max_allocations;
        let previous = self
            .allocated
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| match limit {
                Some(max) if n >= max => None,
                _ => n.checked_add(1),
            })
            .map_err(|_| RuntimeError::AllocationFailed {
                type_name: ty.name().to_string(),
                limit: limit.unwrap_or(u64::MAX),
            })?;

        Ok(RecordBuilder::new(ObjectId::new(previous + 1), ty.clone()))
    }

    /// Number of successful `new_record` calls so far.
    pub fn allocated_objects(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }
}
