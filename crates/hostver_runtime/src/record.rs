//! Record instances: immutable named tuples of runtime values.
//!
//! Records are only created through [`Runtime::new_record`](crate::Runtime::new_record), which returns a
//! [`RecordBuilder`]. The builder fills slots **by field name**; `finish()` refuses to produce a record with an
//! unassigned slot, so a record can never be observed half-filled.

use core::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::RuntimeError;
use crate::runtime::TypeHandle;
use crate::value::Value;

/// Identity of an allocated record.
///
/// Every call to `Runtime::new_record` yields a fresh id. Cloning a [`Record`] keeps its id: a clone is another
/// reference to the same immutable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// A freshly allocated record whose slots are being filled.
#[derive(Debug)]
pub struct RecordBuilder {
    id: ObjectId,
    ty: TypeHandle,
    slots: Vec<Option<Value>>,
}

impl RecordBuilder {
    pub(crate) fn new(id: ObjectId, ty: TypeHandle) -> Self {
        let slots = vec![None; ty.fields().len()];
        Self { id, ty, slots }
    }

    /// Assign a field by name.
    ///
    /// ## Errors
    /// - `UnknownField` if the record type has no such field.
    /// - `FieldAlreadySet` if the field was already assigned on this builder.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<&mut Self, RuntimeError> {
        let index = self
            .ty
            .schema()
            .field_index(field)
            .ok_or_else(|| RuntimeError::UnknownField {
                type_name: self.ty.name().to_string(),
                field: field.to_string(),
            })?;

        let slot = &mut self.slots[index];
        if slot.is_some() {
            return Err(RuntimeError::FieldAlreadySet {
                type_name: self.ty.name().to_string(),
                field: field.to_string(),
            });
        }
        *slot = Some(value.into());
        Ok(self)
    }

    /// Seal the record.
    ///
    /// ## Errors
    /// - `MissingField` naming the first field (in schema order) that was never assigned.
    pub fn finish(self) -> Result<Record, RuntimeError> {
        let fields = self.ty.fields();
        let values = self
            .slots
            .into_iter()
            .zip(fields)
            .map(|(slot, field)| {
                slot.ok_or_else(|| RuntimeError::MissingField {
                    type_name: self.ty.name().to_string(),
                    field: field.to_string(),
                })
            })
            .collect::<Result<Box<[Value]>, _>>()?;

        Ok(Record {
            id: self.id,
            ty: self.ty,
            values,
        })
    }
}

/// An immutable record instance.
///
/// ## Notes
/// - Equality and hashing are structural (type + values), like a tuple; use [`Record::is_same`] for identity.
/// - `Display` renders the runtime `repr()`: `gcc.Version(base_version='12.2.0', revision=None, ...)`.
#[derive(Debug, Clone)]
pub struct Record {
    id: ObjectId,
    ty: TypeHandle,
    values: Box<[Value]>,
}

impl Record {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// True if both records are the same allocated object.
    pub fn is_same(&self, other: &Record) -> bool {
        self.id == other.id && self.ty == other.ty
    }

    pub fn record_type(&self) -> &TypeHandle {
        &self.ty
    }

    /// `isinstance`-style check against a registered type.
    pub fn is_instance(&self, ty: &TypeHandle) -> bool {
        self.ty == *ty
    }

    /// Number of positional slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look a field up by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.ty.schema().field_index(field).map(|i| &self.values[i])
    }

    /// Look a field up by name, raising `KeyError` if the type has no such field.
    pub fn require(&self, field: &str) -> Result<&Value, RuntimeError> {
        self.get(field).ok_or_else(|| RuntimeError::UnknownField {
            type_name: self.ty.name().to_string(),
            field: field.to_string(),
        })
    }

    /// Positional access with tuple semantics: negative indices count from the end.
    pub fn get_index(&self, index: isize) -> Result<&Value, RuntimeError> {
        let len = self.values.len() as isize;
        let resolved = if index < 0 { index + len } else { index };
        if (0..len).contains(&resolved) {
            Ok(&self.values[resolved as usize])
        } else {
            Err(RuntimeError::IndexOutOfRange {
                type_name: self.ty.name().to_string(),
                index,
            })
        }
    }

    /// All values, in positional order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// `(field name, value)` pairs, in positional order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.ty.fields().iter().copied().zip(self.values.iter())
    }

    /// Render the runtime `repr()` of this record.
    pub fn repr(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.values == other.values
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        self.values.hash(state);
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ty.name())?;
        for (i, (field, value)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::schema::RecordSchema;

    fn setup() -> (Runtime, TypeHandle) {
        let mut rt = Runtime::new();
        let ty = rt
            .register_type(RecordSchema::new("demo.Pair", ["first", "second"]))
            .unwrap();
        (rt, ty)
    }

    fn pair(rt: &Runtime, ty: &TypeHandle, first: &str, second: Option<&str>) -> Record {
        let mut builder = rt.new_record(ty).unwrap();
        builder.set("second", second).unwrap().set("first", first).unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn fields_land_in_schema_order_regardless_of_assignment_order() {
        let (rt, ty) = setup();
        let record = pair(&rt, &ty, "a", None);
        assert_eq!(record.values(), &[Value::from("a"), Value::None]);
        assert_eq!(record.get("first"), Some(&Value::from("a")));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn builder_rejects_unknown_duplicate_and_missing_fields() {
        let (rt, ty) = setup();

        let mut builder = rt.new_record(&ty).unwrap();
        assert!(matches!(
            builder.set("third", "x").unwrap_err(),
            RuntimeError::UnknownField { .. }
        ));
        builder.set("first", "x").unwrap();
        assert!(matches!(
            builder.set("first", "y").unwrap_err(),
            RuntimeError::FieldAlreadySet { .. }
        ));

        let err = builder.finish().unwrap_err();
        assert_eq!(
            err,
            RuntimeError::MissingField {
                type_name: "demo.Pair".to_string(),
                field: "second".to_string(),
            }
        );
    }

    #[test]
    fn equality_is_structural_identity_is_not() {
        let (rt, ty) = setup();
        let a = pair(&rt, &ty, "x", Some("y"));
        let b = pair(&rt, &ty, "x", Some("y"));

        assert_eq!(a, b);
        assert!(!a.is_same(&b));
        assert!(a.is_same(&a.clone()));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let (rt, ty) = setup();
        let record = pair(&rt, &ty, "x", Some("y"));

        assert_eq!(record.get_index(0).unwrap(), &Value::from("x"));
        assert_eq!(record.get_index(-1).unwrap(), &Value::from("y"));
        assert!(record.get_index(2).is_err());
        assert!(record.get_index(-3).is_err());
    }

    #[test]
    fn display_renders_repr() {
        let (rt, ty) = setup();
        let record = pair(&rt, &ty, "x", None);
        assert_eq!(record.to_string(), "demo.Pair(first='x', second=None)");
    }
}
