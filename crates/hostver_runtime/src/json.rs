//! JSON rendering of records.

use serde_json::{Map, Value as JsonValue};

use crate::record::Record;
use crate::value::Value;

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::None => JsonValue::Null,
        Value::Str(s) => JsonValue::String(s.clone()),
    }
}

/// Render a record as a JSON object keyed by field name; absent values become `null`.
pub fn record_to_json(record: &Record) -> JsonValue {
    let fields: Map<String, JsonValue> = record
        .fields()
        .map(|(name, value)| (name.to_string(), value_to_json(value)))
        .collect();
    JsonValue::Object(fields)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::schema::RecordSchema;

    #[test]
    fn absent_fields_render_as_null() {
        let mut rt = Runtime::new();
        let ty = rt
            .register_type(RecordSchema::new("demo.Pair", ["first", "second"]))
            .unwrap();
        let mut builder = rt.new_record(&ty).unwrap();
        builder.set("first", "").unwrap().set("second", None::<String>).unwrap();
        let record = builder.finish().unwrap();

        assert_eq!(
            record_to_json(&record),
            serde_json::json!({ "first": "", "second": null })
        );
    }
}
