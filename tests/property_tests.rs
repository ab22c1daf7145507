//! Property-based tests for version record conversion
//!
//! These tests use proptest to check that absence and emptiness survive the native-to-record conversion for
//! arbitrary field contents.

use hostver::native::native_text;
use hostver::{OwnedPluginVersion, VersionRecord, VersionRecordType, to_record};
use hostver_runtime::{Runtime, Value};
use proptest::prelude::*;

/// Optional text without NUL bytes, biased towards the interesting cases (absent, empty).
fn field_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "\\PC{0,24}".prop_map(Some),
    ]
}

proptest! {
    /// Property: every field of the record reflects its native field exactly, with `None` for unset handles.
    #[test]
    fn record_fields_mirror_native_fields(
        basever in field_strategy(),
        datestamp in field_strategy(),
        devphase in field_strategy(),
        revision in field_strategy(),
        configuration_arguments in field_strategy(),
    ) {
        let owned = OwnedPluginVersion {
            basever: native_text(basever.as_deref()).unwrap(),
            datestamp: native_text(datestamp.as_deref()).unwrap(),
            devphase: native_text(devphase.as_deref()).unwrap(),
            revision: native_text(revision.as_deref()).unwrap(),
            configuration_arguments: native_text(configuration_arguments.as_deref()).unwrap(),
        };

        let mut rt = Runtime::new();
        let ty = VersionRecordType::initialize(&mut rt).unwrap();
        let record = to_record(&rt, &ty, &owned.as_native()).unwrap();

        prop_assert_eq!(record.get("revision"), Some(&Value::from(revision.clone())));
        prop_assert_eq!(
            ty.unpack(&record).unwrap(),
            VersionRecord {
                base_version: basever,
                date_stamp: datestamp,
                development_phase: devphase,
                revision,
                configuration_arguments,
            }
        );
    }
}
