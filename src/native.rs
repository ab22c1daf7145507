//! Native version sources.
//!
//! The host describes its build identity with a struct of five optional C strings. [`PluginVersion`] is the borrowed
//! view of that struct; a missing handle is `None`, which is not the same thing as an empty string.
//!
//! ## Notes
//! - [`COMPILED_VERSION`] is generated by `build.rs` from the `HOSTVER_PLUGIN_*` variables present when the binding
//!   was built.
//! - The active version is owned by the host and only borrowed here, see [`crate::accessor::VersionAccessor`].

use std::ffi::{CStr, CString, NulError};

/// The host's version struct, field for field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PluginVersion<'a> {
    /// Numeric release version (e.g. `12.2.0`).
    pub basever: Option<&'a CStr>,
    /// Snapshot/build date identifier.
    pub datestamp: Option<&'a CStr>,
    /// Release phase label (`experimental`, `prerelease`, or empty for a release).
    pub devphase: Option<&'a CStr>,
    /// VCS revision identifier.
    pub revision: Option<&'a CStr>,
    /// Flags the host compiler was configured with.
    pub configuration_arguments: Option<&'a CStr>,
}

include!(concat!(env!("OUT_DIR"), "/plugin_version.rs"));

/// An owned version struct, for hosts (and tools) that assemble the version at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedPluginVersion {
    pub basever: Option<CString>,
    pub datestamp: Option<CString>,
    pub devphase: Option<CString>,
    pub revision: Option<CString>,
    pub configuration_arguments: Option<CString>,
}

impl OwnedPluginVersion {
    /// Borrow as the native struct the accessor consumes.
    pub fn as_native(&self) -> PluginVersion<'_> {
        PluginVersion {
            basever: self.basever.as_deref(),
            datestamp: self.datestamp.as_deref(),
            devphase: self.devphase.as_deref(),
            revision: self.revision.as_deref(),
            configuration_arguments: self.configuration_arguments.as_deref(),
        }
    }
}

/// Convert optional text into an optional native string, keeping `None` distinct from `""`.
///
/// ## Errors
/// - `NulError` if the text contains an interior NUL byte.
pub fn native_text(text: Option<&str>) -> Result<Option<CString>, NulError> {
    text.map(CString::new).transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn as_str(field: Option<&CStr>) -> Option<&str> {
        field.map(|c| c.to_str().unwrap())
    }

    #[test]
    fn compiled_version_matches_build_environment() {
        assert_eq!(as_str(COMPILED_VERSION.basever), option_env!("HOSTVER_PLUGIN_BASEVER"));
        assert_eq!(as_str(COMPILED_VERSION.datestamp), option_env!("HOSTVER_PLUGIN_DATESTAMP"));
        assert_eq!(as_str(COMPILED_VERSION.devphase), option_env!("HOSTVER_PLUGIN_DEVPHASE"));
        assert_eq!(as_str(COMPILED_VERSION.revision), option_env!("HOSTVER_PLUGIN_REVISION"));
        assert_eq!(
            as_str(COMPILED_VERSION.configuration_arguments),
            option_env!("HOSTVER_PLUGIN_CONFIGURATION_ARGUMENTS")
        );
    }

    mod generated_source {
        include!("../build/render.rs");

        #[test]
        fn unset_variable_is_absent_field() {
            assert_eq!(field_literal(None).unwrap(), "None");
        }

        #[test]
        fn empty_variable_is_empty_string() {
            assert_eq!(field_literal(Some("")).unwrap(), r#"Some(c"")"#);
        }

        #[test]
        fn quotes_backslashes_and_non_ascii_survive() {
            let arguments = "--with-pkgversion='a \"b\" \\ é\t{x}'";
            assert_eq!(
                field_literal(Some(arguments)).unwrap(),
                r#"Some(c"--with-pkgversion='a \"b\" \\ é\t{x}'")"#
            );
            // The rendered literal, compiled, yields the original bytes.
            assert_eq!(c"--with-pkgversion='a \"b\" \\ é\t{x}'".to_str().unwrap(), arguments);
        }

        #[test]
        fn interior_nul_is_rejected() {
            assert!(field_literal(Some("a\0b")).is_err());
            let err = render_compiled_version(&[("revision", Some("a\0b"))]).unwrap_err();
            assert!(err.starts_with("revision "));
        }

        #[test]
        fn static_lists_fields_in_order() {
            let fields = [("basever", Some("13.0.0")), ("revision", Some("")), ("devphase", None)];
            let source = render_compiled_version(&fields).unwrap();
            assert_eq!(
                source,
                "pub static COMPILED_VERSION: PluginVersion<'static> = PluginVersion {\n    basever: Some(c\"13.0.0\"),\n    \
                 revision: Some(c\"\"),\n    devphase: None,\n};\n"
            );
        }
    }

    #[test]
    fn owned_version_borrows_every_field() {
        let owned = OwnedPluginVersion {
            basever: native_text(Some("13.0.0")).unwrap(),
            revision: native_text(Some("")).unwrap(),
            ..OwnedPluginVersion::default()
        };
        let native = owned.as_native();

        assert_eq!(native.basever, Some(c"13.0.0"));
        assert_eq!(native.revision, Some(c""));
        assert_eq!(native.datestamp, None);
    }

    #[test]
    fn native_text_rejects_interior_nul() {
        assert!(native_text(Some("a\0b")).is_err());
        assert_eq!(native_text(None).unwrap(), None);
    }
}
