//! Bake the compiled-in host compiler version into the binding.
//!
//! The host's build identity is read from `HOSTVER_PLUGIN_*` environment variables at build time and written to
//! `$OUT_DIR/plugin_version.rs` as a `PluginVersion<'static>` constant. An unset variable produces an absent field;
//! a variable set to the empty string produces an empty field.

use std::env;
use std::fs;
use std::path::PathBuf;

include!("build/render.rs");

/// Native field name and the variable it is read from, in host struct order.
const FIELDS: [(&str, &str); 5] = [
    ("basever", "HOSTVER_PLUGIN_BASEVER"),
    ("datestamp", "HOSTVER_PLUGIN_DATESTAMP"),
    ("devphase", "HOSTVER_PLUGIN_DEVPHASE"),
    ("revision", "HOSTVER_PLUGIN_REVISION"),
    ("configuration_arguments", "HOSTVER_PLUGIN_CONFIGURATION_ARGUMENTS"),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build/render.rs");

    let values: Vec<(&str, Option<String>)> = FIELDS
        .iter()
        .map(|&(field, var)| {
            println!("cargo:rerun-if-env-changed={var}");
            match env::var(var) {
                Ok(value) => (field, Some(value)),
                Err(env::VarError::NotPresent) => (field, None),
                Err(env::VarError::NotUnicode(_)) => panic!("{var} is not valid UTF-8"),
            }
        })
        .collect();
    let fields: Vec<(&str, Option<&str>)> = values.iter().map(|(field, value)| (*field, value.as_deref())).collect();

    let generated = render_compiled_version(&fields).unwrap_or_else(|err| panic!("HOSTVER_PLUGIN_* {err}"));
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts"));
    fs::write(out_dir.join("plugin_version.rs"), generated).expect("failed to write plugin_version.rs");
}
