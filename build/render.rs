// Included by `build.rs` and by the unit tests in `src/native.rs`: items only, no inner attributes.

/// Rust source for one `PluginVersion` field: `None` for an unset variable, a C-string literal otherwise.
fn field_literal(value: Option<&str>) -> Result<String, String> {
    match value {
        None => Ok("None".to_string()),
        Some(text) if text.contains('\0') => Err("must not contain NUL bytes".to_string()),
        Some(text) => Ok(format!("Some(c{text:?})")),
    }
}

/// Rust source for the `COMPILED_VERSION` static, fields in host struct order.
fn render_compiled_version(fields: &[(&str, Option<&str>)]) -> Result<String, String> {
    let mut generated = String::from("pub static COMPILED_VERSION: PluginVersion<'static> = PluginVersion {\n");
    for (field, value) in fields {
        let literal = field_literal(*value).map_err(|reason| format!("{field} {reason}"))?;
        generated.push_str(&format!("    {field}: {literal},\n"));
    }
    generated.push_str("};\n");
    Ok(generated)
}
