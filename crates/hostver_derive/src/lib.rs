//! Derive macros for typed hostver records.
//!
//! These macros connect plain Rust structs to the runtime's record model:
//! - `FieldInfo`: Generates `hostver_runtime::FieldInfo` (ordered field names and types)
//! - `RecordValue`: Generates `hostver_runtime::RecordValue` (named destructuring of a `Record`)
//!
//! Both only accept structs with named fields, since record schemas are keyed by field name.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, FieldsNamed, parse_macro_input};

/// Extract the named fields of a struct, or a spanned error explaining why the input is unsupported.
fn named_fields<'a>(input: &'a DeriveInput, derive: &str) -> Result<&'a FieldsNamed, syn::Error> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                format!("#[derive({derive})] requires a struct with named fields"),
            )),
        },
        _ => Err(syn::Error::new(
            Span::call_site(),
            format!("#[derive({derive})] can only be used on structs"),
        )),
    }
}

/// Generates the `FieldInfo` trait implementation for reflection.
///
/// Field order follows declaration order, which is also the positional order of the record schema
/// built from it.
///
/// # Example
/// ```ignore
/// #[derive(FieldInfo)]
/// struct Version {
///     base_version: Option<String>,
///     revision: Option<String>,
/// }
///
/// // Generates:
/// impl FieldInfo for Version {
///     fn field_names() -> Vec<&'static str> { vec!["base_version", "revision"] }
///     fn field_types() -> Vec<&'static str> { vec!["Option < String >", "Option < String >"] }
/// }
/// ```
#[proc_macro_derive(FieldInfo)]
pub fn derive_field_info(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let fields = match named_fields(&input, "FieldInfo") {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };
    let name = &input.ident;

    let (field_names, field_types): (Vec<String>, Vec<String>) = fields
        .named
        .iter()
        .filter_map(|f| {
            let field_name = f.ident.as_ref()?.to_string();
            let ty = &f.ty;
            Some((field_name, quote!(#ty).to_string()))
        })
        .unzip();

    let expanded = quote! {
        impl ::hostver_runtime::FieldInfo for #name {
            fn field_names() -> Vec<&'static str> {
                vec![#(#field_names),*]
            }

            fn field_types() -> Vec<&'static str> {
                vec![#(#field_types),*]
            }
        }
    };

    TokenStream::from(expanded)
}

/// Generates the `RecordValue` trait implementation: build `Self` from a runtime `Record` by
/// looking every field up by name.
///
/// Each field type must implement `hostver_runtime::value::FromValue`.
///
/// # Example
/// ```ignore
/// #[derive(RecordValue)]
/// struct Version {
///     base_version: Option<String>,
/// }
///
/// // Generates:
/// impl RecordValue for Version {
///     fn from_record(record: &Record) -> Result<Self, RuntimeError> {
///         Ok(Self { base_version: FromValue::from_value(record.require("base_version")?)? })
///     }
/// }
/// ```
#[proc_macro_derive(RecordValue)]
pub fn derive_record_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let fields = match named_fields(&input, "RecordValue") {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };
    let name = &input.ident;

    let assignments = fields.named.iter().filter_map(|f| {
        let ident = f.ident.as_ref()?;
        let key = ident.to_string();
        Some(quote! {
            #ident: ::hostver_runtime::value::FromValue::from_value(record.require(#key)?)?
        })
    });

    let expanded = quote! {
        impl ::hostver_runtime::RecordValue for #name {
            fn from_record(
                record: &::hostver_runtime::Record,
            ) -> ::core::result::Result<Self, ::hostver_runtime::RuntimeError> {
                ::core::result::Result::Ok(Self {
                    #(#assignments),*
                })
            }
        }
    };

    TokenStream::from(expanded)
}
