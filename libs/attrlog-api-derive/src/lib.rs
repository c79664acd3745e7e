use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro producing a group value from a struct's fields.
///
/// Generates `impl attrlog_api::resolve::LogValuer`, whose `log_value`
/// returns a group with one attribute per field, in declaration order.
/// Each field is cloned and converted with `Value::from`.
///
/// Field options:
///
/// - `#[log(skip)]` leaves the field out.
/// - `#[log(rename = "key")]` uses `key` instead of the field name.
/// - `#[log(nested)]` calls the field's own `LogValuer::log_value`.
///
/// # Example
///
/// ```ignore
/// #[derive(LogValue)]
/// pub struct Request {
///     pub method: String,
///     #[log(rename = "status_code")]
///     pub status: u16,
///     #[log(skip)]
///     pub body: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(LogValue, attributes(log))]
pub fn derive_log_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "LogValue only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "LogValue only supports structs",
            ));
        }
    };

    let mut attr_tokens = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;

        let mut key = field_name.to_string();
        let mut skip = false;
        let mut nested = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("log") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                } else if meta.path.is_ident("nested") {
                    nested = true;
                } else if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    key = value.value();
                } else {
                    return Err(meta.error("expected `skip`, `nested` or `rename = \"...\"`"));
                }
                Ok(())
            })?;
        }

        if skip {
            continue;
        }

        let value_expr = if nested {
            quote! { attrlog_api::resolve::LogValuer::log_value(&self.#field_name) }
        } else {
            quote! {
                attrlog_api::value::Value::from(::core::clone::Clone::clone(&self.#field_name))
            }
        };

        attr_tokens.push(quote! {
            attrlog_api::attr::Attr::new(#key, #value_expr)
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics attrlog_api::resolve::LogValuer for #name #ty_generics #where_clause {
            fn log_value(&self) -> attrlog_api::value::Value {
                attrlog_api::value::Value::group([
                    #(#attr_tokens),*
                ])
            }
        }
    })
}
