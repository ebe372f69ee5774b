//! `#[derive(HeaderRecord)]` for the `header-bind` crate.
//!
//! Generates the per-field descriptor table from `#[header("...")]`
//! attributes:
//!
//! - `#[header("x-key")]` binds the field from `x-key`; the field type must
//!   implement `header_bind::HeaderField`.
//! - `#[header("-")]` excludes the field. Its type is unconstrained.
//! - Fields without the attribute are left alone.

#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, LitStr};

const EXCLUDE_MARKER: &str = "-";

/// Derives `header_bind::HeaderRecord` for a struct with named fields.
#[proc_macro_derive(HeaderRecord, attributes(header))]
pub fn derive_header_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "HeaderRecord can only be derived for structs with named fields",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "HeaderRecord cannot be derived for enums",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "HeaderRecord cannot be derived for unions",
            ));
        }
    };

    let bindings = fields
        .iter()
        .map(field_binding)
        .collect::<syn::Result<Vec<_>>>()?;

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::header_bind::HeaderRecord for #ident #ty_generics #where_clause {
            fn header_fields(&mut self) -> ::std::vec::Vec<::header_bind::FieldBinding<'_>> {
                ::std::vec![#(#bindings),*]
            }
        }
    })
}

enum Annotation {
    Key(LitStr),
    Excluded,
    Missing,
}

fn annotation(field: &Field) -> syn::Result<Annotation> {
    let mut key: Option<LitStr> = None;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("header")) {
        if key.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "a field takes at most one `header` attribute",
            ));
        }
        key = Some(attr.parse_args::<LitStr>()?);
    }

    Ok(match key {
        Some(key) if key.value() == EXCLUDE_MARKER => Annotation::Excluded,
        Some(key) => Annotation::Key(key),
        None => Annotation::Missing,
    })
}

fn field_binding(field: &Field) -> syn::Result<TokenStream2> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let name = LitStr::new(&ident.unraw().to_string(), ident.span());

    Ok(match annotation(field)? {
        Annotation::Key(key) => quote! {
            ::header_bind::FieldBinding::keyed(
                #name,
                #key,
                ::header_bind::HeaderField::header_slot(&mut self.#ident),
            )
        },
        Annotation::Excluded => quote! {
            ::header_bind::FieldBinding::excluded(#name)
        },
        Annotation::Missing => quote! {
            ::header_bind::FieldBinding::unannotated(#name)
        },
    })
}
