//! Derive macros for resource-access.
//!
//! This crate provides `#[derive(Resource)]`, which implements the
//! `resource_access::Resource` trait from a struct's fields.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! resource-access = { version = "0.1", features = ["derive"] }
//! ```
//!
//! ## Examples
//!
//! ```rust,ignore
//! use resource_access::Resource;
//!
//! #[derive(Resource)]
//! #[resource(path = "post", session, functions("like", "report"))]
//! struct Post {
//!     #[resource(id)]
//!     id: i64,
//!     text: String,
//!     #[resource(rename = "likeCount")]
//!     like_count: i64,
//!     #[resource(relationship)]
//!     author: Option<i64>,
//!     #[resource(to_many, rename = "likedBy")]
//!     liked_by: Vec<i64>,
//!     #[resource(skip)]
//!     cached_html: Option<String>,
//! }
//!
//! let descriptor = Post::descriptor();
//! assert!(descriptor.requires_session());
//! assert!(descriptor.declares_function("like"));
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result, parse_macro_input};

/// Derive macro for implementing the `Resource` trait.
///
/// ## Struct Attributes
///
/// - `#[resource(path = "...")]` - Required. The resource path.
/// - `#[resource(session)]` - Every operation requires a session.
/// - `#[resource(functions("a", "b"))]` - Declared function names.
///
/// ## Field Attributes
///
/// - `#[resource(id)]` - Required on one field. The integer identifier.
/// - `#[resource(relationship)]` - A to-one relationship.
/// - `#[resource(to_many)]` - A to-many relationship.
/// - `#[resource(rename = "...")]` - The field's name in requests.
/// - `#[resource(skip)]` - Not part of the schema.
///
/// Other fields become attributes and must convert into `AttributeValue`.
/// Relationship fields must implement `RelationshipTargets`.
#[proc_macro_derive(Resource, attributes(resource))]
pub fn derive_resource(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_resource_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Options from the struct-level `#[resource(...)]` attribute.
#[derive(Default)]
struct TypeOptions {
    path: Option<String>,
    session: bool,
    functions: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldRole {
    Id,
    Attribute,
    ToOne,
    ToMany,
    Skip,
}

struct SchemaField {
    ident: Ident,
    name: String,
    role: FieldRole,
}

fn derive_resource_impl(input: DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let options = parse_type_options(&input)?;
    let path = options
        .path
        .ok_or_else(|| Error::new_spanned(&input, "missing #[resource(path = \"...\")] attribute"))?;
    let session = options.session;

    let fields = schema_fields(&input)?;
    let mut ids = fields.iter().filter(|field| field.role == FieldRole::Id);
    let id = ids
        .next()
        .ok_or_else(|| Error::new(proc_macro2::Span::call_site(), "no field marked with #[resource(id)]"))?;
    if let Some(extra) = ids.next() {
        return Err(Error::new_spanned(&extra.ident, "only one field may be marked with #[resource(id)]"));
    }
    let id_ident = &id.ident;
    let id_name = &id.name;

    let mut declarations = Vec::new();
    let mut conversions = Vec::new();
    for field in &fields {
        let ident = &field.ident;
        let field_name = &field.name;
        match field.role {
            FieldRole::Id | FieldRole::Skip => {},
            FieldRole::Attribute => {
                declarations.push(quote! { .with_attribute(#field_name) });
                conversions.push(quote! {
                    .with_attribute(#field_name, ::core::clone::Clone::clone(&self.#ident))
                });
            },
            FieldRole::ToOne | FieldRole::ToMany => {
                let declare = if field.role == FieldRole::ToOne {
                    quote! { .with_to_one(#field_name) }
                } else {
                    quote! { .with_to_many(#field_name) }
                };
                declarations.push(declare);
                conversions.push(quote! {
                    .with_relationship(
                        #field_name,
                        ::resource_access::types::RelationshipTargets::targets(&self.#ident),
                    )
                });
            },
        }
    }
    let functions = &options.functions;

    Ok(quote! {
        impl #impl_generics ::resource_access::types::Resource for #name #ty_generics #where_clause {
            fn descriptor() -> ::resource_access::registry::ResourceTypeDescriptor {
                ::resource_access::registry::ResourceTypeDescriptor::new(#path, #id_name)
                    .with_session_required(#session)
                    #(#declarations)*
                    #(.with_function(#functions))*
            }

            fn resource_id(&self) -> ::resource_access::ResourceId {
                ::core::convert::Into::into(::core::clone::Clone::clone(&self.#id_ident))
            }

            fn to_instance(&self) -> ::resource_access::ResourceInstance {
                ::resource_access::ResourceInstance::new(
                    #path,
                    ::resource_access::types::Resource::resource_id(self),
                )
                #(#conversions)*
            }
        }
    })
}

/// Parse `path`, `session` and `functions(...)` from `#[resource(...)]` on the struct.
fn parse_type_options(input: &DeriveInput) -> Result<TypeOptions> {
    let mut options = TypeOptions::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("resource") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("path") {
                let value: LitStr = meta.value()?.parse()?;
                options.path = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("session") {
                options.session = true;
                Ok(())
            } else if meta.path.is_ident("functions") {
                let content;
                syn::parenthesized!(content in meta.input);
                let literals = content.parse_terminated(<LitStr as syn::parse::Parse>::parse, syn::Token![,])?;
                for literal in literals {
                    if literal.value().is_empty() {
                        return Err(Error::new_spanned(literal, "function names cannot be empty"));
                    }
                    options.functions.push(literal.value());
                }
                Ok(())
            } else {
                Err(meta.error("expected `path`, `session` or `functions`"))
            }
        })?;
    }
    Ok(options)
}

fn named_fields(data: &Data) -> Result<&syn::punctuated::Punctuated<Field, syn::Token![,]>> {
    match data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            Fields::Unnamed(_) => {
                Err(Error::new(proc_macro2::Span::call_site(), "tuple structs are not supported"))
            },
            Fields::Unit => Err(Error::new(proc_macro2::Span::call_site(), "unit structs are not supported")),
        },
        Data::Enum(_) => Err(Error::new(proc_macro2::Span::call_site(), "enums are not supported")),
        Data::Union(_) => Err(Error::new(proc_macro2::Span::call_site(), "unions are not supported")),
    }
}

/// Classify every named field by its `#[resource(...)]` markers.
fn schema_fields(input: &DeriveInput) -> Result<Vec<SchemaField>> {
    let mut fields = Vec::new();
    for field in named_fields(&input.data)? {
        let ident = field.ident.clone().ok_or_else(|| Error::new_spanned(field, "expected named field"))?;
        let mut role = FieldRole::Attribute;
        let mut rename = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("resource") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let marked = if meta.path.is_ident("id") {
                    FieldRole::Id
                } else if meta.path.is_ident("relationship") {
                    FieldRole::ToOne
                } else if meta.path.is_ident("to_many") {
                    FieldRole::ToMany
                } else if meta.path.is_ident("skip") {
                    FieldRole::Skip
                } else if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                    return Ok(());
                } else {
                    return Err(meta.error("expected `id`, `relationship`, `to_many`, `skip` or `rename`"));
                };
                if role != FieldRole::Attribute {
                    return Err(meta.error("a field can have only one of `id`, `relationship`, `to_many`, `skip`"));
                }
                role = marked;
                Ok(())
            })?;
        }

        let name = rename.unwrap_or_else(|| ident.to_string());
        fields.push(SchemaField { ident, name, role });
    }
    Ok(fields)
}
