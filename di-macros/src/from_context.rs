//! Implementation of #[derive(FromContext)].

use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericParam, Generics};

pub fn derive_from_context_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let context_type = match parse_context_type(&input) {
        Ok(ty) => ty,
        Err(e) => return e.to_compile_error().into(),
    };

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "FromContext can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "FromContext can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let impl_generics_source = without_defaulted_params(&input.generics);
    let (impl_generics, _, where_clause) = impl_generics_source.split_for_impl();
    let type_args = instantiated_args(&input.generics);

    // Field types may mention defaulted parameters, so let inference pick the impl
    let field_inits = fields.iter().filter_map(|field| {
        let field_name = field.ident.as_ref()?;
        Some(quote! { #field_name: crate::FromRef::from_ref(ctx) })
    });

    let expanded = quote! {
        impl #impl_generics crate::FromRef<#context_type> for #name #type_args #where_clause {
            fn from_ref(ctx: &#context_type) -> Self {
                Self {
                    #(#field_inits),*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Generic parameters left open on the impl: everything except defaulted type parameters.
fn without_defaulted_params(generics: &Generics) -> Generics {
    let mut open = generics.clone();
    open.params = generics
        .params
        .iter()
        .filter(|param| !matches!(param, GenericParam::Type(ty) if ty.default.is_some()))
        .cloned()
        .collect::<Punctuated<_, _>>();
    open
}

/// Type arguments for the impl target, with defaults substituted.
fn instantiated_args(generics: &Generics) -> proc_macro2::TokenStream {
    if generics.params.is_empty() {
        return quote! {};
    }

    let args = generics.params.iter().map(|param| match param {
        GenericParam::Type(ty) => match &ty.default {
            Some(default) => quote! { #default },
            None => {
                let ident = &ty.ident;
                quote! { #ident }
            }
        },
        GenericParam::Lifetime(lt) => {
            let lifetime = &lt.lifetime;
            quote! { #lifetime }
        }
        GenericParam::Const(c) => {
            let ident = &c.ident;
            quote! { #ident }
        }
    });

    quote! { <#(#args),*> }
}

/// Reads `#[from_context(Context = "MyContext")]`, defaulting to `Context`.
fn parse_context_type(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    for attr in &input.attrs {
        if !attr.path().is_ident("from_context") {
            continue;
        }

        let mut context_ty: Option<syn::Type> = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("Context") {
                let value: syn::LitStr = meta.value()?.parse()?;
                context_ty = Some(value.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `Context = \"Type\"`"))
            }
        })?;

        if let Some(ty) = context_ty {
            return Ok(quote! { #ty });
        }
    }

    Ok(quote! { Context })
}
