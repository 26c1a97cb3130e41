//! Hook registration macro.
//!
//! This module contains:
//! - `#[hook]` - Attribute macro that leaves a handler function untouched and
//!   generates a `register_<name>` function for it

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Expr, FnArg, GenericArgument, Ident, ItemFn, LitStr, PathArguments, Token, Type,
    ext::IdentExt,
    parenthesized,
    parse::{Parse, ParseStream},
    parse_macro_input, parse_quote,
    punctuated::Punctuated,
};

/// A field name, written either as an identifier or a string literal.
struct FieldName(LitStr);

impl Parse for FieldName {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(FieldName(input.parse()?));
        }
        let ident = Ident::parse_any(input)?;
        Ok(FieldName(LitStr::new(&ident.to_string(), ident.span())))
    }
}

/// `name = value` inside `when(...)`.
struct Condition {
    key: FieldName,
    value: Expr,
}

impl Parse for Condition {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;
        Ok(Condition { key, value })
    }
}

/// Arguments for the `#[hook]` macro.
#[derive(Default)]
pub(crate) struct HookArgs {
    needs: Vec<LitStr>,
    returns: Vec<LitStr>,
    modifies: Vec<LitStr>,
    conditions: Vec<Condition>,
}

fn field_list(input: ParseStream) -> syn::Result<Vec<LitStr>> {
    let content;
    parenthesized!(content in input);
    let names = Punctuated::<FieldName, Token![,]>::parse_terminated(&content)?;
    Ok(names.into_iter().map(|name| name.0).collect())
}

impl Parse for HookArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = HookArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "needs" => args.needs.extend(field_list(input)?),
                "returns" => args.returns.extend(field_list(input)?),
                "modifies" => args.modifies.extend(field_list(input)?),
                "when" => {
                    let content;
                    parenthesized!(content in input);
                    let conditions = Punctuated::<Condition, Token![,]>::parse_terminated(&content)?;
                    args.conditions.extend(conditions);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

/// The `I` of a `&HookContext<'_, I>` first argument, `()` when omitted.
fn instance_type(input: &ItemFn) -> syn::Result<Type> {
    let error = || {
        syn::Error::new_spanned(
            &input.sig,
            "hook function must take `&HookContext<'_, Instance>` and `&Event` arguments",
        )
    };

    let Some(FnArg::Typed(pat_type)) = input.sig.inputs.first() else {
        return Err(error());
    };
    let Type::Reference(reference) = &*pat_type.ty else {
        return Err(error());
    };
    let Type::Path(path) = &*reference.elem else {
        return Err(error());
    };
    let Some(segment) = path.path.segments.last() else {
        return Err(error());
    };

    if let PathArguments::AngleBracketed(generics) = &segment.arguments {
        for arg in &generics.args {
            if let GenericArgument::Type(ty) = arg {
                return Ok(ty.clone());
            }
        }
    }
    Ok(parse_quote!(()))
}

/// Implementation of the `#[hook]` macro.
pub fn hook_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as HookArgs);
    let input = parse_macro_input!(item as ItemFn);

    match expand(&args, &input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

/// The function unchanged, followed by its `register_<name>` function.
fn expand(args: &HookArgs, input: &ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    if input.sig.inputs.len() != 2 {
        return Err(syn::Error::new_spanned(
            &input.sig.inputs,
            "hook function must take exactly two arguments: (&HookContext, &Event)",
        ));
    }

    let instance = instance_type(input)?;
    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let register_name = format_ident!("register_{}", fn_name);

    // Empty lists are skipped: `[]` alone gives no element type to infer.
    let needs = (!args.needs.is_empty()).then(|| {
        let keys = &args.needs;
        quote! { .needs([#(#keys),*]) }
    });
    let returns = (!args.returns.is_empty()).then(|| {
        let keys = &args.returns;
        quote! { .returns([#(#keys),*]) }
    });
    let modifies = (!args.modifies.is_empty()).then(|| {
        let keys = &args.modifies;
        quote! { .modifies([#(#keys),*]) }
    });
    let conditions = args.conditions.iter().map(|Condition { key, value }| {
        let key = &key.0;
        quote! { .when(#key, #value) }
    });

    Ok(quote! {
        #input

        #[doc = concat!("Register `", stringify!(#fn_name), "` as a hook on `pangler`.")]
        #fn_vis fn #register_name(
            pangler: &mut ::panglery::Pangler<#instance>,
        ) -> ::core::result::Result<(), ::panglery::PanglerError> {
            pangler.add_hook(
                ::panglery::HookSpec::new() #needs #returns #modifies #(#conditions)*,
                #fn_name,
            )
        }
    })
}
