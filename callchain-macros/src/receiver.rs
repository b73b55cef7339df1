//! Receiver-related macros.
//!
//! This module contains:
//! - `#[receiver]` - Attribute macro turning an impl block into a `Receiver` lookup table

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Attribute, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Meta, Signature, Token,
    Type,
    parse::{Parse, ParseStream},
    parse_macro_input, parse_quote,
};

/// Arguments for the `#[receiver]` macro.
struct ReceiverArgs {
    args: Option<Type>,
}

impl Parse for ReceiverArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "args" => {
                    let ty: Type = input.parse()?;
                    args = Some(ty);
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

        Ok(ReceiverArgs { args })
    }
}

/// Arguments for `#[operation(...)]` on a method.
#[derive(Default)]
struct OperationArgs {
    name: Option<String>,
    skip: bool,
    /// The first `#[operation]` attribute, kept for error spans.
    attr: Option<Attribute>,
}

impl Parse for OperationArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut parsed = OperationArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "skip" => parsed.skip = true,
                "name" => {
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    parsed.name = Some(lit.value());
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

        Ok(parsed)
    }
}

/// One method exposed as an operation.
struct Exposed {
    name: String,
    method: Ident,
    /// The `T` of a unary method's `&T` parameter.
    args: Option<Type>,
}

fn is_operation_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("operation")
}

/// Reads and strips the `#[operation]` attributes of a method.
fn take_operation_args(method: &mut ImplItemFn) -> syn::Result<OperationArgs> {
    let mut args = OperationArgs::default();
    for attr in method.attrs.iter().filter(|attr| is_operation_attr(attr)) {
        if args.attr.is_none() {
            args.attr = Some(attr.clone());
        }
        if let Meta::Path(_) = attr.meta {
            continue;
        }
        let parsed: OperationArgs = attr.parse_args()?;
        args.skip |= parsed.skip;
        if parsed.name.is_some() {
            args.name = parsed.name;
        }
    }
    method.attrs.retain(|attr| !is_operation_attr(attr));
    Ok(args)
}

/// Whether the method takes `self` by reference, as `&self` or `self: &Self`.
fn takes_self_by_ref(sig: &Signature) -> bool {
    match sig.inputs.first() {
        Some(FnArg::Receiver(receiver)) => {
            receiver.reference.is_some() || matches!(&*receiver.ty, Type::Reference(_))
        }
        _ => false,
    }
}

fn exposed_method(method: &ImplItemFn, op: OperationArgs) -> syn::Result<Option<Exposed>> {
    if op.skip {
        return Ok(None);
    }
    let name = op.name;

    let sig = &method.sig;
    if !takes_self_by_ref(sig) {
        // Associated functions and by-value methods are not operations.
        return match op.attr {
            Some(attr) => Err(syn::Error::new_spanned(
                attr,
                "#[operation] requires a method taking `&self` or `&mut self`",
            )),
            None => Ok(None),
        };
    }

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "operations run synchronously; async methods are not supported",
        ));
    }

    let params: Vec<_> = sig.inputs.iter().skip(1).collect();
    let args = match params.as_slice() {
        [] => None,
        [FnArg::Typed(pat_type)] => match &*pat_type.ty {
            Type::Reference(type_ref) if type_ref.mutability.is_none() => {
                Some((*type_ref.elem).clone())
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "the operation argument must be a shared reference (&Args)",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.inputs,
                "operations take at most one argument besides self",
            ));
        }
    };

    Ok(Some(Exposed {
        name: name.unwrap_or_else(|| sig.ident.to_string()),
        method: sig.ident.clone(),
        args,
    }))
}

/// Implementation of the `#[receiver]` macro.
pub fn receiver_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ReceiverArgs);
    let mut input = parse_macro_input!(item as ItemImpl);

    match expand(args, &mut input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: ReceiverArgs, input: &mut ItemImpl) -> syn::Result<proc_macro2::TokenStream> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[receiver] must be used on an inherent impl block",
        ));
    }

    let mut exposed = Vec::new();
    for item in input.items.iter_mut() {
        if let ImplItem::Fn(method) = item {
            let op_args = take_operation_args(method)?;
            if let Some(op) = exposed_method(method, op_args)? {
                exposed.push(op);
            }
        }
    }

    let mut seen = std::collections::HashSet::new();
    for op in &exposed {
        if !seen.insert(op.name.as_str()) {
            return Err(syn::Error::new_spanned(
                &op.method,
                format!("duplicate operation name `{}`", op.name),
            ));
        }
    }

    let self_ty = &input.self_ty;

    // The argument type: explicit, else the first unary method's, else any.
    let args_ty = args
        .args
        .or_else(|| exposed.iter().find_map(|op| op.args.clone()));

    let mut generics = input.generics.clone();
    let args_ty = match args_ty {
        Some(ty) => ty,
        None => {
            let param = Ident::new("__CallchainArgs", Span::call_site());
            generics.params.push(parse_quote!(#param: ?Sized));
            parse_quote!(#param)
        }
    };
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    let arms = exposed.iter().map(|op| {
        let name = &op.name;
        let method = &op.method;
        if op.args.is_some() {
            quote! {
                #name => ::core::option::Option::Some(::callchain::Operation::Unary(
                    |__receiver: &mut Self, __args: &#args_ty| {
                        ::callchain::IntoOutcome::into_outcome(Self::#method(__receiver, __args))
                    },
                )),
            }
        } else {
            quote! {
                #name => ::core::option::Option::Some(::callchain::Operation::Nullary(
                    |__receiver: &mut Self| {
                        ::callchain::IntoOutcome::into_outcome(Self::#method(__receiver))
                    },
                )),
            }
        }
    });

    Ok(quote! {
        #input

        impl #impl_generics ::callchain::Receiver<#args_ty> for #self_ty #where_clause {
            fn resolve(
                &self,
                name: &str,
            ) -> ::core::option::Option<::callchain::Operation<Self, #args_ty>> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
