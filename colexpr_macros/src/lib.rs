use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, FnArg, GenericArgument, ItemFn, Pat, PatType, PathArguments, ReturnType,
    Type,
};

fn is_f64(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path) if type_path.qself.is_none() && type_path.path.is_ident("f64"))
}

/// Returns `T` when `ty` is written as `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(generics) = &segment.arguments else {
        return None;
    };
    match generics.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn expand_builtin(input: ItemFn) -> syn::Result<TokenStream2> {
    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let name = fn_name.to_string();
    let fn_body = &input.block;

    match &input.sig.output {
        ReturnType::Type(_, ty) if is_f64(ty) => {}
        output => return Err(syn::Error::new_spanned(output, "builtins must return f64")),
    }

    let mut required = 0usize;
    let mut optional = 0usize;
    let mut extractions = Vec::new();

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return Err(syn::Error::new_spanned(arg, "builtins cannot take `self`"));
        };
        let Pat::Ident(pat_ident) = &**pat else {
            return Err(syn::Error::new_spanned(pat, "expected a plain argument name"));
        };
        let arg_name = &pat_ident.ident;

        if is_f64(ty) {
            if optional > 0 {
                return Err(syn::Error::new_spanned(
                    arg,
                    "required arguments must come before optional ones",
                ));
            }
            required += 1;
            extractions.push(quote! {
                let #arg_name: f64 = args[#i];
            });
        } else if option_inner(ty).is_some_and(is_f64) {
            optional += 1;
            extractions.push(quote! {
                let #arg_name: ::core::option::Option<f64> = args.get(#i).copied();
            });
        } else {
            return Err(syn::Error::new_spanned(
                ty,
                "builtin arguments must be f64 or Option<f64>",
            ));
        }
    }

    let max = required + optional;

    Ok(quote! {
        #(#attrs)*
        #[allow(unused_comparisons)]
        #vis fn #fn_name(args: &[f64]) -> crate::Result<f64> {
            if args.len() < #required || args.len() > #max {
                return Err(crate::Error::Arity {
                    function: #name,
                    min: #required,
                    max: #max,
                    found: args.len(),
                });
            }

            #(#extractions)*

            let value: f64 = #fn_body;
            Ok(value)
        }
    })
}

/// Turns `fn name(x: f64, y: Option<f64>) -> f64` into a registry-callable
/// `fn name(args: &[f64]) -> crate::Result<f64>`.
///
/// Required `f64` parameters come first, trailing `Option<f64>` parameters
/// are filled with `None` when the caller omits them. Any other argument
/// count fails with `Error::Arity`.
#[proc_macro_attribute]
pub fn builtin(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    expand_builtin(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
