use super::derived_trait_names;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ItemFn, ItemStruct, Lit, LitBool, LitStr, Meta, MetaNameValue, Token};

#[derive(Default)]
struct ModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<LitBool>,
}

/// Serde settings already present on the struct.
#[derive(Default)]
struct SerdeSettings {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match try_expand_api_model(args, &input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand_api_model(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let args = parse_model_args(args)?;
    let existing = serde_settings(&input.attrs)?;
    let derives = derived_trait_names(&input.attrs);

    let mut derive_list = Vec::new();
    if !derives.contains("Debug") {
        derive_list.push(quote! { Debug });
    }
    if !derives.contains("Serialize") {
        derive_list.push(quote! { ::serde::Serialize });
    }
    if !derives.contains("Deserialize") {
        derive_list.push(quote! { ::serde::Deserialize });
    }
    let derive_attr =
        if derive_list.is_empty() { quote! {} } else { quote! { #[derive(#(#derive_list),*)] } };

    let schema_attr = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let rename = args.rename_all.unwrap_or_else(|| LitStr::new("camelCase", Span::call_site()));
    let rename_attr = match &existing.rename_all {
        Some(current) if current.value() != rename.value() => {
            return Err(syn::Error::new_spanned(
                current,
                "conflicting serde rename_all; drop it or pass the same value to api_model",
            ));
        }
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #rename)] },
    };

    let deny = args.deny_unknown_fields.is_none_or(|lit| lit.value);
    let deny_attr = match (existing.deny_unknown_fields, deny) {
        (true, false) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set through serde; remove it before disabling",
            ));
        }
        (false, true) => quote! { #[serde(deny_unknown_fields)] },
        _ => quote! {},
    };

    Ok(quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    })
}

/// Wraps a handler so that it carries `utoipa::path` metadata in `server` builds.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn parse_model_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = ModelArgs::default();

    for meta in metas {
        let Meta::NameValue(MetaNameValue { path, value, .. }) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected name-value arguments like `rename_all = \"...\"`",
            ));
        };

        if path.is_ident("rename_all") {
            ensure_unset(parsed.rename_all.is_some(), &path)?;
            parsed.rename_all = Some(literal(&value, |lit| match lit {
                Lit::Str(s) => Some(s.clone()),
                _ => None,
            })?);
        } else if path.is_ident("deny_unknown_fields") {
            ensure_unset(parsed.deny_unknown_fields.is_some(), &path)?;
            parsed.deny_unknown_fields = Some(literal(&value, |lit| match lit {
                Lit::Bool(b) => Some(b.clone()),
                _ => None,
            })?);
        } else {
            return Err(syn::Error::new_spanned(
                path,
                "unsupported argument; expected rename_all or deny_unknown_fields",
            ));
        }
    }

    Ok(parsed)
}

fn ensure_unset(already: bool, path: &syn::Path) -> syn::Result<()> {
    if already { Err(syn::Error::new_spanned(path, "duplicate argument")) } else { Ok(()) }
}

fn literal<T>(value: &Expr, pick: impl Fn(&Lit) -> Option<T>) -> syn::Result<T> {
    match value {
        Expr::Lit(expr) => pick(&expr.lit),
        _ => None,
    }
    .ok_or_else(|| syn::Error::new_spanned(value, "unexpected literal type"))
}

fn serde_settings(attrs: &[Attribute]) -> syn::Result<SerdeSettings> {
    let mut settings = SerdeSettings::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                settings.rename_all = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                settings.deny_unknown_fields = true;
            } else if meta.input.peek(Token![=]) {
                // Skip values of attributes this macro does not manage.
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }

    Ok(settings)
}
