use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Expr, ExprLit, ItemFn, Lit, Meta, Token, parse::Parser, parse_macro_input,
    punctuated::Punctuated,
};

/// Turns `main` into a Tokio entry point that runs `tools::setup_application`
/// first and exits with code 1 when the body returns an error.
///
/// `app = "name"` overrides the name used for log filtering (defaults to the
/// package name). Every other argument is forwarded to `tokio::main`, e.g.
/// `#[tools::main(app = "w3n-harness", flavor = "multi_thread")]`.
#[proc_macro_attribute]
pub fn main(args: TokenStream, input: TokenStream) -> TokenStream {
    let func = parse_macro_input!(input as ItemFn);

    if func.sig.ident != "main" {
        return syn::Error::new_spanned(
            &func.sig.ident,
            "this attribute can only be used on 'main'",
        )
        .to_compile_error()
        .into();
    }

    if func.sig.asyncness.is_none() {
        return syn::Error::new_spanned(func.sig.fn_token, "'main' must be declared async")
            .to_compile_error()
            .into();
    }

    let metas = match Punctuated::<Meta, Token![,]>::parse_terminated.parse(args) {
        Ok(metas) => metas,
        Err(e) => return e.to_compile_error().into(),
    };

    let mut app_name = quote! { env!("CARGO_PKG_NAME") };
    let mut runtime_args = Vec::new();

    for meta in metas {
        match &meta {
            Meta::NameValue(nv) if nv.path.is_ident("app") => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(name),
                    ..
                }) => app_name = quote! { #name },
                other => {
                    return syn::Error::new_spanned(other, "'app' expects a string literal")
                        .to_compile_error()
                        .into();
                }
            },
            _ => runtime_args.push(meta),
        }
    }

    let fn_name = &func.sig.ident;
    let fn_body = &func.block;
    let fn_vis = &func.vis;
    let attrs = &func.attrs;

    let fn_ret_type = match &func.sig.output {
        syn::ReturnType::Default => quote! { ::anyhow::Result<()> },
        syn::ReturnType::Type(_, ty) => quote! { #ty },
    };
    let body = match &func.sig.output {
        syn::ReturnType::Default => quote! { { #fn_body; Ok(()) } },
        syn::ReturnType::Type(..) => quote! { #fn_body },
    };

    let expanded = quote! {
        #[tokio::main(#(#runtime_args),*)]
        #(#attrs)*
        #fn_vis async fn #fn_name() {
            if let Err(e) = ::tools::setup_application(#app_name) {
                eprintln!("Failed to initialize application: {e:?}");
                ::std::process::exit(1);
            }

            let result: #fn_ret_type = async move #body .await;

            if let Err(e) = result {
                ::tracing::error!(error = ?e, "application failed");
                ::std::process::exit(1);
            }
        }
    };

    expanded.into()
}
