use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields, Variant, parse_macro_input};

/// 提取`///`文档注释，每行去掉紧跟`///`的一个空格，保留其余缩进。
fn doc_of(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(s), .. }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.strip_prefix(' ').map(str::to_owned).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 匹配变体的模式，忽略所有字段。
fn variant_pattern(variant: &Variant) -> proc_macro2::TokenStream {
    let name = &variant.ident;
    match &variant.fields {
        Fields::Unit => quote! { Self::#name },
        Fields::Unnamed(_) => quote! { Self::#name(..) },
        Fields::Named(_) => quote! { Self::#name { .. } },
    }
}

/// 为枚举生成`help(&self)`和`all_help()`，帮助文本来自各变体的文档注释。
#[proc_macro_derive(CmdHelp)]
pub fn cmd_help_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(DataEnum { variants, .. }) = &input.data else {
        return syn::Error::new_spanned(enum_name, "CmdHelp can only be derived on enums").to_compile_error().into();
    };

    let help_arms = variants.iter().map(|v| {
        let pattern = variant_pattern(v);
        let doc = doc_of(&v.attrs);
        quote! { #pattern => #doc, }
    });

    // 没有文档注释的变体不出现在全部帮助中
    let all_entries = variants.iter().filter_map(|v| {
        let doc = doc_of(&v.attrs);
        if doc.is_empty() {
            None
        } else {
            let name = v.ident.to_string();
            Some(quote! { (#name, #doc) })
        }
    });

    let expanded = quote! {
        impl #impl_generics #enum_name #ty_generics #where_clause {
            /// 获取当前变体的帮助信息。
            pub fn help(&self) -> &'static str {
                match self {
                    #(#help_arms)*
                }
            }

            /// 获取全部帮助信息：[(变体名, 帮助信息), ...]
            pub fn all_help() -> &'static [(&'static str, &'static str)] {
                &[#(#all_entries),*]
            }
        }
    };

    TokenStream::from(expanded)
}
