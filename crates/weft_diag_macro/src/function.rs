use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, Expr, Field, Ident, parse_macro_input, spanned::Spanned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MacroFunctionError {
    #[error("Parse error: {0}")]
    ParseError(#[from] syn::Error),
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),
    #[error("Missing severity attribute, expected one of: error, warning, bug, help, note")]
    MissingAttribute,
}

const SEVERITIES: &[&str] = &["help", "note", "warning", "error", "bug"];
/// Severities allowed on label fields. A bare `#[note]` on a field is a note, not
/// a label.
const LABEL_STYLES: &[&str] = &["warning", "error", "bug"];

fn attr_name(attr: &Attribute) -> String {
    attr.path()
        .segments
        .last()
        .map(|seg| seg.ident.to_string().to_lowercase())
        .unwrap_or_default()
}

fn get_string_literal(expr: &Expr) -> Result<String, MacroFunctionError> {
    if let Expr::Lit(expr_lit) = expr {
        if let syn::Lit::Str(lit_str) = &expr_lit.lit {
            return Ok(lit_str.value());
        }
    }

    Err(MacroFunctionError::InvalidAttribute(
        "Message must be a string literal".to_string(),
    ))
}

fn severity_variant(severity: &str) -> proc_macro2::TokenStream {
    match severity {
        "help" => quote! { Severity::Help },
        "note" => quote! { Severity::Note },
        "warning" => quote! { Severity::Warning },
        "bug" => quote! { Severity::Bug },
        _ => quote! { Severity::Error },
    }
}

fn label_style(severity: &str) -> proc_macro2::TokenStream {
    match severity {
        "error" | "bug" => quote! { LabelStyle::Error },
        "warning" => quote! { LabelStyle::Warning },
        _ => quote! { LabelStyle::Primary },
    }
}

fn label_attr(field: &Field) -> Option<&Attribute> {
    field
        .attrs
        .iter()
        .find(|attr| LABEL_STYLES.contains(&attr_name(attr).as_str()))
}

fn is_note(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr_name(attr) == "note")
}

pub fn macro_derive_impl(item: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(item as DeriveInput);

    match impl_diagnostic_derive(&ast) {
        Ok(token_stream) => token_stream,
        Err(error) => {
            TokenStream::from(syn::Error::new(ast.span(), error.to_string()).to_compile_error())
        }
    }
}

fn impl_diagnostic_derive(ast: &DeriveInput) -> Result<TokenStream, MacroFunctionError> {
    let struct_name = &ast.ident;

    let diagnostic_attr = ast
        .attrs
        .iter()
        .find(|attr| SEVERITIES.contains(&attr_name(attr).as_str()))
        .ok_or(MacroFunctionError::MissingAttribute)?;
    let severity = severity_variant(&attr_name(diagnostic_attr));
    let message = get_string_literal(&diagnostic_attr.parse_args::<Expr>()?)?;

    let code = match ast.attrs.iter().find(|attr| attr_name(attr) == "code") {
        Some(attr) => {
            let code = get_string_literal(&attr.parse_args::<Expr>()?)?;
            quote! { Some(#code.to_string()) }
        }
        None => quote! { None },
    };

    let fields = match &ast.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => fields,
            _ => {
                return Err(MacroFunctionError::InvalidAttribute(
                    "Only named fields are supported".to_string(),
                ));
            }
        },
        _ => {
            return Err(MacroFunctionError::InvalidAttribute(
                "Only structs are supported".to_string(),
            ));
        }
    };

    // Fields usable by name inside format strings.
    let message_fields: Vec<&Ident> = fields
        .named
        .iter()
        .filter(|field| label_attr(field).is_none())
        .filter_map(|field| field.ident.as_ref())
        .collect();

    let note_fields: Vec<&Ident> = fields
        .named
        .iter()
        .filter(|field| is_note(field))
        .filter_map(|field| field.ident.as_ref())
        .collect();

    let mut labels = Vec::new();
    for field in &fields.named {
        let (Some(attr), Some(ident)) = (label_attr(field), field.ident.as_ref()) else {
            continue;
        };
        let style = label_style(&attr_name(attr));
        let label_message = match &attr.meta {
            syn::Meta::Path(_) => String::new(),
            _ => get_string_literal(&attr.parse_args::<Expr>()?)?,
        };
        let refs = message_fields.iter().map(|ident| quote! { let #ident = &self.#ident; });

        labels.push(quote! {
            {
                #(#refs)*
                Label::new(#style, self.#ident.1, self.#ident.0.range())
                    .with_message(format!(#label_message))
            }
        });
    }

    let message_refs = message_fields.iter().map(|ident| quote! { let #ident = &self.#ident; });

    Ok(TokenStream::from(quote! {
        #[allow(unused)]
        impl ToDiagnostic for #struct_name {
            fn message(&self) -> String {
                #(#message_refs)*
                format!(#message)
            }

            fn labels(&self) -> Vec<Label<usize>> {
                vec![
                    #(#labels,)*
                ]
            }

            fn severity(&self) -> Severity {
                #severity
            }

            fn code(&self) -> Option<String> {
                #code
            }

            fn notes(&self) -> Vec<String> {
                vec![
                    #(self.#note_fields.to_string(),)*
                ]
            }
        }
    }))
}
