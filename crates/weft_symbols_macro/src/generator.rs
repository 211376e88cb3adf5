use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{
    Ident, LitStr, Result, Token,
    parse::{Parse, ParseStream},
    parse2,
};

struct SymbolDef {
    name: Ident,
    value: LitStr,
}

struct SymbolDefs {
    symbols: Vec<SymbolDef>,
}

impl Parse for SymbolDef {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;

        Ok(SymbolDef { name, value })
    }
}

impl Parse for SymbolDefs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut symbols = Vec::new();

        while !input.is_empty() {
            symbols.push(input.parse()?);
            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(SymbolDefs { symbols })
    }
}

pub fn generate(tokens: TokenStream) -> Result<TokenStream> {
    let SymbolDefs { symbols } = parse2(tokens)?;

    // Two constants with the same string would get different indices and break
    // equality by index.
    let mut seen = HashSet::new();
    for symbol in &symbols {
        if !seen.insert(symbol.value.value()) {
            return Err(syn::Error::new(
                symbol.value.span(),
                format!("symbol string `{}` is declared twice", symbol.value.value()),
            ));
        }
    }

    let const_definitions = symbols.iter().enumerate().map(|(index, symbol)| {
        let name = &symbol.name;
        let doc = format!("Predefined symbol for `{}`.", symbol.value.value());

        quote! {
            #[doc = #doc]
            pub const #name: Symbol = Symbol(SymbolIndex::from_usize(#index));
        }
    });

    let map_initialization = symbols.iter().map(|symbol| {
        let name = &symbol.name;
        let value = &symbol.value;

        quote! {
            map.insert(#name.0, #value.to_string());
        }
    });

    Ok(quote! {
        #(#const_definitions)*

        lazy_static! {
            pub static ref SYMBOL_STRINGS: IndexMap<SymbolIndex, String> = {
                let mut map = IndexMap::new();
                #(#map_initialization)*
                map
            };
        }
    })
}
