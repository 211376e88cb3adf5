mod generator;

use crate::generator::generate;
use proc_macro::TokenStream;

/// Declares the predefined symbols of the compiler.
///
/// ```ignore
/// generate_symbols! {
///     WRITE = "write",
///     READ = "read",
/// }
/// ```
///
/// Each entry becomes a `pub const NAME: Symbol` whose index is its position in the
/// list, and `SYMBOL_STRINGS` maps every index back to its string so the interner
/// can be seeded in the same order.
#[proc_macro]
pub fn generate_symbols(input: TokenStream) -> TokenStream {
    match generate(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
