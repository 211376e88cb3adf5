mod function;

use crate::function::macro_derive_impl;
use proc_macro::TokenStream;

/// Derives `ToDiagnostic` for a struct with named fields.
///
/// The struct carries exactly one severity attribute (`error`, `warning`, `bug`,
/// `help` or `note`) holding the message format string, and optionally
/// `#[code("...")]`. Fields typed `(Span, usize)` annotated with a severity become
/// labels; fields annotated `#[note]` become notes; every other field is available
/// by name inside the format strings.
#[proc_macro_derive(Diagnostic, attributes(error, warning, bug, help, note, code))]
pub fn derive_diagnostic(item: TokenStream) -> TokenStream {
    macro_derive_impl(item)
}
