use weft_diag_macro::Diagnostic;
use weft_diagnostics::diagnostic::{Label, LabelStyle, Severity, ToDiagnostic};
use weft_span::span::Span;

#[derive(Diagnostic)]
#[error("Invalid class constructor")]
pub struct InvalidClassConstructor {
    #[error("`{name}` is an instance of a class, not the class itself")]
    pub span: (Span, usize),
    pub name: String,
    #[note]
    pub note: &'static str,
}

#[derive(Diagnostic)]
#[bug("constructor of class `{class}` is not a definition statement")]
pub struct ConstructorNotDefinition {
    #[bug("constructing `{class}` here")]
    pub span: (Span, usize),
    pub class: String,
}

#[derive(Diagnostic)]
#[bug("failed to rewrite `{form}` expression: {error}")]
pub struct RewriteFailed {
    #[bug]
    pub span: (Span, usize),
    pub form: &'static str,
    pub error: String,
}

#[derive(Diagnostic)]
#[bug("malformed tree after pass `{pass}` in module `{module}`: {error}")]
pub struct MalformedTree {
    pub pass: &'static str,
    pub module: String,
    pub error: String,
}
