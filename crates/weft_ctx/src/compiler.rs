use crate::{diag_ctx::DiagnosticContext, errors::Fatal};
use tracing::{debug, error};
use weft_ast::{Ast, NodeId};
use weft_diagnostics::{
    ErrorEmitted,
    diagnostic::{Diagnostic, Severity, ToDiagnostic},
};
use weft_middle::options::CompilerOptions;
use weft_span::span::Span;

/// Diagnostic sink shared by every pass of one compilation. Owns the options and
/// applies the fatal policy they select.
#[derive(Debug, Clone)]
pub struct CompilerContext {
    dcx: DiagnosticContext,
    pub emitted: Vec<Diagnostic<usize>>,
    pub options: CompilerOptions,
}

impl CompilerContext {
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            dcx: DiagnosticContext::new(),
            emitted: vec![],
            options,
        }
    }

    pub fn dcx(&mut self) -> &mut DiagnosticContext {
        &mut self.dcx
    }

    pub fn register_files(&mut self, ast: &Ast) {
        self.dcx.register_files(ast);
    }

    pub fn emit(&mut self, diag: impl ToDiagnostic) -> ErrorEmitted {
        self.emit_diag(diag.to_diagnostic())
    }

    pub fn emit_diag(&mut self, diag: Diagnostic<usize>) -> ErrorEmitted {
        if diag.severity == Severity::Warning && self.options.ignore_warnings {
            return ErrorEmitted::new();
        }

        self.dcx.emit_inner(&diag);
        self.emitted.push(diag);

        ErrorEmitted::new()
    }

    /// Reports an error in the user's program. Compilation stops unless
    /// `ignore_errors` is set, in which case the caller keeps going and code
    /// generation is disabled.
    pub fn user_fatal(&mut self, diag: impl ToDiagnostic, at: (Span, usize)) -> Result<(), Fatal> {
        let diag = diag.to_diagnostic();
        let message = diag.message.clone();
        self.emit_diag(diag);

        if self.options.ignore_errors {
            debug!("ignoring error: {}", message);
            return Ok(());
        }

        Err(Fatal::User {
            message,
            span: at.0,
            file: at.1,
        })
    }

    /// Reports a compiler defect. Always fatal; the returned value is meant to be
    /// propagated as is.
    pub fn internal_fatal(
        &mut self,
        diag: impl ToDiagnostic,
        node: Option<NodeId>,
        at: (Span, usize),
    ) -> Fatal {
        let mut diag = diag.to_diagnostic();
        diag.severity = Severity::Bug;
        if self.options.developer {
            if let Some(node) = node {
                diag.notes.push(format!("node: {node:?}"));
            }
        }
        let message = diag.message.clone();
        error!("internal compiler error at {:?}: {}", node, message);
        self.emit_diag(diag);

        Fatal::Internal {
            message,
            node,
            span: at.0,
            file: at.1,
        }
    }

    pub fn error_count(&self) -> usize {
        self.emitted.iter().filter(|d| d.severity.is_error()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Whether a later stage may generate code: not suppressed by the user and no
    /// error recorded so far.
    pub fn codegen_enabled(&self) -> bool {
        !self.options.no_codegen && !self.has_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_diag_macro::Diagnostic;
    use weft_diagnostics::diagnostic::{Label, LabelStyle};

    #[derive(Diagnostic)]
    #[error("bad thing")]
    struct BadThing {
        #[error("here")]
        span: (Span, usize),
    }

    #[derive(Diagnostic)]
    #[warning("odd thing")]
    struct OddThing {}

    #[derive(Diagnostic)]
    #[bug("broken tree")]
    struct Broken {}

    fn cx(options: CompilerOptions) -> CompilerContext {
        CompilerContext::new(options)
    }

    #[test]
    fn user_fatal_stops_by_default() {
        let mut cx = cx(CompilerOptions::default());
        let at = (Span::new(3, 7), 0);

        let err = cx.user_fatal(BadThing { span: at }, at).unwrap_err();

        assert_eq!(err, Fatal::User {
            message: "bad thing".into(),
            span: Span::new(3, 7),
            file: 0,
        });
        assert_eq!(cx.error_count(), 1);
    }

    #[test]
    fn user_fatal_is_recorded_when_ignoring_errors() {
        let mut cx = cx(CompilerOptions {
            ignore_errors: true,
            ..CompilerOptions::default()
        });
        let at = (Span::new(0, 1), 0);

        assert!(cx.user_fatal(BadThing { span: at }, at).is_ok());
        assert!(cx.has_errors());
        assert!(!cx.codegen_enabled());
    }

    #[test]
    fn internal_fatal_ignores_best_effort_mode() {
        let mut cx = cx(CompilerOptions {
            ignore_errors: true,
            developer: true,
            ..CompilerOptions::default()
        });
        let node = NodeId::Expr(weft_ast::ExprId::from_usize(4));

        let err = cx.internal_fatal(Broken {}, Some(node), (Span::DUMMY, 0));

        assert!(err.is_internal());
        assert_eq!(cx.emitted[0].severity, Severity::Bug);
        assert_eq!(cx.emitted[0].notes, [format!("node: {node:?}")]);
    }

    #[test]
    fn warnings_do_not_disable_codegen() {
        let mut cx = cx(CompilerOptions::default());
        cx.emit(OddThing {});

        assert_eq!(cx.emitted.len(), 1);
        assert!(cx.codegen_enabled());
    }

    #[test]
    fn ignored_warnings_are_dropped() {
        let mut cx = cx(CompilerOptions {
            ignore_warnings: true,
            ..CompilerOptions::default()
        });
        cx.emit(OddThing {});

        assert!(cx.emitted.is_empty());
    }

    #[test]
    fn no_codegen_option_disables_codegen() {
        let cx = cx(CompilerOptions {
            no_codegen: true,
            ..CompilerOptions::default()
        });

        assert!(!cx.codegen_enabled());
    }
}
