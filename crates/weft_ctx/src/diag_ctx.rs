use indexmap::IndexMap;
use tracing::warn;
use weft_ast::Ast;
use weft_diagnostics::{
    diagnostic::Diagnostic,
    term::{DiagConfig, emit_stderr},
};

#[derive(Debug, Clone, Default)]
pub struct DiagnosticContext {
    pub config: DiagConfig,
    /// Printable name per file id.
    pub files: IndexMap<usize, String>,
}

impl DiagnosticContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names every file id after the module compiled from it.
    pub fn register_files(&mut self, ast: &Ast) {
        for module in ast.modules() {
            self.files.insert(module.file_id, module.name.to_string());
        }
    }

    pub fn emit_inner(&mut self, diag: &Diagnostic<usize>) {
        if let Err(err) = emit_stderr(&self.config, &self.files, diag) {
            warn!("failed to write diagnostic to stderr: {}", err);
        }
    }
}
