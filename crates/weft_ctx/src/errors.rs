use weft_ast::NodeId;
use weft_span::span::Span;

/// Stops the pipeline. Reaching the driver means compilation of the program has
/// ended; every diagnostic has already been emitted by then.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Fatal {
    /// The program is invalid and best-effort mode is off.
    #[error("{message}")]
    User {
        message: String,
        span: Span,
        file: usize,
    },

    /// A compiler defect. Never suppressed by best-effort mode.
    #[error("internal compiler error: {message}")]
    Internal {
        message: String,
        node: Option<NodeId>,
        span: Span,
        file: usize,
    },
}

impl Fatal {
    pub fn is_internal(&self) -> bool {
        matches!(self, Fatal::Internal { .. })
    }
}
