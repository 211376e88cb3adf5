use crate::{ExprId, NodeId, Slot, StmtId, SymbolId};

/// Structural violations of the tree. Every variant is a compiler defect: the
/// parser and passes are expected never to produce them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    #[error("expression {0:?} does not exist")]
    UnknownExpr(ExprId),

    #[error("statement {0:?} does not exist")]
    UnknownStmt(StmtId),

    #[error("symbol {0:?} does not exist")]
    UnknownSymbol(SymbolId),

    #[error("node {0:?} was already detached from the tree")]
    Detached(NodeId),

    #[error("node {child:?} is already owned by {owner:?}")]
    AlreadyOwned { child: NodeId, owner: NodeId },

    #[error("node {0:?} appears twice in the same child list")]
    DuplicateChild(NodeId),

    #[error("node {child:?} records parent {recorded:?} but was reached through {actual:?}")]
    BrokenParentLink {
        child: NodeId,
        recorded: Option<Slot>,
        actual: Option<Slot>,
    },

    #[error("node {0:?} is reachable more than once")]
    ReachedTwice(NodeId),
}
