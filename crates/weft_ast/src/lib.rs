use weft_index::index_type;

mod arena;
mod display;
pub mod errors;
pub mod expr;
pub mod stmts;
pub mod sym;
pub mod ty;
mod type_info;
mod verify;

pub use arena::{Ast, Module};
pub use errors::AstError;

index_type! {
    /// Identifies an expression node in the [`Ast`] arena.
    pub struct ExprId {}
}

index_type! {
    /// Identifies a statement node in the [`Ast`] arena.
    pub struct StmtId {}
}

index_type! {
    /// Identifies a symbol (variable, function or type) in the [`Ast`] arena.
    pub struct SymbolId {}
}

index_type! {
    pub struct TypeId {
        const TY_INT = 0;
        const TY_REAL = 1;
        const TY_BOOL = 2;
        const TY_STRING = 3;
    }
}

index_type! {
    /// A compiled module: the unit a pass is run over.
    #[derive(PartialOrd, Ord)]
    pub struct ModuleId {}
}

/// Identity of any node that can own children.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeId {
    Module(ModuleId),
    Stmt(StmtId),
    Expr(ExprId),
}

impl From<ExprId> for NodeId {
    fn from(id: ExprId) -> Self {
        NodeId::Expr(id)
    }
}

impl From<StmtId> for NodeId {
    fn from(id: StmtId) -> Self {
        NodeId::Stmt(id)
    }
}

/// Position of a node inside its owner: the owner and the index into the owner's
/// child list of the same node category (expressions or statements).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Slot {
    pub owner: NodeId,
    pub index: usize,
}

impl Slot {
    pub fn new(owner: impl Into<NodeId>, index: usize) -> Self {
        Self {
            owner: owner.into(),
            index,
        }
    }
}
