use crate::{ExprId, Slot, StmtId, SymbolId};
use weft_span::span::Span;

#[derive(Clone, Debug)]
pub struct Stmt {
    pub id: StmtId,
    pub kind: StmtKind,
    pub span: Span,
    pub(crate) parent: Option<Slot>,
}

impl Stmt {
    pub fn parent(&self) -> Option<Slot> {
        self.parent
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Expr(ExprId),
    Def(DefStmt),
    Block(Vec<StmtId>),
    Cond {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    Return(Option<ExprId>),
}

impl StmtKind {
    /// Expression children in slot order.
    pub fn exprs(&self) -> Vec<ExprId> {
        match self {
            StmtKind::Expr(expr) => vec![*expr],
            StmtKind::Def(def) => def.defs.iter().filter_map(|d| d.init).collect(),
            StmtKind::Block(_) => vec![],
            StmtKind::Cond { cond, .. } | StmtKind::While { cond, .. } => vec![*cond],
            StmtKind::Return(value) => value.iter().copied().collect(),
        }
    }

    pub fn exprs_mut(&mut self) -> Vec<&mut ExprId> {
        match self {
            StmtKind::Expr(expr) => vec![expr],
            StmtKind::Def(def) => def.defs.iter_mut().filter_map(|d| d.init.as_mut()).collect(),
            StmtKind::Block(_) => vec![],
            StmtKind::Cond { cond, .. } | StmtKind::While { cond, .. } => vec![cond],
            StmtKind::Return(value) => value.iter_mut().collect(),
        }
    }

    /// Nested statements that live directly in this statement. Function bodies
    /// defined by a [`DefStmt`] are owned through their symbol and are listed by
    /// [`crate::Ast::stmt_children`].
    pub fn direct_stmts(&self) -> Vec<StmtId> {
        match self {
            StmtKind::Block(stmts) => stmts.clone(),
            StmtKind::Cond {
                then_branch,
                else_branch,
                ..
            } => std::iter::once(*then_branch).chain(*else_branch).collect(),
            StmtKind::While { body, .. } => vec![*body],
            StmtKind::Expr(_) | StmtKind::Def(_) | StmtKind::Return(_) => vec![],
        }
    }
}

/// A definition statement: one or more symbols introduced together.
#[derive(Clone, Debug, PartialEq)]
pub struct DefStmt {
    pub defs: Vec<Def>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Def {
    pub sym: SymbolId,
    /// E.g. `var x: int = 5;` or `var x: int;`
    pub init: Option<ExprId>,
}

impl DefStmt {
    pub fn single(sym: SymbolId) -> Self {
        Self {
            defs: vec![Def { sym, init: None }],
        }
    }

    pub fn with_init(sym: SymbolId, init: ExprId) -> Self {
        Self {
            defs: vec![Def {
                sym,
                init: Some(init),
            }],
        }
    }
}
