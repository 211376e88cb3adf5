use crate::{ExprId, Slot, SymbolId};
use std::fmt;
use weft_span::{span::Span, symbols::Symbol};

#[derive(Clone, Debug)]
pub struct Expr {
    pub id: ExprId,
    pub kind: ExprKind,
    pub span: Span,
    pub(crate) parent: Option<Slot>,
    pub(crate) detached: bool,
    pub(crate) replaced_by: Option<ExprId>,
}

impl Expr {
    pub fn parent(&self) -> Option<Slot> {
        self.parent
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// The node that took this node's place, if it was replaced.
    pub fn replaced_by(&self) -> Option<ExprId> {
        self.replaced_by
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Lit),
    /// Reference to a bound symbol.
    Variable(SymbolId),
    /// `base(args...)` that has not been classified yet.
    ParenOp { base: ExprId, args: Vec<ExprId> },
    ArrayRef { base: ExprId, args: Vec<ExprId> },
    FnCall { target: ExprId, args: Vec<ExprId> },
    TupleSelect { base: ExprId, args: Vec<ExprId> },
    IoCall { kind: IoKind, base: ExprId, args: Vec<ExprId> },
    Binary(BinOpKind, ExprId, ExprId),
    Unary(UnaryOp, ExprId),
    MemberAccess { base: ExprId, member: Symbol },
    /// Explicitly parenthesized expression, eg. `(a)`.
    Paren(ExprId),
}

impl ExprKind {
    /// Children in slot order. The slot index recorded in a child's parent link is
    /// its position in this list.
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            ExprKind::Literal(_) | ExprKind::Variable(_) => vec![],
            ExprKind::ParenOp { base, args }
            | ExprKind::ArrayRef { base, args }
            | ExprKind::TupleSelect { base, args }
            | ExprKind::IoCall { base, args, .. }
            | ExprKind::FnCall { target: base, args } => {
                std::iter::once(*base).chain(args.iter().copied()).collect()
            }
            ExprKind::Binary(_, lhs, rhs) => vec![*lhs, *rhs],
            ExprKind::Unary(_, operand) | ExprKind::Paren(operand) => vec![*operand],
            ExprKind::MemberAccess { base, .. } => vec![*base],
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut ExprId> {
        match self {
            ExprKind::Literal(_) | ExprKind::Variable(_) => vec![],
            ExprKind::ParenOp { base, args }
            | ExprKind::ArrayRef { base, args }
            | ExprKind::TupleSelect { base, args }
            | ExprKind::IoCall { base, args, .. }
            | ExprKind::FnCall { target: base, args } => {
                std::iter::once(base).chain(args.iter_mut()).collect()
            }
            ExprKind::Binary(_, lhs, rhs) => vec![lhs, rhs],
            ExprKind::Unary(_, operand) | ExprKind::Paren(operand) => vec![operand],
            ExprKind::MemberAccess { base, .. } => vec![base],
        }
    }

    pub fn is_paren_op(&self) -> bool {
        matches!(self, ExprKind::ParenOp { .. })
    }

    /// Short name of the variant, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Literal(_) => "literal",
            ExprKind::Variable(_) => "variable",
            ExprKind::ParenOp { .. } => "paren-op",
            ExprKind::ArrayRef { .. } => "array-ref",
            ExprKind::FnCall { .. } => "call",
            ExprKind::TupleSelect { .. } => "tuple-select",
            ExprKind::IoCall { .. } => "io",
            ExprKind::Binary(..) => "binary",
            ExprKind::Unary(..) => "unary",
            ExprKind::MemberAccess { .. } => "member",
            ExprKind::Paren(_) => "paren",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Lit {
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lit::Int(v) => write!(f, "(int {v})"),
            Lit::Real(v) => write!(f, "(real {v})"),
            Lit::Bool(v) => write!(f, "(bool {v})"),
            Lit::Str(v) => write!(f, "(str {v:?})"),
        }
    }
}

/// Built-in I/O routines recognised by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IoKind {
    Write,
    Writeln,
    Read,
}

impl IoKind {
    pub fn from_symbol(name: Symbol) -> Option<IoKind> {
        use weft_span::symbols::{READ, WRITE, WRITELN};

        match name {
            n if n == WRITE => Some(IoKind::Write),
            n if n == WRITELN => Some(IoKind::Writeln),
            n if n == READ => Some(IoKind::Read),
            _ => None,
        }
    }
}

impl fmt::Display for IoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoKind::Write => write!(f, "write"),
            IoKind::Writeln => write!(f, "writeln"),
            IoKind::Read => write!(f, "read"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Eq => "==",
            BinOpKind::Ne => "!=",
            BinOpKind::Lt => "<",
            BinOpKind::Le => "<=",
            BinOpKind::Gt => ">",
            BinOpKind::Ge => ">=",
            BinOpKind::And => "&&",
            BinOpKind::Or => "||",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}
