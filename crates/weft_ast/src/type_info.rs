use crate::{
    Ast, ExprId, TY_BOOL, TY_INT, TY_REAL, TY_STRING, TypeId,
    expr::{ExprKind, Lit},
    ty::TyKind,
};

impl Ast {
    /// Best-effort type of an expression before type inference. `None` means the
    /// type is not known yet, e.g. for calls that have not been resolved.
    pub fn type_info(&self, expr: ExprId) -> Option<TypeId> {
        match &self.expr(expr).kind {
            ExprKind::Literal(lit) => Some(match lit {
                Lit::Int(_) => TY_INT,
                Lit::Real(_) => TY_REAL,
                Lit::Bool(_) => TY_BOOL,
                Lit::Str(_) => TY_STRING,
            }),
            ExprKind::Variable(sym) => self.symbol(*sym).ty,
            ExprKind::ArrayRef { base, .. } => match self.ty(self.type_info(*base)?).kind {
                TyKind::Array { elem } => Some(elem),
                _ => None,
            },
            ExprKind::TupleSelect { base, args } => {
                let [index] = args.as_slice() else {
                    return None;
                };
                let ExprKind::Literal(Lit::Int(i)) = self.expr(*index).kind else {
                    return None;
                };
                match &self.ty(self.type_info(*base)?).kind {
                    // Tuple components are numbered from 1.
                    TyKind::Tuple(components) => usize::try_from(i)
                        .ok()?
                        .checked_sub(1)
                        .and_then(|i| components.get(i).copied()),
                    _ => None,
                }
            }
            ExprKind::FnCall { target, .. } => match self.expr(*target).kind {
                ExprKind::Variable(sym) => self.symbol(sym).fn_sig()?.ret,
                _ => None,
            },
            ExprKind::Unary(_, operand) | ExprKind::Paren(operand) => self.type_info(*operand),
            ExprKind::ParenOp { .. }
            | ExprKind::IoCall { .. }
            | ExprKind::Binary(..)
            | ExprKind::MemberAccess { .. } => None,
        }
    }

    pub fn is_array_typed(&self, expr: ExprId) -> bool {
        self.type_info(expr).is_some_and(|ty| self.ty(ty).kind.is_array())
    }

    pub fn is_tuple_typed(&self, expr: ExprId) -> bool {
        self.type_info(expr).is_some_and(|ty| self.ty(ty).kind.is_tuple())
    }
}
