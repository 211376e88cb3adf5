use crate::{Ast, ExprId, expr::ExprKind};
use std::fmt::Write;

impl Ast {
    /// Renders an expression as an S-expression, e.g.
    /// `(array-ref (var a) (int 3))`. Used in logs and test assertions.
    pub fn display_expr(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write_expr(id, &mut out);
        out
    }

    fn write_expr(&self, id: ExprId, out: &mut String) {
        let kind = &self.expr(id).kind;
        match kind {
            ExprKind::Literal(lit) => {
                let _ = write!(out, "{lit}");
                return;
            }
            ExprKind::Variable(sym) => {
                let _ = write!(out, "(var {})", self.symbol(*sym).name);
                return;
            }
            ExprKind::IoCall { kind: io, .. } => {
                let _ = write!(out, "(io {io}");
            }
            ExprKind::Binary(op, ..) => {
                let _ = write!(out, "(binary {op}");
            }
            ExprKind::Unary(op, _) => {
                let _ = write!(out, "(unary {op}");
            }
            ExprKind::MemberAccess { member, .. } => {
                let _ = write!(out, "(member {member}");
            }
            _ => {
                let _ = write!(out, "({}", kind.name());
            }
        }

        for child in kind.children() {
            out.push(' ');
            self.write_expr(child, out);
        }
        out.push(')');
    }
}
