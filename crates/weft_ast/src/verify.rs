use crate::{Ast, AstError, ExprId, ModuleId, NodeId, Slot, StmtId};
use std::collections::HashSet;

impl Ast {
    /// Checks the ownership discipline of a module: every reachable node is
    /// reached exactly once, is not detached, and records the slot it was reached
    /// through as its parent.
    pub fn verify(&self, module: ModuleId) -> Result<(), AstError> {
        let mut seen = HashSet::new();
        for stmt in self.stmt_children(NodeId::Module(module)) {
            self.verify_stmt(stmt, &mut seen)?;
        }

        Ok(())
    }

    fn verify_stmt(&self, id: StmtId, seen: &mut HashSet<NodeId>) -> Result<(), AstError> {
        let node = NodeId::Stmt(id);
        if !seen.insert(node) {
            return Err(AstError::ReachedTwice(node));
        }

        for (index, expr) in self.expr_children(node).into_iter().enumerate() {
            self.verify_link(NodeId::Expr(expr), self.expr(expr).parent(), Slot::new(node, index))?;
            self.verify_expr(expr, seen)?;
        }
        for (index, stmt) in self.stmt_children(node).into_iter().enumerate() {
            self.verify_link(NodeId::Stmt(stmt), self.stmt(stmt).parent(), Slot::new(node, index))?;
            self.verify_stmt(stmt, seen)?;
        }

        Ok(())
    }

    fn verify_expr(&self, id: ExprId, seen: &mut HashSet<NodeId>) -> Result<(), AstError> {
        let node = NodeId::Expr(id);
        if !seen.insert(node) {
            return Err(AstError::ReachedTwice(node));
        }
        if self.expr(id).is_detached() {
            return Err(AstError::Detached(node));
        }

        for (index, child) in self.expr(id).kind.children().into_iter().enumerate() {
            self.verify_link(NodeId::Expr(child), self.expr(child).parent(), Slot::new(node, index))?;
            self.verify_expr(child, seen)?;
        }

        Ok(())
    }

    fn verify_link(&self, child: NodeId, recorded: Option<Slot>, actual: Slot) -> Result<(), AstError> {
        if recorded == Some(actual) {
            Ok(())
        } else {
            Err(AstError::BrokenParentLink {
                child,
                recorded,
                actual: Some(actual),
            })
        }
    }

    /// Every expression reachable from the module's statements, in pre-order.
    pub fn reachable_exprs(&self, module: ModuleId) -> Vec<ExprId> {
        fn from_expr(ast: &Ast, id: ExprId, out: &mut Vec<ExprId>) {
            out.push(id);
            for child in ast.expr(id).kind.children() {
                from_expr(ast, child, out);
            }
        }

        fn from_stmt(ast: &Ast, id: StmtId, out: &mut Vec<ExprId>) {
            for expr in ast.expr_children(NodeId::Stmt(id)) {
                from_expr(ast, expr, out);
            }
            for stmt in ast.stmt_children(NodeId::Stmt(id)) {
                from_stmt(ast, stmt, out);
            }
        }

        let mut out = Vec::new();
        for stmt in self.stmt_children(NodeId::Module(module)) {
            from_stmt(self, stmt, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Ast, AstError, NodeId,
        expr::{ExprKind, Lit},
        stmts::StmtKind,
        sym::SymbolKind,
    };
    use weft_span::span::Span;

    #[test]
    fn replaced_tree_still_verifies() {
        let mut ast = Ast::new();
        let sym = ast.add_symbol("a", Span::DUMMY, None, SymbolKind::Var);
        let base = ast.alloc_expr(ExprKind::Variable(sym), Span::DUMMY).unwrap();
        let arg = ast.alloc_expr(ExprKind::Literal(Lit::Int(1)), Span::DUMMY).unwrap();
        let paren = ast
            .alloc_expr(ExprKind::ParenOp { base, args: vec![arg] }, Span::DUMMY)
            .unwrap();
        let stmt = ast.alloc_stmt(StmtKind::Expr(paren), Span::DUMMY).unwrap();
        let module = ast.add_module("m", 0, vec![stmt]).unwrap();

        let new = ast
            .replace_expr(paren, ExprKind::ArrayRef { base, args: vec![arg] })
            .unwrap();

        assert_eq!(ast.verify(module), Ok(()));
        assert_eq!(ast.reachable_exprs(module), [new, base, arg]);
    }

    #[test]
    fn unlinked_statement_is_reported() {
        let mut ast = Ast::new();
        let lit = ast.alloc_expr(ExprKind::Literal(Lit::Bool(true)), Span::DUMMY).unwrap();
        let stmt = ast.alloc_stmt(StmtKind::Expr(lit), Span::DUMMY).unwrap();
        let module = ast.add_module("m", 0, vec![stmt]).unwrap();
        // Simulate a pass that rewired a child list without updating the child.
        let other = ast.alloc_expr(ExprKind::Literal(Lit::Bool(false)), Span::DUMMY).unwrap();
        let mut broken = ast.clone();
        if let StmtKind::Expr(e) = &mut broken.stmt_mut_for_tests(stmt).kind {
            *e = other;
        }

        assert!(matches!(
            broken.verify(module),
            Err(AstError::BrokenParentLink { child: NodeId::Expr(c), .. }) if c == other
        ));
    }
}
