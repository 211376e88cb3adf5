use weft_ast::{Ast, ExprId, ModuleId, NodeId, StmtId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Hooks run on a node before its children.
    PreOrder,
    /// Hooks run on a node after all of its children.
    PostOrder,
}

/// Hooks invoked by the walk functions below. A hook may replace the node it
/// is given through [`Ast::replace_expr`]; the walk then continues from the
/// replacement.
pub trait Traversal {
    type Error;

    const ORDER: TraversalOrder;

    fn process_stmt(&mut self, _ast: &mut Ast, _stmt: StmtId) -> Result<(), Self::Error> {
        Ok(())
    }

    fn process_expr(&mut self, _ast: &mut Ast, _expr: ExprId) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walks every top-level statement of a module, function bodies included.
pub fn walk_module<T: Traversal + ?Sized>(
    traversal: &mut T,
    ast: &mut Ast,
    module: ModuleId,
) -> Result<(), T::Error> {
    let mut index = 0;
    while let Some(&stmt) = ast.module(module).stmts.get(index) {
        walk_stmt(traversal, ast, stmt)?;
        index += 1;
    }

    Ok(())
}

pub fn walk_stmt<T: Traversal + ?Sized>(
    traversal: &mut T,
    ast: &mut Ast,
    stmt: StmtId,
) -> Result<(), T::Error> {
    if T::ORDER == TraversalOrder::PreOrder {
        traversal.process_stmt(ast, stmt)?;
    }

    let node = NodeId::Stmt(stmt);
    let mut index = 0;
    while let Some(&expr) = ast.expr_children(node).get(index) {
        walk_expr(traversal, ast, expr)?;
        index += 1;
    }

    let mut index = 0;
    while let Some(&child) = ast.stmt_children(node).get(index) {
        walk_stmt(traversal, ast, child)?;
        index += 1;
    }

    if T::ORDER == TraversalOrder::PostOrder {
        traversal.process_stmt(ast, stmt)?;
    }

    Ok(())
}

pub fn walk_expr<T: Traversal + ?Sized>(
    traversal: &mut T,
    ast: &mut Ast,
    expr: ExprId,
) -> Result<(), T::Error> {
    let mut expr = expr;
    if T::ORDER == TraversalOrder::PreOrder {
        traversal.process_expr(ast, expr)?;
        expr = ast.current(expr);
    }

    // Re-read the slot each time: a post-order hook on a child may have put a
    // new node there.
    let node = NodeId::Expr(expr);
    let mut index = 0;
    while let Some(&child) = ast.expr_children(node).get(index) {
        walk_expr(traversal, ast, child)?;
        index += 1;
    }

    if T::ORDER == TraversalOrder::PostOrder {
        traversal.process_expr(ast, expr)?;
    }

    Ok(())
}
