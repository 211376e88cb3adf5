#![allow(dead_code)]

use weft_ast::{
    Ast, ExprId, ModuleId, StmtId, SymbolId, TypeId,
    expr::{ExprKind, Lit},
    stmts::{DefStmt, StmtKind},
    sym::{FnSig, SymbolKind},
    ty::{ClassType, TyKind},
};
use weft_ctx::compiler::CompilerContext;
use weft_middle::options::CompilerOptions;
use weft_span::span::Span;

/// Builds a single-module program one top-level statement at a time.
pub struct Program {
    pub ast: Ast,
    stmts: Vec<StmtId>,
    offset: u32,
}

impl Program {
    pub fn new() -> Self {
        Self {
            ast: Ast::new(),
            stmts: vec![],
            offset: 0,
        }
    }

    /// Continues building in an existing tree, eg. to add a second module.
    pub fn with_ast(ast: Ast) -> Self {
        Self {
            ast,
            stmts: vec![],
            offset: 0,
        }
    }

    fn span(&mut self, len: u32) -> Span {
        let span = Span::new(self.offset, self.offset + len);
        self.offset += len + 1;
        span
    }

    pub fn symbol(&mut self, name: &str, ty: Option<TypeId>, kind: SymbolKind) -> SymbolId {
        let span = self.span(u32::try_from(name.len()).unwrap_or(1));
        self.ast.add_symbol(name, span, ty, kind)
    }

    pub fn var(&mut self, name: &str, ty: Option<TypeId>) -> ExprId {
        let sym = self.symbol(name, ty, SymbolKind::Var);
        self.use_sym(sym)
    }

    pub fn use_sym(&mut self, sym: SymbolId) -> ExprId {
        let span = self.ast.symbol(sym).span;
        self.ast.alloc_expr(ExprKind::Variable(sym), span).unwrap()
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        let span = self.span(1);
        self.ast.alloc_expr(ExprKind::Literal(Lit::Int(value)), span).unwrap()
    }

    pub fn string(&mut self, value: &str) -> ExprId {
        let span = self.span(2);
        self.ast
            .alloc_expr(ExprKind::Literal(Lit::Str(value.into())), span)
            .unwrap()
    }

    pub fn paren_op(&mut self, base: ExprId, args: Vec<ExprId>) -> ExprId {
        let start = self.ast.expr(base).span;
        let span = start.to(self.span(2));
        self.ast.alloc_expr(ExprKind::ParenOp { base, args }, span).unwrap()
    }

    pub fn array_of(&mut self, elem: TypeId) -> TypeId {
        self.ast.add_type(TyKind::Array { elem })
    }

    pub fn tuple_of(&mut self, components: Vec<TypeId>) -> TypeId {
        self.ast.add_type(TyKind::Tuple(components))
    }

    /// A function symbol with no body.
    pub fn function(&mut self, name: &str) -> SymbolId {
        self.symbol(name, None, SymbolKind::Fn(FnSig::default()))
    }

    /// A class whose constructor is defined by `constructor`, and the type symbol
    /// naming it.
    pub fn class(&mut self, name: &str, constructor: Option<StmtId>) -> (TypeId, SymbolId) {
        let ty = self.ast.add_type(TyKind::Class(ClassType {
            symbol: None,
            constructor,
        }));
        let sym = self.symbol(name, Some(ty), SymbolKind::Type);
        if let TyKind::Class(class) = &mut self.ast.ty_mut(ty).kind {
            class.symbol = Some(sym);
        }
        (ty, sym)
    }

    /// A top-level definition of `sym`.
    pub fn define(&mut self, sym: SymbolId) -> StmtId {
        let span = self.ast.symbol(sym).span;
        let stmt = self
            .ast
            .alloc_stmt(StmtKind::Def(DefStmt::single(sym)), span)
            .unwrap();
        self.stmts.push(stmt);
        stmt
    }

    pub fn top(&mut self, stmt: StmtId) -> StmtId {
        self.stmts.push(stmt);
        stmt
    }

    /// An expression statement at module level.
    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        let span = self.ast.expr(expr).span;
        let stmt = self.ast.alloc_stmt(StmtKind::Expr(expr), span).unwrap();
        self.top(stmt)
    }

    pub fn finish(mut self, name: &str, file_id: usize) -> (Ast, ModuleId) {
        let module = self
            .ast
            .add_module(name, file_id, std::mem::take(&mut self.stmts))
            .unwrap();
        (self.ast, module)
    }
}

pub fn cx() -> CompilerContext {
    CompilerContext::new(CompilerOptions::default())
}

pub fn best_effort_cx() -> CompilerContext {
    CompilerContext::new(CompilerOptions {
        ignore_errors: true,
        ..CompilerOptions::default()
    })
}

/// The single top-level expression of an expression statement, after rewriting.
pub fn stmt_expr(ast: &Ast, stmt: StmtId) -> ExprId {
    match ast.stmt(stmt).kind {
        StmtKind::Expr(expr) => expr,
        ref other => panic!("not an expression statement: {other:?}"),
    }
}
