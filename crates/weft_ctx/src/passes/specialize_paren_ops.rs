//! Classification of `base(args...)` expressions.
//!
//! The parser cannot tell an array index from a call, a constructor, a tuple
//! component or a built-in I/O routine, so it produces a paren-op for all of them.
//! This pass rewrites every paren-op whose meaning follows from the declared types
//! and symbols alone, and leaves the others to later passes.

use crate::{
    compiler::CompilerContext,
    errors::Fatal,
    passes::{
        Pass,
        errors::{ConstructorNotDefinition, InvalidClassConstructor, RewriteFailed},
    },
};
use std::ops::AddAssign;
use tracing::{debug, trace};
use weft_ast::{
    Ast, AstError, ExprId, ModuleId, NodeId, SymbolId,
    expr::{ExprKind, IoKind},
    stmts::StmtKind,
    sym::SymbolData,
    ty::ClassType,
};
use weft_middle::walker::{Traversal, TraversalOrder, walk_module};
use weft_span::span::Span;

/// How many paren-ops ended up in each form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParenOpStats {
    pub array_refs: usize,
    pub constructor_calls: usize,
    pub tuple_selects: usize,
    pub io_calls: usize,
    pub fn_calls: usize,
    pub unresolved: usize,
}

impl ParenOpStats {
    pub fn resolved(&self) -> usize {
        self.array_refs + self.constructor_calls + self.tuple_selects + self.io_calls + self.fn_calls
    }

    fn record(&mut self, form: Form) {
        match form {
            Form::ArrayRef => self.array_refs += 1,
            Form::Constructor(_) => self.constructor_calls += 1,
            Form::TupleSelect => self.tuple_selects += 1,
            Form::Io(_) => self.io_calls += 1,
            Form::Call => self.fn_calls += 1,
        }
    }
}

impl AddAssign for ParenOpStats {
    fn add_assign(&mut self, other: Self) {
        self.array_refs += other.array_refs;
        self.constructor_calls += other.constructor_calls;
        self.tuple_selects += other.tuple_selects;
        self.io_calls += other.io_calls;
        self.fn_calls += other.fn_calls;
        self.unresolved += other.unresolved;
    }
}

/// The form a paren-op is rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    ArrayRef,
    /// Call of the class constructor, the function symbol it names.
    Constructor(SymbolId),
    TupleSelect,
    Io(IoKind),
    Call,
}

impl Form {
    fn name(self) -> &'static str {
        match self {
            Form::ArrayRef => "array-ref",
            Form::Constructor(_) => "constructor call",
            Form::TupleSelect => "tuple-select",
            Form::Io(_) => "io",
            Form::Call => "call",
        }
    }
}

/// Rewrites the paren-ops of one module. Children are classified before their
/// parent, so a base that is itself a paren-op already has its final form.
pub struct ParenOpSpecializer<'cx> {
    cx: &'cx mut CompilerContext,
    file: usize,
    pub stats: ParenOpStats,
}

impl<'cx> ParenOpSpecializer<'cx> {
    pub fn new(cx: &'cx mut CompilerContext, file: usize) -> Self {
        Self {
            cx,
            file,
            stats: ParenOpStats::default(),
        }
    }

    /// Picks the form of the paren-op `expr` applied to `base`. The first matching
    /// rule wins; `None` leaves the expression as it is.
    fn classify(&mut self, ast: &Ast, expr: ExprId, base: ExprId) -> Result<Option<Form>, Fatal> {
        if ast.is_array_typed(base) {
            return Ok(Some(Form::ArrayRef));
        }

        let ExprKind::Variable(sym) = ast.expr(base).kind else {
            return Ok(None);
        };
        let var = ast.symbol(sym);
        let class = var.ty.and_then(|ty| ast.ty(ty).kind.as_class());

        Ok(match class {
            Some(class) => return self.classify_constructor(ast, expr, var, class),
            None if ast.is_tuple_typed(base) => Some(Form::TupleSelect),
            None => match IoKind::from_symbol(var.name) {
                Some(io) => Some(Form::Io(io)),
                None if var.is_fn() => Some(Form::Call),
                None => None,
            },
        })
    }

    fn classify_constructor(
        &mut self,
        ast: &Ast,
        expr: ExprId,
        var: &SymbolData,
        class: &ClassType,
    ) -> Result<Option<Form>, Fatal> {
        let at = (ast.expr(expr).span, self.file);

        if !var.is_type() {
            self.cx.user_fatal(
                InvalidClassConstructor {
                    span: at,
                    name: var.name.to_string(),
                    note: "call the class type itself to construct a new object",
                },
                at,
            )?;
            return Ok(None);
        }

        let def = class
            .constructor
            .filter(|&stmt| matches!(ast.get_stmt(stmt).map(|s| &s.kind), Some(StmtKind::Def(_))));
        let Some(def) = def else {
            return Err(self.cx.internal_fatal(
                ConstructorNotDefinition {
                    span: at,
                    class: var.name.to_string(),
                },
                Some(NodeId::Expr(expr)),
                at,
            ));
        };

        // A definition without a function leaves the call for later passes.
        Ok(ast.fn_def(def).map(Form::Constructor))
    }

    fn rewrite_failed(&mut self, ast: &Ast, expr: ExprId, form: Form, err: &AstError) -> Fatal {
        let span = ast.get_expr(expr).map_or(Span::DUMMY, |e| e.span);
        let at = (span, self.file);

        self.cx.internal_fatal(
            RewriteFailed {
                span: at,
                form: form.name(),
                error: err.to_string(),
            },
            Some(NodeId::Expr(expr)),
            at,
        )
    }
}

impl Traversal for ParenOpSpecializer<'_> {
    type Error = Fatal;
    const ORDER: TraversalOrder = TraversalOrder::PostOrder;

    fn process_expr(&mut self, ast: &mut Ast, expr: ExprId) -> Result<(), Fatal> {
        let ExprKind::ParenOp { base, args } = &ast.expr(expr).kind else {
            return Ok(());
        };
        let (base, args) = (*base, args.clone());

        let Some(form) = self.classify(ast, expr, base)? else {
            trace!("{:?} left unresolved: {}", expr, ast.display_expr(expr));
            self.stats.unresolved += 1;
            return Ok(());
        };

        let mut fresh = None;
        let kind = match form {
            Form::ArrayRef => ExprKind::ArrayRef { base, args },
            Form::Constructor(ctor) => {
                let span = ast.expr(base).span;
                let target = ast
                    .alloc_expr(ExprKind::Variable(ctor), span)
                    .map_err(|err| self.rewrite_failed(ast, expr, form, &err))?;
                fresh = Some(target);
                ExprKind::FnCall { target, args }
            }
            Form::TupleSelect => ExprKind::TupleSelect { base, args },
            Form::Io(kind) => ExprKind::IoCall { kind, base, args },
            Form::Call => ExprKind::FnCall { target: base, args },
        };

        let new = match ast.replace_expr(expr, kind) {
            Ok(new) => new,
            Err(err) => {
                // The constructor target was never adopted.
                if let Some(target) = fresh {
                    let _ = ast.discard_expr(target);
                }
                return Err(self.rewrite_failed(ast, expr, form, &err));
            }
        };
        self.stats.record(form);
        trace!("{:?} -> {:?} {}: {}", expr, new, form.name(), ast.display_expr(new));

        Ok(())
    }
}

/// Classifies every paren-op of `module`, returning how each was resolved.
pub fn specialize_paren_ops(
    cx: &mut CompilerContext,
    ast: &mut Ast,
    module: ModuleId,
) -> Result<ParenOpStats, Fatal> {
    let file = ast.module(module).file_id;
    let mut specializer = ParenOpSpecializer::new(cx, file);
    walk_module(&mut specializer, ast, module)?;

    let stats = specializer.stats;
    debug!(
        "specialized {} paren-ops in module {:?}, {} left unresolved",
        stats.resolved(),
        ast.module(module).name,
        stats.unresolved
    );
    Ok(stats)
}

#[derive(Debug, Default)]
pub struct SpecializeParenOps {
    /// Totals over every module run so far.
    pub stats: ParenOpStats,
}

impl Pass for SpecializeParenOps {
    fn name(&self) -> &'static str {
        "specialize-paren-ops"
    }

    fn run(&mut self, cx: &mut CompilerContext, ast: &mut Ast, module: ModuleId) -> Result<(), Fatal> {
        self.stats += specialize_paren_ops(cx, ast, module)?;
        Ok(())
    }
}
