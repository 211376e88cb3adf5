mod common;

use common::{Program, cx, stmt_expr};
use proptest::prelude::*;
use weft_ast::{
    TY_BOOL, TY_INT,
    expr::ExprKind,
    stmts::StmtKind,
    sym::{FnSig, SymbolKind},
};
use weft_ctx::{errors::Fatal, passes::specialize_paren_ops};
use weft_span::span::Span;

/// Declared type of the base variable in the exclusivity property.
#[derive(Debug, Clone, Copy)]
enum BaseType {
    Array,
    Tuple,
    /// A class whose constructor is `init`.
    Class,
    Untyped,
}

/// What the base variable's symbol names.
#[derive(Debug, Clone, Copy)]
enum BaseKind {
    Var,
    Fn,
    Type,
}

fn io_or_plain_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("write"), Just("writeln"), Just("read"), Just("f"), Just("value")]
}

fn base_type() -> impl Strategy<Value = BaseType> {
    prop_oneof![
        Just(BaseType::Array),
        Just(BaseType::Tuple),
        Just(BaseType::Class),
        Just(BaseType::Untyped)
    ]
}

fn base_kind() -> impl Strategy<Value = BaseKind> {
    prop_oneof![Just(BaseKind::Var), Just(BaseKind::Fn), Just(BaseKind::Type)]
}

proptest! {
    /// Whatever else holds of the base, only the highest-priority rule fires.
    #[test]
    fn highest_priority_rule_wins(
        name in io_or_plain_name(),
        ty in base_type(),
        kind in base_kind(),
        arg_count in 0usize..4,
    ) {
        let mut p = Program::new();
        let mut init = None;
        let declared = match ty {
            BaseType::Array => Some(p.array_of(TY_INT)),
            BaseType::Tuple => Some(p.tuple_of(vec![TY_INT, TY_BOOL])),
            BaseType::Class => {
                let ctor_fn = p.function("init");
                let ctor = p.define(ctor_fn);
                init = Some(ctor_fn);
                Some(p.class("C", Some(ctor)).0)
            }
            BaseType::Untyped => None,
        };
        let sym_kind = match kind {
            BaseKind::Var => SymbolKind::Var,
            BaseKind::Fn => SymbolKind::Fn(FnSig::default()),
            BaseKind::Type => SymbolKind::Type,
        };
        let sym = p.symbol(name, declared, sym_kind);
        let base = p.use_sym(sym);
        let args = (0..arg_count).map(|i| p.int(i64::try_from(i).unwrap_or(0))).collect();
        let call = p.paren_op(base, args);
        let stmt = p.expr_stmt(call);
        let (mut ast, module) = p.finish("main", 0);

        let result = specialize_paren_ops(&mut cx(), &mut ast, module);

        let is_io = matches!(name, "write" | "writeln" | "read");
        // `None` is the invalid class constructor error.
        let expected = match (ty, kind) {
            (BaseType::Array, _) => Some("array-ref"),
            (BaseType::Class, BaseKind::Type) => Some("call"),
            (BaseType::Class, _) => None,
            (BaseType::Tuple, _) => Some("tuple-select"),
            (BaseType::Untyped, _) if is_io => Some("io"),
            (BaseType::Untyped, BaseKind::Fn) => Some("call"),
            (BaseType::Untyped, _) => Some("paren-op"),
        };
        let new = stmt_expr(&ast, stmt);
        match expected {
            Some(expected) => {
                let stats = result.unwrap();
                prop_assert_eq!(ast.expr(new).kind.name(), expected);
                prop_assert_eq!(stats.resolved() + stats.unresolved, 1);
            }
            None => {
                prop_assert!(matches!(result, Err(Fatal::User { .. })), "expected Err(Fatal::User)");
                prop_assert_eq!(new, call);
            }
        }
        if let (Some(init), BaseKind::Type) = (init, kind) {
            let ExprKind::FnCall { target, .. } = ast.expr(new).kind else {
                return Err(TestCaseError::fail("expected a constructor call"));
            };
            prop_assert_eq!(&ast.expr(target).kind, &ExprKind::Variable(init));
        }
    }

    /// The replacement owns exactly the original arguments, in order, and the
    /// paren-op is gone from the tree.
    #[test]
    fn arguments_move_to_the_replacement(
        values in prop::collection::vec(any::<i64>(), 0..6),
        constructor in any::<bool>(),
    ) {
        let mut p = Program::new();
        let base = if constructor {
            let init = p.function("init");
            let ctor = p.define(init);
            let (_, class) = p.class("C", Some(ctor));
            p.use_sym(class)
        } else {
            let arr = p.array_of(TY_INT);
            p.var("a", Some(arr))
        };
        let args: Vec<_> = values.iter().map(|&v| p.int(v)).collect();
        let call = p.paren_op(base, args.clone());
        let stmt = p.expr_stmt(call);
        let (mut ast, module) = p.finish("main", 0);

        specialize_paren_ops(&mut cx(), &mut ast, module).unwrap();

        let new = stmt_expr(&ast, stmt);
        let reachable = ast.reachable_exprs(module);
        prop_assert!(!reachable.contains(&call));
        prop_assert!(ast.expr(call).is_detached());
        prop_assert_eq!(ast.current(call), new);
        let children = ast.expr(new).kind.children();
        prop_assert_eq!(&children[1..], args.as_slice());
        for arg in &args {
            prop_assert!(reachable.contains(arg));
        }
        if constructor {
            prop_assert!(!reachable.contains(&base));
        }
        prop_assert_eq!(ast.verify(module), Ok(()));
    }

    /// Running the pass again finds nothing left to classify.
    #[test]
    fn second_run_changes_nothing(depth in 1usize..4, unresolved in any::<bool>()) {
        let mut p = Program::new();
        let mut ty = TY_INT;
        for _ in 0..depth {
            ty = p.array_of(ty);
        }
        let mut expr = p.var("a", Some(ty));
        for i in 0..depth {
            let index = p.int(i64::try_from(i).unwrap_or(0));
            expr = p.paren_op(expr, vec![index]);
        }
        if unresolved {
            let x = p.var("x", None);
            expr = p.paren_op(x, vec![expr]);
        }
        let stmt = p.expr_stmt(expr);
        let (mut ast, module) = p.finish("main", 0);

        let first = specialize_paren_ops(&mut cx(), &mut ast, module).unwrap();
        let rendered = ast.display_expr(stmt_expr(&ast, stmt));
        let count = ast.expr_count();
        let second = specialize_paren_ops(&mut cx(), &mut ast, module).unwrap();

        prop_assert_eq!(first.array_refs, depth);
        prop_assert_eq!(second.resolved(), 0);
        prop_assert_eq!(second.unresolved, usize::from(unresolved));
        prop_assert_eq!(ast.display_expr(stmt_expr(&ast, stmt)), rendered);
        prop_assert_eq!(ast.expr_count(), count);
    }
}

#[test]
fn inner_index_is_resolved_before_outer() {
    let mut p = Program::new();
    let row = p.array_of(TY_INT);
    let grid = p.array_of(row);
    let a = p.var("a", Some(grid));
    let one = p.int(1);
    let inner = p.paren_op(a, vec![one]);
    let two = p.int(2);
    let outer = p.paren_op(inner, vec![two]);
    let stmt = p.expr_stmt(outer);
    let (mut ast, module) = p.finish("main", 0);

    let stats = specialize_paren_ops(&mut cx(), &mut ast, module).unwrap();

    let new = stmt_expr(&ast, stmt);
    assert_eq!(ast.display_expr(new), "(array-ref (array-ref (var a) (int 1)) (int 2))");
    assert_eq!(ast.type_info(new), Some(TY_INT));
    assert_eq!(stats.array_refs, 2);
}

#[test]
fn resolved_argument_is_kept_by_its_parent() {
    let mut p = Program::new();
    let f = p.function("f");
    let callee = p.use_sym(f);
    let arr = p.array_of(TY_INT);
    let a = p.var("a", Some(arr));
    let zero = p.int(0);
    let index = p.paren_op(a, vec![zero]);
    let call = p.paren_op(callee, vec![index]);
    let stmt = p.expr_stmt(call);
    let (mut ast, module) = p.finish("main", 0);

    specialize_paren_ops(&mut cx(), &mut ast, module).unwrap();

    assert_eq!(
        ast.display_expr(stmt_expr(&ast, stmt)),
        "(call (var f) (array-ref (var a) (int 0)))"
    );
    assert_eq!(ast.verify(module), Ok(()));
}

#[test]
fn function_bodies_are_walked_once() {
    let mut p = Program::new();
    let arr = p.array_of(TY_INT);
    let a = p.var("a", Some(arr));
    let one = p.int(1);
    let index = p.paren_op(a, vec![one]);
    let body_stmt = p.ast.alloc_stmt(StmtKind::Expr(index), Span::DUMMY).unwrap();
    let body = p
        .ast
        .alloc_stmt(StmtKind::Block(vec![body_stmt]), Span::DUMMY)
        .unwrap();
    let f = p.symbol(
        "f",
        None,
        SymbolKind::Fn(FnSig {
            body: Some(body),
            ..FnSig::default()
        }),
    );
    p.define(f);
    let (mut ast, module) = p.finish("main", 0);

    let stats = specialize_paren_ops(&mut cx(), &mut ast, module).unwrap();

    assert_eq!(stats.array_refs, 1);
    assert_eq!(
        ast.display_expr(stmt_expr(&ast, body_stmt)),
        "(array-ref (var a) (int 1))"
    );
}
