use crate::{
    AstError, ExprId, ModuleId, NodeId, Slot, StmtId, SymbolId, TY_BOOL, TY_INT, TY_REAL,
    TY_STRING, TypeId,
    expr::{Expr, ExprKind},
    stmts::{Stmt, StmtKind},
    sym::{SymbolData, SymbolKind},
    ty::{PrimitiveType, Ty, TyKind},
};
use std::collections::HashSet;
use tracing::trace;
use weft_index::IndexVec;
use weft_span::{span::Span, symbols::Symbol};

#[derive(Clone, Debug)]
pub struct Module {
    pub id: ModuleId,
    pub name: Symbol,
    /// File id used for diagnostic labels.
    pub file_id: usize,
    pub stmts: Vec<StmtId>,
}

/// Owns every node of the program. Nodes refer to each other by id; a node's
/// owner is recorded in its parent slot and the owner's child list names it back.
#[derive(Clone, Debug)]
pub struct Ast {
    exprs: IndexVec<ExprId, Expr>,
    stmts: IndexVec<StmtId, Stmt>,
    symbols: IndexVec<SymbolId, SymbolData>,
    types: IndexVec<TypeId, Ty>,
    modules: IndexVec<ModuleId, Module>,
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Ast {
    pub fn new() -> Self {
        let mut ast = Self {
            exprs: IndexVec::with_capacity(256),
            stmts: IndexVec::with_capacity(64),
            symbols: IndexVec::new(),
            types: IndexVec::new(),
            modules: IndexVec::new(),
        };

        for prim in PrimitiveType::ALL {
            ast.add_type(TyKind::Primitive(prim));
        }
        debug_assert_eq!(ast.types[TY_INT].kind, TyKind::Primitive(PrimitiveType::Int));
        debug_assert_eq!(ast.types[TY_REAL].kind, TyKind::Primitive(PrimitiveType::Real));
        debug_assert_eq!(ast.types[TY_BOOL].kind, TyKind::Primitive(PrimitiveType::Bool));
        debug_assert_eq!(ast.types[TY_STRING].kind, TyKind::Primitive(PrimitiveType::String));

        ast
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id]
    }

    pub fn get_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id)
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    pub fn get_stmt(&self, id: StmtId) -> Option<&Stmt> {
        self.stmts.get(id)
    }

    #[cfg(test)]
    pub(crate) fn stmt_mut_for_tests(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id]
    }

    pub fn symbol(&self, id: SymbolId) -> &SymbolData {
        &self.symbols[id]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut SymbolData {
        &mut self.symbols[id]
    }

    pub fn ty(&self, id: TypeId) -> &Ty {
        &self.types[id]
    }

    pub fn ty_mut(&mut self, id: TypeId) -> &mut Ty {
        &mut self.types[id]
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id]
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.indices().collect()
    }

    /// Number of expression nodes ever allocated, detached ones included.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn add_type(&mut self, kind: TyKind) -> TypeId {
        let id = self.types.next_index();
        self.types.push(Ty { id, kind })
    }

    pub fn add_symbol(
        &mut self,
        name: impl Into<Symbol>,
        span: Span,
        ty: Option<TypeId>,
        kind: SymbolKind,
    ) -> SymbolId {
        let id = self.symbols.next_index();
        self.symbols.push(SymbolData {
            id,
            name: name.into(),
            span,
            ty,
            kind,
        })
    }

    /// Allocates an expression and takes ownership of its children, which must
    /// not belong to any other node yet.
    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> Result<ExprId, AstError> {
        let children = kind.children();
        self.check_adoptable(&children, None)?;

        let id = self.exprs.next_index();
        self.exprs.push(Expr {
            id,
            kind,
            span,
            parent: None,
            detached: false,
            replaced_by: None,
        });
        self.adopt_exprs(NodeId::Expr(id), &children);

        Ok(id)
    }

    pub fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> Result<StmtId, AstError> {
        let exprs = kind.exprs();
        self.check_adoptable(&exprs, None)?;

        let id = self.stmts.next_index();
        self.stmts.push(Stmt {
            id,
            kind,
            span,
            parent: None,
        });

        let stmts = self.stmt_children(NodeId::Stmt(id));
        if let Err(err) = self.check_stmts_adoptable(&stmts) {
            // Nothing references the new statement yet; neutralise it so that it
            // does not claim the children.
            self.stmts[id].kind = StmtKind::Block(vec![]);
            return Err(err);
        }

        self.adopt_exprs(NodeId::Stmt(id), &exprs);
        self.adopt_stmts(NodeId::Stmt(id), &stmts);

        Ok(id)
    }

    pub fn add_module(
        &mut self,
        name: impl Into<Symbol>,
        file_id: usize,
        stmts: Vec<StmtId>,
    ) -> Result<ModuleId, AstError> {
        self.check_stmts_adoptable(&stmts)?;

        let id = self.modules.next_index();
        self.modules.push(Module {
            id,
            name: name.into(),
            file_id,
            stmts: stmts.clone(),
        });
        self.adopt_stmts(NodeId::Module(id), &stmts);

        Ok(id)
    }

    /// Expression children of `owner`, in slot order.
    pub fn expr_children(&self, owner: NodeId) -> Vec<ExprId> {
        match owner {
            NodeId::Module(_) => vec![],
            NodeId::Stmt(id) => self.stmts[id].kind.exprs(),
            NodeId::Expr(id) => self.exprs[id].kind.children(),
        }
    }

    /// Statement children of `owner`, in slot order. For a definition statement
    /// these are the bodies of the functions it defines.
    pub fn stmt_children(&self, owner: NodeId) -> Vec<StmtId> {
        match owner {
            NodeId::Module(id) => self.modules[id].stmts.clone(),
            NodeId::Expr(_) => vec![],
            NodeId::Stmt(id) => match &self.stmts[id].kind {
                StmtKind::Def(def) => def
                    .defs
                    .iter()
                    .filter_map(|d| self.symbols.get(d.sym)?.fn_sig()?.body)
                    .collect(),
                kind => kind.direct_stmts(),
            },
        }
    }

    /// First function introduced by a definition statement. `None` when `stmt`
    /// is not a definition or defines no function.
    pub fn fn_def(&self, stmt: StmtId) -> Option<SymbolId> {
        let StmtKind::Def(def) = &self.stmts.get(stmt)?.kind else {
            return None;
        };
        def.defs
            .iter()
            .map(|d| d.sym)
            .find(|&sym| self.symbols.get(sym).is_some_and(SymbolData::is_fn))
    }

    /// Returns the expression currently standing where `id` was, following
    /// replacements.
    pub fn current(&self, mut id: ExprId) -> ExprId {
        while let Some(next) = self.exprs[id].replaced_by {
            id = next;
        }
        id
    }

    /// Swaps `old` for a new node built from `kind`, at `old`'s exact position.
    ///
    /// Children of `kind` must be children of `old` or fresh, unowned nodes; they
    /// are moved to the new node. Children of `old` that the new node does not take
    /// are detached with their whole subtree. All checks happen before any
    /// mutation, so on error the tree is unchanged.
    pub fn replace_expr(&mut self, old: ExprId, kind: ExprKind) -> Result<ExprId, AstError> {
        let old_node = self.exprs.get(old).ok_or(AstError::UnknownExpr(old))?;
        if old_node.detached {
            return Err(AstError::Detached(NodeId::Expr(old)));
        }
        let parent = old_node.parent;
        let span = old_node.span;
        let old_children = old_node.kind.children();

        let children = kind.children();
        if children.contains(&old) {
            return Err(AstError::Detached(NodeId::Expr(old)));
        }
        self.check_adoptable(&children, Some(NodeId::Expr(old)))?;
        if let Some(slot) = parent {
            let actual = self.expr_children(slot.owner).get(slot.index).copied();
            if actual != Some(old) {
                return Err(AstError::BrokenParentLink {
                    child: NodeId::Expr(old),
                    recorded: parent,
                    actual: None,
                });
            }
        }

        let new = self.exprs.next_index();
        self.exprs.push(Expr {
            id: new,
            kind,
            span,
            parent,
            detached: false,
            replaced_by: None,
        });
        self.adopt_exprs(NodeId::Expr(new), &children);
        if let Some(slot) = parent {
            if let Some(place) = self.expr_slot_mut(slot) {
                *place = new;
            }
        }

        let kept: HashSet<ExprId> = children.into_iter().collect();
        for child in old_children.into_iter().filter(|c| !kept.contains(c)) {
            self.detach_expr(child);
        }
        let old_node = &mut self.exprs[old];
        old_node.detached = true;
        old_node.parent = None;
        old_node.replaced_by = Some(new);

        trace!("replaced expression {:?} with {:?}", old, new);
        Ok(new)
    }

    /// Detaches a node that was allocated but never adopted, together with its
    /// subtree. Owned nodes are refused.
    pub fn discard_expr(&mut self, id: ExprId) -> Result<(), AstError> {
        let node = self.exprs.get(id).ok_or(AstError::UnknownExpr(id))?;
        if let Some(slot) = node.parent {
            return Err(AstError::AlreadyOwned {
                child: NodeId::Expr(id),
                owner: slot.owner,
            });
        }

        self.detach_expr(id);
        Ok(())
    }

    fn expr_slot_mut(&mut self, slot: Slot) -> Option<&mut ExprId> {
        match slot.owner {
            NodeId::Module(_) => None,
            NodeId::Stmt(id) => self.stmts[id].kind.exprs_mut().into_iter().nth(slot.index),
            NodeId::Expr(id) => self.exprs[id].kind.children_mut().into_iter().nth(slot.index),
        }
    }

    fn detach_expr(&mut self, id: ExprId) {
        let node = &mut self.exprs[id];
        node.detached = true;
        node.parent = None;

        for child in node.kind.children() {
            if self.exprs[child].parent.map(|p| p.owner) == Some(NodeId::Expr(id)) {
                self.detach_expr(child);
            }
        }
    }

    fn check_adoptable(
        &self,
        children: &[ExprId],
        allowed_owner: Option<NodeId>,
    ) -> Result<(), AstError> {
        let mut seen = HashSet::new();
        for &child in children {
            if !seen.insert(child) {
                return Err(AstError::DuplicateChild(NodeId::Expr(child)));
            }
            let node = self.exprs.get(child).ok_or(AstError::UnknownExpr(child))?;
            if node.detached {
                return Err(AstError::Detached(NodeId::Expr(child)));
            }
            match node.parent {
                None => {}
                Some(slot) if Some(slot.owner) == allowed_owner => {}
                Some(slot) => {
                    return Err(AstError::AlreadyOwned {
                        child: NodeId::Expr(child),
                        owner: slot.owner,
                    });
                }
            }
        }

        Ok(())
    }

    fn check_stmts_adoptable(&self, stmts: &[StmtId]) -> Result<(), AstError> {
        let mut seen = HashSet::new();
        for &stmt in stmts {
            if !seen.insert(stmt) {
                return Err(AstError::DuplicateChild(NodeId::Stmt(stmt)));
            }
            let node = self.stmts.get(stmt).ok_or(AstError::UnknownStmt(stmt))?;
            if let Some(slot) = node.parent {
                return Err(AstError::AlreadyOwned {
                    child: NodeId::Stmt(stmt),
                    owner: slot.owner,
                });
            }
        }

        Ok(())
    }

    fn adopt_exprs(&mut self, owner: NodeId, children: &[ExprId]) {
        for (index, &child) in children.iter().enumerate() {
            self.exprs[child].parent = Some(Slot { owner, index });
        }
    }

    fn adopt_stmts(&mut self, owner: NodeId, children: &[StmtId]) {
        for (index, &child) in children.iter().enumerate() {
            self.stmts[child].parent = Some(Slot { owner, index });
        }
    }
}
