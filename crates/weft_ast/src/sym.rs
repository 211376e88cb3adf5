use crate::{StmtId, SymbolId, TypeId};
use weft_span::{span::Span, symbols::Symbol};

#[derive(Clone, Debug, PartialEq)]
pub struct SymbolData {
    pub id: SymbolId,
    pub name: Symbol,
    pub span: Span,
    /// Declared type, when the declaration spells one out.
    pub ty: Option<TypeId>,
    pub kind: SymbolKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SymbolKind {
    Var,
    Fn(FnSig),
    /// Names a type, e.g. a class.
    Type,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct FnSig {
    pub params: Vec<SymbolId>,
    pub ret: Option<TypeId>,
    /// Absent for extern and built-in functions.
    pub body: Option<StmtId>,
}

impl SymbolData {
    pub fn is_type(&self) -> bool {
        matches!(self.kind, SymbolKind::Type)
    }

    pub fn is_fn(&self) -> bool {
        matches!(self.kind, SymbolKind::Fn(_))
    }

    pub fn fn_sig(&self) -> Option<&FnSig> {
        match &self.kind {
            SymbolKind::Fn(sig) => Some(sig),
            _ => None,
        }
    }
}
