use crate::{StmtId, SymbolId, TypeId};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct Ty {
    pub id: TypeId,
    pub kind: TyKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TyKind {
    Primitive(PrimitiveType),
    /// Array type eg. `[1..n] T`; the domain is irrelevant before inference.
    Array { elem: TypeId },
    /// Tuple type eg. `(int, real)`
    Tuple(Vec<TypeId>),
    Class(ClassType),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    Real,
    Bool,
    String,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 4] = [
        PrimitiveType::Int,
        PrimitiveType::Real,
        PrimitiveType::Bool,
        PrimitiveType::String,
    ];
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Int => write!(f, "int"),
            PrimitiveType::Real => write!(f, "real"),
            PrimitiveType::Bool => write!(f, "bool"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ClassType {
    /// The type symbol naming this class.
    pub symbol: Option<SymbolId>,
    /// Statement defining the constructor. Expected to be a definition statement
    /// whose first function is the constructor.
    pub constructor: Option<StmtId>,
}

impl TyKind {
    pub fn is_array(&self) -> bool {
        matches!(self, TyKind::Array { .. })
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, TyKind::Tuple(_))
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            TyKind::Class(class) => Some(class),
            _ => None,
        }
    }
}
