//! Type nodes in the AST

use crate::common::Line;

/// A type as written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub line: Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Int,
    Bool,
    String,
    Void,
}

impl Type {
    pub fn new(kind: TypeKind, line: Line) -> Self {
        Self { kind, line }
    }

    pub fn int(line: Line) -> Self {
        Self::new(TypeKind::Int, line)
    }

    pub fn bool(line: Line) -> Self {
        Self::new(TypeKind::Bool, line)
    }

    pub fn string(line: Line) -> Self {
        Self::new(TypeKind::String, line)
    }

    pub fn void(line: Line) -> Self {
        Self::new(TypeKind::Void, line)
    }
}

impl TypeKind {
    /// Surface keyword, e.g. `int`
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Int => "int",
            TypeKind::Bool => "bool",
            TypeKind::String => "string",
            TypeKind::Void => "void",
        }
    }

    /// Name used by the canonical dump, e.g. `IntType`
    pub fn canonical_name(self) -> &'static str {
        match self {
            TypeKind::Int => "IntType",
            TypeKind::Bool => "BoolType",
            TypeKind::String => "StringType",
            TypeKind::Void => "VoidType",
        }
    }
}
