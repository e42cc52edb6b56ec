//! Declaration AST nodes

use super::{Expr, NodeList, Stmt, Type};
use crate::common::Line;

/// Package declaration: `package Name { fields methods }`
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub fields: NodeList<FieldDecl>,
    pub methods: NodeList<MethodDecl>,
    pub line: Line,
}

impl Package {
    pub fn new(
        name: impl Into<String>,
        fields: NodeList<FieldDecl>,
        methods: NodeList<MethodDecl>,
        line: Line,
    ) -> Self {
        Self {
            name: name.into(),
            fields,
            methods,
            line,
        }
    }
}

/// Package-level variable
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: Option<Type>,
    pub kind: FieldKind,
    pub line: Line,
}

/// Shape of a field declaration
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// `var x int;`
    Scalar,
    /// `var a [10]int;`
    Array(u32),
    /// `var x int = 3;`
    Initialized(Expr),
}

impl FieldDecl {
    pub fn scalar(name: impl Into<String>, ty: Option<Type>, line: Line) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: FieldKind::Scalar,
            line,
        }
    }

    pub fn array(name: impl Into<String>, ty: Option<Type>, size: u32, line: Line) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: FieldKind::Array(size),
            line,
        }
    }

    pub fn initialized(name: impl Into<String>, ty: Option<Type>, init: Expr, line: Line) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: FieldKind::Initialized(init),
            line,
        }
    }
}

/// `extern func name(int, string) void;`
#[derive(Debug, Clone, PartialEq)]
pub struct ExternFunction {
    pub name: String,
    pub return_type: Option<Type>,
    pub params: NodeList<ExternParam>,
    pub line: Line,
}

impl ExternFunction {
    pub fn new(
        name: impl Into<String>,
        return_type: Option<Type>,
        params: NodeList<ExternParam>,
        line: Line,
    ) -> Self {
        Self {
            name: name.into(),
            return_type,
            params,
            line,
        }
    }
}

/// Extern parameters are types only
#[derive(Debug, Clone, PartialEq)]
pub struct ExternParam {
    pub ty: Option<Type>,
    pub line: Line,
}

impl ExternParam {
    pub fn new(ty: Option<Type>, line: Line) -> Self {
        Self { ty, line }
    }
}

/// Method declaration with its body
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub return_type: Option<Type>,
    pub params: NodeList<Param>,
    pub body: Option<MethodBlock>,
    pub line: Line,
}

impl MethodDecl {
    pub fn new(
        name: impl Into<String>,
        return_type: Option<Type>,
        params: NodeList<Param>,
        body: Option<MethodBlock>,
        line: Line,
    ) -> Self {
        Self {
            name: name.into(),
            return_type,
            params,
            body,
            line,
        }
    }
}

/// Method parameter: `name type`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Option<Type>,
    pub line: Line,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Option<Type>, line: Line) -> Self {
        Self {
            name: name.into(),
            ty,
            line,
        }
    }
}

/// Local variable definition: `var name type;`
///
/// Unlike fields and parameters, a local may reuse a name visible from an
/// enclosing scope; analysis warns and rebinds it.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub name: String,
    pub ty: Option<Type>,
    pub line: Line,
}

impl VarDef {
    pub fn new(name: impl Into<String>, ty: Option<Type>, line: Line) -> Self {
        Self {
            name: name.into(),
            ty,
            line,
        }
    }
}

/// Top-level body of a method
///
/// Shares its scope layout with [`Block`](super::Block) but prints without
/// braces of its own; the method header supplies them.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodBlock {
    pub vars: NodeList<VarDef>,
    pub stmts: NodeList<Stmt>,
    pub line: Line,
}

impl MethodBlock {
    /// Missing lists become empty lists
    pub fn new(vars: Option<NodeList<VarDef>>, stmts: Option<NodeList<Stmt>>, line: Line) -> Self {
        Self {
            vars: vars.unwrap_or_default(),
            stmts: stmts.unwrap_or_default(),
            line,
        }
    }
}
