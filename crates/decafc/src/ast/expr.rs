//! Expression AST nodes

use super::NodeList;
use crate::common::Line;

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: Line,
}

impl Expr {
    pub fn new(kind: ExprKind, line: Line) -> Self {
        Self { kind, line }
    }

    pub fn int(value: i64, line: Line) -> Self {
        Self::new(ExprKind::IntConstant(value), line)
    }

    pub fn bool(value: bool, line: Line) -> Self {
        Self::new(ExprKind::BoolConstant(value), line)
    }

    /// String constant; `lexeme` is kept exactly as scanned, quotes included
    pub fn string(lexeme: impl Into<String>, line: Line) -> Self {
        Self::new(ExprKind::StringConstant(lexeme.into()), line)
    }

    pub fn char(value: char, line: Line) -> Self {
        Self::new(ExprKind::CharConstant(value), line)
    }

    pub fn variable(name: impl Into<String>, line: Line) -> Self {
        Self::new(
            ExprKind::Variable {
                name: name.into(),
                decl_line: Line::UNKNOWN,
            },
            line,
        )
    }

    pub fn array_loc(name: impl Into<String>, index: Expr, line: Line) -> Self {
        Self::new(
            ExprKind::ArrayLoc {
                name: name.into(),
                index: Box::new(index),
                decl_line: Line::UNKNOWN,
            },
            line,
        )
    }

    pub fn unary(op: UnaryOp, operand: Expr, line: Line) -> Self {
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            line,
        )
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr, line: Line) -> Self {
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            line,
        )
    }

    pub fn call(call: MethodCall, line: Line) -> Self {
        Self::new(ExprKind::MethodCall(call), line)
    }

    /// Declaration line recorded by analysis, for the kinds that refer to a name
    pub fn decl_line(&self) -> Option<Line> {
        match &self.kind {
            ExprKind::Variable { decl_line, .. } | ExprKind::ArrayLoc { decl_line, .. } => {
                Some(*decl_line)
            }
            ExprKind::MethodCall(call) => Some(call.decl_line),
            _ => None,
        }
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntConstant(i64),

    BoolConstant(bool),

    StringConstant(String),

    CharConstant(char),

    /// Use of a scalar name
    Variable { name: String, decl_line: Line },

    /// `a[index]`
    ArrayLoc {
        name: String,
        index: Box<Expr>,
        decl_line: Line,
    },

    /// `-x`, `!x`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// `a + b`, `x < y`, ...
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    MethodCall(MethodCall),
}

impl ExprKind {
    /// Outer name of this kind in the canonical dump
    pub fn canonical_kind(&self) -> &'static str {
        match self {
            ExprKind::IntConstant(_) => "NumberExpr",
            ExprKind::BoolConstant(_) => "BoolExpr",
            ExprKind::StringConstant(_) => "StringConstant",
            ExprKind::CharConstant(_) => "CharExpr",
            ExprKind::Variable { .. } => "VariableExpr",
            ExprKind::ArrayLoc { .. } => "ArrayLocExpr",
            ExprKind::Unary { .. } => "UnaryExpr",
            ExprKind::Binary { .. } => "BinaryExpr",
            ExprKind::MethodCall(_) => "MethodCall",
        }
    }
}

/// Call of a method or extern function
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub name: String,
    pub args: NodeList<Expr>,
    /// Declaration line of the callee, filled in during semantic analysis
    pub decl_line: Line,
    /// Declaration line of the first named argument, if one resolved
    pub arg_line: Line,
}

impl MethodCall {
    /// A missing argument list becomes an empty one
    pub fn new(name: impl Into<String>, args: Option<NodeList<Expr>>) -> Self {
        Self {
            name: name.into(),
            args: args.unwrap_or_default(),
            decl_line: Line::UNKNOWN,
            arg_line: Line::UNKNOWN,
        }
    }

    /// Line cited by the pretty printer's provenance comment
    ///
    /// A resolved variable or array argument takes precedence over the callee.
    pub fn provenance_line(&self) -> Line {
        if self.arg_line.is_known() {
            self.arg_line
        } else {
            self.decl_line
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Plus,
    Minus,
    Mult,
    Div,
    Mod,
    Leftshift,
    Rightshift,

    // Comparison
    Lt,
    Gt,
    Leq,
    Geq,
    Eq,
    Neq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Surface token
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Mult => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Leftshift => "<<",
            BinaryOp::Rightshift => ">>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Leq => "<=",
            BinaryOp::Geq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Label used by the canonical dump
    pub fn label(self) -> &'static str {
        match self {
            BinaryOp::Plus => "Plus",
            BinaryOp::Minus => "Minus",
            BinaryOp::Mult => "Mult",
            BinaryOp::Div => "Div",
            BinaryOp::Mod => "Mod",
            BinaryOp::Leftshift => "Leftshift",
            BinaryOp::Rightshift => "Rightshift",
            BinaryOp::Lt => "Lt",
            BinaryOp::Gt => "Gt",
            BinaryOp::Leq => "Leq",
            BinaryOp::Geq => "Geq",
            BinaryOp::Eq => "Eq",
            BinaryOp::Neq => "Neq",
            BinaryOp::And => "And",
            BinaryOp::Or => "Or",
        }
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq | BinaryOp::Neq => 3,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Leq | BinaryOp::Geq => 4,
            BinaryOp::Plus | BinaryOp::Minus => 5,
            BinaryOp::Mult
            | BinaryOp::Div
            | BinaryOp::Mod
            | BinaryOp::Leftshift
            | BinaryOp::Rightshift => 6,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Minus, // -x
    Not,   // !x
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UnaryOp::Minus => "UnaryMinus",
            UnaryOp::Not => "Not",
        }
    }
}
