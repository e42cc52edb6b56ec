//! Statement AST nodes

use super::{Expr, ExprKind, MethodCall, NodeList, VarDef};
use crate::common::{CompileError, CompileResult, Line};

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: Line,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: Line) -> Self {
        Self { kind, line }
    }

    pub fn block(block: Block) -> Self {
        let line = block.line;
        Self::new(StmtKind::Block(block), line)
    }

    pub fn if_else(condition: Expr, then_block: Block, else_block: Option<Block>, line: Line) -> Self {
        Self::new(
            StmtKind::If {
                condition,
                then_block,
                else_block,
            },
            line,
        )
    }

    pub fn while_loop(condition: Expr, body: Block, line: Line) -> Self {
        Self::new(StmtKind::While { condition, body }, line)
    }

    pub fn for_loop(
        init: NodeList<ForClause>,
        condition: Option<Expr>,
        update: NodeList<ForClause>,
        body: Block,
        line: Line,
    ) -> Self {
        Self::new(
            StmtKind::For {
                init,
                condition,
                update,
                body,
            },
            line,
        )
    }

    pub fn ret(value: Option<Expr>, line: Line) -> Self {
        Self::new(StmtKind::Return(value), line)
    }

    pub fn break_stmt(line: Line) -> Self {
        Self::new(StmtKind::Break, line)
    }

    pub fn continue_stmt(line: Line) -> Self {
        Self::new(StmtKind::Continue, line)
    }

    pub fn call(call: MethodCall, line: Line) -> Self {
        Self::new(StmtKind::MethodCall(call), line)
    }

    /// Build an assignment from an already-converted target
    pub fn assign(target: Lvalue, value: Expr, line: Line) -> Self {
        let kind = match target {
            Lvalue::Variable(name) => StmtKind::Assign(Assign::new(name, value)),
            Lvalue::ArrayLoc { name, index } => {
                StmtKind::AssignArrayLoc(AssignArrayLoc::new(name, index, value))
            }
        };
        Self::new(kind, line)
    }

    /// Build an assignment from a parsed location expression
    ///
    /// The expression is consumed; only its name (and index) survive.
    pub fn assign_expr(target: Expr, value: Expr, line: Line) -> CompileResult<Self> {
        Ok(Self::assign(Lvalue::try_from(target)?, value, line))
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Nested block: `{ vars stmts }`
    Block(Block),

    /// `if (cond) { ... } [else { ... }]`
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },

    /// `while (cond) { ... }`
    While { condition: Expr, body: Block },

    /// `for (init; cond; update) { ... }`
    For {
        init: NodeList<ForClause>,
        condition: Option<Expr>,
        update: NodeList<ForClause>,
        body: Block,
    },

    /// `return [expr];`
    Return(Option<Expr>),

    Break,

    Continue,

    /// `x = expr;`
    Assign(Assign),

    /// `a[i] = expr;`
    AssignArrayLoc(AssignArrayLoc),

    /// Method call used as a statement
    MethodCall(MethodCall),
}

impl StmtKind {
    /// Node name used in the canonical dump
    pub fn canonical_kind(&self) -> &'static str {
        match self {
            StmtKind::Block(_) => "Block",
            StmtKind::If { .. } => "IfStmt",
            StmtKind::While { .. } => "WhileStmt",
            StmtKind::For { .. } => "ForStmt",
            StmtKind::Return(_) => "ReturnStmt",
            StmtKind::Break => "BreakStmt",
            StmtKind::Continue => "ContinueStmt",
            StmtKind::Assign(_) => "AssignVar",
            StmtKind::AssignArrayLoc(_) => "AssignArrayLoc",
            StmtKind::MethodCall(_) => "MethodCall",
        }
    }
}

/// Initializer or update step in a `for` header
///
/// Only assignments and calls fit on the header line.
#[derive(Debug, Clone, PartialEq)]
pub enum ForClause {
    Assign(Assign),
    AssignArrayLoc(AssignArrayLoc),
    MethodCall(MethodCall),
}

impl ForClause {
    pub fn assign(target: Lvalue, value: Expr) -> Self {
        match target {
            Lvalue::Variable(name) => ForClause::Assign(Assign::new(name, value)),
            Lvalue::ArrayLoc { name, index } => {
                ForClause::AssignArrayLoc(AssignArrayLoc::new(name, index, value))
            }
        }
    }
}

impl TryFrom<Stmt> for ForClause {
    type Error = CompileError;

    fn try_from(stmt: Stmt) -> CompileResult<Self> {
        match stmt.kind {
            StmtKind::Assign(assign) => Ok(ForClause::Assign(assign)),
            StmtKind::AssignArrayLoc(assign) => Ok(ForClause::AssignArrayLoc(assign)),
            StmtKind::MethodCall(call) => Ok(ForClause::MethodCall(call)),
            other => Err(CompileError::invalid_for_clause(other.canonical_kind(), stmt.line)),
        }
    }
}

/// Scalar assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: String,
    pub value: Expr,
    /// Declaration line of `name`, filled in during semantic analysis
    pub decl_line: Line,
}

impl Assign {
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: name.into(),
            value,
            decl_line: Line::UNKNOWN,
        }
    }
}

/// Array element assignment
#[derive(Debug, Clone, PartialEq)]
pub struct AssignArrayLoc {
    pub name: String,
    pub index: Expr,
    pub value: Expr,
    /// Declaration line of `name`, filled in during semantic analysis
    pub decl_line: Line,
}

impl AssignArrayLoc {
    pub fn new(name: impl Into<String>, index: Expr, value: Expr) -> Self {
        Self {
            name: name.into(),
            index,
            value,
            decl_line: Line::UNKNOWN,
        }
    }
}

/// Block: local declarations followed by statements
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub vars: NodeList<VarDef>,
    pub stmts: NodeList<Stmt>,
    pub line: Line,
}

impl Block {
    /// Missing lists become empty lists
    pub fn new(vars: Option<NodeList<VarDef>>, stmts: Option<NodeList<Stmt>>, line: Line) -> Self {
        Self {
            vars: vars.unwrap_or_default(),
            stmts: stmts.unwrap_or_default(),
            line,
        }
    }
}

/// Assignment target, as handed over by the parser
///
/// Only exists between parsing a location and building the assignment
/// statement; it is never stored in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Lvalue {
    Variable(String),
    ArrayLoc { name: String, index: Expr },
}

impl TryFrom<Expr> for Lvalue {
    type Error = CompileError;

    fn try_from(expr: Expr) -> CompileResult<Self> {
        match expr.kind {
            ExprKind::Variable { name, .. } => Ok(Lvalue::Variable(name)),
            ExprKind::ArrayLoc { name, index, .. } => Ok(Lvalue::ArrayLoc { name, index: *index }),
            other => Err(CompileError::invalid_lvalue(other.canonical_kind(), expr.line)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_consumes_variable_wrapper() {
        let target = Expr::variable("x", Line::new(4));
        let stmt = Stmt::assign_expr(target, Expr::int(1, Line::new(4)), Line::new(4)).unwrap();

        match stmt.kind {
            StmtKind::Assign(assign) => {
                assert_eq!(assign.name, "x");
                assert_eq!(assign.decl_line, Line::UNKNOWN);
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_array_target_becomes_array_assignment() {
        let target = Expr::array_loc("a", Expr::int(2, Line::new(1)), Line::new(1));
        let stmt = Stmt::assign_expr(target, Expr::int(7, Line::new(1)), Line::new(1)).unwrap();

        assert!(matches!(stmt.kind, StmtKind::AssignArrayLoc(ref a) if a.name == "a"));
    }

    #[test]
    fn test_constant_target_is_rejected() {
        let err = Stmt::assign_expr(Expr::int(1, Line::new(2)), Expr::int(2, Line::new(2)), Line::new(2))
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidLvalue { found: "NumberExpr", .. }
        ));
    }

    #[test]
    fn test_for_clause_accepts_assignments_and_calls() {
        let line = Line::new(5);
        let assign = Stmt::assign(Lvalue::Variable("i".into()), Expr::int(0, line), line);
        let call = Stmt::call(MethodCall::new("tick", None), line);

        assert!(matches!(ForClause::try_from(assign), Ok(ForClause::Assign(a)) if a.name == "i"));
        assert!(matches!(ForClause::try_from(call), Ok(ForClause::MethodCall(c)) if c.name == "tick"));
    }

    #[test]
    fn test_for_clause_rejects_compound_statements() {
        let body = Block::new(None, None, Line::new(6));
        let err = ForClause::try_from(Stmt::while_loop(Expr::bool(true, Line::new(6)), body, Line::new(6)))
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidForClause { found: "WhileStmt", .. }
        ));
        assert!(ForClause::try_from(Stmt::break_stmt(Line::new(6))).is_err());
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let block = Block::new(None, None, Line::new(3));
        assert!(block.vars.is_empty());
        assert!(block.stmts.is_empty());
    }
}
