//! Semantic analyzer - scoped name resolution

use tracing::debug;

use super::diagnostic::{DeclWhat, Diagnostic, SemanticIssue, Severity, UseWhat};
use super::scope::{SymbolStack, TypeTag};
use super::AnalyzerConfig;
use crate::ast::*;
use crate::common::Line;

/// Result of one analysis pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.severity == severity)
    }
}

/// Semantic analyzer
///
/// Walks the tree once, opening and closing scopes to mirror the block
/// structure, and records a diagnostic for every declaration conflict or
/// unresolved name. Resolved declaration lines are written back into the
/// `decl_line` fields of variable, array, assignment and call nodes.
pub struct SemanticAnalyzer {
    symbols: SymbolStack,
    diagnostics: Vec<Diagnostic>,
    config: AnalyzerConfig,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            symbols: SymbolStack::new(),
            diagnostics: Vec::new(),
            config,
        }
    }

    /// Analyze a whole program
    pub fn analyze(&mut self, program: &mut Program) -> Analysis {
        debug!(depth = self.symbols.depth(), "semantic analysis started");

        self.enter_scope();
        for ext in &mut program.externs {
            self.analyze_extern(ext);
        }
        if let Some(package) = &mut program.package {
            self.analyze_package(package);
        }
        self.exit_scope();

        let analysis = Analysis {
            diagnostics: std::mem::take(&mut self.diagnostics),
        };
        debug!(
            depth = self.symbols.depth(),
            errors = analysis.errors().count(),
            warnings = analysis.warnings().count(),
            "semantic analysis finished"
        );
        analysis
    }

    /// Symbol stack as left by the last pass
    pub fn symbols(&self) -> &SymbolStack {
        &self.symbols
    }

    // ==================== Scopes ====================

    fn enter_scope(&mut self) {
        self.symbols.push();
    }

    fn exit_scope(&mut self) {
        if self.symbols.pop().is_none() {
            self.diagnostics.push(Diagnostic::warning(SemanticIssue::EmptyScopePop));
        }
    }

    // ==================== Declarations ====================

    /// Insert into the innermost scope, reporting a conflict there as an error
    fn declare(&mut self, what: DeclWhat, name: &str, ty: TypeTag, line: Line, report: bool) {
        match self.symbols.insert(name, ty, line) {
            Ok(()) => {
                if report {
                    self.defined(name, ty, line);
                }
            }
            Err(existing) => self.diagnostics.push(Diagnostic::error(SemanticIssue::Redeclared {
                what,
                name: name.to_string(),
                line,
                previous: existing.line,
            })),
        }
    }

    fn defined(&mut self, name: &str, ty: TypeTag, line: Line) {
        if self.config.report_definitions {
            self.diagnostics.push(Diagnostic::note(SemanticIssue::Defined {
                name: name.to_string(),
                ty,
                line,
            }));
        }
    }

    fn analyze_extern(&mut self, ext: &ExternFunction) {
        let ty = TypeTag::classify(ext.return_type.as_ref());
        self.declare(DeclWhat::ExternFunction, &ext.name, ty, ext.line, true);
    }

    fn analyze_package(&mut self, package: &mut Package) {
        self.enter_scope();
        for field in &mut package.fields {
            self.analyze_field(field);
        }
        for method in &mut package.methods {
            self.analyze_method(method);
        }
        self.exit_scope();
    }

    fn analyze_field(&mut self, field: &mut FieldDecl) {
        let ty = TypeTag::classify(field.ty.as_ref());
        let what = match field.kind {
            FieldKind::Scalar => DeclWhat::Field,
            FieldKind::Array(_) => DeclWhat::ArrayField,
            FieldKind::Initialized(_) => DeclWhat::GlobalVariable,
        };
        self.declare(what, &field.name, ty, field.line, true);

        if let FieldKind::Initialized(init) = &mut field.kind {
            self.analyze_expr(init);
        }
    }

    fn analyze_method(&mut self, method: &mut MethodDecl) {
        let ty = TypeTag::classify(method.return_type.as_ref());
        self.declare(DeclWhat::Method, &method.name, ty, method.line, false);

        // Parameters and body share this scope
        self.enter_scope();
        for param in &method.params {
            let ty = TypeTag::classify(param.ty.as_ref());
            self.declare(DeclWhat::Parameter, &param.name, ty, param.line, true);
        }
        if let Some(body) = &mut method.body {
            self.analyze_method_block(body);
        }
        self.exit_scope();
    }

    /// Locals may rebind any visible name; that is only a warning
    fn analyze_var_def(&mut self, var: &VarDef) {
        let ty = TypeTag::classify(var.ty.as_ref());

        if let Some(previous) = self.symbols.lookup(&var.name).map(|sym| sym.line) {
            self.diagnostics.push(Diagnostic::warning(SemanticIssue::Redefinition {
                name: var.name.clone(),
                line: var.line,
                previous,
            }));
            self.symbols.overwrite(&var.name, ty, var.line);
        } else {
            // Not visible anywhere, so this cannot collide
            let _ = self.symbols.insert(&var.name, ty, var.line);
        }

        self.defined(&var.name, ty, var.line);
    }

    // ==================== Blocks and statements ====================

    fn analyze_method_block(&mut self, block: &mut MethodBlock) {
        self.enter_scope();
        for var in &block.vars {
            self.analyze_var_def(var);
        }
        for stmt in &mut block.stmts {
            self.analyze_stmt(stmt);
        }
        self.exit_scope();
    }

    fn analyze_block(&mut self, block: &mut Block) {
        self.enter_scope();
        for var in &block.vars {
            self.analyze_var_def(var);
        }
        for stmt in &mut block.stmts {
            self.analyze_stmt(stmt);
        }
        self.exit_scope();
    }

    fn analyze_stmt(&mut self, stmt: &mut Stmt) {
        let line = stmt.line;
        match &mut stmt.kind {
            StmtKind::Block(block) => self.analyze_block(block),
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                self.analyze_expr(condition);
                self.analyze_block(then_block);
                if let Some(else_block) = else_block {
                    self.analyze_block(else_block);
                }
            }
            StmtKind::While { condition, body } => {
                self.enter_scope();
                self.analyze_expr(condition);
                self.analyze_block(body);
                self.exit_scope();
            }
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => {
                self.enter_scope();
                for clause in init {
                    self.analyze_for_clause(clause, line);
                }
                if let Some(condition) = condition {
                    self.analyze_expr(condition);
                }
                for clause in update {
                    self.analyze_for_clause(clause, line);
                }
                self.analyze_block(body);
                self.exit_scope();
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.analyze_expr(value);
                }
            }
            StmtKind::Break | StmtKind::Continue => {}
            StmtKind::Assign(assign) => self.analyze_assign(assign, line),
            StmtKind::AssignArrayLoc(assign) => self.analyze_array_assign(assign, line),
            StmtKind::MethodCall(call) => self.analyze_call(call, line),
        }
    }

    /// Header clauses carry no line of their own; they use the loop's
    fn analyze_for_clause(&mut self, clause: &mut ForClause, line: Line) {
        match clause {
            ForClause::Assign(assign) => self.analyze_assign(assign, line),
            ForClause::AssignArrayLoc(assign) => self.analyze_array_assign(assign, line),
            ForClause::MethodCall(call) => self.analyze_call(call, line),
        }
    }

    fn analyze_assign(&mut self, assign: &mut Assign, line: Line) {
        assign.decl_line = self.resolve(UseWhat::Variable, &assign.name, line);
        self.analyze_expr(&mut assign.value);
    }

    fn analyze_array_assign(&mut self, assign: &mut AssignArrayLoc, line: Line) {
        assign.decl_line = self.resolve(UseWhat::Array, &assign.name, line);
        self.analyze_expr(&mut assign.index);
        self.analyze_expr(&mut assign.value);
    }

    // ==================== Expressions ====================

    fn analyze_expr(&mut self, expr: &mut Expr) {
        let line = expr.line;
        match &mut expr.kind {
            ExprKind::IntConstant(_)
            | ExprKind::BoolConstant(_)
            | ExprKind::StringConstant(_)
            | ExprKind::CharConstant(_) => {}
            ExprKind::Variable { name, decl_line } => {
                *decl_line = self.resolve(UseWhat::Variable, name.as_str(), line);
            }
            ExprKind::ArrayLoc {
                name,
                index,
                decl_line,
            } => {
                *decl_line = self.resolve(UseWhat::ArrayVariable, name.as_str(), line);
                self.analyze_expr(index);
            }
            ExprKind::Unary { operand, .. } => self.analyze_expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.analyze_expr(left);
                self.analyze_expr(right);
            }
            ExprKind::MethodCall(call) => self.analyze_call(call, line),
        }
    }

    fn analyze_call(&mut self, call: &mut MethodCall, line: Line) {
        call.decl_line = self.resolve(UseWhat::Method, &call.name, line);

        for arg in &mut call.args {
            self.analyze_expr(arg);
        }

        // The first variable or array argument decides the printed provenance
        call.arg_line = call
            .args
            .iter()
            .find(|arg| matches!(arg.kind, ExprKind::Variable { .. } | ExprKind::ArrayLoc { .. }))
            .and_then(Expr::decl_line)
            .unwrap_or(Line::UNKNOWN);
    }

    /// Look a name up, returning its declaration line or reporting it missing
    fn resolve(&mut self, what: UseWhat, name: &str, line: Line) -> Line {
        if let Some(sym) = self.symbols.lookup(name) {
            return sym.line;
        }
        self.diagnostics.push(Diagnostic::error(SemanticIssue::Undeclared {
            what,
            name: name.to_string(),
            line,
        }));
        Line::UNKNOWN
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
