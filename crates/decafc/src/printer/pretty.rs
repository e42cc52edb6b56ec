//! Pretty printer
//!
//! Reconstructs indented source from the tree. Consecutive locals with the same
//! type on the same line are folded back into one `var a, b int;`, and
//! statement-level assignments and calls are tagged with the line of the
//! declaration that analysis bound them to.

use super::PrettyConfig;
use crate::ast::*;
use crate::common::Line;

/// Render a whole program with the given options
pub fn pretty_print(program: &Program, config: &PrettyConfig) -> String {
    let mut printer = PrettyPrinter::new(config.clone());
    printer.write_program(program);
    printer.finish()
}

/// Indentation-aware source writer
pub struct PrettyPrinter {
    out: String,
    indent: usize,
    config: PrettyConfig,
}

impl PrettyPrinter {
    pub fn new(config: PrettyConfig) -> Self {
        Self {
            out: String::new(),
            indent: 0,
            config,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    // ==================== Declarations ====================

    pub fn write_program(&mut self, program: &Program) {
        for ext in &program.externs {
            self.write_extern(ext);
        }
        if let Some(package) = &program.package {
            self.write_package(package);
        }
    }

    pub fn write_extern(&mut self, ext: &ExternFunction) {
        let params: Vec<_> = ext.params.iter().map(|p| type_str(p.ty.as_ref())).collect();
        self.line(&format!(
            "extern func {}({}) {};",
            ext.name,
            params.join(", "),
            type_str(ext.return_type.as_ref())
        ));
    }

    pub fn write_package(&mut self, package: &Package) {
        self.line(&format!("package {} {{", package.name));
        self.indent += 1;
        for field in &package.fields {
            self.write_field(field);
        }
        for method in &package.methods {
            self.write_method(method);
        }
        self.indent -= 1;
        self.line("}");
    }

    pub fn write_field(&mut self, field: &FieldDecl) {
        let ty = type_str(field.ty.as_ref());
        let text = match &field.kind {
            FieldKind::Scalar => format!("var {} {ty};", field.name),
            FieldKind::Array(size) => format!("var {} [{size}]{ty};", field.name),
            FieldKind::Initialized(init) => {
                format!("var {} {ty} = {};", field.name, expr_to_string(init))
            }
        };
        self.line(&text);
    }

    pub fn write_method(&mut self, method: &MethodDecl) {
        let params: Vec<_> = method
            .params
            .iter()
            .map(|p| format!("{} {}", p.name, type_str(p.ty.as_ref())))
            .collect();
        self.line(&format!(
            "func {}({}) {} {{",
            method.name,
            params.join(", "),
            type_str(method.return_type.as_ref())
        ));
        self.indent += 1;
        if let Some(body) = &method.body {
            self.write_locals(&body.vars);
            self.write_stmts(&body.stmts);
        }
        self.indent -= 1;
        self.line("}");
    }

    /// Locals, folding runs that share a type and a source line
    pub fn write_locals(&mut self, vars: &NodeList<VarDef>) {
        let mut iter = vars.iter().peekable();
        while let Some(first) = iter.next() {
            let key = (first.ty.map(|t| t.kind), first.line);
            let mut names = vec![first.name.as_str()];
            while let Some(next) = iter.next_if(|v| (v.ty.map(|t| t.kind), v.line) == key) {
                names.push(next.name.as_str());
            }
            self.line(&format!("var {} {};", names.join(", "), type_str(first.ty.as_ref())));
        }
    }

    // ==================== Statements ====================

    pub fn write_stmts(&mut self, stmts: &NodeList<Stmt>) {
        for stmt in stmts {
            self.write_stmt(stmt);
        }
    }

    pub fn write_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Block(block) => {
                self.start_line();
                self.write_block(block);
                self.out.push('\n');
            }
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                self.start_line();
                self.out.push_str(&format!("if ({}) ", expr_to_string(condition)));
                self.write_block(then_block);
                if let Some(else_block) = else_block {
                    self.out.push_str(" else ");
                    self.write_block(else_block);
                }
                self.out.push('\n');
            }
            StmtKind::While { condition, body } => {
                self.start_line();
                self.out.push_str(&format!("while ({}) ", expr_to_string(condition)));
                self.write_block(body);
                self.out.push('\n');
            }
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => {
                let init = clauses_to_string(init);
                let condition = condition.as_ref().map(expr_to_string).unwrap_or_default();
                let update = clauses_to_string(update);
                self.start_line();
                self.out.push_str(&format!("for ({init}; {condition}; {update}) "));
                self.write_block(body);
                self.out.push('\n');
            }
            StmtKind::Return(Some(value)) => self.line(&format!("return {};", expr_to_string(value))),
            StmtKind::Return(None) => self.line("return;"),
            StmtKind::Break => self.line("break;"),
            StmtKind::Continue => self.line("continue;"),
            StmtKind::Assign(assign) => {
                let text = format!("{} = {};", assign.name, expr_to_string(&assign.value));
                self.line_with_provenance(&text, assign.decl_line);
            }
            StmtKind::AssignArrayLoc(assign) => {
                let text = format!(
                    "{}[{}] = {};",
                    assign.name,
                    expr_to_string(&assign.index),
                    expr_to_string(&assign.value)
                );
                self.line_with_provenance(&text, assign.decl_line);
            }
            StmtKind::MethodCall(call) => {
                let text = format!("{};", call_to_string(call));
                self.line_with_provenance(&text, call.provenance_line());
            }
        }
    }

    /// `{`, contents one level in, then `}` with no trailing newline
    fn write_block(&mut self, block: &Block) {
        self.out.push_str("{\n");
        self.indent += 1;
        self.write_locals(&block.vars);
        self.write_stmts(&block.stmts);
        self.indent -= 1;
        self.start_line();
        self.out.push('}');
    }

    // ==================== Output helpers ====================

    fn start_line(&mut self) {
        let width = self.indent * self.config.indent_width;
        self.out.extend(std::iter::repeat_n(' ', width));
    }

    fn line(&mut self, text: &str) {
        self.start_line();
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn line_with_provenance(&mut self, text: &str, decl_line: Line) {
        if self.config.provenance_comments {
            self.line(&format!("{text} // using decl on line: {decl_line}"));
        } else {
            self.line(text);
        }
    }
}

/// For-loop header clauses on one line, without `;` or comments
fn clauses_to_string(clauses: &NodeList<ForClause>) -> String {
    let parts: Vec<_> = clauses
        .iter()
        .map(|clause| match clause {
            ForClause::Assign(assign) => format!("{} = {}", assign.name, expr_to_string(&assign.value)),
            ForClause::AssignArrayLoc(assign) => format!(
                "{}[{}] = {}",
                assign.name,
                expr_to_string(&assign.index),
                expr_to_string(&assign.value)
            ),
            ForClause::MethodCall(call) => call_to_string(call),
        })
        .collect();
    parts.join(", ")
}

fn type_str(ty: Option<&Type>) -> &'static str {
    ty.map_or("unknown", |t| t.kind.keyword())
}

// ==================== Expressions ====================

/// Surface syntax of an expression
pub fn expr_to_string(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

fn call_to_string(call: &MethodCall) -> String {
    let args: Vec<_> = call.args.iter().map(expr_to_string).collect();
    format!("{}({})", call.name, args.join(", "))
}

fn write_expr(out: &mut String, expr: &Expr) {
    match &expr.kind {
        ExprKind::IntConstant(value) => out.push_str(&value.to_string()),
        ExprKind::BoolConstant(value) => out.push_str(if *value { "true" } else { "false" }),
        ExprKind::StringConstant(lexeme) => out.push_str(lexeme),
        ExprKind::CharConstant(c) => {
            out.push('\'');
            out.extend(c.escape_default());
            out.push('\'');
        }
        ExprKind::Variable { name, .. } => out.push_str(name),
        ExprKind::ArrayLoc { name, index, .. } => {
            out.push_str(name);
            out.push('[');
            write_expr(out, index);
            out.push(']');
        }
        ExprKind::Unary { op, operand } => {
            out.push_str(op.as_str());
            write_operand(out, operand, needs_group_under_unary(operand));
        }
        ExprKind::Binary { op, left, right } => {
            let precedence = op.precedence();
            write_operand(out, left, binds_looser(left, precedence, false));
            out.push(' ');
            out.push_str(op.as_str());
            out.push(' ');
            write_operand(out, right, binds_looser(right, precedence, true));
        }
        ExprKind::MethodCall(call) => out.push_str(&call_to_string(call)),
    }
}

fn write_operand(out: &mut String, expr: &Expr, grouped: bool) {
    if grouped {
        out.push('(');
        write_expr(out, expr);
        out.push(')');
    } else {
        write_expr(out, expr);
    }
}

/// Binary operands, and anything starting with `-` so that `-(-3)` never prints as `--3`
fn needs_group_under_unary(operand: &Expr) -> bool {
    match &operand.kind {
        ExprKind::Binary { .. } => true,
        ExprKind::Unary { op, .. } => *op == UnaryOp::Minus,
        ExprKind::IntConstant(value) => *value < 0,
        _ => false,
    }
}

/// Operators are left-associative, so an equal-precedence right operand needs parentheses
fn binds_looser(operand: &Expr, parent: u8, right: bool) -> bool {
    match &operand.kind {
        ExprKind::Binary { op, .. } => {
            let precedence = op.precedence();
            precedence < parent || (right && precedence == parent)
        }
        _ => false,
    }
}
