//! Canonical dump
//!
//! Every node renders as `Kind(child,child,...)`. An absent child and an empty
//! list both render as `None`; a list renders its elements joined by `,`.
//! The output is deterministic, so two trees can be compared as strings.

use crate::ast::*;

/// Canonical single-line serialization
pub trait Canonical {
    fn write_canonical(&self, out: &mut String);

    fn canonical(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }
}

impl<T: Canonical> Canonical for Option<T> {
    fn write_canonical(&self, out: &mut String) {
        match self {
            Some(node) => node.write_canonical(out),
            None => out.push_str("None"),
        }
    }
}

impl<T: Canonical> Canonical for Box<T> {
    fn write_canonical(&self, out: &mut String) {
        (**self).write_canonical(out);
    }
}

impl<T: Canonical> Canonical for NodeList<T> {
    fn write_canonical(&self, out: &mut String) {
        if self.is_empty() {
            out.push_str("None");
            return;
        }
        for (i, node) in self.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            node.write_canonical(out);
        }
    }
}

/// Writes `Kind(a,b,...)`
macro_rules! node {
    ($out:expr, $kind:expr $(, $child:expr)* $(,)?) => {{
        let out: &mut String = $out;
        out.push_str($kind);
        out.push('(');
        let mut _first = true;
        $(
            if !_first {
                out.push(',');
            }
            _first = false;
            $child.write_canonical(out);
        )*
        out.push(')');
    }};
}

/// Names and other raw text inside a template
struct Raw<'a>(&'a str);

impl Canonical for Raw<'_> {
    fn write_canonical(&self, out: &mut String) {
        out.push_str(self.0);
    }
}

impl Canonical for Type {
    fn write_canonical(&self, out: &mut String) {
        out.push_str(self.kind.canonical_name());
    }
}

impl Canonical for Program {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "Program", self.externs, self.package);
    }
}

impl Canonical for Package {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "Package", Raw(&self.name), self.fields, self.methods);
    }
}

impl Canonical for FieldDecl {
    fn write_canonical(&self, out: &mut String) {
        match &self.kind {
            FieldKind::Scalar => node!(out, "FieldDecl", Raw(&self.name), self.ty, Raw("Scalar")),
            FieldKind::Array(size) => node!(
                out,
                "FieldDecl",
                Raw(&self.name),
                self.ty,
                Raw(&format!("Array({size})"))
            ),
            FieldKind::Initialized(init) => {
                node!(out, "AssignGlobalVar", Raw(&self.name), self.ty, init);
            }
        }
    }
}

impl Canonical for ExternFunction {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "ExternFunction", Raw(&self.name), self.return_type, self.params);
    }
}

impl Canonical for ExternParam {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "VarDef", self.ty);
    }
}

impl Canonical for MethodDecl {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "Method", Raw(&self.name), self.return_type, self.params, self.body);
    }
}

impl Canonical for Param {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "VarDef", Raw(&self.name), self.ty);
    }
}

impl Canonical for VarDef {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "VarDef", Raw(&self.name), self.ty);
    }
}

impl Canonical for MethodBlock {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "MethodBlock", self.vars, self.stmts);
    }
}

impl Canonical for Block {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "Block", self.vars, self.stmts);
    }
}

impl Canonical for Stmt {
    fn write_canonical(&self, out: &mut String) {
        match &self.kind {
            StmtKind::Block(block) => block.write_canonical(out),
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => node!(out, "IfStmt", condition, then_block, else_block),
            StmtKind::While { condition, body } => node!(out, "WhileStmt", condition, body),
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => node!(out, "ForStmt", init, condition, update, body),
            StmtKind::Return(value) => node!(out, "ReturnStmt", value),
            StmtKind::Break => out.push_str("BreakStmt"),
            StmtKind::Continue => out.push_str("ContinueStmt"),
            StmtKind::Assign(assign) => assign.write_canonical(out),
            StmtKind::AssignArrayLoc(assign) => assign.write_canonical(out),
            StmtKind::MethodCall(call) => call.write_canonical(out),
        }
    }
}

impl Canonical for ForClause {
    fn write_canonical(&self, out: &mut String) {
        match self {
            ForClause::Assign(assign) => assign.write_canonical(out),
            ForClause::AssignArrayLoc(assign) => assign.write_canonical(out),
            ForClause::MethodCall(call) => call.write_canonical(out),
        }
    }
}

impl Canonical for Assign {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "AssignVar", Raw(&self.name), self.value);
    }
}

impl Canonical for AssignArrayLoc {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "AssignArrayLoc", Raw(&self.name), self.index, self.value);
    }
}

impl Canonical for MethodCall {
    fn write_canonical(&self, out: &mut String) {
        node!(out, "MethodCall", Raw(&self.name), self.args);
    }
}

impl Canonical for Expr {
    fn write_canonical(&self, out: &mut String) {
        let kind = self.kind.canonical_kind();
        match &self.kind {
            ExprKind::IntConstant(value) => node!(out, kind, Raw(&value.to_string())),
            ExprKind::BoolConstant(value) => {
                node!(out, kind, Raw(if *value { "True" } else { "False" }));
            }
            ExprKind::StringConstant(lexeme) => node!(out, kind, Raw(lexeme)),
            ExprKind::CharConstant(c) => node!(out, kind, Raw(&c.to_string())),
            ExprKind::Variable { name, .. } => node!(out, kind, Raw(name)),
            ExprKind::ArrayLoc { name, index, .. } => node!(out, kind, Raw(name), index),
            ExprKind::Unary { op, operand } => node!(out, kind, Raw(op.label()), operand),
            ExprKind::Binary { op, left, right } => {
                node!(out, kind, Raw(op.label()), left, right);
            }
            ExprKind::MethodCall(call) => call.write_canonical(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Line;
    use pretty_assertions::assert_eq;

    fn l(n: u32) -> Line {
        Line::new(n)
    }

    #[test]
    fn test_method_block_dump() {
        let block = MethodBlock::new(
            Some(vec![VarDef::new("x", Some(Type::int(l(1))), l(1))].into()),
            Some(
                vec![
                    Stmt::assign(Lvalue::Variable("x".into()), Expr::int(1, l(1)), l(1)),
                    Stmt::ret(Some(Expr::variable("x", l(1))), l(1)),
                ]
                .into(),
            ),
            l(1),
        );

        assert_eq!(
            block.canonical(),
            "MethodBlock(VarDef(x,IntType),AssignVar(x,NumberExpr(1)),ReturnStmt(VariableExpr(x)))"
        );
    }

    #[test]
    fn test_absent_children_render_none() {
        let program = Program::new(NodeList::new(), None, l(1));
        assert_eq!(program.canonical(), "Program(None,None)");

        assert_eq!(Stmt::ret(None, l(1)).canonical(), "ReturnStmt(None)");

        let empty = MethodBlock::new(None, None, l(1));
        assert_eq!(empty.canonical(), "MethodBlock(None,None)");
    }

    #[test]
    fn test_declaration_templates() {
        let ext = ExternFunction::new(
            "print_int",
            Some(Type::void(l(1))),
            vec![ExternParam::new(Some(Type::int(l(1))), l(1))].into(),
            l(1),
        );
        assert_eq!(ext.canonical(), "ExternFunction(print_int,VoidType,VarDef(IntType))");

        let fields: NodeList<FieldDecl> = vec![
            FieldDecl::scalar("x", Some(Type::int(l(2))), l(2)),
            FieldDecl::array("a", Some(Type::bool(l(3))), 10, l(3)),
            FieldDecl::initialized("s", Some(Type::string(l(4))), Expr::string("\"hi\"", l(4)), l(4)),
        ]
        .into();
        assert_eq!(
            fields.canonical(),
            "FieldDecl(x,IntType,Scalar),FieldDecl(a,BoolType,Array(10)),AssignGlobalVar(s,StringType,StringConstant(\"hi\"))"
        );

        let method = MethodDecl::new(
            "f",
            Some(Type::void(l(5))),
            vec![Param::new("a", Some(Type::int(l(5))), l(5))].into(),
            Some(MethodBlock::new(None, None, l(5))),
            l(5),
        );
        assert_eq!(method.canonical(), "Method(f,VoidType,VarDef(a,IntType),MethodBlock(None,None))");
    }

    #[test]
    fn test_statement_templates() {
        let body = Block::new(None, Some(vec![Stmt::break_stmt(l(2)), Stmt::continue_stmt(l(2))].into()), l(2));
        let cond = Expr::binary(BinaryOp::Lt, Expr::variable("i", l(2)), Expr::int(10, l(2)), l(2));
        let init: NodeList<ForClause> = vec![ForClause::assign(Lvalue::Variable("i".into()), Expr::int(0, l(2)))].into();
        let update: NodeList<ForClause> = vec![ForClause::assign(
            Lvalue::Variable("i".into()),
            Expr::binary(BinaryOp::Plus, Expr::variable("i", l(2)), Expr::int(1, l(2)), l(2)),
        )]
        .into();
        let for_loop = Stmt::for_loop(init, Some(cond), update, body, l(2));

        assert_eq!(
            for_loop.canonical(),
            "ForStmt(AssignVar(i,NumberExpr(0)),BinaryExpr(Lt,VariableExpr(i),NumberExpr(10)),\
             AssignVar(i,BinaryExpr(Plus,VariableExpr(i),NumberExpr(1))),Block(None,BreakStmt,ContinueStmt))"
        );

        let if_stmt = Stmt::if_else(
            Expr::unary(UnaryOp::Not, Expr::bool(false, l(3)), l(3)),
            Block::new(None, None, l(3)),
            None,
            l(3),
        );
        assert_eq!(if_stmt.canonical(), "IfStmt(UnaryExpr(Not,BoolExpr(False)),Block(None,None),None)");

        let array_assign = Stmt::assign(
            Lvalue::ArrayLoc {
                name: "a".into(),
                index: Expr::int(1, l(4)),
            },
            Expr::unary(UnaryOp::Minus, Expr::char('z', l(4)), l(4)),
            l(4),
        );
        assert_eq!(
            array_assign.canonical(),
            "AssignArrayLoc(a,NumberExpr(1),UnaryExpr(UnaryMinus,CharExpr(z)))"
        );

        let call = Stmt::call(
            MethodCall::new(
                "f",
                Some(vec![Expr::array_loc("a", Expr::int(0, l(5)), l(5)), Expr::bool(true, l(5))].into()),
            ),
            l(5),
        );
        assert_eq!(call.canonical(), "MethodCall(f,ArrayLocExpr(a,NumberExpr(0)),BoolExpr(True))");
        assert_eq!(Stmt::call(MethodCall::new("g", None), l(6)).canonical(), "MethodCall(g,None)");
    }

    #[test]
    fn test_binary_labels() {
        let ops = [
            (BinaryOp::Minus, "Minus"),
            (BinaryOp::Mult, "Mult"),
            (BinaryOp::Div, "Div"),
            (BinaryOp::Mod, "Mod"),
            (BinaryOp::Leftshift, "Leftshift"),
            (BinaryOp::Rightshift, "Rightshift"),
            (BinaryOp::Gt, "Gt"),
            (BinaryOp::Leq, "Leq"),
            (BinaryOp::Geq, "Geq"),
            (BinaryOp::Eq, "Eq"),
            (BinaryOp::Neq, "Neq"),
            (BinaryOp::And, "And"),
            (BinaryOp::Or, "Or"),
        ];
        for (op, label) in ops {
            let expr = Expr::binary(op, Expr::int(1, l(1)), Expr::int(2, l(1)), l(1));
            assert_eq!(expr.canonical(), format!("BinaryExpr({label},NumberExpr(1),NumberExpr(2))"));
        }
    }

    #[test]
    fn test_dump_is_stable() {
        let program = Program::new(
            NodeList::new(),
            Some(Package::new("P", NodeList::new(), NodeList::new(), l(1))),
            l(1),
        );
        assert_eq!(program.canonical(), program.canonical());
        assert_eq!(program.canonical(), "Program(None,Package(P,None,None))");
    }
}
