//! AST visitor trait for traversing the syntax tree.
//!
//! Default implementations walk into children. Every node the walk reaches,
//! including declarations and switch cases, is reported to
//! [`AstVisitor::visit_node`] before its children.

use crate::node::*;
use crate::types::NodeId;

pub trait AstVisitor {
    /// Called once for each node reached by the walk.
    fn visit_node(&mut self, _id: NodeId) {}

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_arrow(&mut self, arrow: &ArrowExpression) {
        self.visit_node(arrow.id);
        for arg in &arrow.args {
            self.visit_expression(arg);
        }
        self.visit_statement(&arrow.statement);
    }

    fn visit_block(&mut self, block: &BlockStatement) {
        self.visit_node(block.id);
        for stmt in &block.statements {
            self.visit_statement(stmt);
        }
    }

    fn visit_var_declaration(&mut self, decl: &VarDeclaration) {
        self.visit_node(decl.id);
        if let Some(expr) = &decl.expression {
            self.visit_expression(expr);
        }
    }

    fn visit_reactive_var(&mut self, decl: &ReactiveVarDeclaration) {
        self.visit_node(decl.id);
        self.visit_expression(&decl.expression);
    }
}

/// Walk the children of a statement.
pub fn walk_statement<V: AstVisitor + ?Sized>(v: &mut V, stmt: &Statement) {
    match stmt {
        Statement::Block(n) => return v.visit_block(n),
        Statement::Function(n) => {
            v.visit_node(n.id);
            return v.visit_arrow(&n.arrow);
        }
        _ => v.visit_node(stmt.id()),
    }
    match stmt {
        Statement::Empty(_)
        | Statement::Break(_)
        | Statement::Continue(_)
        | Statement::Import(_)
        | Statement::Block(_)
        | Statement::Function(_) => {}
        Statement::Expression(n) => v.visit_expression(&n.expression),
        Statement::Let(n) => n.declarations.iter().for_each(|d| v.visit_var_declaration(d)),
        Statement::Const(n) => n.declarations.iter().for_each(|d| v.visit_var_declaration(d)),
        Statement::Var(n) => n.declarations.iter().for_each(|d| v.visit_reactive_var(d)),
        Statement::If(n) => {
            v.visit_expression(&n.condition);
            v.visit_statement(&n.then_branch);
            if let Some(else_branch) = &n.else_branch {
                v.visit_statement(else_branch);
            }
        }
        Statement::Return(n) => {
            if let Some(expr) = &n.expression {
                v.visit_expression(expr);
            }
        }
        Statement::While(n) => {
            v.visit_expression(&n.condition);
            v.visit_statement(&n.body);
        }
        Statement::DoWhile(n) => {
            v.visit_statement(&n.body);
            v.visit_expression(&n.condition);
        }
        Statement::For(n) => {
            if let Some(init) = &n.init {
                v.visit_statement(init);
            }
            if let Some(cond) = &n.condition {
                v.visit_expression(cond);
            }
            if let Some(update) = &n.update {
                v.visit_expression(update);
            }
            v.visit_statement(&n.body);
        }
        Statement::ForIn(n) | Statement::ForOf(n) => {
            v.visit_expression(&n.expression);
            v.visit_statement(&n.body);
        }
        Statement::Throw(n) => v.visit_expression(&n.expression),
        Statement::Try(n) => {
            v.visit_block(&n.try_block);
            if let Some(block) = &n.catch_block {
                v.visit_block(block);
            }
            if let Some(block) = &n.finally_block {
                v.visit_block(block);
            }
        }
        Statement::Switch(n) => {
            v.visit_expression(&n.expression);
            for case in &n.cases {
                v.visit_node(case.id);
                if let Some(cond) = &case.condition {
                    v.visit_expression(cond);
                }
                for stmt in &case.statements {
                    v.visit_statement(stmt);
                }
            }
        }
    }
}

/// Walk the children of an expression.
pub fn walk_expression<V: AstVisitor + ?Sized>(v: &mut V, expr: &Expression) {
    if let Expression::Arrow(arrow) = expr {
        return v.visit_arrow(arrow);
    }
    v.visit_node(expr.id());
    match expr {
        Expression::Identifier(_)
        | Expression::Literal(_)
        | Expression::Destructure(_)
        | Expression::NoArg(_)
        | Expression::Arrow(_) => {}
        Expression::Unary(n) => v.visit_expression(&n.operand),
        Expression::Prefix(n) => v.visit_expression(&n.operand),
        Expression::Postfix(n) => v.visit_expression(&n.operand),
        Expression::Spread(n) => v.visit_expression(&n.operand),
        Expression::Binary(n) => {
            v.visit_expression(&n.left);
            v.visit_expression(&n.right);
        }
        Expression::Sequence(n) => n.expressions.iter().for_each(|e| v.visit_expression(e)),
        Expression::Conditional(n) => {
            v.visit_expression(&n.condition);
            v.visit_expression(&n.consequent);
            v.visit_expression(&n.alternate);
        }
        Expression::FunctionInvocation(n) => {
            v.visit_expression(&n.object);
            n.arguments.iter().for_each(|e| v.visit_expression(e));
        }
        Expression::MemberAccess(n) => v.visit_expression(&n.object),
        Expression::CalculatedMemberAccess(n) => {
            v.visit_expression(&n.object);
            v.visit_expression(&n.member);
        }
        Expression::ArrayLiteral(n) => n.items.iter().for_each(|e| v.visit_expression(e)),
        Expression::ObjectLiteral(n) => {
            for prop in &n.props {
                match prop {
                    ObjectProperty::Property { key, value } => {
                        if let PropertyKey::Computed(key) = key {
                            v.visit_expression(key);
                        }
                        v.visit_expression(value);
                    }
                    ObjectProperty::Spread { operand } => v.visit_expression(operand),
                }
            }
        }
        Expression::Assignment(n) => {
            v.visit_expression(&n.target);
            v.visit_expression(&n.value);
        }
    }
}

/// Collects the IDs of every node reachable from the visited roots.
#[derive(Debug, Default)]
pub struct NodeIdCollector {
    pub ids: Vec<NodeId>,
}

impl AstVisitor for NodeIdCollector {
    fn visit_node(&mut self, id: NodeId) {
        self.ids.push(id);
    }
}
