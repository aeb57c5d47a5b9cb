//! Accessors shared by every node kind.

use crate::node::*;
use crate::types::NodeId;

impl Expression {
    /// The node ID of this expression.
    pub fn id(&self) -> NodeId {
        match self {
            Expression::Unary(n) => n.id,
            Expression::Binary(n) => n.id,
            Expression::Sequence(n) => n.id,
            Expression::Conditional(n) => n.id,
            Expression::FunctionInvocation(n) => n.id,
            Expression::MemberAccess(n) => n.id,
            Expression::CalculatedMemberAccess(n) => n.id,
            Expression::Identifier(n) => n.id,
            Expression::Literal(n) => n.id,
            Expression::ArrayLiteral(n) => n.id,
            Expression::ObjectLiteral(n) => n.id,
            Expression::Spread(n) => n.id,
            Expression::Assignment(n) => n.id,
            Expression::Prefix(n) => n.id,
            Expression::Postfix(n) => n.id,
            Expression::Arrow(n) => n.id,
            Expression::Destructure(n) => n.id,
            Expression::NoArg(n) => n.id,
        }
    }

    /// The serialized kind tag of this expression.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Unary(_) => "UnaryE",
            Expression::Binary(_) => "BinaryE",
            Expression::Sequence(_) => "SeqE",
            Expression::Conditional(_) => "CondE",
            Expression::FunctionInvocation(_) => "FuncInvE",
            Expression::MemberAccess(_) => "MembAccE",
            Expression::CalculatedMemberAccess(_) => "CMembAccE",
            Expression::Identifier(_) => "IdE",
            Expression::Literal(_) => "LitE",
            Expression::ArrayLiteral(_) => "ALitE",
            Expression::ObjectLiteral(_) => "OLitE",
            Expression::Spread(_) => "SpreadE",
            Expression::Assignment(_) => "AsgnE",
            Expression::Prefix(_) => "PrefE",
            Expression::Postfix(_) => "PostfE",
            Expression::Arrow(_) => "ArrowE",
            Expression::Destructure(_) => "DestrE",
            Expression::NoArg(_) => "NoArgE",
        }
    }

    /// Whether the expression can appear on the left of an assignment.
    pub fn is_assignment_target(&self) -> bool {
        matches!(
            self,
            Expression::Identifier(_)
                | Expression::MemberAccess(_)
                | Expression::CalculatedMemberAccess(_)
        )
    }
}

impl Statement {
    /// The node ID of this statement.
    pub fn id(&self) -> NodeId {
        match self {
            Statement::Empty(n) => n.id,
            Statement::Expression(n) => n.id,
            Statement::Let(n) => n.id,
            Statement::Const(n) => n.id,
            Statement::Var(n) => n.id,
            Statement::Block(n) => n.id,
            Statement::If(n) => n.id,
            Statement::Return(n) => n.id,
            Statement::Break(n) => n.id,
            Statement::Continue(n) => n.id,
            Statement::While(n) => n.id,
            Statement::DoWhile(n) => n.id,
            Statement::For(n) => n.id,
            Statement::ForIn(n) => n.id,
            Statement::ForOf(n) => n.id,
            Statement::Throw(n) => n.id,
            Statement::Try(n) => n.id,
            Statement::Switch(n) => n.id,
            Statement::Function(n) => n.id,
            Statement::Import(n) => n.id,
        }
    }

    /// The serialized kind tag of this statement.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Empty(_) => "EmptyS",
            Statement::Expression(_) => "ExprS",
            Statement::Let(_) => "LetS",
            Statement::Const(_) => "ConstS",
            Statement::Var(_) => "VarS",
            Statement::Block(_) => "BlockS",
            Statement::If(_) => "IfS",
            Statement::Return(_) => "RetS",
            Statement::Break(_) => "BrkS",
            Statement::Continue(_) => "ContS",
            Statement::While(_) => "WhileS",
            Statement::DoWhile(_) => "DoWS",
            Statement::For(_) => "ForS",
            Statement::ForIn(_) => "ForInS",
            Statement::ForOf(_) => "ForOfS",
            Statement::Throw(_) => "ThrowS",
            Statement::Try(_) => "TryS",
            Statement::Switch(_) => "SwitchS",
            Statement::Function(_) => "FuncD",
            Statement::Import(_) => "ImportD",
        }
    }

    /// Whether this is an exported `const` or `function` declaration.
    pub fn is_exported(&self) -> bool {
        match self {
            Statement::Const(n) => n.is_exported,
            Statement::Function(n) => n.is_exported,
            _ => false,
        }
    }
}

impl ConstStatement {
    /// Names declared by this statement, in source order.
    pub fn declared_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for decl in &self.declarations {
            match &decl.binding {
                BindingTarget::Identifier(name) => names.push(name.as_str()),
                BindingTarget::Pattern(pattern) => names.extend(pattern.bound_names()),
            }
        }
        names
    }
}
