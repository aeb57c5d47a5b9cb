//! AST node definitions for XMLUIScript.
//!
//! Statements and expressions are closed sum types, one variant per node
//! kind. Every node carries a [`NodeId`]; its source range lives in the
//! [`PositionTable`](crate::position::PositionTable), not on the node.
//! Serialization tags each node with its short kind name (`"LitE"`,
//! `"BinaryE"`, `"VarS"`, ...).

use crate::syntax_kind::SyntaxKind;
use crate::types::NodeId;
use serde::Serialize;

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    #[serde(rename = "UnaryE")]
    Unary(UnaryExpression),
    #[serde(rename = "BinaryE")]
    Binary(BinaryExpression),
    #[serde(rename = "SeqE")]
    Sequence(SequenceExpression),
    #[serde(rename = "CondE")]
    Conditional(ConditionalExpression),
    #[serde(rename = "FuncInvE")]
    FunctionInvocation(FunctionInvocationExpression),
    #[serde(rename = "MembAccE")]
    MemberAccess(MemberAccessExpression),
    #[serde(rename = "CMembAccE")]
    CalculatedMemberAccess(CalculatedMemberAccessExpression),
    #[serde(rename = "IdE")]
    Identifier(IdentifierExpression),
    #[serde(rename = "LitE")]
    Literal(LiteralExpression),
    #[serde(rename = "ALitE")]
    ArrayLiteral(ArrayLiteralExpression),
    #[serde(rename = "OLitE")]
    ObjectLiteral(ObjectLiteralExpression),
    #[serde(rename = "SpreadE")]
    Spread(SpreadExpression),
    #[serde(rename = "AsgnE")]
    Assignment(AssignmentExpression),
    #[serde(rename = "PrefE")]
    Prefix(PrefixOpExpression),
    #[serde(rename = "PostfE")]
    Postfix(PostfixOpExpression),
    #[serde(rename = "ArrowE")]
    Arrow(ArrowExpression),
    #[serde(rename = "DestrE")]
    Destructure(DestructureExpression),
    /// Placeholder for an omitted array element (`[a, , b]`).
    #[serde(rename = "NoArgE")]
    NoArg(NoArgExpression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub operator: SyntaxKind,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub operator: SyntaxKind,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub condition: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionInvocationExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub object: Box<Expression>,
    pub arguments: Vec<Expression>,
    /// `f?.(x)`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberAccessExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub object: Box<Expression>,
    pub member: String,
    /// `a?.b`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedMemberAccessExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub object: Box<Expression>,
    pub member: Box<Expression>,
    /// `a?.[b]`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl LiteralValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, LiteralValue::Undefined)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralExpression {
    #[serde(skip)]
    pub id: NodeId,
    #[serde(skip_serializing_if = "LiteralValue::is_undefined")]
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLiteralExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub items: Vec<Expression>,
}

/// The key of an object literal property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PropertyKey {
    Identifier(String),
    String(String),
    Number(f64),
    /// `[expr]: value`
    Computed(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ObjectProperty {
    Property { key: PropertyKey, value: Expression },
    Spread { operand: Expression },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectLiteralExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub props: Vec<ObjectProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub target: Box<Expression>,
    pub operator: SyntaxKind,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixOpExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub operator: SyntaxKind,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostfixOpExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub operator: SyntaxKind,
    pub operand: Box<Expression>,
}

/// An arrow function. `function` declarations and expressions are modeled as
/// named arrows with a block body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowExpression {
    #[serde(skip)]
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Each argument is an `IdE`, a `DestrE`, or (last only) a `SpreadE`
    /// wrapping an `IdE`.
    pub args: Vec<Expression>,
    /// An expression body is wrapped in an `ExprS`.
    pub statement: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestructureExpression {
    #[serde(skip)]
    pub id: NodeId,
    pub pattern: DestructurePattern,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoArgExpression {
    #[serde(skip)]
    pub id: NodeId,
}

// ============================================================================
// Destructuring
// ============================================================================

/// A destructuring pattern. Object and array bindings are separate variants,
/// so a single pattern can never hold both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DestructurePattern {
    Object(Vec<ObjectBinding>),
    Array(Vec<ArrayBinding>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectBinding {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<DestructurePattern>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub rest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayBinding {
    /// `None` for a hole.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<DestructurePattern>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub rest: bool,
}

impl DestructurePattern {
    /// Names bound by this pattern, in source order.
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            DestructurePattern::Object(bindings) => {
                for b in bindings {
                    match &b.nested {
                        Some(nested) => nested.collect_names(names),
                        None => names.push(b.alias.as_deref().unwrap_or(&b.id)),
                    }
                }
            }
            DestructurePattern::Array(bindings) => {
                for b in bindings {
                    if let Some(nested) = &b.nested {
                        nested.collect_names(names);
                    } else if let Some(id) = &b.id {
                        names.push(id);
                    }
                }
            }
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    #[serde(rename = "EmptyS")]
    Empty(EmptyStatement),
    #[serde(rename = "ExprS")]
    Expression(ExpressionStatement),
    #[serde(rename = "LetS")]
    Let(LetStatement),
    #[serde(rename = "ConstS")]
    Const(ConstStatement),
    /// Reactive variable declaration.
    #[serde(rename = "VarS")]
    Var(VarStatement),
    #[serde(rename = "BlockS")]
    Block(BlockStatement),
    #[serde(rename = "IfS")]
    If(IfStatement),
    #[serde(rename = "RetS")]
    Return(ReturnStatement),
    #[serde(rename = "BrkS")]
    Break(BreakStatement),
    #[serde(rename = "ContS")]
    Continue(ContinueStatement),
    #[serde(rename = "WhileS")]
    While(WhileStatement),
    #[serde(rename = "DoWS")]
    DoWhile(DoWhileStatement),
    #[serde(rename = "ForS")]
    For(ForStatement),
    #[serde(rename = "ForInS")]
    ForIn(ForInOfStatement),
    #[serde(rename = "ForOfS")]
    ForOf(ForInOfStatement),
    #[serde(rename = "ThrowS")]
    Throw(ThrowStatement),
    #[serde(rename = "TryS")]
    Try(TryStatement),
    #[serde(rename = "SwitchS")]
    Switch(SwitchStatement),
    #[serde(rename = "FuncD")]
    Function(FunctionDeclaration),
    #[serde(rename = "ImportD")]
    Import(ImportDeclaration),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyStatement {
    #[serde(skip)]
    pub id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub expression: Expression,
}

/// The target of a `let`/`const` declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindingTarget {
    Identifier(String),
    Pattern(DestructurePattern),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclaration {
    #[serde(skip)]
    pub id: NodeId,
    pub binding: BindingTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub declarations: Vec<VarDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub declarations: Vec<VarDeclaration>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_exported: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactiveVarDeclaration {
    #[serde(skip)]
    pub id: NodeId,
    pub name: String,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub declarations: Vec<ReactiveVarDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IfStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    #[serde(skip)]
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStatement {
    #[serde(skip)]
    pub id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueStatement {
    #[serde(skip)]
    pub id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoWhileStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    #[serde(skip)]
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<Box<Statement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Expression>,
    pub body: Box<Statement>,
}

/// How the loop variable of a `for..in`/`for..of` is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForVarBinding {
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForInOfStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub var_binding: ForVarBinding,
    pub identifier: String,
    pub expression: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TryStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub try_block: BlockStatement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catch_variable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catch_block: Option<BlockStatement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finally_block: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    #[serde(skip)]
    pub id: NodeId,
    /// `None` for the `default` clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expression>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchStatement {
    #[serde(skip)]
    pub id: NodeId,
    pub expression: Expression,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclaration {
    #[serde(skip)]
    pub id: NodeId,
    pub name: String,
    pub arrow: ArrowExpression,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_exported: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportBinding {
    /// The exported name in the imported module.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ImportBinding {
    /// The name the binding is visible under in the importing module.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDeclaration {
    #[serde(skip)]
    pub id: NodeId,
    pub imports: Vec<ImportBinding>,
    pub module_file: String,
}
