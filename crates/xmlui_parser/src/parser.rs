//! The XMLUIScript parser implementation.
//!
//! A recursive descent parser over the significant tokens of a [`Lexer`].
//! Every node gets a fresh [`NodeId`] and an entry in the parser's
//! [`PositionTable`]. A syntax error ends the parse call.

use xmlui_ast::node::*;
use xmlui_ast::position::{NodePosition, PositionTable};
use xmlui_ast::syntax_kind::SyntaxKind;
use xmlui_ast::token::Token;
use xmlui_ast::types::NodeId;
use xmlui_ast::visitor::{AstVisitor, NodeIdCollector};
use xmlui_diagnostics::{messages, DiagnosticMessage};
use xmlui_scanner::literals::{parse_numeric_literal, unescape_string};
use xmlui_scanner::Lexer;

use crate::error::{ParseResult, ParserError};
use crate::precedence::{
    get_binary_operator_precedence, right_operand_precedence, OperatorPrecedence,
};
use crate::utilities::{
    can_start_expression, can_start_statement, is_property_name, is_unary_operator,
    is_update_operator,
};

/// Nesting levels of statements, expressions and binding patterns before
/// `W024`. Fits the default 2 MiB thread stack in unoptimized builds.
const MAX_RECURSION_DEPTH: u32 = 64;

/// Parses XMLUIScript statements and expressions.
pub struct Parser {
    lexer: Lexer,
    positions: PositionTable,
    next_id: u32,
    /// The last significant token consumed; closes the range of finished nodes.
    last_token: Option<Token>,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::with_id_base(source, 0)
    }

    /// Create a parser whose node IDs start at `first_id`. Parsers sharing
    /// one position table use this to keep IDs distinct.
    pub fn with_id_base(source: &str, first_id: u32) -> Self {
        Self {
            lexer: Lexer::new(source),
            positions: PositionTable::new(),
            next_id: first_id,
            last_token: None,
            recursion_depth: 0,
        }
    }

    /// Parse statements until the input ends or a token that cannot start a
    /// statement is reached. Check [`Parser::is_eof`] to detect leftovers.
    pub fn parse_statements(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while can_start_statement(self.peek_kind()) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// Parse one expression (a comma sequence included). Returns `None` when
    /// the next token cannot start an expression.
    pub fn parse_expr(&mut self) -> ParseResult<Option<Expression>> {
        if !can_start_expression(self.peek_kind()) {
            return Ok(None);
        }
        self.parse_expression().map(Some)
    }

    /// The source text not consumed yet, starting at the next significant
    /// token. Empty at the end of the input.
    pub fn get_tail(&mut self) -> String {
        let next = self.peek();
        if next.kind == SyntaxKind::EndOfFileToken {
            return String::new();
        }
        self.lexer.tail_from(next.start_position)
    }

    pub fn is_eof(&mut self) -> bool {
        self.peek_kind() == SyntaxKind::EndOfFileToken
    }

    /// The next significant token, without consuming it.
    pub fn peek(&mut self) -> Token {
        self.lexer.peek(false)
    }

    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    pub fn into_positions(self) -> PositionTable {
        self.positions
    }

    /// The ID the next created node will get.
    pub fn next_node_id(&self) -> u32 {
        self.next_id
    }

    /// The source text a parsed node spans.
    pub fn source_of(&self, id: NodeId) -> Option<String> {
        self.positions
            .get(id)
            .map(|pos| self.lexer.source_text(pos.start_position, pos.end_position))
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn peek_kind(&mut self) -> SyntaxKind {
        self.lexer.peek(false).kind
    }

    #[inline]
    fn ahead_kind(&mut self, n: usize) -> SyntaxKind {
        self.lexer.ahead(n, false).kind
    }

    fn next_token(&mut self) -> Token {
        let token = self.lexer.get(false);
        self.last_token = Some(token.clone());
        token
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> ParseResult<Token> {
        let token = self.peek();
        if token.kind == kind {
            return Ok(self.next_token());
        }
        if token.kind == SyntaxKind::Unknown {
            return Err(self.unexpected(&token));
        }
        let text = kind.text().unwrap_or("token");
        self.error(&messages::TOKEN_0_EXPECTED, &[text], &token)
    }

    fn optional_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.peek_kind() == kind {
            Some(self.next_token())
        } else {
            None
        }
    }

    fn error<T>(
        &self,
        message: &DiagnosticMessage,
        args: &[&str],
        token: &Token,
    ) -> ParseResult<T> {
        Err(ParserError::at_token(message, args, token))
    }

    /// Report a token that no rule accepts at this point.
    fn unexpected(&self, token: &Token) -> ParserError {
        match token.kind {
            SyntaxKind::Unknown => {
                ParserError::at_token(&messages::INVALID_TOKEN_0, &[&token.text], token)
            }
            SyntaxKind::EndOfFileToken => {
                ParserError::at_token(&messages::EXPRESSION_EXPECTED, &[], token)
            }
            _ => ParserError::at_token(&messages::UNEXPECTED_TOKEN_0, &[&token.text], token),
        }
    }

    /// An error located at the first token of an already parsed node.
    fn error_at_node(&self, message: &DiagnosticMessage, args: &[&str], id: NodeId) -> ParserError {
        let token = match self.positions.get(id) {
            Some(pos) => pos.start_token.clone(),
            None => self.last_token.clone().unwrap_or_else(|| Token::eof(0, 0, 0)),
        };
        ParserError::at_token(message, args, &token)
    }

    /// Runs `parse` one nesting level deeper, failing with `W024` past the
    /// limit.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            let token = self.peek();
            return self.error(&messages::EXPRESSION_TOO_DEEP, &[], &token);
        }
        self.recursion_depth += 1;
        let result = parse(self);
        self.recursion_depth -= 1;
        result
    }

    /// Allocate an ID for a node that starts at `start` and ends at the last
    /// consumed token, and record its position.
    fn finish_node(&mut self, start: &Token) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let end = self.last_token.clone().unwrap_or_else(|| start.clone());
        self.positions.insert(id, NodePosition::from_tokens(start, &end));
        id
    }

    fn decode_string(&self, token: &Token) -> ParseResult<String> {
        unescape_string(&token.text)
            .map_err(|_| ParserError::at_token(&messages::INVALID_TOKEN_0, &[&token.text], token))
    }

    fn parse_identifier(&mut self) -> ParseResult<String> {
        let token = self.peek();
        if token.kind.is_identifier_like() {
            self.next_token();
            return Ok(token.text);
        }
        if token.kind == SyntaxKind::Unknown {
            return Err(self.unexpected(&token));
        }
        self.error(&messages::IDENTIFIER_EXPECTED, &[], &token)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.nested(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Statement> {
        let start = self.peek();
        let statement = match start.kind {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                return Ok(Statement::Empty(EmptyStatement { id: self.finish_node(&start) }));
            }
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()?),
            SyntaxKind::LetKeyword => self.parse_let_statement()?,
            SyntaxKind::ConstKeyword => self.parse_const_statement(start, false)?,
            SyntaxKind::VarKeyword => self.parse_var_statement()?,
            SyntaxKind::IfKeyword => self.parse_if_statement()?,
            SyntaxKind::ReturnKeyword => self.parse_return_statement()?,
            SyntaxKind::BreakKeyword => {
                self.next_token();
                Statement::Break(BreakStatement { id: self.finish_node(&start) })
            }
            SyntaxKind::ContinueKeyword => {
                self.next_token();
                Statement::Continue(ContinueStatement { id: self.finish_node(&start) })
            }
            SyntaxKind::WhileKeyword => self.parse_while_statement()?,
            SyntaxKind::DoKeyword => self.parse_do_statement()?,
            SyntaxKind::ForKeyword => self.parse_for_statement()?,
            SyntaxKind::SwitchKeyword => self.parse_switch_statement()?,
            SyntaxKind::ThrowKeyword => self.parse_throw_statement()?,
            SyntaxKind::TryKeyword => self.parse_try_statement()?,
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(start, false)?,
            SyntaxKind::ExportKeyword => self.parse_export_declaration()?,
            SyntaxKind::ImportKeyword => self.parse_import_declaration()?,
            _ => self.parse_expression_statement()?,
        };
        if takes_semicolon(&statement) {
            self.optional_token(SyntaxKind::SemicolonToken);
        }
        Ok(statement)
    }

    fn parse_block(&mut self) -> ParseResult<BlockStatement> {
        let start = self.expect_token(SyntaxKind::OpenBraceToken)?;
        let mut statements = Vec::new();
        while !matches!(
            self.peek_kind(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            statements.push(self.parse_statement()?);
        }
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        Ok(BlockStatement { id: self.finish_node(&start), statements })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let start = self.peek();
        let expression = self.parse_expression()?;
        let id = self.finish_node(&start);
        Ok(Statement::Expression(ExpressionStatement { id, expression }))
    }

    fn parse_let_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::LetKeyword)?;
        let declarations = self.parse_variable_declarations(false)?;
        let id = self.finish_node(&start);
        Ok(Statement::Let(LetStatement { id, declarations }))
    }

    /// `const` declarations; `start` is the `export` keyword when exported.
    fn parse_const_statement(&mut self, start: Token, is_exported: bool) -> ParseResult<Statement> {
        self.expect_token(SyntaxKind::ConstKeyword)?;
        let declarations = self.parse_variable_declarations(true)?;
        let id = self.finish_node(&start);
        Ok(Statement::Const(ConstStatement { id, declarations, is_exported }))
    }

    fn parse_variable_declarations(&mut self, is_const: bool) -> ParseResult<Vec<VarDeclaration>> {
        let mut declarations = Vec::new();
        loop {
            let start = self.peek();
            let binding = match start.kind {
                SyntaxKind::OpenBraceToken => {
                    BindingTarget::Pattern(self.parse_object_binding_pattern()?)
                }
                SyntaxKind::OpenBracketToken => {
                    BindingTarget::Pattern(self.parse_array_binding_pattern()?)
                }
                _ => BindingTarget::Identifier(self.parse_identifier()?),
            };
            let expression = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
                Some(self.parse_assignment_expression()?)
            } else if is_const {
                let token = self.peek();
                return self.error(&messages::CONST_INITIALIZER_EXPECTED, &[], &token);
            } else {
                None
            };
            let id = self.finish_node(&start);
            declarations.push(VarDeclaration { id, binding, expression });
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        Ok(declarations)
    }

    fn parse_object_binding_pattern(&mut self) -> ParseResult<DestructurePattern> {
        self.expect_token(SyntaxKind::OpenBraceToken)?;
        let mut bindings = Vec::new();
        while self.peek_kind() != SyntaxKind::CloseBraceToken {
            if self.optional_token(SyntaxKind::DotDotDotToken).is_some() {
                let id = self.parse_identifier()?;
                bindings.push(ObjectBinding { id, alias: None, nested: None, rest: true });
                let next = self.peek();
                if next.kind != SyntaxKind::CloseBraceToken {
                    return self.error(&messages::REST_ARGUMENT_MUST_BE_LAST, &[], &next);
                }
                break;
            }
            let id = self.parse_identifier()?;
            let (alias, nested) = if self.optional_token(SyntaxKind::ColonToken).is_some() {
                match self.peek_kind() {
                    SyntaxKind::OpenBraceToken => {
                        (None, Some(self.nested(Self::parse_object_binding_pattern)?))
                    }
                    SyntaxKind::OpenBracketToken => {
                        (None, Some(self.nested(Self::parse_array_binding_pattern)?))
                    }
                    _ => (Some(self.parse_identifier()?), None),
                }
            } else {
                (None, None)
            };
            bindings.push(ObjectBinding { id, alias, nested, rest: false });
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        Ok(DestructurePattern::Object(bindings))
    }

    fn parse_array_binding_pattern(&mut self) -> ParseResult<DestructurePattern> {
        self.expect_token(SyntaxKind::OpenBracketToken)?;
        let mut bindings = Vec::new();
        loop {
            let binding = match self.peek_kind() {
                SyntaxKind::CloseBracketToken => break,
                SyntaxKind::CommaToken => {
                    self.next_token();
                    bindings.push(ArrayBinding { id: None, nested: None, rest: false });
                    continue;
                }
                SyntaxKind::DotDotDotToken => {
                    self.next_token();
                    let id = self.parse_identifier()?;
                    bindings.push(ArrayBinding { id: Some(id), nested: None, rest: true });
                    let next = self.peek();
                    if next.kind != SyntaxKind::CloseBracketToken {
                        return self.error(&messages::REST_ARGUMENT_MUST_BE_LAST, &[], &next);
                    }
                    break;
                }
                SyntaxKind::OpenBraceToken => ArrayBinding {
                    id: None,
                    nested: Some(self.nested(Self::parse_object_binding_pattern)?),
                    rest: false,
                },
                SyntaxKind::OpenBracketToken => ArrayBinding {
                    id: None,
                    nested: Some(self.nested(Self::parse_array_binding_pattern)?),
                    rest: false,
                },
                _ => ArrayBinding { id: Some(self.parse_identifier()?), nested: None, rest: false },
            };
            bindings.push(binding);
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken)?;
        Ok(DestructurePattern::Array(bindings))
    }

    fn parse_var_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::VarKeyword)?;
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.peek();
            let name = self.parse_identifier()?;
            if self.optional_token(SyntaxKind::EqualsToken).is_none() {
                let token = self.peek();
                return self.error(&messages::VAR_INITIALIZER_EXPECTED, &[], &token);
            }
            let expression = self.parse_assignment_expression()?;
            let id = self.finish_node(&decl_start);
            declarations.push(ReactiveVarDeclaration { id, name, expression });
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        let id = self.finish_node(&start);
        Ok(Statement::Var(VarStatement { id, declarations }))
    }

    fn parse_parenthesized_condition(&mut self) -> ParseResult<Expression> {
        self.expect_token(SyntaxKind::OpenParenToken)?;
        let condition = self.parse_expression()?;
        self.expect_token(SyntaxKind::CloseParenToken)?;
        Ok(condition)
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::IfKeyword)?;
        let condition = self.parse_parenthesized_condition()?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.optional_token(SyntaxKind::ElseKeyword).is_some() {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        let id = self.finish_node(&start);
        Ok(Statement::If(IfStatement { id, condition, then_branch, else_branch }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::ReturnKeyword)?;
        let next = self.peek();
        let expression = if !matches!(
            next.kind,
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) && !next.has_preceding_line_break()
        {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let id = self.finish_node(&start);
        Ok(Statement::Return(ReturnStatement { id, expression }))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::WhileKeyword)?;
        let condition = self.parse_parenthesized_condition()?;
        let body = Box::new(self.parse_statement()?);
        let id = self.finish_node(&start);
        Ok(Statement::While(WhileStatement { id, condition, body }))
    }

    fn parse_do_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::DoKeyword)?;
        let body = Box::new(self.parse_statement()?);
        self.expect_token(SyntaxKind::WhileKeyword)?;
        let condition = self.parse_parenthesized_condition()?;
        let id = self.finish_node(&start);
        Ok(Statement::DoWhile(DoWhileStatement { id, condition, body }))
    }

    fn parse_for_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::ForKeyword)?;
        self.expect_token(SyntaxKind::OpenParenToken)?;

        let first = self.peek();
        let is_in_or_of = |kind| matches!(kind, SyntaxKind::InKeyword | SyntaxKind::OfKeyword);
        if matches!(first.kind, SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword)
            && self.ahead_kind(1).is_identifier_like()
            && is_in_or_of(self.ahead_kind(2))
        {
            return self.parse_for_in_of_statement(start);
        }
        if first.kind.is_identifier_like() && is_in_or_of(self.ahead_kind(1)) {
            return self.error(&messages::FOR_BINDING_EXPECTED, &[], &first);
        }

        let init = match first.kind {
            SyntaxKind::SemicolonToken => None,
            SyntaxKind::LetKeyword => Some(Box::new(self.parse_let_statement()?)),
            SyntaxKind::ConstKeyword => Some(Box::new(self.parse_const_statement(first, false)?)),
            _ => Some(Box::new(self.parse_expression_statement()?)),
        };
        self.expect_token(SyntaxKind::SemicolonToken)?;
        let condition = if self.peek_kind() != SyntaxKind::SemicolonToken {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken)?;
        let update = if self.peek_kind() != SyntaxKind::CloseParenToken {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_token(SyntaxKind::CloseParenToken)?;
        let body = Box::new(self.parse_statement()?);
        let id = self.finish_node(&start);
        Ok(Statement::For(ForStatement { id, init, condition, update, body }))
    }

    fn parse_for_in_of_statement(&mut self, start: Token) -> ParseResult<Statement> {
        let var_binding = match self.next_token().kind {
            SyntaxKind::LetKeyword => ForVarBinding::Let,
            _ => ForVarBinding::Const,
        };
        let identifier = self.parse_identifier()?;
        let is_of = self.next_token().kind == SyntaxKind::OfKeyword;
        let expression = self.parse_expression()?;
        self.expect_token(SyntaxKind::CloseParenToken)?;
        let body = Box::new(self.parse_statement()?);
        let id = self.finish_node(&start);
        let statement = ForInOfStatement { id, var_binding, identifier, expression, body };
        Ok(if is_of { Statement::ForOf(statement) } else { Statement::ForIn(statement) })
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::SwitchKeyword)?;
        let expression = self.parse_parenthesized_condition()?;
        self.expect_token(SyntaxKind::OpenBraceToken)?;

        let mut cases = Vec::new();
        let mut has_default = false;
        loop {
            let case_start = self.peek();
            let condition = match case_start.kind {
                SyntaxKind::CloseBraceToken => break,
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    Some(self.parse_expression()?)
                }
                SyntaxKind::DefaultKeyword => {
                    if has_default {
                        return self.error(&messages::DUPLICATE_DEFAULT_CLAUSE, &[], &case_start);
                    }
                    has_default = true;
                    self.next_token();
                    None
                }
                SyntaxKind::Unknown => return Err(self.unexpected(&case_start)),
                _ => return self.error(&messages::CASE_OR_DEFAULT_EXPECTED, &[], &case_start),
            };
            self.expect_token(SyntaxKind::ColonToken)?;
            let mut statements = Vec::new();
            while !matches!(
                self.peek_kind(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                statements.push(self.parse_statement()?);
            }
            let id = self.finish_node(&case_start);
            cases.push(SwitchCase { id, condition, statements });
        }
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        let id = self.finish_node(&start);
        Ok(Statement::Switch(SwitchStatement { id, expression, cases }))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::ThrowKeyword)?;
        let expression = self.parse_expression()?;
        let id = self.finish_node(&start);
        Ok(Statement::Throw(ThrowStatement { id, expression }))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::TryKeyword)?;
        let try_block = self.parse_block()?;
        let has_catch = self.optional_token(SyntaxKind::CatchKeyword).is_some();
        let (catch_variable, catch_block) = if has_catch {
            let variable = if self.optional_token(SyntaxKind::OpenParenToken).is_some() {
                let name = self.parse_identifier()?;
                self.expect_token(SyntaxKind::CloseParenToken)?;
                Some(name)
            } else {
                None
            };
            (variable, Some(self.parse_block()?))
        } else {
            (None, None)
        };
        let finally_block = if self.optional_token(SyntaxKind::FinallyKeyword).is_some() {
            Some(self.parse_block()?)
        } else {
            None
        };
        if catch_block.is_none() && finally_block.is_none() {
            let token = self.peek();
            return self.error(&messages::CATCH_OR_FINALLY_EXPECTED, &[], &token);
        }
        let id = self.finish_node(&start);
        Ok(Statement::Try(TryStatement {
            id,
            try_block,
            catch_variable,
            catch_block,
            finally_block,
        }))
    }

    /// `function name(args) { ... }`; `start` is the `export` keyword when exported.
    fn parse_function_declaration(
        &mut self,
        start: Token,
        is_exported: bool,
    ) -> ParseResult<Statement> {
        let keyword = self.expect_token(SyntaxKind::FunctionKeyword)?;
        let name_token = self.peek();
        if !name_token.kind.is_identifier_like() {
            return self.error(&messages::FUNCTION_NAME_EXPECTED, &[], &name_token);
        }
        self.next_token();
        let arrow = self.parse_function_rest(&keyword, Some(name_token.text.clone()))?;
        let id = self.finish_node(&start);
        Ok(Statement::Function(FunctionDeclaration {
            id,
            name: name_token.text,
            arrow,
            is_exported,
        }))
    }

    fn parse_export_declaration(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::ExportKeyword)?;
        match self.peek_kind() {
            SyntaxKind::ConstKeyword => self.parse_const_statement(start, true),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(start, true),
            _ => {
                let token = self.peek();
                self.error(&messages::ONLY_CONST_AND_FUNCTION_CAN_BE_EXPORTED, &[], &token)
            }
        }
    }

    fn parse_import_declaration(&mut self) -> ParseResult<Statement> {
        let start = self.expect_token(SyntaxKind::ImportKeyword)?;
        self.expect_token(SyntaxKind::OpenBraceToken)?;
        let mut imports = Vec::new();
        while self.peek_kind() != SyntaxKind::CloseBraceToken {
            let name = self.parse_identifier()?;
            let alias = if self.optional_token(SyntaxKind::AsKeyword).is_some() {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            imports.push(ImportBinding { name, alias });
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        self.expect_token(SyntaxKind::FromKeyword)?;

        let path = self.peek();
        if path.kind != SyntaxKind::StringLiteral {
            return self.error(&messages::MODULE_PATH_EXPECTED, &[], &path);
        }
        self.next_token();
        let module_file = self.decode_string(&path)?;
        let id = self.finish_node(&start);
        Ok(Statement::Import(ImportDeclaration { id, imports, module_file }))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        let start = self.peek();
        let first = self.parse_assignment_expression()?;
        if self.peek_kind() != SyntaxKind::CommaToken {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.optional_token(SyntaxKind::CommaToken).is_some() {
            expressions.push(self.parse_assignment_expression()?);
        }
        let id = self.finish_node(&start);
        Ok(Expression::Sequence(SequenceExpression { id, expressions }))
    }

    fn parse_assignment_expression(&mut self) -> ParseResult<Expression> {
        self.nested(Self::parse_assignment_expression_inner)
    }

    fn parse_assignment_expression_inner(&mut self) -> ParseResult<Expression> {
        let start = self.peek();
        // x => ...
        if start.kind.is_identifier_like()
            && self.ahead_kind(1) == SyntaxKind::EqualsGreaterThanToken
        {
            return self.parse_arrow_function_after_identifier(start);
        }

        let target = self.parse_conditional_expression()?;
        let operator = self.peek();
        if !operator.kind.is_assignment_operator() {
            return Ok(target);
        }
        if !target.is_assignment_target() {
            return self.error(&messages::INVALID_ASSIGNMENT_TARGET, &[], &operator);
        }
        self.next_token();
        let value = self.parse_assignment_expression()?;
        let id = self.finish_node(&start);
        Ok(Expression::Assignment(AssignmentExpression {
            id,
            target: Box::new(target),
            operator: operator.kind,
            value: Box::new(value),
        }))
    }

    fn parse_conditional_expression(&mut self) -> ParseResult<Expression> {
        let start = self.peek();
        let condition = self.parse_binary_expression(OperatorPrecedence::Lowest)?;
        if self.optional_token(SyntaxKind::QuestionToken).is_none() {
            return Ok(condition);
        }
        let consequent = self.parse_assignment_expression()?;
        self.expect_token(SyntaxKind::ColonToken)?;
        let alternate = self.parse_assignment_expression()?;
        let id = self.finish_node(&start);
        Ok(Expression::Conditional(ConditionalExpression {
            id,
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    fn parse_binary_expression(
        &mut self,
        min_precedence: OperatorPrecedence,
    ) -> ParseResult<Expression> {
        let start = self.peek();
        let mut left = self.parse_unary_expression()?;
        loop {
            let operator = self.peek_kind();
            let precedence = get_binary_operator_precedence(operator);
            if precedence == OperatorPrecedence::Invalid || precedence <= min_precedence {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(right_operand_precedence(operator))?;
            let id = self.finish_node(&start);
            left = Expression::Binary(BinaryExpression {
                id,
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        let start = self.peek();
        if is_unary_operator(start.kind) {
            self.next_token();
            let operand = Box::new(self.nested(Self::parse_unary_expression)?);
            let id = self.finish_node(&start);
            return Ok(Expression::Unary(UnaryExpression { id, operator: start.kind, operand }));
        }
        if is_update_operator(start.kind) {
            self.next_token();
            let operand_start = self.peek();
            let operand = self.nested(Self::parse_unary_expression)?;
            if !operand.is_assignment_target() {
                return self.error(&messages::INVALID_ASSIGNMENT_TARGET, &[], &operand_start);
            }
            let id = self.finish_node(&start);
            return Ok(Expression::Prefix(PrefixOpExpression {
                id,
                operator: start.kind,
                operand: Box::new(operand),
            }));
        }
        self.parse_postfix_expression()
    }

    fn parse_postfix_expression(&mut self) -> ParseResult<Expression> {
        let start = self.peek();
        let operand = self.parse_left_hand_side_expression()?;
        let next = self.peek();
        if !is_update_operator(next.kind) || next.has_preceding_line_break() {
            return Ok(operand);
        }
        if !operand.is_assignment_target() {
            return self.error(&messages::INVALID_ASSIGNMENT_TARGET, &[], &next);
        }
        self.next_token();
        let id = self.finish_node(&start);
        Ok(Expression::Postfix(PostfixOpExpression {
            id,
            operator: next.kind,
            operand: Box::new(operand),
        }))
    }

    fn parse_left_hand_side_expression(&mut self) -> ParseResult<Expression> {
        let start = self.peek();
        let mut expr = self.parse_primary_expression()?;
        loop {
            match self.peek_kind() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let member = self.parse_member_name()?;
                    expr = self.member_access(&start, expr, member, false);
                }
                SyntaxKind::QuestionDotToken => {
                    self.next_token();
                    expr = match self.peek_kind() {
                        SyntaxKind::OpenBracketToken => {
                            self.parse_calculated_member_access(&start, expr, true)?
                        }
                        SyntaxKind::OpenParenToken => self.parse_invocation(&start, expr, true)?,
                        _ => {
                            let member = self.parse_member_name()?;
                            self.member_access(&start, expr, member, true)
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    expr = self.parse_calculated_member_access(&start, expr, false)?;
                }
                SyntaxKind::OpenParenToken => {
                    expr = self.parse_invocation(&start, expr, false)?;
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn member_access(
        &mut self,
        start: &Token,
        object: Expression,
        member: String,
        optional: bool,
    ) -> Expression {
        let id = self.finish_node(start);
        Expression::MemberAccess(MemberAccessExpression {
            id,
            object: Box::new(object),
            member,
            optional,
        })
    }

    fn parse_calculated_member_access(
        &mut self,
        start: &Token,
        object: Expression,
        optional: bool,
    ) -> ParseResult<Expression> {
        self.expect_token(SyntaxKind::OpenBracketToken)?;
        let member = self.parse_expression()?;
        self.expect_token(SyntaxKind::CloseBracketToken)?;
        let id = self.finish_node(start);
        Ok(Expression::CalculatedMemberAccess(CalculatedMemberAccessExpression {
            id,
            object: Box::new(object),
            member: Box::new(member),
            optional,
        }))
    }

    fn parse_invocation(
        &mut self,
        start: &Token,
        object: Expression,
        optional: bool,
    ) -> ParseResult<Expression> {
        self.expect_token(SyntaxKind::OpenParenToken)?;
        let arguments = self.parse_argument_list()?;
        let id = self.finish_node(start);
        Ok(Expression::FunctionInvocation(FunctionInvocationExpression {
            id,
            object: Box::new(object),
            arguments,
            optional,
        }))
    }

    fn parse_member_name(&mut self) -> ParseResult<String> {
        let token = self.peek();
        if is_property_name(token.kind) {
            self.next_token();
            return Ok(token.text);
        }
        if token.kind == SyntaxKind::Unknown {
            return Err(self.unexpected(&token));
        }
        self.error(&messages::IDENTIFIER_EXPECTED, &[], &token)
    }

    /// Comma-separated items up to and including the closing `)`. The
    /// opening `(` has already been consumed.
    fn parse_argument_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut args = Vec::new();
        while self.peek_kind() != SyntaxKind::CloseParenToken {
            args.push(self.parse_spread_or_assignment()?);
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken)?;
        Ok(args)
    }

    fn parse_spread_or_assignment(&mut self) -> ParseResult<Expression> {
        let start = self.peek();
        if start.kind != SyntaxKind::DotDotDotToken {
            return self.parse_assignment_expression();
        }
        self.next_token();
        let operand = Box::new(self.parse_assignment_expression()?);
        let id = self.finish_node(&start);
        Ok(Expression::Spread(SpreadExpression { id, operand }))
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let token = self.peek();
        let value = match token.kind {
            SyntaxKind::OpenParenToken => return self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => return self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => return self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => return self.parse_function_expression(),
            SyntaxKind::NumericLiteral => match parse_numeric_literal(&token.text) {
                Some(value) => LiteralValue::Number(value),
                None => return self.error(&messages::INVALID_TOKEN_0, &[&token.text], &token),
            },
            SyntaxKind::StringLiteral => LiteralValue::String(self.decode_string(&token)?),
            SyntaxKind::TrueKeyword => LiteralValue::Boolean(true),
            SyntaxKind::FalseKeyword => LiteralValue::Boolean(false),
            SyntaxKind::NullKeyword => LiteralValue::Null,
            SyntaxKind::UndefinedKeyword => LiteralValue::Undefined,
            SyntaxKind::InfinityKeyword => LiteralValue::Number(f64::INFINITY),
            SyntaxKind::NaNKeyword => LiteralValue::Number(f64::NAN),
            kind if kind.is_identifier_like() => {
                self.next_token();
                let id = self.finish_node(&token);
                return Ok(Expression::Identifier(IdentifierExpression { id, name: token.text }));
            }
            _ => return Err(self.unexpected(&token)),
        };
        self.next_token();
        let id = self.finish_node(&token);
        Ok(Expression::Literal(LiteralExpression { id, value }))
    }

    /// A parenthesized expression, a sequence, or the parameter list of an
    /// arrow function.
    fn parse_parenthesized_expression(&mut self) -> ParseResult<Expression> {
        let start = self.expect_token(SyntaxKind::OpenParenToken)?;
        let mut items = self.parse_argument_list()?;
        if self.optional_token(SyntaxKind::EqualsGreaterThanToken).is_some() {
            let args = self.expression_to_parameters(items)?;
            return self.parse_arrow_function_body(&start, None, args);
        }

        if let Some(spread) = items.iter().find(|item| matches!(item, Expression::Spread(_))) {
            return Err(self.error_at_node(&messages::UNEXPECTED_TOKEN_0, &["..."], spread.id()));
        }
        match items.len() {
            0 => {
                let token = self.peek();
                self.error(&messages::TOKEN_0_EXPECTED, &["=>"], &token)
            }
            1 => Ok(items.remove(0)),
            _ => {
                let id = self.finish_node(&start);
                Ok(Expression::Sequence(SequenceExpression { id, expressions: items }))
            }
        }
    }

    fn parse_arrow_function_after_identifier(&mut self, start: Token) -> ParseResult<Expression> {
        self.next_token();
        let param_id = self.finish_node(&start);
        let args = vec![Expression::Identifier(IdentifierExpression {
            id: param_id,
            name: start.text.clone(),
        })];
        self.expect_token(SyntaxKind::EqualsGreaterThanToken)?;
        self.parse_arrow_function_body(&start, None, args)
    }

    fn parse_arrow_function_body(
        &mut self,
        start: &Token,
        name: Option<String>,
        args: Vec<Expression>,
    ) -> ParseResult<Expression> {
        let statement = if self.peek_kind() == SyntaxKind::OpenBraceToken {
            Statement::Block(self.parse_block()?)
        } else {
            let body_start = self.peek();
            let expression = self.parse_assignment_expression()?;
            let id = self.finish_node(&body_start);
            Statement::Expression(ExpressionStatement { id, expression })
        };
        let id = self.finish_node(start);
        Ok(Expression::Arrow(ArrowExpression { id, name, args, statement: Box::new(statement) }))
    }

    fn parse_function_expression(&mut self) -> ParseResult<Expression> {
        let start = self.expect_token(SyntaxKind::FunctionKeyword)?;
        let name = if self.peek_kind().is_identifier_like() {
            Some(self.next_token().text)
        } else {
            None
        };
        self.parse_function_rest(&start, name).map(Expression::Arrow)
    }

    /// The parameter list and block body shared by function declarations
    /// and function expressions.
    fn parse_function_rest(
        &mut self,
        start: &Token,
        name: Option<String>,
    ) -> ParseResult<ArrowExpression> {
        self.expect_token(SyntaxKind::OpenParenToken)?;
        let items = self.parse_argument_list()?;
        let args = self.expression_to_parameters(items)?;
        if self.peek_kind() != SyntaxKind::OpenBraceToken {
            let token = self.peek();
            return self.error(&messages::TOKEN_0_EXPECTED, &["{"], &token);
        }
        let body = self.parse_block()?;
        let id = self.finish_node(start);
        Ok(ArrowExpression { id, name, args, statement: Box::new(Statement::Block(body)) })
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let start = self.expect_token(SyntaxKind::OpenBracketToken)?;
        let mut items = Vec::new();
        loop {
            let token = self.peek();
            match token.kind {
                SyntaxKind::CloseBracketToken => break,
                SyntaxKind::CommaToken => {
                    self.next_token();
                    let id = self.finish_node(&token);
                    items.push(Expression::NoArg(NoArgExpression { id }));
                }
                _ => {
                    items.push(self.parse_spread_or_assignment()?);
                    if self.optional_token(SyntaxKind::CommaToken).is_none() {
                        break;
                    }
                }
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken)?;
        let id = self.finish_node(&start);
        Ok(Expression::ArrayLiteral(ArrayLiteralExpression { id, items }))
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expression> {
        let start = self.expect_token(SyntaxKind::OpenBraceToken)?;
        let mut props = Vec::new();
        while self.peek_kind() != SyntaxKind::CloseBraceToken {
            props.push(self.parse_object_property()?);
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        let id = self.finish_node(&start);
        Ok(Expression::ObjectLiteral(ObjectLiteralExpression { id, props }))
    }

    fn parse_object_property(&mut self) -> ParseResult<ObjectProperty> {
        let token = self.peek();
        let key = match token.kind {
            SyntaxKind::DotDotDotToken => {
                self.next_token();
                let operand = self.parse_assignment_expression()?;
                return Ok(ObjectProperty::Spread { operand });
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let key = self.parse_assignment_expression()?;
                self.expect_token(SyntaxKind::CloseBracketToken)?;
                PropertyKey::Computed(Box::new(key))
            }
            SyntaxKind::StringLiteral => {
                self.next_token();
                PropertyKey::String(self.decode_string(&token)?)
            }
            SyntaxKind::NumericLiteral => {
                self.next_token();
                match parse_numeric_literal(&token.text) {
                    Some(value) => PropertyKey::Number(value),
                    None => return self.error(&messages::INVALID_TOKEN_0, &[&token.text], &token),
                }
            }
            kind if is_property_name(kind) => {
                self.next_token();
                // Shorthand `{ a }`
                if kind.is_identifier_like()
                    && matches!(
                        self.peek_kind(),
                        SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken
                    )
                {
                    let id = self.finish_node(&token);
                    let name = token.text.clone();
                    let value = Expression::Identifier(IdentifierExpression { id, name });
                    let key = PropertyKey::Identifier(token.text);
                    return Ok(ObjectProperty::Property { key, value });
                }
                PropertyKey::Identifier(token.text)
            }
            SyntaxKind::Unknown => return Err(self.unexpected(&token)),
            _ => return self.error(&messages::INVALID_OBJECT_PROPERTY, &[], &token),
        };
        self.expect_token(SyntaxKind::ColonToken)?;
        let value = self.parse_assignment_expression()?;
        Ok(ObjectProperty::Property { key, value })
    }

    // ========================================================================
    // Arrow parameters
    // ========================================================================

    /// Convert the items of a parenthesized list into arrow parameters.
    fn expression_to_parameters(&mut self, items: Vec<Expression>) -> ParseResult<Vec<Expression>> {
        let count = items.len();
        let mut params = Vec::with_capacity(count);
        for (index, item) in items.into_iter().enumerate() {
            let param = match item {
                Expression::Identifier(_) => item,
                Expression::Spread(ref spread) => {
                    if index + 1 != count {
                        return Err(self.rest_not_last(spread.id));
                    }
                    if !matches!(*spread.operand, Expression::Identifier(_)) {
                        return Err(self.invalid_parameter(spread.id));
                    }
                    item
                }
                Expression::ObjectLiteral(_) | Expression::ArrayLiteral(_) => {
                    let pattern = self.expression_to_pattern(&item)?;
                    // The pattern keeps the literal's ID and position.
                    let id = item.id();
                    self.discard_positions_below(&item);
                    Expression::Destructure(DestructureExpression { id, pattern })
                }
                other => return Err(self.invalid_parameter(other.id())),
            };
            params.push(param);
        }
        Ok(params)
    }

    fn expression_to_pattern(&self, expr: &Expression) -> ParseResult<DestructurePattern> {
        match expr {
            Expression::ObjectLiteral(literal) => {
                let count = literal.props.len();
                let mut bindings = Vec::with_capacity(count);
                for (index, prop) in literal.props.iter().enumerate() {
                    let binding = match prop {
                        ObjectProperty::Spread { operand } => {
                            let Expression::Identifier(name) = operand else {
                                return Err(self.invalid_parameter(operand.id()));
                            };
                            if index + 1 != count {
                                return Err(self.rest_not_last(operand.id()));
                            }
                            ObjectBinding {
                                id: name.name.clone(),
                                alias: None,
                                nested: None,
                                rest: true,
                            }
                        }
                        ObjectProperty::Property { key, value } => {
                            let id = match key {
                                PropertyKey::Identifier(key) | PropertyKey::String(key) => {
                                    key.clone()
                                }
                                _ => return Err(self.invalid_parameter(value.id())),
                            };
                            match value {
                                Expression::Identifier(target) => {
                                    let alias = (target.name != id).then(|| target.name.clone());
                                    ObjectBinding { id, alias, nested: None, rest: false }
                                }
                                Expression::ObjectLiteral(_) | Expression::ArrayLiteral(_) => {
                                    let nested = Some(self.expression_to_pattern(value)?);
                                    ObjectBinding { id, alias: None, nested, rest: false }
                                }
                                other => return Err(self.invalid_parameter(other.id())),
                            }
                        }
                    };
                    bindings.push(binding);
                }
                Ok(DestructurePattern::Object(bindings))
            }
            Expression::ArrayLiteral(literal) => {
                let count = literal.items.len();
                let mut bindings = Vec::with_capacity(count);
                for (index, item) in literal.items.iter().enumerate() {
                    let binding = match item {
                        Expression::NoArg(_) => {
                            ArrayBinding { id: None, nested: None, rest: false }
                        }
                        Expression::Identifier(name) => ArrayBinding {
                            id: Some(name.name.clone()),
                            nested: None,
                            rest: false,
                        },
                        Expression::ObjectLiteral(_) | Expression::ArrayLiteral(_) => ArrayBinding {
                            id: None,
                            nested: Some(self.expression_to_pattern(item)?),
                            rest: false,
                        },
                        Expression::Spread(spread) => {
                            let Expression::Identifier(name) = spread.operand.as_ref() else {
                                return Err(self.invalid_parameter(spread.id));
                            };
                            if index + 1 != count {
                                return Err(self.rest_not_last(spread.id));
                            }
                            ArrayBinding { id: Some(name.name.clone()), nested: None, rest: true }
                        }
                        other => return Err(self.invalid_parameter(other.id())),
                    };
                    bindings.push(binding);
                }
                Ok(DestructurePattern::Array(bindings))
            }
            other => Err(self.invalid_parameter(other.id())),
        }
    }

    fn invalid_parameter(&self, id: NodeId) -> ParserError {
        self.error_at_node(&messages::INVALID_ARROW_PARAMETER, &[], id)
    }

    fn rest_not_last(&self, id: NodeId) -> ParserError {
        self.error_at_node(&messages::REST_ARGUMENT_MUST_BE_LAST, &[], id)
    }

    /// Drop the position entries of every node below `expr`; the nodes no
    /// longer exist once the literal has become a pattern.
    fn discard_positions_below(&mut self, expr: &Expression) {
        let mut collector = NodeIdCollector::default();
        collector.visit_expression(expr);
        let root = expr.id();
        for id in collector.ids {
            if id != root {
                self.positions.remove(id);
            }
        }
    }
}

/// Statements after which a `;` may follow.
fn takes_semicolon(statement: &Statement) -> bool {
    matches!(
        statement,
        Statement::Expression(_)
            | Statement::Let(_)
            | Statement::Const(_)
            | Statement::Var(_)
            | Statement::Return(_)
            | Statement::Break(_)
            | Statement::Continue(_)
            | Statement::Throw(_)
            | Statement::DoWhile(_)
            | Statement::Import(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(source: &str) -> Expression {
        Parser::new(source).parse_expr().unwrap().unwrap()
    }

    #[test]
    fn test_precedence_shapes_the_tree() {
        let Expression::Binary(sum) = expr("1 + 2 * 3") else { panic!("expected BinaryE") };
        assert_eq!(sum.operator, SyntaxKind::PlusToken);
        assert!(matches!(
            *sum.right,
            Expression::Binary(ref b) if b.operator == SyntaxKind::AsteriskToken
        ));
    }

    #[test]
    fn test_positions_cover_the_node() {
        let mut parser = Parser::new("  a.b(c)  ");
        let call = parser.parse_expr().unwrap().unwrap();
        assert_eq!(parser.source_of(call.id()).as_deref(), Some("a.b(c)"));
        let pos = parser.positions().get(call.id()).unwrap();
        assert_eq!((pos.start_position, pos.end_position), (2, 8));
        assert_eq!(pos.start_token.text, "a");
        assert_eq!(pos.end_token.text, ")");
    }

    #[test]
    fn test_id_base() {
        let mut parser = Parser::with_id_base("x", 100);
        let id = parser.parse_expr().unwrap().unwrap().id();
        assert_eq!(id, NodeId(100));
        assert_eq!(parser.next_node_id(), 101);
    }

    #[test]
    fn test_pattern_conversion_drops_inner_positions() {
        let mut parser = Parser::new("({a, b: c}) => a");
        let arrow = parser.parse_expr().unwrap().unwrap();
        let Expression::Arrow(arrow) = arrow else { panic!("expected ArrowE") };
        let mut collector = NodeIdCollector::default();
        collector.visit_expression(&Expression::Arrow(arrow));
        for id in collector.ids {
            assert!(parser.positions().contains(id), "missing position for {}", id);
        }
    }

    #[test]
    fn test_recursion_limit() {
        let depth = MAX_RECURSION_DEPTH as usize;
        let nested = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert!(Parser::new(&nested(depth - 1)).parse_expr().is_ok());
        let err = Parser::new(&nested(depth)).parse_expr().unwrap_err();
        assert_eq!(err.code(), "W024");
        assert_eq!(Parser::new(&nested(500)).parse_expr().unwrap_err().code(), "W024");
    }
}
