//! SyntaxKind enum - all token kinds of XMLUIScript.

use serde::{Serialize, Serializer};

/// The kind of a script token. Variants are grouped so that range checks
/// (`is_keyword`, `is_assignment_operator`, ...) can compare discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Special tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken,

    // Trivia
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    NewLineTrivia,
    WhitespaceTrivia,

    // Literals
    NumericLiteral,
    StringLiteral,

    Identifier,

    // ========================================================================
    // Punctuation
    // ========================================================================
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    QuestionQuestionToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // ========================================================================
    // Keywords
    // ========================================================================
    LetKeyword,
    ConstKeyword,
    VarKeyword,
    IfKeyword,
    ElseKeyword,
    ReturnKeyword,
    BreakKeyword,
    ContinueKeyword,
    DoKeyword,
    WhileKeyword,
    ForKeyword,
    InKeyword,
    TryKeyword,
    CatchKeyword,
    FinallyKeyword,
    ThrowKeyword,
    SwitchKeyword,
    CaseKeyword,
    DefaultKeyword,
    DeleteKeyword,
    FunctionKeyword,
    ExportKeyword,
    ImportKeyword,
    TypeofKeyword,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    UndefinedKeyword,
    InfinityKeyword,
    NaNKeyword,
    // Contextual keywords: also usable as plain identifiers.
    OfKeyword,
    AsKeyword,
    FromKeyword,
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::LetKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::FromKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::OfKeyword;

    #[inline]
    fn in_range(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    /// Whether this kind represents a keyword (reserved or contextual).
    #[inline]
    pub fn is_keyword(self) -> bool {
        self.in_range(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Whether this keyword may also be used as an identifier.
    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self.in_range(Self::FIRST_CONTEXTUAL_KEYWORD, Self::LAST_KEYWORD)
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    #[inline]
    pub fn is_trivia(self) -> bool {
        self.in_range(SyntaxKind::SingleLineCommentTrivia, SyntaxKind::WhitespaceTrivia)
    }

    /// Whether this kind represents an assignment operator (`=` or compound).
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self.in_range(Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    /// Whether this kind represents a compound assignment operator.
    #[inline]
    pub fn is_compound_assignment(self) -> bool {
        self.in_range(SyntaxKind::PlusEqualsToken, Self::LAST_ASSIGNMENT)
    }

    /// Whether the token can start an identifier reference.
    #[inline]
    pub fn is_identifier_like(self) -> bool {
        self == SyntaxKind::Identifier || self.is_contextual_keyword()
    }

    /// Get the text of a keyword kind, or None.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::LetKeyword => Some("let"),
            SyntaxKind::ConstKeyword => Some("const"),
            SyntaxKind::VarKeyword => Some("var"),
            SyntaxKind::IfKeyword => Some("if"),
            SyntaxKind::ElseKeyword => Some("else"),
            SyntaxKind::ReturnKeyword => Some("return"),
            SyntaxKind::BreakKeyword => Some("break"),
            SyntaxKind::ContinueKeyword => Some("continue"),
            SyntaxKind::DoKeyword => Some("do"),
            SyntaxKind::WhileKeyword => Some("while"),
            SyntaxKind::ForKeyword => Some("for"),
            SyntaxKind::InKeyword => Some("in"),
            SyntaxKind::TryKeyword => Some("try"),
            SyntaxKind::CatchKeyword => Some("catch"),
            SyntaxKind::FinallyKeyword => Some("finally"),
            SyntaxKind::ThrowKeyword => Some("throw"),
            SyntaxKind::SwitchKeyword => Some("switch"),
            SyntaxKind::CaseKeyword => Some("case"),
            SyntaxKind::DefaultKeyword => Some("default"),
            SyntaxKind::DeleteKeyword => Some("delete"),
            SyntaxKind::FunctionKeyword => Some("function"),
            SyntaxKind::ExportKeyword => Some("export"),
            SyntaxKind::ImportKeyword => Some("import"),
            SyntaxKind::TypeofKeyword => Some("typeof"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::NullKeyword => Some("null"),
            SyntaxKind::UndefinedKeyword => Some("undefined"),
            SyntaxKind::InfinityKeyword => Some("Infinity"),
            SyntaxKind::NaNKeyword => Some("NaN"),
            SyntaxKind::OfKeyword => Some("of"),
            SyntaxKind::AsKeyword => Some("as"),
            SyntaxKind::FromKeyword => Some("from"),
            _ => None,
        }
    }

    /// Look up a keyword by its text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "let" => Some(SyntaxKind::LetKeyword),
            "const" => Some(SyntaxKind::ConstKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "else" => Some(SyntaxKind::ElseKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "break" => Some(SyntaxKind::BreakKeyword),
            "continue" => Some(SyntaxKind::ContinueKeyword),
            "do" => Some(SyntaxKind::DoKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "in" => Some(SyntaxKind::InKeyword),
            "try" => Some(SyntaxKind::TryKeyword),
            "catch" => Some(SyntaxKind::CatchKeyword),
            "finally" => Some(SyntaxKind::FinallyKeyword),
            "throw" => Some(SyntaxKind::ThrowKeyword),
            "switch" => Some(SyntaxKind::SwitchKeyword),
            "case" => Some(SyntaxKind::CaseKeyword),
            "default" => Some(SyntaxKind::DefaultKeyword),
            "delete" => Some(SyntaxKind::DeleteKeyword),
            "function" => Some(SyntaxKind::FunctionKeyword),
            "export" => Some(SyntaxKind::ExportKeyword),
            "import" => Some(SyntaxKind::ImportKeyword),
            "typeof" => Some(SyntaxKind::TypeofKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "null" => Some(SyntaxKind::NullKeyword),
            "undefined" => Some(SyntaxKind::UndefinedKeyword),
            "Infinity" => Some(SyntaxKind::InfinityKeyword),
            "NaN" => Some(SyntaxKind::NaNKeyword),
            "of" => Some(SyntaxKind::OfKeyword),
            "as" => Some(SyntaxKind::AsKeyword),
            "from" => Some(SyntaxKind::FromKeyword),
            _ => None,
        }
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::OpenBraceToken => Some("{"),
            SyntaxKind::CloseBraceToken => Some("}"),
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::OpenBracketToken => Some("["),
            SyntaxKind::CloseBracketToken => Some("]"),
            SyntaxKind::DotToken => Some("."),
            SyntaxKind::DotDotDotToken => Some("..."),
            SyntaxKind::SemicolonToken => Some(";"),
            SyntaxKind::CommaToken => Some(","),
            SyntaxKind::QuestionDotToken => Some("?."),
            SyntaxKind::LessThanToken => Some("<"),
            SyntaxKind::GreaterThanToken => Some(">"),
            SyntaxKind::LessThanEqualsToken => Some("<="),
            SyntaxKind::GreaterThanEqualsToken => Some(">="),
            SyntaxKind::EqualsEqualsToken => Some("=="),
            SyntaxKind::ExclamationEqualsToken => Some("!="),
            SyntaxKind::EqualsEqualsEqualsToken => Some("==="),
            SyntaxKind::ExclamationEqualsEqualsToken => Some("!=="),
            SyntaxKind::EqualsGreaterThanToken => Some("=>"),
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::AsteriskToken => Some("*"),
            SyntaxKind::AsteriskAsteriskToken => Some("**"),
            SyntaxKind::SlashToken => Some("/"),
            SyntaxKind::PercentToken => Some("%"),
            SyntaxKind::PlusPlusToken => Some("++"),
            SyntaxKind::MinusMinusToken => Some("--"),
            SyntaxKind::LessThanLessThanToken => Some("<<"),
            SyntaxKind::GreaterThanGreaterThanToken => Some(">>"),
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => Some(">>>"),
            SyntaxKind::AmpersandToken => Some("&"),
            SyntaxKind::BarToken => Some("|"),
            SyntaxKind::CaretToken => Some("^"),
            SyntaxKind::ExclamationToken => Some("!"),
            SyntaxKind::TildeToken => Some("~"),
            SyntaxKind::AmpersandAmpersandToken => Some("&&"),
            SyntaxKind::BarBarToken => Some("||"),
            SyntaxKind::QuestionToken => Some("?"),
            SyntaxKind::ColonToken => Some(":"),
            SyntaxKind::QuestionQuestionToken => Some("??"),
            SyntaxKind::EqualsToken => Some("="),
            SyntaxKind::PlusEqualsToken => Some("+="),
            SyntaxKind::MinusEqualsToken => Some("-="),
            SyntaxKind::AsteriskEqualsToken => Some("*="),
            SyntaxKind::AsteriskAsteriskEqualsToken => Some("**="),
            SyntaxKind::SlashEqualsToken => Some("/="),
            SyntaxKind::PercentEqualsToken => Some("%="),
            SyntaxKind::LessThanLessThanEqualsToken => Some("<<="),
            SyntaxKind::GreaterThanGreaterThanEqualsToken => Some(">>="),
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => Some(">>>="),
            SyntaxKind::AmpersandEqualsToken => Some("&="),
            SyntaxKind::BarEqualsToken => Some("|="),
            SyntaxKind::CaretEqualsToken => Some("^="),
            SyntaxKind::BarBarEqualsToken => Some("||="),
            SyntaxKind::AmpersandAmpersandEqualsToken => Some("&&="),
            SyntaxKind::QuestionQuestionEqualsToken => Some("??="),
            _ => None,
        }
    }

    /// The fixed source text of a punctuation or keyword kind.
    pub fn text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => f.write_str(text),
            None => write!(f, "{:?}", self),
        }
    }
}

/// Operators serialize as their source text (`"+"`, `"typeof"`, ...).
impl Serialize for SyntaxKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
