//! xmlui_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every failure the front-end reports carries a stable short code:
//! `W0xx` for script and module errors, `T0xx` for markup transformation
//! errors, `U0xx` for raw markup and property-value errors. Callers key off
//! the code, so the code-to-condition mapping in [`messages`] is part of the
//! public contract.

use serde::Serialize;
use std::fmt;
use xmlui_core::text::TextPos;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    /// The stable error code (e.g. `"W022"`, `"T006"`).
    pub code: &'static str,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
///
/// Serializes to the `{ code, text, line, column, position }` shape used for
/// module errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The file or module the diagnostic belongs to, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub code: &'static str,
    #[serde(skip)]
    pub category: DiagnosticCategory,
    /// The resolved message text.
    pub text: String,
    /// 0-based line of the offending token.
    pub line: u32,
    /// 0-based column of the offending token.
    pub column: u32,
    /// Character offset of the offending token.
    pub position: TextPos,
}

/// The entry type of a module error map.
pub type ParserErrorMessage = Diagnostic;

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            code: message.code,
            category: message.category,
            text: format_message(message.message, args),
            line: 0,
            column: 0,
            position: 0,
        }
    }

    /// Create a new diagnostic at a source location.
    pub fn at(
        message: &DiagnosticMessage,
        args: &[&str],
        position: TextPos,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            position,
            line,
            column,
            ..Self::new(message, args)
        }
    }

    /// Attach the file (or module) name.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}({},{}): ", file, self.line + 1, self.column + 1)?;
        }
        write!(f, "{} {}: {}", self.category, self.code, self.text)
    }
}

impl std::error::Error for Diagnostic {}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Script syntax errors (W001-W018, W024)
    // ========================================================================
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!("W001", Error, "An expression expected");
    pub const UNEXPECTED_TOKEN_0: DiagnosticMessage = diag!("W002", Error, "Unexpected token: '{0}'");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!("W003", Error, "An identifier expected");
    pub const TOKEN_0_EXPECTED: DiagnosticMessage = diag!("W004", Error, "'{0}' expected");
    pub const INVALID_TOKEN_0: DiagnosticMessage = diag!("W005", Error, "Invalid or unterminated token: '{0}'");
    pub const INVALID_OBJECT_PROPERTY: DiagnosticMessage = diag!("W006", Error, "Invalid object property name");
    pub const INVALID_ARROW_PARAMETER: DiagnosticMessage = diag!("W007", Error, "Invalid arrow function parameter list");
    pub const CONST_INITIALIZER_EXPECTED: DiagnosticMessage = diag!("W008", Error, "A 'const' declaration must have an initializer");
    pub const VAR_INITIALIZER_EXPECTED: DiagnosticMessage = diag!("W009", Error, "A reactive 'var' declaration must have an initializer");
    pub const CASE_OR_DEFAULT_EXPECTED: DiagnosticMessage = diag!("W010", Error, "'case' or 'default' expected");
    pub const CATCH_OR_FINALLY_EXPECTED: DiagnosticMessage = diag!("W011", Error, "'catch' or 'finally' expected");
    pub const FUNCTION_NAME_EXPECTED: DiagnosticMessage = diag!("W012", Error, "A function name expected");
    pub const REST_ARGUMENT_MUST_BE_LAST: DiagnosticMessage = diag!("W013", Error, "A rest argument must be the last argument");
    pub const ONLY_CONST_AND_FUNCTION_CAN_BE_EXPORTED: DiagnosticMessage = diag!("W014", Error, "Only 'const' and 'function' declarations can be exported");
    pub const MODULE_PATH_EXPECTED: DiagnosticMessage = diag!("W015", Error, "A module path string expected");
    pub const DUPLICATE_DEFAULT_CLAUSE: DiagnosticMessage = diag!("W016", Error, "A switch statement can have only one 'default' clause");
    pub const FOR_BINDING_EXPECTED: DiagnosticMessage = diag!("W017", Error, "'let' or 'const' expected in a for..in or for..of loop");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!("W018", Error, "Invalid assignment target");
    pub const EXPRESSION_TOO_DEEP: DiagnosticMessage = diag!("W024", Error, "Expression is nested too deeply");

    // ========================================================================
    // Module errors (W019-W032)
    // ========================================================================
    pub const IMPORTED_NAME_0_ALREADY_DECLARED: DiagnosticMessage = diag!("W019", Error, "Imported name '{0}' is already declared");
    pub const FUNCTION_0_ALREADY_DEFINED: DiagnosticMessage = diag!("W020", Error, "Function '{0}' is already defined");
    pub const EXPORT_0_ALREADY_DEFINED: DiagnosticMessage = diag!("W021", Error, "Export '{0}' is already defined");
    pub const CANNOT_FIND_MODULE_0: DiagnosticMessage = diag!("W022", Error, "Cannot find module '{0}'");
    pub const MODULE_0_DOES_NOT_EXPORT_1: DiagnosticMessage = diag!("W023", Error, "Module '{0}' does not export '{1}'");
    pub const VAR_ONLY_AT_TOP_LEVEL: DiagnosticMessage = diag!("W027", Error, "A reactive 'var' declaration is only allowed at the module top level");
    pub const STATEMENT_0_NOT_ALLOWED_AT_TOP_LEVEL: DiagnosticMessage = diag!("W028", Error, "Statement '{0}' is not allowed at the module top level");
    pub const NESTED_FUNCTION_0_NOT_ALLOWED: DiagnosticMessage = diag!("W029", Error, "Nested function declaration '{0}' is not allowed");
    pub const EXPORT_ONLY_AT_TOP_LEVEL: DiagnosticMessage = diag!("W030", Error, "Exports are only allowed at the module top level");
    pub const IMPORT_ONLY_AT_TOP_LEVEL: DiagnosticMessage = diag!("W031", Error, "Imports are only allowed at the module top level");
    pub const NAME_0_ALREADY_DECLARED: DiagnosticMessage = diag!("W032", Error, "'{0}' is already declared");

    // ========================================================================
    // Markup transformation errors (T001-T021)
    // ========================================================================
    pub const SINGLE_ROOT_ELEMENT_EXPECTED: DiagnosticMessage = diag!("T001", Error, "A markup document must have exactly one root element");
    pub const ROOT_ELEMENT_EXPECTED: DiagnosticMessage = diag!("T002", Error, "The root of a markup document must be an element");
    pub const COMPONENT_NAME_EXPECTED: DiagnosticMessage = diag!("T003", Error, "A compound component must have a 'name' attribute");
    pub const INVALID_COMPONENT_NAME_0: DiagnosticMessage = diag!("T004", Error, "Invalid compound component name: '{0}'");
    pub const COMPONENT_CHILD_EXPECTED: DiagnosticMessage = diag!("T005", Error, "A compound component must contain at least one component");
    pub const NESTED_COMPONENT_DEFINITION: DiagnosticMessage = diag!("T006", Error, "A compound component cannot contain a nested 'Component' definition");
    pub const EVENT_NAME_0_STARTS_WITH_ON: DiagnosticMessage = diag!("T008", Error, "Event name '{0}' must not start with 'on'");
    pub const UNEXPECTED_CHILD_ELEMENT_0: DiagnosticMessage = diag!("T009", Error, "Unexpected child element: '{0}'");
    pub const ATTRIBUTE_0_NOT_ALLOWED_ON_1: DiagnosticMessage = diag!("T011", Error, "Attribute '{0}' is not allowed on '{1}'");
    pub const NAME_ATTRIBUTE_REQUIRED_ON_0: DiagnosticMessage = diag!("T012", Error, "'{0}' must have a non-empty 'name' attribute");
    pub const USES_VALUE_REQUIRED: DiagnosticMessage = diag!("T015", Error, "'uses' must have a non-empty 'value' attribute");
    pub const UNEXPECTED_VALUE_ELEMENT_0: DiagnosticMessage = diag!("T016", Error, "Unexpected element in a value definition: '{0}'");
    pub const FIELD_AND_ITEM_MIXED_IN_0: DiagnosticMessage = diag!("T017", Error, "'field' and 'item' cannot be mixed in '{0}'");
    pub const ITEM_CANNOT_HAVE_NAME: DiagnosticMessage = diag!("T018", Error, "An 'item' cannot have a 'name' attribute");
    pub const COMPONENT_ATTRIBUTE_0_NOT_ALLOWED: DiagnosticMessage = diag!("T021", Error, "A compound component accepts only the 'name' attribute, '{0}' is not allowed");

    // ========================================================================
    // Raw markup and property-value errors (U001-U012)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER_0: DiagnosticMessage = diag!("U001", Error, "Unexpected character: '{0}'");
    pub const UNCLOSED_ELEMENT_0: DiagnosticMessage = diag!("U002", Error, "Unclosed element: '{0}'");
    pub const CLOSING_TAG_MISMATCH_0_1: DiagnosticMessage = diag!("U003", Error, "Closing tag '{1}' does not match opening tag '{0}'");
    pub const TAG_NAME_EXPECTED: DiagnosticMessage = diag!("U004", Error, "A tag name expected");
    pub const ATTRIBUTE_NAME_EXPECTED: DiagnosticMessage = diag!("U005", Error, "An attribute name expected");
    pub const TAG_END_EXPECTED: DiagnosticMessage = diag!("U006", Error, "'>' expected");
    pub const DUPLICATE_ATTRIBUTE_0: DiagnosticMessage = diag!("U007", Error, "Duplicate attribute: '{0}'");
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!("U008", Error, "Unterminated string literal");
    pub const UNTERMINATED_0: DiagnosticMessage = diag!("U009", Error, "Unterminated {0}");
    pub const VALUE_ATTRIBUTE_REQUIRED: DiagnosticMessage = diag!("U010", Error, "Value attribute is required");
    pub const UNCLOSED_EXPRESSION_0: DiagnosticMessage = diag!("U011", Error, "Unclosed expression: '{0}'");
    pub const INVALID_EXPRESSION_0_1: DiagnosticMessage = diag!("U012", Error, "Invalid expression '{0}': {1}");

    // ========================================================================
    // Host errors
    // ========================================================================
    pub const SOURCE_TOO_LARGE_0_1: DiagnosticMessage = diag!("X001", Error, "Source '{0}' exceeds the maximum size of {1} bytes");
    pub const UNKNOWN_OPTION_0: DiagnosticMessage = diag!("X002", Warning, "Unknown option '{0}'");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("Module '{0}' does not export '{1}'", &["lib", "foo"]);
        assert_eq!(msg, "Module 'lib' does not export 'foo'");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("An expression expected", &[]);
        assert_eq!(msg, "An expression expected");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::at(&messages::CANNOT_FIND_MODULE_0, &["module1"], 10, 0, 10)
            .with_file("Main");
        let display = format!("{}", diag);
        assert_eq!(display, "Main(1,11): error W022: Cannot find module 'module1'");
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::NESTED_COMPONENT_DEFINITION, &[]);
        assert!(diag.file.is_none());
        assert_eq!(diag.code, "T006");
        assert_eq!(diag.position, 0);
        assert!(diag.is_error());
    }

    #[test]
    fn test_diagnostic_serializes_as_error_message() {
        let diag = Diagnostic::at(&messages::UNEXPECTED_TOKEN_0, &[")"], 4, 1, 2);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["code"], "W002");
        assert_eq!(json["text"], "Unexpected token: ')'");
        assert_eq!(json["line"], 1);
        assert_eq!(json["column"], 2);
        assert_eq!(json["position"], 4);
        assert!(json.get("file").is_none());
    }
}
