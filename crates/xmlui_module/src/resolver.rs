//! Module resolution.
//!
//! [`parse_script_module`] parses a root script, checks which statements may
//! appear where, hoists functions, collects exports, and follows `import`
//! declarations through a caller-supplied [`ModuleResolver`]. All state of
//! one resolution lives in a [`ResolutionSession`]; a module name is parsed
//! at most once per session, so circular imports terminate.

use log::{debug, trace};
use xmlui_ast::node::{FunctionDeclaration, ImportDeclaration, Statement};
use xmlui_ast::position::PositionTable;
use xmlui_ast::types::NodeId;
use xmlui_ast::visitor::{walk_statement, AstVisitor};
use xmlui_core::{FxHashMap, FxHashSet, OrderedMap};
use xmlui_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use xmlui_parser::Parser;

use crate::graph::{ExportedDeclaration, ImportedName, ModuleGraph, ModuleId, ScriptModule};

/// Errors of a failed resolution, keyed by the module they occurred in.
pub type ModuleErrors = OrderedMap<String, Vec<Diagnostic>>;

/// Supplies the source text of imported modules.
pub trait ModuleResolver {
    /// Return the source of `requested_path` as imported from
    /// `parent_module`, or `None` when it cannot be found.
    fn resolve(&self, parent_module: &str, requested_path: &str) -> Option<String>;
}

impl<F> ModuleResolver for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn resolve(&self, parent_module: &str, requested_path: &str) -> Option<String> {
        self(parent_module, requested_path)
    }
}

/// Parse `source` as the module `module_name` and resolve its imports.
///
/// Any error in any module of the import graph fails the whole resolution.
pub fn parse_script_module(
    module_name: &str,
    source: &str,
    resolver: &dyn ModuleResolver,
    restrictive_mode: bool,
) -> Result<ModuleGraph, ModuleErrors> {
    debug!("resolving module '{}'", module_name);
    let mut session = ResolutionSession::new(resolver, restrictive_mode);
    session.parse_module(module_name, source, None);
    session.finish()
}

/// State of one top-level resolution.
pub struct ResolutionSession<'r> {
    resolver: &'r dyn ModuleResolver,
    restrictive_mode: bool,
    graph: ModuleGraph,
    parsed_modules: FxHashMap<String, ModuleId>,
    /// Modules that failed to parse; their errors are already recorded.
    failed_modules: FxHashSet<String>,
    errors: ModuleErrors,
    /// First node ID for the next parsed module, so IDs stay unique across
    /// the graph.
    next_node_id: u32,
}

impl<'r> ResolutionSession<'r> {
    pub fn new(resolver: &'r dyn ModuleResolver, restrictive_mode: bool) -> Self {
        Self {
            resolver,
            restrictive_mode,
            graph: ModuleGraph::new(),
            parsed_modules: FxHashMap::default(),
            failed_modules: FxHashSet::default(),
            errors: ModuleErrors::new(),
            next_node_id: 0,
        }
    }

    /// Parse one module and, recursively, everything it imports. Returns
    /// `None` when the module could not be parsed.
    pub fn parse_module(
        &mut self,
        name: &str,
        source: &str,
        parent: Option<ModuleId>,
    ) -> Option<ModuleId> {
        if let Some(id) = self.parsed_modules.get(name) {
            trace!("module '{}' already parsed", name);
            return Some(*id);
        }
        if self.failed_modules.contains(name) {
            return None;
        }

        let mut parser = Parser::with_id_base(source, self.next_node_id);
        let statements = match parser.parse_statements() {
            Ok(statements) => statements,
            Err(err) => {
                self.next_node_id = parser.next_node_id();
                self.failed_modules.insert(name.to_string());
                self.add_error(name, err.into_diagnostic());
                return None;
            }
        };
        if !parser.is_eof() {
            let token = parser.peek();
            self.next_node_id = parser.next_node_id();
            self.failed_modules.insert(name.to_string());
            self.add_error(
                name,
                Diagnostic::at(
                    &messages::UNEXPECTED_TOKEN_0,
                    &[&token.text],
                    token.start_position,
                    token.start_line,
                    token.start_column,
                ),
            );
            return None;
        }
        self.next_node_id = parser.next_node_id();
        let positions = parser.into_positions();

        let mut errors =
            check_statement_restrictions(&statements, &positions, self.restrictive_mode);
        let functions = hoist_functions(&statements, &positions, &mut errors);
        let exports = collect_exports(&statements, &positions, &mut errors);
        for error in errors {
            self.add_error(name, error);
        }

        let imports: Vec<ImportDeclaration> = statements
            .iter()
            .filter_map(|stmt| match stmt {
                Statement::Import(import) => Some(import.clone()),
                _ => None,
            })
            .collect();

        let id = self.graph.add(ScriptModule {
            name: name.to_string(),
            statements,
            functions,
            exports,
            imports: OrderedMap::new(),
            imported_modules: Vec::new(),
            parent,
            source: source.to_string(),
            positions,
        });
        self.parsed_modules.insert(name.to_string(), id);

        for import in &imports {
            self.resolve_import(name, id, import);
        }
        Some(id)
    }

    fn resolve_import(&mut self, name: &str, id: ModuleId, import: &ImportDeclaration) {
        trace!("module '{}' imports '{}'", name, import.module_file);
        if self.failed_modules.contains(&import.module_file) {
            return;
        }
        let child = match self.parsed_modules.get(&import.module_file) {
            Some(child) => *child,
            None => {
                let Some(import_source) = self.resolver.resolve(name, &import.module_file) else {
                    let error = self.error_at_node(
                        id,
                        &messages::CANNOT_FIND_MODULE_0,
                        &[&import.module_file],
                        import.id,
                    );
                    self.add_error(name, error);
                    return;
                };
                match self.parse_module(&import.module_file, &import_source, Some(id)) {
                    Some(child) => child,
                    None => return,
                }
            }
        };

        let mut resolved = Vec::new();
        let mut errors = Vec::new();
        for binding in &import.imports {
            let exported = self
                .graph
                .get(child)
                .map_or(false, |m| m.exports.contains_key(&binding.name));
            if !exported {
                errors.push(self.error_at_node(
                    id,
                    &messages::MODULE_0_DOES_NOT_EXPORT_1,
                    &[&import.module_file, &binding.name],
                    import.id,
                ));
                continue;
            }
            resolved.push((binding.local_name().to_string(), binding.name.clone()));
        }

        if let Some(module) = self.graph.get_mut(id) {
            if !module.imported_modules.contains(&child) {
                module.imported_modules.push(child);
            }
            for (local, exported_name) in resolved {
                if module.imports.contains_key(&local) {
                    let pos = module.positions.get(import.id);
                    errors.push(diagnostic_at(
                        pos.map(|p| (p.start_position, p.start_line, p.start_column)),
                        &messages::IMPORTED_NAME_0_ALREADY_DECLARED,
                        &[&local],
                    ));
                    continue;
                }
                module.imports.insert(
                    local,
                    ImportedName {
                        module: child,
                        exported_name,
                    },
                );
            }
        }
        for error in errors {
            self.add_error(name, error);
        }
    }

    fn error_at_node(
        &self,
        module: ModuleId,
        message: &DiagnosticMessage,
        args: &[&str],
        node: NodeId,
    ) -> Diagnostic {
        let pos = self
            .graph
            .get(module)
            .and_then(|m| m.positions.get(node))
            .map(|p| (p.start_position, p.start_line, p.start_column));
        diagnostic_at(pos, message, args)
    }

    fn add_error(&mut self, module: &str, error: Diagnostic) {
        trace!("module '{}': {} {}", module, error.code, error.text);
        self.errors.entry(module.to_string()).or_default().push(error);
    }

    /// Close the session.
    pub fn finish(self) -> Result<ModuleGraph, ModuleErrors> {
        if self.errors.is_empty() {
            debug!("resolved {} module(s)", self.graph.len());
            Ok(self.graph)
        } else {
            debug!("resolution failed in {} module(s)", self.errors.len());
            Err(self.errors)
        }
    }
}

fn diagnostic_at(
    pos: Option<(u32, u32, u32)>,
    message: &DiagnosticMessage,
    args: &[&str],
) -> Diagnostic {
    match pos {
        Some((position, line, column)) => Diagnostic::at(message, args, position, line, column),
        None => Diagnostic::new(message, args),
    }
}

fn node_diagnostic(
    positions: &PositionTable,
    id: NodeId,
    message: &DiagnosticMessage,
    args: &[&str],
) -> Diagnostic {
    diagnostic_at(
        positions
            .get(id)
            .map(|p| (p.start_position, p.start_line, p.start_column)),
        message,
        args,
    )
}

// ============================================================================
// Statement placement
// ============================================================================

/// Reports statements placed where modules do not allow them.
struct StatementRestrictions<'a> {
    positions: &'a PositionTable,
    /// Only `var`, `function`, `import` and exported `const` at the top
    /// level, and no nested function declarations.
    restrictive: bool,
    depth: u32,
    errors: Vec<Diagnostic>,
}

impl StatementRestrictions<'_> {
    fn check(&mut self, stmt: &Statement) {
        let error = if self.depth == 0 {
            match stmt {
                Statement::Var(_)
                | Statement::Function(_)
                | Statement::Import(_)
                | Statement::Empty(_) => None,
                Statement::Const(c) if c.is_exported => None,
                _ if self.restrictive => Some((
                    &messages::STATEMENT_0_NOT_ALLOWED_AT_TOP_LEVEL,
                    stmt.kind_name().to_string(),
                )),
                _ => None,
            }
        } else {
            match stmt {
                Statement::Var(_) => Some((&messages::VAR_ONLY_AT_TOP_LEVEL, String::new())),
                Statement::Import(_) => {
                    Some((&messages::IMPORT_ONLY_AT_TOP_LEVEL, String::new()))
                }
                _ if stmt.is_exported() => {
                    Some((&messages::EXPORT_ONLY_AT_TOP_LEVEL, String::new()))
                }
                Statement::Function(func) if self.restrictive => {
                    Some((&messages::NESTED_FUNCTION_0_NOT_ALLOWED, func.name.clone()))
                }
                _ => None,
            }
        };
        if let Some((message, arg)) = error {
            self.errors
                .push(node_diagnostic(self.positions, stmt.id(), message, &[&arg]));
        }
    }
}

impl AstVisitor for StatementRestrictions<'_> {
    fn visit_statement(&mut self, stmt: &Statement) {
        self.check(stmt);
        self.depth += 1;
        walk_statement(self, stmt);
        self.depth -= 1;
    }
}

fn check_statement_restrictions(
    statements: &[Statement],
    positions: &PositionTable,
    restrictive: bool,
) -> Vec<Diagnostic> {
    let mut checker = StatementRestrictions {
        positions,
        restrictive,
        depth: 0,
        errors: Vec::new(),
    };
    for stmt in statements {
        checker.visit_statement(stmt);
    }
    checker.errors
}

// ============================================================================
// Hoisting and exports
// ============================================================================

fn hoist_functions(
    statements: &[Statement],
    positions: &PositionTable,
    errors: &mut Vec<Diagnostic>,
) -> OrderedMap<String, FunctionDeclaration> {
    let mut functions = OrderedMap::new();
    for stmt in statements {
        let Statement::Function(func) = stmt else {
            continue;
        };
        if functions.contains_key(&func.name) {
            errors.push(node_diagnostic(
                positions,
                func.id,
                &messages::FUNCTION_0_ALREADY_DEFINED,
                &[&func.name],
            ));
            continue;
        }
        functions.insert(func.name.clone(), func.clone());
    }
    functions
}

fn collect_exports(
    statements: &[Statement],
    positions: &PositionTable,
    errors: &mut Vec<Diagnostic>,
) -> OrderedMap<String, ExportedDeclaration> {
    let mut exports = OrderedMap::new();
    let mut add = |name: &str, id: NodeId, decl: ExportedDeclaration| {
        if exports.contains_key(name) {
            errors.push(node_diagnostic(
                positions,
                id,
                &messages::EXPORT_0_ALREADY_DEFINED,
                &[name],
            ));
        } else {
            exports.insert(name.to_string(), decl);
        }
    };
    for stmt in statements {
        match stmt {
            Statement::Function(func) if func.is_exported => {
                add(&func.name, func.id, ExportedDeclaration::Function(func.clone()));
            }
            Statement::Const(c) if c.is_exported => {
                for name in c.declared_names() {
                    add(name, c.id, ExportedDeclaration::Const(c.clone()));
                }
            }
            _ => {}
        }
    }
    exports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_modules(_: &str, _: &str) -> Option<String> {
        None
    }

    fn codes(errors: &ModuleErrors, module: &str) -> Vec<&'static str> {
        errors
            .get(module)
            .map(|list| list.iter().map(|e| e.code).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_single_module() {
        let graph = parse_script_module(
            "Main",
            "var count = 0; function inc() { count++; }",
            &no_modules,
            false,
        )
        .unwrap();
        let root = graph.root().unwrap();
        assert_eq!(root.name, "Main");
        assert_eq!(root.statements.len(), 2);
        assert!(root.functions.contains_key("inc"));
        assert!(root.exports.is_empty());
        assert!(root.parent.is_none());
    }

    #[test]
    fn test_trailing_token_is_reported() {
        let errors = parse_script_module("Main", "var a = 1 )", &no_modules, false).unwrap_err();
        let list = &errors["Main"];
        assert_eq!(list[0].code, "W002");
        assert!(list[0].text.contains(')'));
    }

    #[test]
    fn test_syntax_error_becomes_module_error() {
        let errors = parse_script_module("Main", "const a;", &no_modules, false).unwrap_err();
        assert_eq!(codes(&errors, "Main"), vec!["W008"]);
    }

    #[test]
    fn test_nested_statement_restrictions() {
        let source = "function f() { var x = 1; import { a } from 'm'; { export const y = 2; } }";
        let errors = parse_script_module("Main", source, &no_modules, false).unwrap_err();
        assert_eq!(codes(&errors, "Main"), vec!["W027", "W031", "W030"]);
    }

    #[test]
    fn test_restrictive_mode() {
        let source = "let a = 1; function f() { function g() {} return g; }";
        assert!(parse_script_module("Main", source, &no_modules, false).is_ok());
        let errors = parse_script_module("Main", source, &no_modules, true).unwrap_err();
        assert_eq!(codes(&errors, "Main"), vec!["W028", "W029"]);
    }

    #[test]
    fn test_source_of_module_node() {
        let graph = parse_script_module("Main", "var total = a + b;", &no_modules, false).unwrap();
        let root = graph.root().unwrap();
        let Statement::Var(var) = &root.statements[0] else {
            panic!("expected a var statement");
        };
        let init = &var.declarations[0].expression;
        assert_eq!(root.source_of(init.id()).as_deref(), Some("a + b"));
    }
}
