//! Code-behind collection.
//!
//! Extracts the reactive variables and functions a script declares at its
//! top level (plus the functions it imports) into name-keyed maps that the
//! markup transformer attaches to components.

use log::debug;
use serde::Serialize;
use xmlui_ast::node::{ArrowExpression, Expression, FunctionDeclaration, Statement};
use xmlui_ast::position::PositionTable;
use xmlui_ast::types::NodeId;
use xmlui_ast::visitor::{AstVisitor, NodeIdCollector};
use xmlui_core::{FxHashSet, OrderedMap};
use xmlui_diagnostics::{messages, Diagnostic};

use crate::graph::{ModuleGraph, ScriptModule};
use crate::resolver::{parse_script_module, ModuleErrors, ModuleResolver};

/// A collected reactive variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectedVar {
    /// Source text of the initializer.
    pub source: String,
    pub tree: Expression,
}

/// A collected function, rewritten as an arrow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectedFunction {
    /// `(args) => {body}`
    pub source: String,
    pub tree: ArrowExpression,
}

/// The declarations a code-behind script contributes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedDeclarations {
    pub vars: OrderedMap<String, CollectedVar>,
    pub functions: OrderedMap<String, CollectedFunction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_errors: Option<ModuleErrors>,
    /// Positions of the collected trees until they are stripped.
    #[serde(skip_serializing_if = "PositionTable::is_empty")]
    pub positions: PositionTable,
}

impl CollectedDeclarations {
    pub fn has_errors(&self) -> bool {
        self.module_errors.is_some()
    }

    fn add_error(&mut self, module: &str, error: Diagnostic) {
        self.module_errors
            .get_or_insert_with(ModuleErrors::new)
            .entry(module.to_string())
            .or_default()
            .push(error);
    }

    fn is_declared(&self, name: &str) -> bool {
        self.vars.contains_key(name) || self.functions.contains_key(name)
    }

    /// IDs of every node in the collected trees.
    fn reachable_ids(&self) -> Vec<NodeId> {
        let mut collector = NodeIdCollector::default();
        for var in self.vars.values() {
            collector.visit_expression(&var.tree);
        }
        for func in self.functions.values() {
            collector.visit_arrow(&func.tree);
        }
        collector.ids
    }
}

/// Resolve `source` as the module `root_module_name` and collect its
/// top-level declarations.
pub fn collect_code_behind_from_source(
    root_module_name: &str,
    source: &str,
    resolver: &dyn ModuleResolver,
) -> CollectedDeclarations {
    collect_code_behind(root_module_name, source, resolver, false)
}

/// [`collect_code_behind_from_source`] with the statement restrictions of
/// restrictive mode enabled.
pub fn collect_code_behind(
    root_module_name: &str,
    source: &str,
    resolver: &dyn ModuleResolver,
    restrictive_mode: bool,
) -> CollectedDeclarations {
    match parse_script_module(root_module_name, source, resolver, restrictive_mode) {
        Ok(graph) => collect_from_graph(&graph),
        Err(errors) => CollectedDeclarations {
            module_errors: Some(errors),
            ..CollectedDeclarations::default()
        },
    }
}

/// Collect the declarations of the root of a resolved graph.
pub fn collect_from_graph(graph: &ModuleGraph) -> CollectedDeclarations {
    let mut collected = CollectedDeclarations::default();
    let Some(root) = graph.root() else {
        return collected;
    };

    for stmt in &root.statements {
        match stmt {
            Statement::Var(var) => {
                for decl in &var.declarations {
                    if collected.is_declared(&decl.name) {
                        let error = duplicate_error(root, decl.id, &decl.name);
                        collected.add_error(&root.name, error);
                        continue;
                    }
                    let source = root.source_of(decl.expression.id()).unwrap_or_default();
                    collected.vars.insert(
                        decl.name.clone(),
                        CollectedVar {
                            source,
                            tree: decl.expression.clone(),
                        },
                    );
                }
            }
            Statement::Function(func) => {
                if collected.is_declared(&func.name) {
                    let error = duplicate_error(root, func.id, &func.name);
                    collected.add_error(&root.name, error);
                    continue;
                }
                collected
                    .functions
                    .insert(func.name.clone(), collect_function(root, func));
            }
            _ => {}
        }
    }

    for (local, imported) in &root.imports {
        let Some(func) = graph
            .imported_declaration(imported)
            .and_then(|decl| decl.as_function())
        else {
            continue;
        };
        let Some(module) = graph.get(imported.module) else {
            continue;
        };
        if collected.is_declared(local) {
            let error = duplicate_error(root, root_import_id(root, local), local);
            collected.add_error(&root.name, error);
            continue;
        }
        collected
            .functions
            .insert(local.clone(), collect_function(module, func));
    }

    let reachable: FxHashSet<NodeId> = collected.reachable_ids().into_iter().collect();
    for module in graph.iter() {
        let mut positions = module.positions.clone();
        positions.retain(|id| reachable.contains(&id));
        collected.positions.merge(positions);
    }
    debug!(
        "collected {} var(s) and {} function(s) from '{}'",
        collected.vars.len(),
        collected.functions.len(),
        root.name
    );
    collected
}

fn collect_function(module: &ScriptModule, func: &FunctionDeclaration) -> CollectedFunction {
    let args: Vec<String> = func
        .arrow
        .args
        .iter()
        .map(|arg| module.source_of(arg.id()).unwrap_or_default())
        .collect();
    let body = module
        .source_of(func.arrow.statement.id())
        .unwrap_or_else(|| "{}".to_string());
    CollectedFunction {
        source: format!("({}) => {}", args.join(", "), body),
        tree: func.arrow.clone(),
    }
}

fn duplicate_error(module: &ScriptModule, id: NodeId, name: &str) -> Diagnostic {
    match module.positions.get(id) {
        Some(pos) => Diagnostic::at(
            &messages::NAME_0_ALREADY_DECLARED,
            &[name],
            pos.start_position,
            pos.start_line,
            pos.start_column,
        ),
        None => Diagnostic::new(&messages::NAME_0_ALREADY_DECLARED, &[name]),
    }
}

/// The import declaration that binds `local` in `module`.
fn root_import_id(module: &ScriptModule, local: &str) -> NodeId {
    module
        .statements
        .iter()
        .find_map(|stmt| match stmt {
            Statement::Import(import)
                if import.imports.iter().any(|b| b.local_name() == local) =>
            {
                Some(import.id)
            }
            _ => None,
        })
        .unwrap_or(NodeId::INVALID)
}

/// Drop the position records of every node in the collected trees.
/// Calling it again has no further effect.
pub fn remove_code_behind_tokens_from_tree(collected: &mut CollectedDeclarations) {
    for id in collected.reachable_ids() {
        collected.positions.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_modules(_: &str, _: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_var_source_is_initializer_text() {
        let collected = collect_code_behind_from_source("Main", "var a = 3", &no_modules);
        assert!(!collected.has_errors());
        let var = &collected.vars["a"];
        assert_eq!(var.source, "3");
        assert_eq!(var.tree.kind_name(), "LitE");
    }

    #[test]
    fn test_function_source_is_arrow_text() {
        let collected = collect_code_behind_from_source(
            "Main",
            "function add(a, b) { return a + b; }",
            &no_modules,
        );
        let func = &collected.functions["add"];
        assert_eq!(func.source, "(a, b) => { return a + b; }");
        assert_eq!(func.tree.name.as_deref(), Some("add"));
    }

    #[test]
    fn test_positions_cover_only_collected_trees() {
        let mut collected =
            collect_code_behind_from_source("Main", "var a = 1 + 2; let b = 3;", &no_modules);
        // The binary expression and both literals.
        assert_eq!(collected.positions.len(), 3);
        remove_code_behind_tokens_from_tree(&mut collected);
        assert!(collected.positions.is_empty());
    }
}
