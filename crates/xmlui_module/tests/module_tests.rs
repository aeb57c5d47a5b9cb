//! Module resolution and code-behind collection tests.

use std::cell::RefCell;
use std::collections::HashMap;

use xmlui_ast::visitor::{AstVisitor, NodeIdCollector};
use xmlui_module::{
    collect_code_behind, collect_code_behind_from_source, parse_script_module,
    remove_code_behind_tokens_from_tree, ModuleErrors, ModuleGraph, ModuleId,
};

/// Helper: a resolver over an in-memory set of modules.
fn modules(entries: &[(&str, &str)]) -> impl Fn(&str, &str) -> Option<String> {
    let map: HashMap<String, String> = entries
        .iter()
        .map(|(name, source)| (name.to_string(), source.to_string()))
        .collect();
    move |_parent: &str, path: &str| map.get(path).cloned()
}

/// Helper: resolve `source` as `root`, expecting success.
fn resolve(root: &str, source: &str, others: &[(&str, &str)]) -> ModuleGraph {
    match parse_script_module(root, source, &modules(others), false) {
        Ok(graph) => graph,
        Err(errors) => panic!("unexpected module errors: {:?}", errors),
    }
}

/// Helper: resolve `source` as `root`, expecting failure.
fn resolve_errors(root: &str, source: &str, others: &[(&str, &str)]) -> ModuleErrors {
    match parse_script_module(root, source, &modules(others), false) {
        Ok(_) => panic!("expected module errors"),
        Err(errors) => errors,
    }
}

fn codes(errors: &ModuleErrors, module: &str) -> Vec<&'static str> {
    errors
        .get(module)
        .map(|list| list.iter().map(|e| e.code).collect())
        .unwrap_or_default()
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_unresolved_module_names_the_path() {
    let errors = resolve_errors("root", "import { a } from \"module1\";", &[]);
    let list = &errors["root"];
    assert_eq!(list[0].code, "W022");
    assert!(list[0].text.contains("module1"));
    assert_eq!((list[0].line, list[0].column), (0, 0));
}

#[test]
fn test_import_binds_exported_function() {
    let graph = resolve(
        "Main",
        "import { format as fmt } from 'helpers';\nvar label = fmt(1);",
        &[("helpers", "export function format(x) { return '' + x; }")],
    );
    assert_eq!(graph.len(), 2);
    let root = graph.root().unwrap();
    let imported = &root.imports["fmt"];
    assert_eq!(imported.exported_name, "format");
    assert_eq!(root.imported_modules, vec![imported.module]);

    let helpers = graph.find("helpers").unwrap();
    assert_eq!(helpers.parent, Some(ModuleId(0)));
    assert!(helpers.exports.contains_key("format"));
    assert!(graph.imported_declaration(imported).unwrap().as_function().is_some());
}

#[test]
fn test_circular_imports_terminate() {
    let a = "import { b } from 'B';\nexport function a() { return b(); }";
    let b = "import { a } from 'A';\nexport function b() { return 1; }";
    let graph = resolve("A", a, &[("A", a), ("B", b)]);
    assert_eq!(graph.len(), 2);
    let module_b = graph.find("B").unwrap();
    assert_eq!(module_b.imported_modules, vec![ModuleId(0)]);
    assert_eq!(module_b.imports["a"].module, ModuleId(0));
}

#[test]
fn test_self_import_terminates() {
    let source = "import { x } from 'Self';\nexport const x = 1;";
    let graph = resolve("Self", source, &[("Self", source)]);
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.root().unwrap().imports["x"].module, ModuleId(0));
}

#[test]
fn test_shared_module_is_parsed_once() {
    let calls = RefCell::new(Vec::new());
    let resolver = |parent: &str, path: &str| {
        calls.borrow_mut().push(format!("{}->{}", parent, path));
        match path {
            "left" => Some("import { c } from 'common'; export function l() {}".to_string()),
            "right" => Some("import { c } from 'common'; export function r() {}".to_string()),
            "common" => Some("export const c = 1;".to_string()),
            _ => None,
        }
    };
    let graph = parse_script_module(
        "Main",
        "import { l } from 'left'; import { r } from 'right';",
        &resolver,
        false,
    )
    .unwrap();
    assert_eq!(graph.len(), 4);
    assert_eq!(
        calls.into_inner(),
        vec!["Main->left", "left->common", "Main->right"]
    );
}

#[test]
fn test_node_ids_are_unique_across_modules() {
    let graph = resolve(
        "Main",
        "import { f } from 'lib'; var a = f(1) + 2;",
        &[("lib", "export function f(x) { return x * 2; }")],
    );
    let mut collector = NodeIdCollector::default();
    for module in graph.iter() {
        for stmt in &module.statements {
            collector.visit_statement(stmt);
        }
    }
    let mut ids: Vec<u32> = collector.ids.iter().map(|id| id.0).collect();
    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

// ============================================================================
// Module errors
// ============================================================================

#[test]
fn test_missing_export() {
    let errors = resolve_errors(
        "Main",
        "import { nope } from 'lib';",
        &[("lib", "export const yes = 1;")],
    );
    assert_eq!(codes(&errors, "Main"), vec!["W023"]);
    assert!(errors["Main"][0].text.contains("nope"));
}

#[test]
fn test_non_exported_function_cannot_be_imported() {
    let errors = resolve_errors(
        "Main",
        "import { hidden } from 'lib';",
        &[("lib", "function hidden() {}")],
    );
    assert_eq!(codes(&errors, "Main"), vec!["W023"]);
}

#[test]
fn test_duplicate_import_alias() {
    let errors = resolve_errors(
        "Main",
        "import { x } from 'm1';\nimport { y as x } from 'm2';",
        &[("m1", "export const x = 1;"), ("m2", "export const y = 2;")],
    );
    assert_eq!(codes(&errors, "Main"), vec!["W019"]);
    assert_eq!(errors["Main"][0].line, 1);
}

#[test]
fn test_duplicate_function() {
    let errors = resolve_errors("Main", "function f() {}\nfunction f() {}", &[]);
    assert_eq!(codes(&errors, "Main"), vec!["W020"]);
    assert!(errors["Main"][0].text.contains("'f'"));
}

#[test]
fn test_duplicate_export() {
    let errors = resolve_errors("Main", "export const a = 1;\nexport function a() {}", &[]);
    assert_eq!(codes(&errors, "Main"), vec!["W021"]);
}

#[test]
fn test_errors_are_keyed_by_failing_module() {
    let errors = resolve_errors(
        "Main",
        "import { f } from 'broken';",
        &[("broken", "export function f( {")],
    );
    assert!(errors.get("Main").is_none());
    assert_eq!(errors["broken"].len(), 1);
}

#[test]
fn test_errors_accumulate_across_modules() {
    let errors = resolve_errors(
        "Main",
        "import { f } from 'lib';\nimport { g } from 'missing';",
        &[("lib", "export function f() { var inner = 1; }")],
    );
    assert_eq!(codes(&errors, "lib"), vec!["W027"]);
    assert_eq!(codes(&errors, "Main"), vec!["W022"]);
}

#[test]
fn test_restrictive_mode_applies_to_imported_modules() {
    let resolver = modules(&[("lib", "let cache = {};\nexport function f() { return cache; }")]);
    assert!(parse_script_module("Main", "import { f } from 'lib';", &resolver, false).is_ok());

    let errors = parse_script_module("Main", "import { f } from 'lib';", &resolver, true).unwrap_err();
    assert_eq!(codes(&errors, "lib"), vec!["W028"]);
    assert!(!errors.contains_key("Main"));
}

#[test]
fn test_module_errors_serialize_in_module_order() {
    let errors = resolve_errors(
        "Main",
        "import { f } from 'lib';\nimport { g } from 'missing';",
        &[("lib", "{ import { x } from 'y'; }")],
    );
    let json = serde_json::to_value(&errors).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(json["lib"][0]["code"], "W031");
    assert_eq!(json["Main"][0]["code"], "W023");
    assert_eq!(json["Main"][1]["code"], "W022");
}

// ============================================================================
// Code-behind collection
// ============================================================================

#[test]
fn test_collects_vars_and_functions() {
    let collected = collect_code_behind_from_source(
        "Main",
        "var count = 0;\nvar doubled = count * 2;\nfunction inc(step) { count += step; }",
        &modules(&[]),
    );
    assert!(!collected.has_errors());
    assert_eq!(collected.vars.keys().collect::<Vec<_>>(), vec!["count", "doubled"]);
    assert_eq!(collected.vars["doubled"].source, "count * 2");
    assert_eq!(collected.vars["doubled"].tree.kind_name(), "BinaryE");
    assert_eq!(collected.functions["inc"].source, "(step) => { count += step; }");
}

#[test]
fn test_imported_functions_use_local_name() {
    let collected = collect_code_behind_from_source(
        "Main",
        "import { twice as double, ratio } from 'math';\nvar x = double(2);",
        &modules(&[(
            "math",
            "export function twice(v) { return v * 2; }\nexport const ratio = 0.5;",
        )]),
    );
    assert!(!collected.has_errors());
    assert!(collected.functions.contains_key("double"));
    assert!(!collected.functions.contains_key("ratio"));
    assert_eq!(collected.functions["double"].source, "(v) => { return v * 2; }");
}

#[test]
fn test_var_and_function_with_same_name() {
    let collected = collect_code_behind_from_source(
        "Main",
        "var item = 1;\nfunction item() {}",
        &modules(&[]),
    );
    let errors = collected.module_errors.as_ref().unwrap();
    assert_eq!(codes(errors, "Main"), vec!["W032"]);
    assert_eq!(errors["Main"][0].line, 1);
    assert!(collected.vars.contains_key("item"));
    assert!(!collected.functions.contains_key("item"));
}

#[test]
fn test_duplicate_var() {
    let collected =
        collect_code_behind_from_source("Main", "var a = 1; var a = 2;", &modules(&[]));
    let errors = collected.module_errors.as_ref().unwrap();
    assert_eq!(codes(errors, "Main"), vec!["W032"]);
}

#[test]
fn test_resolution_errors_are_returned() {
    let collected = collect_code_behind_from_source(
        "root",
        "import { a } from \"module1\";",
        &modules(&[]),
    );
    let errors = collected.module_errors.as_ref().unwrap();
    assert_eq!(errors["root"][0].code, "W022");
    assert!(collected.vars.is_empty());
    assert!(collected.functions.is_empty());
}

#[test]
fn test_collect_in_restrictive_mode() {
    let collected = collect_code_behind("Main", "if (true) {}", &modules(&[]), true);
    let errors = collected.module_errors.as_ref().unwrap();
    assert_eq!(codes(errors, "Main"), vec!["W028"]);
}

#[test]
fn test_remove_tokens_is_idempotent() {
    let mut collected = collect_code_behind_from_source(
        "Main",
        "import { f } from 'lib';\nvar a = { x: [1, 2] };\nfunction g({ p }, ...rest) { return p; }",
        &modules(&[("lib", "export function f() { return 1; }")]),
    );
    assert!(!collected.positions.is_empty());
    remove_code_behind_tokens_from_tree(&mut collected);
    assert!(collected.positions.is_empty());
    let vars_before = collected.vars.clone();
    let functions_before = collected.functions.clone();

    remove_code_behind_tokens_from_tree(&mut collected);
    assert!(collected.positions.is_empty());
    assert_eq!(collected.vars, vars_before);
    assert_eq!(collected.functions, functions_before);
}

#[test]
fn test_positions_serialize_only_while_present() {
    let mut collected = collect_code_behind_from_source("Main", "var a = 3", &modules(&[]));
    let json = serde_json::to_value(&collected).unwrap();
    assert!(json.get("positions").is_some());
    assert_eq!(json["vars"]["a"]["source"], "3");
    assert_eq!(json["vars"]["a"]["tree"]["type"], "LitE");

    remove_code_behind_tokens_from_tree(&mut collected);
    let json = serde_json::to_value(&collected).unwrap();
    assert!(json.get("positions").is_none());
    assert!(json.get("moduleErrors").is_none());
}

#[test]
fn test_broken_module_is_reported_once() {
    let errors = resolve_errors(
        "Main",
        "import { f } from 'broken';\nimport { g } from 'broken';",
        &[("broken", "export function f( {")],
    );
    assert_eq!(errors["broken"].len(), 1);
}
