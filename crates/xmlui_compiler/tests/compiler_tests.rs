//! Front-end façade tests.

use xmlui_compiler::{script_errors, CompileError, Compiler, SourceFile};
use xmlui_options::FrontEndOptions;

fn compiler() -> Compiler<'static> {
    Compiler::without_imports(FrontEndOptions::default())
}

fn markup(name: &str, text: &str) -> SourceFile {
    SourceFile::new(name, text)
}

// ============================================================================
// Markup
// ============================================================================

#[test]
fn test_compile_markup() {
    let result = compiler()
        .compile_markup(&markup("Main.xmlui", "<App><Text value='Hi'/></App>"))
        .unwrap();
    let def = result.as_component().unwrap();
    assert_eq!(def.component_type, "App");
    assert_eq!(def.children[0].component_type, "Text");
}

#[test]
fn test_markup_errors_carry_file_name() {
    let err = compiler()
        .compile_markup(&markup("Broken.xmlui", "<App>"))
        .unwrap_err();
    assert_eq!(err.code, "U002");
    assert_eq!(err.file.as_deref(), Some("Broken.xmlui"));

    let err = compiler()
        .compile_markup(&markup("Nested.xmlui", "<Component name='A'><Component/></Component>"))
        .unwrap_err();
    assert_eq!(err.code, "T006");
    assert_eq!(err.file.as_deref(), Some("Nested.xmlui"));
}

#[test]
fn test_source_size_limit() {
    let options = FrontEndOptions {
        max_source_size: 8,
        ..FrontEndOptions::default()
    };
    let compiler = Compiler::without_imports(options);
    let err = compiler
        .compile_markup(&markup("Big.xmlui", "<App></App>"))
        .unwrap_err();
    assert_eq!(err.code, "X001");
    assert!(err.text.contains("Big.xmlui") && err.text.contains('8'));
    assert!(compiler.compile_markup(&markup("Small.xmlui", "<App/>")).is_ok());
}

#[test]
fn test_options_reach_the_transformer() {
    let options = FrontEndOptions {
        restrictive_mode: true,
        ..FrontEndOptions::default()
    };
    let result = Compiler::without_imports(options)
        .compile_markup(&markup("Main.xmlui", "<App><script>var a = 1; a = 2;</script></App>"))
        .unwrap();
    let errors = result.as_component().unwrap().script_error.as_ref().unwrap();
    assert_eq!(errors["Main"][0].code, "W028");
}

// ============================================================================
// Scripts
// ============================================================================

#[test]
fn test_compile_script_with_imports() {
    let resolver = |_: &str, path: &str| {
        (path == "math").then(|| "export function square(x) { return x * x; }".to_string())
    };
    let compiler = Compiler::new(FrontEndOptions::default(), &resolver);
    let source = SourceFile::new("Main", "import { square } from 'math';\nvar n = square(3);");
    let collected = compiler.compile_script(&source).unwrap();
    assert!(!collected.has_errors());
    assert!(collected.functions.contains_key("square"));
    assert_eq!(collected.vars["n"].source, "square(3)");
}

#[test]
fn test_resolve_modules_reports_module_errors() {
    let source = SourceFile::new("root", "import { a } from \"module1\";");
    match compiler().resolve_modules(&source) {
        Err(CompileError::Modules(errors)) => {
            assert_eq!(errors["root"][0].code, "W022");
            assert!(errors["root"][0].text.contains("module1"));
        }
        other => panic!("expected module errors, got {:?}", other.map(|g| g.len())),
    }
}

#[test]
fn test_read_missing_file() {
    let err = SourceFile::read(std::path::Path::new("/nonexistent/Main.xmlui")).unwrap_err();
    assert!(matches!(err, CompileError::Io { .. }));
}

// ============================================================================
// Checking
// ============================================================================

#[test]
fn test_check_files_keeps_order() {
    let sources = vec![
        markup("a.xmlui", "<App/>"),
        markup("b.xmlui", "<App>"),
        markup("c.xmlui", "<App><script>var x = ;</script></App>"),
        markup("d.xmlui", "<App><Button onClick='go()'/></App>"),
    ];
    let reports = compiler().check_files(&sources);
    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a.xmlui", "b.xmlui", "c.xmlui", "d.xmlui"]);
    let failed: Vec<bool> = reports.iter().map(|r| r.has_errors()).collect();
    assert_eq!(failed, vec![false, true, true, false]);
    assert_eq!(reports[2].diagnostics[0].file.as_deref(), Some("c.xmlui"));
}

#[test]
fn test_script_errors_in_nested_values() {
    let result = compiler()
        .compile_markup(&markup(
            "Main.xmlui",
            "<App>\
               <Card><script>var ok = 1</script></Card>\
               <Table><prop name='footer'><script>var = 2</script><Text/></prop></Table>\
             </App>",
        ))
        .unwrap();
    let errors = script_errors(&result);
    assert_eq!(errors.len(), 1);
}
