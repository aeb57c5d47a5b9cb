//! Markup transformation and property-value tests.

use serde_json::Value;
use xmlui_ast::node::Expression;
use xmlui_markup::parse_markup;
use xmlui_parser::Parser;
use xmlui_transform::{
    parse_property_value, transform_to_component_def, ComponentDef, ComponentOrCompound,
    CompoundComponentDef, PropertyValue, TransformOptions, Transformer, ValueDef, ValuePart,
};

/// Helper: parse and transform markup.
fn transform(source: &str) -> Result<ComponentOrCompound, xmlui_diagnostics::Diagnostic> {
    let nodes = parse_markup(source).expect("markup parse failed");
    transform_to_component_def(&nodes)
}

/// Helper: transform a document with a plain component root.
fn component(source: &str) -> ComponentDef {
    match transform(source).expect("transform failed") {
        ComponentOrCompound::Component(def) => def,
        other => panic!("expected a component, got {:?}", other),
    }
}

fn compound(source: &str) -> CompoundComponentDef {
    match transform(source).expect("transform failed") {
        ComponentOrCompound::Compound(def) => def,
        other => panic!("expected a compound component, got {:?}", other),
    }
}

fn error_code(source: &str) -> &'static str {
    match transform(source) {
        Ok(def) => panic!("expected an error for {:?}, got {:?}", source, def),
        Err(err) => err.code,
    }
}

fn kind(expression: &Expression) -> String {
    serde_json::to_value(expression).unwrap()["type"]
        .as_str()
        .unwrap()
        .to_string()
}

fn literal_prop(def: &ComponentDef, name: &str) -> String {
    match def.prop(name) {
        Some(ValueDef::Value(PropertyValue::Single { value })) => value.clone(),
        other => panic!("expected a literal '{}', got {:?}", name, other),
    }
}

// ============================================================================
// Property values
// ============================================================================

#[test]
fn test_plain_text_is_single_value() {
    assert_eq!(parse_property_value("hello").unwrap(), PropertyValue::literal("hello"));
}

#[test]
fn test_single_expression_matches_parser_output() {
    let expected = Parser::new("a.b").parse_expr().unwrap().unwrap();
    match parse_property_value("{a.b}").unwrap() {
        PropertyValue::SingleExpression { expression } => assert_eq!(expression, expected),
        other => panic!("expected a single expression, got {:?}", other),
    }
}

#[test]
fn test_compound_value_parts() {
    let PropertyValue::Compound { parts } = parse_property_value("abc{a+b}def{d+e}ghi").unwrap() else {
        panic!("expected a compound value");
    };
    let shape: Vec<String> = parts
        .iter()
        .map(|part| match part {
            ValuePart::Text(text) => text.clone(),
            ValuePart::Expression(expression) => kind(expression),
        })
        .collect();
    assert_eq!(shape, vec!["abc", "BinaryE", "def", "BinaryE", "ghi"]);
}

#[test]
fn test_adjacent_expressions_omit_empty_text() {
    let PropertyValue::Compound { parts } = parse_property_value("{a}{b}").unwrap() else {
        panic!("expected a compound value");
    };
    assert_eq!(parts.len(), 2);
    assert!(parts.iter().all(|p| matches!(p, ValuePart::Expression(_))));
}

#[test]
fn test_escaped_brace() {
    assert_eq!(parse_property_value("hello \\{abs").unwrap(), PropertyValue::literal("hello {abs"));
}

#[test]
fn test_double_backslash_does_not_escape_brace() {
    let err = parse_property_value("hello \\\\{abs").unwrap_err();
    assert_eq!(err.code, "U011");
    assert!(err.text.contains("{abs"));
    assert_eq!(err.column, 8);
}

#[test]
fn test_braces_inside_strings() {
    match parse_property_value("{a ? '}' : \"{\"}").unwrap() {
        PropertyValue::SingleExpression { expression } => assert_eq!(kind(&expression), "CondE"),
        other => panic!("expected a single expression, got {:?}", other),
    }
}

#[test]
fn test_unclosed_expression() {
    let err = parse_property_value("abc {a + b").unwrap_err();
    assert_eq!(err.code, "U011");
    assert!(err.text.contains("Unclosed"));
    assert!(err.text.contains("{a + b"));
}

#[test]
fn test_unclosed_binding_in_markup() {
    let err = transform("<Text value=\"{a\" />").unwrap_err();
    assert_eq!(err.code, "U011");
    assert!(err.text.contains("{a"));

    let err = transform("<Text>abc {a</Text>").unwrap_err();
    assert_eq!(err.code, "U011");
    assert!(err.text.contains("{a"));
}

#[test]
fn test_invalid_expression() {
    for text in ["{a +}", "{a b}", "{}"] {
        let err = parse_property_value(text).unwrap_err();
        assert_eq!(err.code, "U012", "{}", text);
    }
}

#[test]
fn test_compound_expression_ids_do_not_overlap() {
    let PropertyValue::Compound { parts } = parse_property_value("{a} and {b}").unwrap() else {
        panic!("expected a compound value");
    };
    let ids: Vec<u32> = parts
        .iter()
        .filter_map(|part| match part {
            ValuePart::Expression(Expression::Identifier(id)) => Some(id.id.0),
            _ => None,
        })
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn test_script_var_is_collected() {
    let def = component("<Stack><script>var a = 3</script></Stack>");
    assert_eq!(def.script.as_deref(), Some("var a = 3"));
    let collected = def.script_collected.as_ref().unwrap();
    let var = &collected.vars["a"];
    assert_eq!(var.source, "3");
    assert_eq!(kind(&var.tree), "LitE");
    assert!(collected.positions.is_empty());
    assert!(def.script_error.is_none());
}

#[test]
fn test_scripts_are_joined() {
    let def = component("<Stack><script>Hi!</script><script>Hello!</script></Stack>");
    assert_eq!(def.script.as_deref(), Some("Hi!\nHello!"));
}

#[test]
fn test_script_errors_are_not_thrown() {
    let def = component("<Stack><script>var a = ;</script></Stack>");
    let errors = def.script_error.as_ref().unwrap();
    assert!(!errors["Main"].is_empty());
    assert!(def.script_collected.is_none());
}

#[test]
fn test_script_with_children_moves_to_fragment() {
    let def = component("<Stack gap='4'><script>var a = 3</script><Button/><Text/></Stack>");
    assert_eq!(def.component_type, "Stack");
    assert!(def.script.is_none());
    assert!(def.script_collected.is_none());
    assert_eq!(literal_prop(&def, "gap"), "4");

    assert_eq!(def.children.len(), 1);
    let fragment = &def.children[0];
    assert_eq!(fragment.component_type, "Fragment");
    assert_eq!(fragment.script.as_deref(), Some("var a = 3"));
    assert_eq!(fragment.script_collected.as_ref().unwrap().vars["a"].source, "3");
    let types: Vec<&str> = fragment.children.iter().map(|c| c.component_type.as_str()).collect();
    assert_eq!(types, vec!["Button", "Text"]);
}

#[test]
fn test_script_errors_move_to_fragment() {
    let def = component("<Stack><Button/><script>var a = ;</script></Stack>");
    assert!(def.script_error.is_none());
    assert!(def.children[0].script_error.is_some());
}

#[test]
fn test_attributes() {
    let def = component(
        "<Button id='b1' testId='btn' when='{visible}' var.count='0' onClick='count++' label='Hi {name}'/>",
    );
    assert_eq!(def.component_type, "Button");
    assert_eq!(def.uid.as_deref(), Some("b1"));
    assert_eq!(def.test_id.as_deref(), Some("btn"));
    assert!(matches!(def.when, Some(PropertyValue::SingleExpression { .. })));
    assert!(matches!(&def.vars["count"], ValueDef::Value(v) if v.as_literal() == Some("0")));
    assert_eq!(def.events["click"], "count++");
    assert!(matches!(
        def.prop("label"),
        Some(ValueDef::Value(PropertyValue::Compound { .. }))
    ));
    assert!(def.prop("onClick").is_none());
}

#[test]
fn test_namespaced_component() {
    let def = component("<my:Card/>");
    assert_eq!(def.component_type, "Card");
    assert_eq!(def.namespace.as_deref(), Some("my"));
}

#[test]
fn test_helper_tags() {
    let def = component(
        "<List>\
           <prop name='title' value='Items'/>\
           <var name='count' value='{1 + 1}'/>\
           <event name='select'>handle(item)</event>\
           <api name='reset' value='count = 0'/>\
           <uses value='a, b,,c'/>\
         </List>",
    );
    assert_eq!(literal_prop(&def, "title"), "Items");
    assert!(matches!(
        &def.vars["count"],
        ValueDef::Value(PropertyValue::SingleExpression { .. })
    ));
    assert_eq!(def.events["select"], "handle(item)");
    assert_eq!(def.api["reset"], "count = 0");
    assert_eq!(def.uses, vec!["a", "b", "c"]);
    assert!(def.children.is_empty());
}

#[test]
fn test_field_and_item_values() {
    let def = component(
        "<Chart>\
           <prop name='options'><field name='x' value='1'/><field name='y'>two</field></prop>\
           <prop name='series'><item value='a'/><item><field name='z' value='3'/></item></prop>\
         </Chart>",
    );
    let Some(ValueDef::Object(options)) = def.prop("options") else {
        panic!("expected an object");
    };
    assert_eq!(options.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    assert!(matches!(&options["y"], ValueDef::Value(v) if v.as_literal() == Some("two")));
    let Some(ValueDef::Array(series)) = def.prop("series") else {
        panic!("expected an array");
    };
    assert_eq!(series.len(), 2);
    assert!(matches!(&series[1], ValueDef::Object(_)));
}

#[test]
fn test_component_valued_props() {
    let def = component(
        "<Table>\
           <prop name='header'><Text/></prop>\
           <prop name='footer'><Text/><Button/></prop>\
           <prop name='body'><script>var n = 1</script><Text/></prop>\
         </Table>",
    );
    assert!(matches!(def.prop("header"), Some(ValueDef::Component(c)) if c.component_type == "Text"));
    assert!(matches!(def.prop("footer"), Some(ValueDef::Components(list)) if list.len() == 2));
    let Some(ValueDef::Component(fragment)) = def.prop("body") else {
        panic!("expected a fragment");
    };
    assert_eq!(fragment.component_type, "Fragment");
    assert_eq!(fragment.children.len(), 1);
    assert!(fragment.script_collected.is_some());
}

#[test]
fn test_text_children() {
    let def = component("<Text>\n  Hello {name}  \n<![CDATA[<b>{raw}</b>]]><!-- dropped --></Text>");
    assert_eq!(def.children.len(), 2);
    assert!(def.children.iter().all(|c| c.component_type == "TextNode"));
    assert!(matches!(
        def.children[0].prop("value"),
        Some(ValueDef::Value(PropertyValue::Compound { parts })) if parts.len() == 2
    ));
    assert_eq!(literal_prop(&def.children[1], "value"), "<b>{raw}</b>");
}

#[test]
fn test_whitespace_and_comments_around_root() {
    let def = component("<!-- header -->\n<App>\n  <Button/>\n</App>\n");
    assert_eq!(def.component_type, "App");
    assert_eq!(def.children.len(), 1);
}

#[test]
fn test_serialized_shape() {
    let def = component("<Button label='Save' onClick='save()'/>");
    let json = serde_json::to_value(&def).unwrap();
    assert_eq!(json["type"], "Button");
    assert_eq!(json["props"]["label"]["type"], "SinglePropertyValue");
    assert_eq!(json["props"]["label"]["value"], "Save");
    assert_eq!(json["events"]["click"], "save()");
    assert_eq!(json.get("children"), None);
    assert_eq!(json.get("scriptCollected"), None);
}

// ============================================================================
// Compound components
// ============================================================================

#[test]
fn test_compound_single_child() {
    let def = compound("<Component name='MyComp'><Stack/></Component>");
    assert_eq!(def.name, "MyComp");
    assert_eq!(def.component.component_type, "Stack");
}

#[test]
fn test_compound_multiple_children_use_fragment() {
    let def = compound("<Component name='My.Comp_2'><Text/><Button/></Component>");
    assert_eq!(def.component.component_type, "Fragment");
    assert_eq!(def.component.children.len(), 2);
}

#[test]
fn test_compound_script_goes_to_fragment() {
    let def = compound(
        "<Component name='Counter'>\
           <var name='count' value='0'/>\
           <api name='reset' value='count = 0'/>\
           <script>function inc() { count++; }</script>\
           <Button/>\
         </Component>",
    );
    assert_eq!(def.component.component_type, "Fragment");
    assert_eq!(def.component.children[0].component_type, "Button");
    let collected = def.component.script_collected.as_ref().unwrap();
    assert!(collected.functions.contains_key("inc"));
    assert!(def.vars.contains_key("count"));
    assert_eq!(def.api["reset"], "count = 0");
}

#[test]
fn test_nested_component_definition() {
    assert_eq!(error_code("<Component name='MyComp'><Component /></Component>"), "T006");
    assert_eq!(error_code("<Component name='MyComp'><Stack><Component/></Stack></Component>"), "T006");
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_transformer_resolves_imports() {
    let resolver = |_: &str, path: &str| {
        (path == "lib").then(|| "export function twice(x) { return x * 2; }".to_string())
    };
    let nodes = parse_markup("<App><script>import { twice } from 'lib';\nvar n = twice(2);</script></App>")
        .unwrap();
    let result = Transformer::new(TransformOptions::default(), &resolver)
        .transform(&nodes)
        .unwrap();
    let collected = result.as_component().unwrap().script_collected.as_ref().unwrap();
    assert!(collected.functions.contains_key("twice"));
    assert!(collected.vars.contains_key("n"));
}

#[test]
fn test_collection_can_be_disabled() {
    let nodes = parse_markup("<App><script>var a = ;</script></App>").unwrap();
    let options = TransformOptions {
        collect_code_behind: false,
        ..TransformOptions::default()
    };
    let no_imports = |_: &str, _: &str| -> Option<String> { None };
    let result = Transformer::new(options, &no_imports).transform(&nodes).unwrap();
    let def = result.as_component().unwrap();
    assert_eq!(def.script.as_deref(), Some("var a = ;"));
    assert!(def.script_collected.is_none() && def.script_error.is_none());
}

#[test]
fn test_positions_kept_when_not_stripped() {
    let nodes = parse_markup("<App><script>var a = 1 + 2</script></App>").unwrap();
    let options = TransformOptions {
        strip_positions: false,
        ..TransformOptions::default()
    };
    let no_imports = |_: &str, _: &str| -> Option<String> { None };
    let result = Transformer::new(options, &no_imports).transform(&nodes).unwrap();
    let collected = result.as_component().unwrap().script_collected.as_ref().unwrap();
    assert!(!collected.positions.is_empty());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_error_codes() {
    let cases = [
        ("<A/><B/>", "T001"),
        ("", "T001"),
        ("text<A/>", "T002"),
        ("<Component><A/></Component>", "T003"),
        ("<Component name='myComp'><A/></Component>", "T004"),
        ("<Component name='X'></Component>", "T005"),
        ("<Component name='X'><script>var a = 1</script></Component>", "T005"),
        ("<A><event name='onClick' value='x'/></A>", "T008"),
        ("<A><foo/></A>", "T009"),
        ("<Component name='X'><prop name='a'/><B/></Component>", "T009"),
        ("<A><prop name='x' other='1'/></A>", "T011"),
        ("<A><prop value='1'/></A>", "T012"),
        ("<A><var name=''/></A>", "T012"),
        ("<A><uses/></A>", "T015"),
        ("<A><prop name='x'><foo/></prop></A>", "T016"),
        ("<A><prop name='x'><field name='a' value='1'/><item value='2'/></prop></A>", "T017"),
        ("<A><prop name='x'><item name='a'/></prop></A>", "T018"),
        ("<Component name='X' foo='1'><A/></Component>", "T021"),
        ("<A enabled/>", "U010"),
        ("<A label='{a +}'/>", "U012"),
    ];
    for (source, code) in cases {
        assert_eq!(error_code(source), code, "{}", source);
    }
}

#[test]
fn test_value_error_points_at_attribute() {
    let err = transform("<A>\n  <B label='{a b}'/>\n</A>").unwrap_err();
    assert_eq!(err.code, "U012");
    assert_eq!((err.line, err.column), (1, 5));
}

#[test]
fn test_error_messages_name_the_element() {
    let err = transform("<A><prop name='x' other='1'/></A>").unwrap_err();
    assert!(err.text.contains("'other'") && err.text.contains("'prop'"));
    let err = transform("<A><foo/></A>").unwrap_err();
    assert!(err.text.contains("foo"));
    let json: Value = serde_json::to_value(&err).unwrap();
    assert_eq!(json["code"], "T009");
}
