//! Turns the raw UEML tree into component definitions.

use log::{debug, trace};
use xmlui_core::OrderedMap;
use xmlui_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use xmlui_markup::{Attribute, ElementNode, Span, UemlNode};
use xmlui_module::{collect_code_behind, remove_code_behind_tokens_from_tree, ModuleResolver};

use crate::component::{ComponentDef, ComponentOrCompound, CompoundComponentDef, PropertyValue, ValueDef};
use crate::property_value::parse_property_value;

const COMPOUND_TAG: &str = "Component";
const FRAGMENT: &str = "Fragment";
const TEXT_NODE: &str = "TextNode";

/// How scripts found in markup are handled.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Module name scripts are resolved as.
    pub root_module_name: String,
    pub restrictive_mode: bool,
    /// Run the code-behind collector on `<script>` content.
    pub collect_code_behind: bool,
    /// Drop position records from collected declarations.
    pub strip_positions: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            root_module_name: "Main".to_string(),
            restrictive_mode: false,
            collect_code_behind: true,
            strip_positions: true,
        }
    }
}

fn no_imports(_: &str, _: &str) -> Option<String> {
    None
}

/// Transform a parsed markup document with default options. Scripts in it
/// cannot import other modules.
pub fn transform_to_component_def(nodes: &[UemlNode]) -> Result<ComponentOrCompound, Diagnostic> {
    Transformer::new(TransformOptions::default(), &no_imports).transform(nodes)
}

pub struct Transformer<'r> {
    options: TransformOptions,
    resolver: &'r dyn ModuleResolver,
}

impl<'r> Transformer<'r> {
    pub fn new(options: TransformOptions, resolver: &'r dyn ModuleResolver) -> Self {
        Self { options, resolver }
    }

    pub fn transform(&self, nodes: &[UemlNode]) -> Result<ComponentOrCompound, Diagnostic> {
        let mut root: Option<&ElementNode> = None;
        for node in nodes {
            match node {
                UemlNode::Element(element) => {
                    if root.is_some() {
                        return Err(span_error(&messages::SINGLE_ROOT_ELEMENT_EXPECTED, &[], element.span));
                    }
                    root = Some(element);
                }
                UemlNode::Comment(_) => {}
                other if other.is_blank_text() => {}
                other => return Err(span_error(&messages::ROOT_ELEMENT_EXPECTED, &[], other.span())),
            }
        }
        let Some(root) = root else {
            return Err(Diagnostic::new(&messages::SINGLE_ROOT_ELEMENT_EXPECTED, &[]));
        };

        debug!("transforming markup root '{}'", root.name);
        if is_compound_tag(root) {
            self.transform_compound(root).map(ComponentOrCompound::Compound)
        } else {
            self.transform_component(root).map(ComponentOrCompound::Component)
        }
    }

    fn transform_compound(&self, root: &ElementNode) -> Result<CompoundComponentDef, Diagnostic> {
        let Some(name_attr) = root.attribute("name") else {
            return Err(span_error(&messages::COMPONENT_NAME_EXPECTED, &[], root.span));
        };
        let name = name_attr.value.clone().unwrap_or_default();
        if !is_valid_component_name(&name) {
            return Err(span_error(&messages::INVALID_COMPONENT_NAME_0, &[&name], name_attr.span));
        }
        if let Some(extra) = root.attributes.iter().find(|a| !is_plain(a, "name")) {
            return Err(span_error(
                &messages::COMPONENT_ATTRIBUTE_0_NOT_ALLOWED,
                &[&extra.name.to_string()],
                extra.span,
            ));
        }

        let mut api = OrderedMap::new();
        let mut vars = OrderedMap::new();
        let mut scripts = Vec::new();
        let mut children = Vec::new();
        for child in &root.children {
            match child {
                UemlNode::Element(element) if is_component(element) => {
                    children.push(self.transform_component(element)?);
                }
                UemlNode::Element(element) => match element.name.name.as_str() {
                    "var" => {
                        let (name, value) = self.named_value(element)?;
                        vars.insert(name, value);
                    }
                    "api" => {
                        let (name, value) = named_text(element)?;
                        api.insert(name, value);
                    }
                    "script" => scripts.push(element_text(element)),
                    other => {
                        return Err(span_error(&messages::UNEXPECTED_CHILD_ELEMENT_0, &[other], element.span))
                    }
                },
                UemlNode::ScriptLiteral(script) => scripts.push(script.text.clone()),
                UemlNode::Text(text) if !child.is_blank_text() => {
                    children.push(text_node(parse_value(text.text.trim(), text.span)?));
                }
                UemlNode::HardLiteral(text) => {
                    children.push(text_node(PropertyValue::literal(text.text.clone())));
                }
                UemlNode::Text(_) | UemlNode::Comment(_) => {}
            }
        }
        if children.is_empty() {
            return Err(span_error(&messages::COMPONENT_CHILD_EXPECTED, &[], root.span));
        }

        let script = join_scripts(scripts);
        let component = if children.len() == 1 && script.is_none() {
            children.remove(0)
        } else {
            self.fragment(children, script)
        };
        Ok(CompoundComponentDef {
            name,
            component,
            api,
            vars,
        })
    }

    fn transform_component(&self, element: &ElementNode) -> Result<ComponentDef, Diagnostic> {
        if is_compound_tag(element) {
            return Err(span_error(&messages::NESTED_COMPONENT_DEFINITION, &[], element.span));
        }
        trace!("transforming component '{}'", element.name);

        let mut def = ComponentDef::new(element.name.name.clone());
        def.namespace = element.name.namespace.clone();
        for attribute in &element.attributes {
            apply_attribute(&mut def, attribute)?;
        }

        let mut scripts = Vec::new();
        for child in &element.children {
            match child {
                UemlNode::Element(child) if is_component(child) => {
                    def.children.push(self.transform_component(child)?);
                }
                UemlNode::Element(child) => self.apply_helper(&mut def, child, &mut scripts)?,
                UemlNode::ScriptLiteral(script) => scripts.push(script.text.clone()),
                UemlNode::Text(text) if !child.is_blank_text() => {
                    def.children.push(text_node(parse_value(text.text.trim(), text.span)?));
                }
                UemlNode::HardLiteral(text) => {
                    def.children.push(text_node(PropertyValue::literal(text.text.clone())));
                }
                UemlNode::Text(_) | UemlNode::Comment(_) => {}
            }
        }
        let script = join_scripts(scripts);
        if script.is_some() && !def.children.is_empty() {
            let children = std::mem::take(&mut def.children);
            def.children.push(self.fragment(children, script));
        } else {
            self.attach_script(&mut def, script);
        }
        Ok(def)
    }

    /// Applies a lowercase child element of a component.
    fn apply_helper(
        &self,
        def: &mut ComponentDef,
        helper: &ElementNode,
        scripts: &mut Vec<String>,
    ) -> Result<(), Diagnostic> {
        match helper.name.name.as_str() {
            "prop" => {
                let (name, value) = self.named_value(helper)?;
                def.props.insert(name, value);
            }
            "var" => {
                let (name, value) = self.named_value(helper)?;
                def.vars.insert(name, value);
            }
            "event" => {
                let (name, handler) = named_text(helper)?;
                if name.starts_with("on") {
                    return Err(span_error(&messages::EVENT_NAME_0_STARTS_WITH_ON, &[&name], helper.span));
                }
                def.events.insert(name, handler);
            }
            "api" => {
                let (name, value) = named_text(helper)?;
                def.api.insert(name, value);
            }
            "uses" => {
                check_attributes(helper, &["value"])?;
                let value = helper.attribute_value("value").unwrap_or_default();
                if value.trim().is_empty() {
                    return Err(span_error(&messages::USES_VALUE_REQUIRED, &[], helper.span));
                }
                def.uses.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
            "script" => scripts.push(element_text(helper)),
            other => {
                return Err(span_error(&messages::UNEXPECTED_CHILD_ELEMENT_0, &[other], helper.span));
            }
        }
        Ok(())
    }

    /// `prop`, `var` and `field`: a required name and a value.
    fn named_value(&self, holder: &ElementNode) -> Result<(String, ValueDef), Diagnostic> {
        check_attributes(holder, &["name", "value"])?;
        let name = required_name(holder)?;
        Ok((name, self.holder_value(holder)?))
    }

    fn item_value(&self, item: &ElementNode) -> Result<ValueDef, Diagnostic> {
        if let Some(name) = item.attribute("name") {
            return Err(span_error(&messages::ITEM_CANNOT_HAVE_NAME, &[], name.span));
        }
        check_attributes(item, &["value"])?;
        self.holder_value(item)
    }

    /// The value of a holder: its `value` attribute, else its `field` or
    /// `item` children, else its components, else its text.
    fn holder_value(&self, holder: &ElementNode) -> Result<ValueDef, Diagnostic> {
        if let Some(attribute) = holder.attribute("value") {
            let Some(value) = attribute.value.as_deref() else {
                return Err(span_error(&messages::VALUE_ATTRIBUTE_REQUIRED, &[], attribute.span));
            };
            return Ok(ValueDef::Value(parse_value(value, attribute.span)?));
        }

        let mut fields = OrderedMap::new();
        let mut items = Vec::new();
        let mut components = Vec::new();
        let mut scripts = Vec::new();
        let mut text = String::new();
        let mut hard_literal: Option<String> = None;
        for child in &holder.children {
            match child {
                UemlNode::Element(element) if is_component(element) => {
                    components.push(self.transform_component(element)?);
                }
                UemlNode::Element(element) => match element.name.name.as_str() {
                    "field" => {
                        if !items.is_empty() {
                            return Err(mixed_error(holder, element));
                        }
                        let (name, value) = self.named_value(element)?;
                        fields.insert(name, value);
                    }
                    "item" => {
                        if !fields.is_empty() {
                            return Err(mixed_error(holder, element));
                        }
                        items.push(self.item_value(element)?);
                    }
                    "script" => scripts.push(element_text(element)),
                    other => {
                        return Err(span_error(&messages::UNEXPECTED_VALUE_ELEMENT_0, &[other], element.span))
                    }
                },
                UemlNode::ScriptLiteral(script) => scripts.push(script.text.clone()),
                UemlNode::Text(t) => text.push_str(&t.text),
                UemlNode::HardLiteral(t) => hard_literal.get_or_insert_with(String::new).push_str(&t.text),
                UemlNode::Comment(_) => {}
            }
        }

        if !fields.is_empty() {
            return Ok(ValueDef::Object(fields));
        }
        if !items.is_empty() {
            return Ok(ValueDef::Array(items));
        }
        let script = join_scripts(scripts);
        if script.is_some() {
            return Ok(ValueDef::Component(Box::new(self.fragment(components, script))));
        }
        match components.len() {
            0 => {}
            1 => return Ok(ValueDef::Component(Box::new(components.remove(0)))),
            _ => return Ok(ValueDef::Components(components)),
        }
        if let Some(literal) = hard_literal {
            return Ok(ValueDef::Value(PropertyValue::literal(literal)));
        }
        Ok(ValueDef::Value(parse_value(text.trim(), holder.span)?))
    }

    /// A synthetic `Fragment` holding `children` and the script.
    fn fragment(&self, children: Vec<ComponentDef>, script: Option<String>) -> ComponentDef {
        let mut fragment = ComponentDef::new(FRAGMENT);
        fragment.children = children;
        self.attach_script(&mut fragment, script);
        fragment
    }

    /// Stores a joined script on `def`, collecting its declarations.
    fn attach_script(&self, def: &mut ComponentDef, script: Option<String>) {
        let Some(script) = script else {
            return;
        };
        if self.options.collect_code_behind {
            let mut collected = collect_code_behind(
                &self.options.root_module_name,
                &script,
                self.resolver,
                self.options.restrictive_mode,
            );
            match collected.module_errors.take() {
                Some(errors) => {
                    debug!("script of '{}' has errors in {} module(s)", def.component_type, errors.len());
                    def.script_error = Some(errors);
                }
                None => {
                    if self.options.strip_positions {
                        remove_code_behind_tokens_from_tree(&mut collected);
                    }
                    def.script_collected = Some(collected);
                }
            }
        }
        def.script = Some(script);
    }
}

fn apply_attribute(def: &mut ComponentDef, attribute: &Attribute) -> Result<(), Diagnostic> {
    let Some(value) = attribute.value.as_deref() else {
        return Err(span_error(&messages::VALUE_ATTRIBUTE_REQUIRED, &[], attribute.span));
    };
    let key = attribute.name.to_string();
    match key.as_str() {
        "id" => def.uid = Some(value.to_string()),
        "testId" => def.test_id = Some(value.to_string()),
        "when" => def.when = Some(parse_value(value, attribute.span)?),
        _ => {
            if let Some(var) = key.strip_prefix("var.") {
                def.vars.insert(var.to_string(), ValueDef::Value(parse_value(value, attribute.span)?));
            } else if let Some(event) = event_name(&key) {
                def.events.insert(event, value.to_string());
            } else {
                def.props.insert(key, ValueDef::Value(parse_value(value, attribute.span)?));
            }
        }
    }
    Ok(())
}

/// `onClick` → `click`.
fn event_name(attribute: &str) -> Option<String> {
    let rest = attribute.strip_prefix("on")?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    Some(first.to_ascii_lowercase().to_string() + chars.as_str())
}

/// `event` and `api`: a required name and text from the `value`
/// attribute or the element content.
fn named_text(helper: &ElementNode) -> Result<(String, String), Diagnostic> {
    check_attributes(helper, &["name", "value"])?;
    let name = required_name(helper)?;
    if let Some(attribute) = helper.attribute("value") {
        let Some(value) = attribute.value.clone() else {
            return Err(span_error(&messages::VALUE_ATTRIBUTE_REQUIRED, &[], attribute.span));
        };
        return Ok((name, value));
    }
    if let Some(element) = helper.child_elements().next() {
        return Err(span_error(
            &messages::UNEXPECTED_VALUE_ELEMENT_0,
            &[&element.name.to_string()],
            element.span,
        ));
    }
    Ok((name, element_text(helper).trim().to_string()))
}

fn required_name(helper: &ElementNode) -> Result<String, Diagnostic> {
    match helper.attribute_value("name") {
        Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
        _ => Err(span_error(
            &messages::NAME_ATTRIBUTE_REQUIRED_ON_0,
            &[&helper.name.name],
            helper.span,
        )),
    }
}

fn check_attributes(helper: &ElementNode, allowed: &[&str]) -> Result<(), Diagnostic> {
    match helper
        .attributes
        .iter()
        .find(|a| !allowed.iter().any(|name| is_plain(a, name)))
    {
        Some(attribute) => Err(span_error(
            &messages::ATTRIBUTE_0_NOT_ALLOWED_ON_1,
            &[&attribute.name.to_string(), &helper.name.name],
            attribute.span,
        )),
        None => Ok(()),
    }
}

fn mixed_error(holder: &ElementNode, at: &ElementNode) -> Diagnostic {
    span_error(&messages::FIELD_AND_ITEM_MIXED_IN_0, &[&holder.name.name], at.span)
}

/// The text content of an element, CDATA and script bodies included.
fn element_text(element: &ElementNode) -> String {
    element
        .children
        .iter()
        .filter_map(|child| match child {
            UemlNode::Text(t) | UemlNode::HardLiteral(t) | UemlNode::ScriptLiteral(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}

fn join_scripts(scripts: Vec<String>) -> Option<String> {
    if scripts.is_empty() {
        None
    } else {
        Some(scripts.join("\n"))
    }
}

fn text_node(value: PropertyValue) -> ComponentDef {
    let mut def = ComponentDef::new(TEXT_NODE);
    def.props.insert("value".to_string(), ValueDef::Value(value));
    def
}

/// Parses a value, reporting errors at the markup location it came from.
fn parse_value(text: &str, span: Span) -> Result<PropertyValue, Diagnostic> {
    parse_property_value(text).map_err(|err| Diagnostic {
        position: span.start,
        line: span.line,
        column: span.column,
        ..err
    })
}

fn is_plain(attribute: &Attribute, name: &str) -> bool {
    attribute.name.namespace.is_none() && attribute.name.name == name
}

fn is_compound_tag(element: &ElementNode) -> bool {
    element.name.namespace.is_none() && element.name.name == COMPOUND_TAG
}

/// Components are namespaced or start with an uppercase letter; anything
/// else is a helper tag.
fn is_component(element: &ElementNode) -> bool {
    element.name.namespace.is_some() || element.name.name.starts_with(|c: char| c.is_ascii_uppercase())
}

fn is_valid_component_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
        }
        _ => false,
    }
}

fn span_error(message: &DiagnosticMessage, args: &[&str], span: Span) -> Diagnostic {
    Diagnostic::at(message, args, span.start, span.line, span.column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name() {
        assert_eq!(event_name("onClick").as_deref(), Some("click"));
        assert_eq!(event_name("onDidChange").as_deref(), Some("didChange"));
        assert_eq!(event_name("online"), None);
        assert_eq!(event_name("on"), None);
    }

    #[test]
    fn test_component_names() {
        assert!(is_valid_component_name("MyComp"));
        assert!(is_valid_component_name("My.Comp_2"));
        assert!(!is_valid_component_name(""));
        assert!(!is_valid_component_name("myComp"));
        assert!(!is_valid_component_name("My-Comp"));
    }

    #[test]
    fn test_join_scripts() {
        assert_eq!(join_scripts(Vec::new()), None);
        assert_eq!(join_scripts(vec!["a".into(), "b".into()]).as_deref(), Some("a\nb"));
    }
}
