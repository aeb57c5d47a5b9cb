//! Component definitions produced by the transformer.

use serde::Serialize;
use xmlui_ast::node::Expression;
use xmlui_core::OrderedMap;
use xmlui_module::{CollectedDeclarations, ModuleErrors};

/// A property or variable value as written in markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PropertyValue {
    /// Literal text with no binding.
    #[serde(rename = "SinglePropertyValue")]
    Single { value: String },
    /// A single `{...}` binding spanning the whole text.
    #[serde(rename = "SingleExpressionValue")]
    SingleExpression { expression: Expression },
    /// Literal text interleaved with bindings.
    #[serde(rename = "CompoundPropertyValue")]
    Compound { parts: Vec<ValuePart> },
}

impl PropertyValue {
    pub fn literal(value: impl Into<String>) -> Self {
        PropertyValue::Single {
            value: value.into(),
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            PropertyValue::Single { value } => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValuePart {
    Text(String),
    Expression(Expression),
}

/// The value of a prop, var or field.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ValueDef {
    Value(PropertyValue),
    Component(Box<ComponentDef>),
    Components(Vec<ComponentDef>),
    Object(OrderedMap<String, ValueDef>),
    Array(Vec<ValueDef>),
}

impl ValueDef {
    pub fn as_value(&self) -> Option<&PropertyValue> {
        match self {
            ValueDef::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// One component instance in the markup tree.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDef {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<PropertyValue>,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub props: OrderedMap<String, ValueDef>,
    /// Event name to handler source.
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub events: OrderedMap<String, String>,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub vars: OrderedMap<String, ValueDef>,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub api: OrderedMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentDef>,
    /// The joined text of the component's `<script>` blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_collected: Option<CollectedDeclarations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_error: Option<ModuleErrors>,
}

impl ComponentDef {
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            ..Self::default()
        }
    }

    pub fn prop(&self, name: &str) -> Option<&ValueDef> {
        self.props.get(name)
    }
}

/// A reusable component defined with a `<Component name="...">` root.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundComponentDef {
    pub name: String,
    pub component: ComponentDef,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub api: OrderedMap<String, String>,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub vars: OrderedMap<String, ValueDef>,
}

/// The result of transforming one markup document.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ComponentOrCompound {
    Component(ComponentDef),
    Compound(CompoundComponentDef),
}

impl ComponentOrCompound {
    pub fn as_component(&self) -> Option<&ComponentDef> {
        match self {
            ComponentOrCompound::Component(def) => Some(def),
            ComponentOrCompound::Compound(_) => None,
        }
    }

    pub fn as_compound(&self) -> Option<&CompoundComponentDef> {
        match self {
            ComponentOrCompound::Compound(def) => Some(def),
            ComponentOrCompound::Component(_) => None,
        }
    }
}
