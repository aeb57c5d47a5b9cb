//! The raw UEML tree.

use serde::Serialize;
use std::fmt;
use xmlui_core::text::TextPos;

/// Where a node starts and ends in the markup source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: TextPos,
    pub end: TextPos,
    /// 0-based line of `start`.
    pub line: u32,
    /// 0-based column of `start`.
    pub column: u32,
}

/// An element or attribute name with its optional namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}:{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: QualifiedName,
    /// Decoded value without quotes; `None` for a bare attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementNode {
    pub name: QualifiedName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<UemlNode>,
    pub span: Span,
}

impl ElementNode {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.namespace.is_none() && a.name.name == name)
    }

    /// The value of an attribute, if present with a value.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(|a| a.value.as_deref())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(UemlNode::as_element)
    }
}

/// Text-like content: comments, CDATA, scripts and character data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum UemlNode {
    Element(ElementNode),
    /// The text between `<!--` and `-->`.
    Comment(TextContent),
    /// The verbatim text of a CDATA section.
    HardLiteral(TextContent),
    /// The verbatim body of a `<script>` block.
    ScriptLiteral(TextContent),
    /// Character data with entities decoded.
    Text(TextContent),
}

impl UemlNode {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            UemlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            UemlNode::Element(e) => e.span,
            UemlNode::Comment(t)
            | UemlNode::HardLiteral(t)
            | UemlNode::ScriptLiteral(t)
            | UemlNode::Text(t) => t.span,
        }
    }

    /// Whether this is character data made of whitespace only.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, UemlNode::Text(t) if t.text.trim().is_empty())
    }
}
