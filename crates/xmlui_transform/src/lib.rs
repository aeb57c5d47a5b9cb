//! xmlui_transform: From the raw markup tree to component definitions.
//!
//! [`transform_to_component_def`] validates the structure of a parsed
//! markup document and builds a [`ComponentDef`] tree (or a
//! [`CompoundComponentDef`] for a `<Component name="...">` root). Attribute
//! and text values go through [`parse_property_value`], which splits them
//! into literal text and `{...}` script bindings. `<script>` content is run
//! through the code-behind collector.

mod component;
mod property_value;
mod transform;

pub use component::{
    ComponentDef, ComponentOrCompound, CompoundComponentDef, PropertyValue, ValueDef, ValuePart,
};
pub use property_value::parse_property_value;
pub use transform::{transform_to_component_def, TransformOptions, Transformer};
