//! Structural JSON rendering of resolved trees.

use serde_json::{json, Value};

use super::{Backend, RenderedOutput};
use crate::builder::CHILD_PROPS;
use crate::error::RenderError;
use crate::node::Node;

/// Serializes the resolved tree instead of rendering markup.
///
/// Each node becomes `{"type", "kind", "props", "children"}`. `child_props`
/// is dropped from the props since it repeats the caller's data at every
/// level. Useful for inspecting builds and for renderers living elsewhere.
///
/// ```rust
/// use pagecraft::{Backend, Builder, ComponentConfig, ComponentData, JsonBackend, Registry};
/// use serde_json::Value;
///
/// let registry = Registry::new();
/// let page = ComponentConfig::component("Missing").with_id("m");
/// let node = Builder::new(&registry).build(&page, &ComponentData::new()).unwrap();
///
/// let out: Value = serde_json::from_str(&JsonBackend::new().render(&node).unwrap()).unwrap();
/// assert_eq!(out["type"], "Missing");
/// assert_eq!(out["kind"], "not_found");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBackend {
    pretty: bool,
}

impl JsonBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// The tree as a JSON value.
    pub fn to_value(&self, node: &Node) -> Value {
        let mut props = node.props().clone();
        props.remove(CHILD_PROPS);
        let children: Vec<Value> = node
            .children()
            .iter()
            .map(|child| self.to_value(child))
            .collect();
        json!({
            "type": node.component_type(),
            "kind": node.component().kind(),
            "props": props,
            "children": children,
        })
    }
}

impl Backend for JsonBackend {
    fn render(&self, node: &Node) -> Result<RenderedOutput, RenderError> {
        let value = self.to_value(node);
        let out = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(out)
    }
}
