//! Prop composition.
//!
//! A node's final props are assembled from three layers, lowest precedence
//! first:
//!
//! 1. the `props` written in the config,
//! 2. the caller's [`ComponentData`] entry for the node's id,
//! 3. derived metadata: [`COMPONENT_ID`], [`CLASS_NAME`], [`CHILD_PROPS`].
//!
//! Each layer is merged shallowly over the previous one. Afterwards
//! [`CONTEXT`] is defaulted to an empty mapping if no layer supplied it.

use serde_json::Value;

use crate::config::{ComponentData, Props};

pub const COMPONENT_ID: &str = "componentId";
pub const CLASS_NAME: &str = "className";
pub const CHILD_PROPS: &str = "child_props";
pub const CONTEXT: &str = "context";

/// Metadata the builder derives for every resolved node.
#[derive(Debug, Clone, Copy)]
pub struct DerivedProps<'a> {
    pub id: &'a str,
    pub component_type: &'a str,
    pub data: &'a ComponentData,
}

impl DerivedProps<'_> {
    fn into_props(self) -> Props {
        let mut props = Props::new();
        props.insert(COMPONENT_ID.to_string(), Value::String(self.id.to_string()));
        props.insert(
            CLASS_NAME.to_string(),
            Value::String(class_name(self.component_type, self.id)),
        );
        props.insert(CHILD_PROPS.to_string(), self.data.to_value());
        props
    }
}

/// `"<componentType> <id>"`, the class list a node renders with.
pub fn class_name(component_type: &str, id: &str) -> String {
    format!("{} {}", component_type, id)
}

/// Merges the three prop layers in precedence order.
///
/// ```rust
/// use pagecraft::{compose_props, ComponentData, DerivedProps};
/// use serde_json::json;
///
/// let config = json!({ "text": "from config", "color": "red" });
/// let data = ComponentData::new()
///     .with("hero", json!({ "text": "from data" }).as_object().unwrap().clone());
///
/// let props = compose_props(
///     config.as_object().unwrap(),
///     data.get("hero"),
///     DerivedProps { id: "hero", component_type: "TextWidget", data: &data },
/// );
///
/// assert_eq!(props["text"], "from data");
/// assert_eq!(props["color"], "red");
/// assert_eq!(props["className"], "TextWidget hero");
/// ```
pub fn compose_props(
    config: &Props,
    overrides: Option<&Props>,
    derived: DerivedProps<'_>,
) -> Props {
    let mut props = config.clone();
    if let Some(overrides) = overrides {
        props.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    props.extend(derived.into_props());
    props
        .entry(CONTEXT.to_string())
        .or_insert_with(|| Value::Object(Props::new()));
    props
}
