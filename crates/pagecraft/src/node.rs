//! Resolved, render-ready nodes.

use serde_json::Value;

use crate::builder::props::{CHILD_PROPS, CLASS_NAME, COMPONENT_ID, CONTEXT};
use crate::config::Props;
use crate::registry::ComponentImpl;

/// One node of a resolved component tree.
///
/// A node binds a component implementation to its final props and its
/// already-resolved children. Nodes are built fresh for every render, are
/// never mutated afterwards, and own their children exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    component: ComponentImpl,
    component_type: Option<String>,
    props: Props,
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn new(
        component: ComponentImpl,
        component_type: impl Into<String>,
        props: Props,
        children: Vec<Node>,
    ) -> Self {
        Self {
            component,
            component_type: Some(component_type.into()),
            props,
            children,
        }
    }

    /// A copy of this node with another implementation and props.
    pub(crate) fn with_component(&self, component: ComponentImpl, props: Props) -> Self {
        Self {
            component,
            component_type: self.component_type.clone(),
            props,
            children: self.children.clone(),
        }
    }

    /// A diagnostic node for a config that names no component type.
    pub(crate) fn not_found(diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        let mut props = Props::new();
        props.insert(
            "componentType".to_string(),
            Value::String(diagnostic.clone()),
        );
        props.insert(CONTEXT.to_string(), Value::Object(Props::new()));
        Self {
            component: ComponentImpl::NotFound(diagnostic),
            component_type: None,
            props,
            children: Vec::new(),
        }
    }

    pub fn component(&self) -> &ComponentImpl {
        &self.component
    }

    /// The type name from the config, `None` for configs that had none.
    pub fn component_type(&self) -> Option<&str> {
        self.component_type.as_deref()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn id(&self) -> Option<&str> {
        self.prop_str(COMPONENT_ID)
    }

    pub fn class_name(&self) -> Option<&str> {
        self.prop_str(CLASS_NAME)
    }

    /// The external data map handed down for self-managed sub-trees.
    pub fn child_props(&self) -> Option<&Value> {
        self.props.get(CHILD_PROPS)
    }

    pub fn context(&self) -> Option<&Value> {
        self.props.get(CONTEXT)
    }

    pub fn is_not_found(&self) -> bool {
        self.component.is_not_found()
    }

    /// The name a `NotFound` node reports, if this is one.
    pub fn not_found_name(&self) -> Option<&str> {
        match &self.component {
            ComponentImpl::NotFound(name) => Some(name),
            _ => None,
        }
    }

    /// Depth-first search for the first node with the given id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}
