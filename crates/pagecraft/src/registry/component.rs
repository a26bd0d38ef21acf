//! Component implementations.
//!
//! Every registered type name maps to one variant of [`ComponentImpl`]. The
//! variant is picked by the caller at registration time, so lookups never
//! have to guess how an implementation wants to be called.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::RenderError;
use crate::render::Element;

/// Signature of a function-style component.
pub type RenderFn = dyn Fn(&Element<'_>) -> Result<String, RenderError> + Send + Sync;

/// A component with its own state or configuration.
///
/// Stateful components are the only kind that can declare required API
/// endpoints. When they do, the builder routes their props through the
/// configured [`ApiDataWrapper`](crate::api::ApiDataWrapper) before the
/// node is finalized.
///
/// ```rust
/// use pagecraft::{Component, ComponentImpl, Element, RenderError};
///
/// struct Greeting {
///     salutation: String,
/// }
///
/// impl Component for Greeting {
///     fn render(&self, element: &Element<'_>) -> Result<String, RenderError> {
///         let name = element.prop_str("name").unwrap_or("stranger");
///         Ok(format!("{}, {}!", self.salutation, name))
///     }
/// }
///
/// let component = ComponentImpl::stateful(Greeting { salutation: "Hello".into() });
/// assert_eq!(component.kind(), "stateful");
/// ```
pub trait Component: Send + Sync {
    fn render(&self, element: &Element<'_>) -> Result<String, RenderError>;

    /// Names of the external endpoints this component needs data from.
    fn required_endpoints(&self) -> &[String] {
        &[]
    }

    /// Editor-facing metadata.
    fn info(&self) -> ComponentInfo {
        ComponentInfo::default()
    }
}

/// The closed set of component implementations.
#[derive(Clone)]
pub enum ComponentImpl {
    /// A plain render function.
    Function(Arc<RenderFn>),
    /// A component object implementing [`Component`].
    Stateful(Arc<dyn Component>),
    /// A raw markup tag such as `div` or `section`.
    Tag(String),
    /// A minijinja template rendered with the node's props.
    Markup(Arc<str>),
    /// Sentinel for an unresolvable reference; carries the requested name.
    NotFound(String),
}

impl ComponentImpl {
    pub fn function<F>(render: F) -> Self
    where
        F: Fn(&Element<'_>) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        ComponentImpl::Function(Arc::new(render))
    }

    pub fn stateful<C: Component + 'static>(component: C) -> Self {
        ComponentImpl::Stateful(Arc::new(component))
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        ComponentImpl::Tag(tag.into())
    }

    pub fn markup(source: impl Into<String>) -> Self {
        ComponentImpl::Markup(Arc::from(source.into()))
    }

    pub fn not_found(requested: impl Into<String>) -> Self {
        ComponentImpl::NotFound(requested.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ComponentImpl::NotFound(_))
    }

    /// Endpoints this implementation needs; empty for everything but
    /// stateful components that declare some.
    pub fn required_endpoints(&self) -> &[String] {
        match self {
            ComponentImpl::Stateful(component) => component.required_endpoints(),
            _ => &[],
        }
    }

    /// Metadata reported by the implementation itself.
    pub fn info(&self) -> ComponentInfo {
        match self {
            ComponentImpl::Stateful(component) => component.info(),
            _ => ComponentInfo::default(),
        }
    }

    /// Short name of the variant, used in logs and the JSON backend.
    pub fn kind(&self) -> &'static str {
        match self {
            ComponentImpl::Function(_) => "function",
            ComponentImpl::Stateful(_) => "stateful",
            ComponentImpl::Tag(_) => "tag",
            ComponentImpl::Markup(_) => "markup",
            ComponentImpl::NotFound(_) => "not_found",
        }
    }
}

impl fmt::Debug for ComponentImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentImpl::Function(_) => f.write_str("Function(..)"),
            ComponentImpl::Stateful(_) => f.write_str("Stateful(..)"),
            ComponentImpl::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            ComponentImpl::Markup(source) => f.debug_tuple("Markup").field(source).finish(),
            ComponentImpl::NotFound(name) => f.debug_tuple("NotFound").field(name).finish(),
        }
    }
}

/// Two implementations are equal when they are the same registered object
/// (for functions and stateful components) or carry the same data.
impl PartialEq for ComponentImpl {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ComponentImpl::Function(a), ComponentImpl::Function(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            (ComponentImpl::Stateful(a), ComponentImpl::Stateful(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            (ComponentImpl::Tag(a), ComponentImpl::Tag(b)) => a == b,
            (ComponentImpl::Markup(a), ComponentImpl::Markup(b)) => a == b,
            (ComponentImpl::NotFound(a), ComponentImpl::NotFound(b)) => a == b,
            _ => false,
        }
    }
}

/// Editor-facing description of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub editable_props: Vec<EditableProp>,
}

impl ComponentInfo {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            editable_props: Vec::new(),
        }
    }

    /// Declares a prop an editor may change. Returns self for chaining.
    pub fn editable(
        mut self,
        name: impl Into<String>,
        prop_type: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.editable_props.push(EditableProp {
            name: name.into(),
            prop_type: prop_type.into(),
            label: label.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditableProp {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: String,
    pub label: String,
}
