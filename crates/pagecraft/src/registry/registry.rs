//! Component and partial registry.
//!
//! The registry maps component type names to [`ComponentImpl`]s and partial
//! names to [`ComponentConfig`]s. Registration is insert-or-replace: the
//! last writer wins and redefinition is never an error.
//!
//! Lookups never fail. A missing component resolves to
//! [`ComponentImpl::NotFound`] carrying the requested name; a missing partial
//! resolves to a config for the built-in [`ERROR_COMPONENT`] whose message
//! names the partial. Either way only the affected subtree degrades.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::component::{ComponentImpl, ComponentInfo};
use crate::config::ComponentConfig;
use crate::error::RenderError;
use crate::render::{escape_html, Element};

/// Type name of the built-in component used for missing partials.
pub const ERROR_COMPONENT: &str = "ErrorComponent";

#[derive(Debug, Clone)]
struct Registration {
    component: ComponentImpl,
    info: ComponentInfo,
}

/// A summary of one registered component, as listed by [`Registry::describe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
    pub component_type: String,
    pub kind: &'static str,
    #[serde(flatten)]
    pub info: ComponentInfo,
}

/// Named component implementations and partial configs.
///
/// # Example
///
/// ```rust
/// use pagecraft::{ComponentConfig, ComponentImpl, Registry};
///
/// let mut registry = Registry::new();
/// registry.register_component("Section", ComponentImpl::tag("section"));
/// registry.register_partial(
///     "footer",
///     ComponentConfig::component("TextWidget").with_prop("text", "bye"),
/// );
///
/// assert!(registry.has_component("Section"));
/// assert!(registry.lookup_component("Missing").is_not_found());
/// assert_eq!(
///     registry.lookup_partial("footer").component_type.as_deref(),
///     Some("TextWidget")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    components: HashMap<String, Registration>,
    partials: HashMap<String, ComponentConfig>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry holding only the built-in [`ERROR_COMPONENT`].
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_component_with_info(
            ERROR_COMPONENT,
            ComponentImpl::function(render_error_component),
            ComponentInfo::new("Displays a configuration problem inline.")
                .editable("message", "string", "The message to display."),
        );
        registry
    }

    /// Creates a registry with no components at all.
    pub fn empty() -> Self {
        Self {
            components: HashMap::new(),
            partials: HashMap::new(),
        }
    }

    /// Registers (or replaces) a component implementation.
    ///
    /// Metadata is taken from the implementation itself; use
    /// [`register_component_with_info`](Self::register_component_with_info)
    /// to attach it to function, tag, or markup components.
    pub fn register_component(
        &mut self,
        component_type: impl Into<String>,
        component: ComponentImpl,
    ) {
        let info = component.info();
        self.register_component_with_info(component_type, component, info);
    }

    pub fn register_component_with_info(
        &mut self,
        component_type: impl Into<String>,
        component: ComponentImpl,
        info: ComponentInfo,
    ) {
        self.components
            .insert(component_type.into(), Registration { component, info });
    }

    /// Registers a function-style component.
    pub fn register_fn<F>(&mut self, component_type: impl Into<String>, render: F)
    where
        F: Fn(&Element<'_>) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        self.register_component(component_type, ComponentImpl::function(render));
    }

    /// Registers a raw markup tag under a component type name.
    pub fn register_tag(&mut self, component_type: impl Into<String>, tag: impl Into<String>) {
        self.register_component(component_type, ComponentImpl::tag(tag));
    }

    /// Registers a minijinja template as a component.
    pub fn register_markup(
        &mut self,
        component_type: impl Into<String>,
        source: impl Into<String>,
    ) {
        self.register_component(component_type, ComponentImpl::markup(source));
    }

    /// Registers (or replaces) a partial config.
    pub fn register_partial(&mut self, name: impl Into<String>, config: ComponentConfig) {
        self.partials.insert(name.into(), config);
    }

    pub fn register_partials<I, S>(&mut self, partials: I)
    where
        I: IntoIterator<Item = (S, ComponentConfig)>,
        S: Into<String>,
    {
        for (name, config) in partials {
            self.register_partial(name, config);
        }
    }

    /// Resolves a component type, or the `NotFound` sentinel naming it.
    pub fn lookup_component(&self, component_type: &str) -> ComponentImpl {
        match self.components.get(component_type) {
            Some(registration) => registration.component.clone(),
            None => {
                warn!(component_type, "component type is not registered");
                ComponentImpl::not_found(component_type)
            }
        }
    }

    /// Resolves a partial, or an [`ERROR_COMPONENT`] config naming it.
    pub fn lookup_partial(&self, name: &str) -> ComponentConfig {
        match self.partials.get(name) {
            Some(config) => config.clone(),
            None => {
                warn!(partial = name, "partial is not registered");
                missing_partial_config(name)
            }
        }
    }

    pub fn has_component(&self, component_type: &str) -> bool {
        self.components.contains_key(component_type)
    }

    pub fn has_partial(&self, name: &str) -> bool {
        self.partials.contains_key(name)
    }

    /// Registered component type names, sorted.
    pub fn component_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.components.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Registered partial names, sorted.
    pub fn partial_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.partials.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Metadata for every registered component, sorted by type name.
    pub fn describe(&self) -> Vec<ComponentSummary> {
        self.component_types()
            .into_iter()
            .filter_map(|component_type| {
                self.components
                    .get(component_type)
                    .map(|registration| ComponentSummary {
                        component_type: component_type.to_string(),
                        kind: registration.component.kind(),
                        info: registration.info.clone(),
                    })
            })
            .collect()
    }
}

/// The config substituted for a partial that cannot be found.
pub fn missing_partial_config(name: &str) -> ComponentConfig {
    error_config(format!("I could not find the partial '{}'", name))
}

/// A config rendering `message` through the built-in [`ERROR_COMPONENT`].
pub fn error_config(message: impl Into<String>) -> ComponentConfig {
    ComponentConfig::component(ERROR_COMPONENT).with_prop("message", Value::String(message.into()))
}

fn render_error_component(element: &Element<'_>) -> Result<String, RenderError> {
    let message = element.prop_str("message").unwrap_or_default();
    Ok(format!("<p>{}</p>", escape_html(message)))
}
