//! The recursive tree builder.

use serde_json::Value;
use tracing::{trace, warn};

use super::id::generate_id;
use super::props::{compose_props, DerivedProps, CONTEXT};
use crate::api::{ApiDataWrapper, NoApi};
use crate::config::{ComponentConfig, ComponentData};
use crate::error::BuildError;
use crate::node::Node;
use crate::options::BuildOptions;
use crate::registry::{error_config, Registry};
use crate::theme::Theme;

static NO_API: NoApi = NoApi;

/// Turns component configs into resolved [`Node`] trees.
///
/// A builder borrows everything it reads: the registry, the optional theme
/// (whose `partials` shadow registered partials), and the API wrapper. It
/// keeps no state between builds, so one builder can serve many pages.
///
/// # Resolution Steps
///
/// For each config node:
///
/// 1. A `partial` reference is replaced by the partial's config, and
///    resolution restarts on it.
/// 2. A config without `componentType` becomes a `NotFound` node whose
///    diagnostic is the config's `id`, or its canonical JSON.
/// 3. `componentType` is resolved through the registry (missing types give
///    a `NotFound` implementation).
/// 4. Children are built with the same component data.
/// 5. A missing `id` is derived from the config's content.
/// 6. Props are composed: config < `data[id]` < derived metadata.
/// 7. Components that declare API endpoints get their props wrapped.
///
/// # Example
///
/// ```rust
/// use pagecraft::{Builder, ComponentConfig, ComponentData, ComponentImpl, Registry};
///
/// let mut registry = Registry::new();
/// registry.register_component("Section", ComponentImpl::tag("section"));
///
/// let page = ComponentConfig::component("Section").with_id("main");
/// let node = Builder::new(&registry).build(&page, &ComponentData::new()).unwrap();
///
/// assert_eq!(node.id(), Some("main"));
/// assert_eq!(node.class_name(), Some("Section main"));
/// ```
pub struct Builder<'a> {
    registry: &'a Registry,
    theme: Option<&'a Theme>,
    api: &'a dyn ApiDataWrapper,
    options: BuildOptions,
}

impl<'a> Builder<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            theme: None,
            api: &NO_API,
            options: BuildOptions::default(),
        }
    }

    /// Uses the theme's `partials` ahead of the registry's.
    pub fn with_theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_api(mut self, api: &'a dyn ApiDataWrapper) -> Self {
        self.api = api;
        self
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Resolves `config` into a node tree.
    ///
    /// Only partial cycles are fatal here; missing references degrade to
    /// diagnostic nodes.
    pub fn build(
        &self,
        config: &ComponentConfig,
        data: &ComponentData,
    ) -> Result<Node, BuildError> {
        let mut partial_chain = Vec::new();
        self.build_node(config, data, &mut partial_chain)
    }

    /// Builds a sub-tree on behalf of a component that manages its own
    /// children, typically with the `child_props` it was given.
    pub fn make_component_with(
        &self,
        config: &ComponentConfig,
        child_props: &ComponentData,
    ) -> Result<Node, BuildError> {
        self.build(config, child_props)
    }

    fn build_node(
        &self,
        config: &ComponentConfig,
        data: &ComponentData,
        partial_chain: &mut Vec<String>,
    ) -> Result<Node, BuildError> {
        if let Some(name) = config.partial.as_deref() {
            if partial_chain.iter().any(|entry| entry == name) {
                let mut path = partial_chain.clone();
                path.push(name.to_string());
                return Err(BuildError::PartialCycle { path });
            }

            let expanded = self.lookup_partial(name);
            trace!(partial = name, "expanding partial");
            partial_chain.push(name.to_string());
            let node = self.build_node(&expanded, data, partial_chain);
            partial_chain.pop();
            return node;
        }

        let Some(component_type) = config.component_type.as_deref() else {
            let diagnostic = config
                .id
                .clone()
                .unwrap_or_else(|| config.to_canonical_json());
            warn!(diagnostic = %diagnostic, "config has no componentType");
            return Ok(Node::not_found(diagnostic));
        };

        let component = self.registry.lookup_component(component_type);

        let children = config
            .children
            .iter()
            .map(|child| self.build_node(child, data, partial_chain))
            .collect::<Result<Vec<_>, _>>()?;

        let id = match config.id.as_deref() {
            Some(id) => id.to_string(),
            None => {
                let id = generate_id(&self.options.id_prefix, config);
                trace!(component_type, id = %id, "derived component id");
                id
            }
        };

        let mut props = compose_props(
            &config.props,
            data.get(&id),
            DerivedProps {
                id: &id,
                component_type,
                data,
            },
        );

        let endpoints = component.required_endpoints();
        if !endpoints.is_empty() {
            let context = props
                .get(CONTEXT)
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default()));
            trace!(component_type, ?endpoints, "wrapping props with api data");
            props = self.api.wrap(props, &context, endpoints, component_type);
        }

        Ok(Node::new(component, component_type, props, children))
    }

    /// Theme partials shadow registered ones; a malformed theme partial
    /// degrades like a missing one.
    fn lookup_partial(&self, name: &str) -> ComponentConfig {
        match self.theme.and_then(|theme| theme.partial(name)) {
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                warn!(partial = name, error = %err, "theme partial is not a valid config");
                error_config(format!("The partial '{}' is not a valid config: {}", name, err))
            }
            None => self.registry.lookup_partial(name),
        }
    }
}
