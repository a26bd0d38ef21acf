//! The render entry points.

use once_cell::sync::Lazy;
use tracing::debug;

use super::html::HtmlBackend;
use super::{Backend, RenderedOutput};
use crate::api::{ApiDataWrapper, NoApi};
use crate::builder::Builder;
use crate::config::{ComponentConfig, ComponentData};
use crate::error::{BuildError, RenderError};
use crate::node::Node;
use crate::options::BuildOptions;
use crate::registry::{with_global_registry, Registry};
use crate::theme::{expand_template, Theme};

static DEFAULT_RENDERER: Lazy<Renderer> = Lazy::new(Renderer::new);

/// Renders `page` against `theme` with the global registry and HTML output.
///
/// A `{"template": "<slug>"}` page is first replaced by the theme's
/// template (with the `404` → `home` fallback chain); the result is built
/// into a node tree and rendered.
///
/// ```rust
/// use pagecraft::{render, ComponentConfig, ComponentData, Theme};
/// use serde_json::json;
///
/// let theme = Theme::from_value(json!({
///     "templates": { "home": { "componentType": "Unregistered", "id": "main" } }
/// })).unwrap();
///
/// let html = render(&theme, &ComponentConfig::template("about"), &ComponentData::new()).unwrap();
/// assert_eq!(html, "Could not find component 'Unregistered'");
/// ```
pub fn render(
    theme: &Theme,
    page: &ComponentConfig,
    data: &ComponentData,
) -> Result<RenderedOutput, RenderError> {
    DEFAULT_RENDERER.render(theme, page, data)
}

/// Builds the node tree [`render`] would render, without rendering it.
pub fn build_components_from_theme(
    theme: &Theme,
    page: &ComponentConfig,
    data: &ComponentData,
) -> Result<Node, BuildError> {
    DEFAULT_RENDERER.build(theme, page, data)
}

/// A configured pipeline: template resolution, tree building, rendering.
///
/// Without [`with_registry`](Self::with_registry) the global registry is
/// used, read-locked only while building.
///
/// # Example
///
/// ```rust
/// use pagecraft::{ComponentConfig, ComponentData, JsonBackend, Registry, Renderer, Theme};
///
/// let mut registry = Registry::new();
/// registry.register_tag("Page", "main");
///
/// let theme = Theme::new().with_template("home", &ComponentConfig::component("Page").with_id("p"));
///
/// let html = Renderer::new()
///     .with_registry(registry.clone())
///     .render(&theme, &ComponentConfig::template("home"), &ComponentData::new())
///     .unwrap();
/// assert_eq!(html, "<main class='Page p'></main>");
///
/// let json = Renderer::new()
///     .with_registry(registry)
///     .with_backend(JsonBackend::new())
///     .render(&theme, &ComponentConfig::template("home"), &ComponentData::new())
///     .unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub struct Renderer {
    registry: Option<Registry>,
    backend: Box<dyn Backend>,
    api: Box<dyn ApiDataWrapper>,
    options: BuildOptions,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            registry: None,
            backend: Box::new(HtmlBackend::new()),
            api: Box::new(NoApi),
            options: BuildOptions::default(),
        }
    }

    /// Uses `registry` instead of the global one.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_backend(mut self, backend: impl Backend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Sets the API data wrapper.
    ///
    /// Without [`with_registry`](Self::with_registry), the wrapper runs while
    /// the global registry's read lock is held, so it must not register
    /// anything globally.
    pub fn with_api(mut self, api: impl ApiDataWrapper + 'static) -> Self {
        self.api = Box::new(api);
        self
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Resolves templates and builds the node tree.
    pub fn build(
        &self,
        theme: &Theme,
        page: &ComponentConfig,
        data: &ComponentData,
    ) -> Result<Node, BuildError> {
        let page = expand_template(theme, page, &self.options.fallback_slugs)?;
        match &self.registry {
            Some(registry) => self.build_with(registry, theme, &page, data),
            None => with_global_registry(|registry| self.build_with(registry, theme, &page, data)),
        }
    }

    /// Builds and renders with the configured backend.
    pub fn render(
        &self,
        theme: &Theme,
        page: &ComponentConfig,
        data: &ComponentData,
    ) -> Result<RenderedOutput, RenderError> {
        let node = self.build(theme, page, data)?;
        debug!(nodes = node.count(), "rendering resolved tree");
        self.backend.render(&node)
    }

    fn build_with(
        &self,
        registry: &Registry,
        theme: &Theme,
        page: &ComponentConfig,
        data: &ComponentData,
    ) -> Result<Node, BuildError> {
        Builder::new(registry)
            .with_theme(theme)
            .with_api(self.api.as_ref())
            .with_options(self.options.clone())
            .build(page, data)
    }
}
