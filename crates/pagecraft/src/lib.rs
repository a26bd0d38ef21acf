//! # Pagecraft - Declarative Page Resolution
//!
//! `pagecraft` turns declarative page descriptions into render-ready
//! component trees. A page is a JSON tree of [`ComponentConfig`]s that
//! references components by type name, reusable fragments by partial name,
//! and whole pages by template slug. A [`Theme`] supplies templates and
//! partials; a [`Registry`] maps type names to implementations.
//!
//! ## Core Concepts
//!
//! - [`ComponentConfig`]: one authored node (component, partial or template)
//! - [`Registry`]: component implementations and partial configs
//! - [`Theme`]: templates, partials and metadata, layered with [`merge_themes`]
//! - [`Builder`]: resolves a config tree into a [`Node`] tree
//! - [`Backend`]: renders a node tree ([`HtmlBackend`], [`JsonBackend`])
//! - [`render()`]: template resolution, building and HTML rendering in one call
//!
//! Missing components and partials never fail a render: they become
//! diagnostic nodes and only their own subtree degrades. Reference cycles and
//! unusable themes are reported as [`BuildError`]s.
//!
//! ## Quick Start
//!
//! ```rust
//! use pagecraft::{ComponentConfig, ComponentData, Registry, Renderer, Theme};
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! registry.register_fn("TextWidget", |element| {
//!     Ok(format!("<div class='{}'>{}</div>",
//!         element.class_name().unwrap_or_default(),
//!         element.prop_str("text").unwrap_or_default()))
//! });
//!
//! let theme = Theme::from_value(json!({
//!     "templates": {
//!         "home": { "componentType": "TextWidget", "id": "hello", "props": { "text": "hello world" } }
//!     }
//! })).unwrap();
//!
//! let html = Renderer::new()
//!     .with_registry(registry)
//!     .render(&theme, &ComponentConfig::template("home"), &ComponentData::new())
//!     .unwrap();
//! assert_eq!(html, "<div class='TextWidget hello'>hello world</div>");
//! ```
//!
//! ## Component Data
//!
//! Callers override props per node id. The override sits between the
//! config's own props and the metadata the builder derives:
//!
//! ```rust
//! use pagecraft::{Builder, ComponentConfig, ComponentData, Registry};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! let page = ComponentConfig::component("Banner")
//!     .with_id("banner")
//!     .with_prop("text", "default");
//! let data = ComponentData::new()
//!     .with("banner", json!({ "text": "sale!" }).as_object().unwrap().clone());
//!
//! let node = Builder::new(&registry).build(&page, &data).unwrap();
//! assert_eq!(node.prop_str("text"), Some("sale!"));
//! assert_eq!(node.class_name(), Some("Banner banner"));
//! ```
//!
//! ## YAML Themes
//!
//! ```rust
//! use pagecraft::Theme;
//!
//! let theme = Theme::from_yaml(r#"
//! name: Default
//! templates:
//!   home:
//!     componentType: PageLayout
//!   index:
//!     template: home
//! "#).unwrap();
//! assert_eq!(theme.name(), Some("Default"));
//! ```

pub mod api;
mod builder;
mod config;
mod error;
mod node;
mod options;
pub mod prelude;
mod registry;
pub mod render;
pub mod theme;

// Error types
pub use error::{BuildError, RenderError, ThemeError};

// Authoring types
pub use config::{ComponentConfig, ComponentData, ConfigMode, Props};
pub use options::{BuildOptions, DEFAULT_FALLBACK_SLUGS, DEFAULT_ID_PREFIX};

// Registry exports
pub use registry::{
    error_config, missing_partial_config, register_component, register_partial,
    register_partials, reset_global_registry, update_global_registry, with_global_registry,
    Component, ComponentImpl, ComponentInfo, ComponentSummary, EditableProp, ParentPropsFn,
    PropsFromParent, Registry, RenderFn, ERROR_COMPONENT,
};

// Theme exports
pub use theme::{expand_template, merge_themes, resolve_template, resolve_template_with, Theme};

// Builder exports
pub use builder::{
    class_name, compose_props, expand_partials, generate_id, Builder, DerivedProps, CHILD_PROPS,
    CLASS_NAME, COMPONENT_ID, CONTEXT,
};
pub use node::Node;

// API data wrapper
pub use api::{ApiDataWrapper, NoApi, StaticApi};

// Render exports
pub use render::{
    build_components_from_theme, escape_attribute, escape_html, is_attribute_name, render,
    Backend, Element, HtmlBackend, JsonBackend, MarkupEngine, RenderedOutput, Renderer,
};
