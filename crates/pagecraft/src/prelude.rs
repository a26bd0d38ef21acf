//! Convenient imports for applications that register components and render
//! pages.
//!
//! ```rust
//! use pagecraft::prelude::*;
//!
//! let mut registry = Registry::new();
//! registry.register_tag("Section", "section");
//! let node = Builder::new(&registry)
//!     .build(&ComponentConfig::component("Section").with_id("s"), &ComponentData::new())
//!     .unwrap();
//! assert_eq!(HtmlBackend::new().render(&node).unwrap(), "<section class='Section s'></section>");
//! ```

pub use crate::{
    render, Backend, BuildError, Builder, Component, ComponentConfig, ComponentData, ComponentImpl,
    ComponentInfo, Element, HtmlBackend, Node, Props, Registry, RenderError, Renderer, Theme,
};
