//! # Pagecraft Widgets
//!
//! Stock components for `pagecraft` themes:
//!
//! - [`TextWidget`]: a block of text or html
//! - [`PostContent`]: a post body, newlines rendered as line breaks
//! - [`PostDate`]: a post's date string
//!
//! The post widgets fall back to the `content` and `date` props of the node
//! they are rendered inside.
//!
//! Each renders into an element carrying the node's `className`, so themes
//! can style them by type or by id.
//!
//! ```rust
//! use pagecraft::{ComponentConfig, ComponentData, Registry, Renderer, Theme};
//! use pagecraft_widgets::register_stock_widgets;
//!
//! let mut registry = Registry::new();
//! register_stock_widgets(&mut registry);
//!
//! let page = ComponentConfig::component("PostDate").with_id("date");
//! let html = Renderer::new()
//!     .with_registry(registry)
//!     .render(&Theme::new(), &page, &ComponentData::new())
//!     .unwrap();
//! assert_eq!(html, "<span class='PostDate date'>No date</span>");
//! ```

mod post;
mod text;

pub use post::{PostContent, PostDate};
pub use text::TextWidget;

use pagecraft::{update_global_registry, ComponentImpl, Registry};

/// Registers every stock widget under its type name.
pub fn register_stock_widgets(registry: &mut Registry) {
    registry.register_component(TextWidget::TYPE, ComponentImpl::stateful(TextWidget));
    registry.register_component(PostContent::TYPE, PostContent::component());
    registry.register_component(PostDate::TYPE, PostDate::component());
}

/// Registers every stock widget in the global registry.
pub fn register_stock_widgets_globally() {
    update_global_registry(register_stock_widgets);
}
