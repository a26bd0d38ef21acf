//! Rendering resolved node trees.
//!
//! A [`Backend`] turns a [`Node`](crate::Node) tree into output. Two ship
//! with the crate:
//!
//! - [`HtmlBackend`]: components render themselves to HTML
//! - [`JsonBackend`]: the resolved tree, serialized
//!
//! [`render`] and [`Renderer`] run the whole pipeline from a page config.

mod html;
mod json;
mod markup;
mod renderer;

pub use html::{escape_attribute, escape_html, is_attribute_name, Element, HtmlBackend};
pub use json::JsonBackend;
pub use markup::{register_filters, MarkupEngine, CHILDREN};
pub use renderer::{build_components_from_theme, render, Renderer};

use crate::error::RenderError;
use crate::node::Node;

/// What a render produces.
pub type RenderedOutput = String;

/// Turns a resolved node tree into output.
pub trait Backend: Send + Sync {
    fn render(&self, node: &Node) -> Result<RenderedOutput, RenderError>;
}
