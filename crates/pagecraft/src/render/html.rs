//! HTML rendering.

use minijinja::HtmlEscape;
use serde_json::Value;
use tracing::{trace, warn};

use super::markup::MarkupEngine;
use super::{Backend, RenderedOutput};
use crate::builder::{CLASS_NAME, COMPONENT_ID};
use crate::config::Props;
use crate::error::RenderError;
use crate::node::Node;
use crate::registry::ComponentImpl;

/// Escapes text for use as HTML element content.
///
/// Uses the same escaping minijinja applies to markup components.
pub fn escape_html(text: &str) -> String {
    HtmlEscape(text).to_string()
}

/// Escapes text for use inside a quoted attribute value.
///
/// Like [`escape_html`], but also encodes whitespace control characters so
/// the value survives attribute normalization.
pub fn escape_attribute(text: &str) -> String {
    escape_html(text)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

/// Whether `name` can be written as an attribute name unquoted.
///
/// Accepts `[A-Za-z_:][-A-Za-z0-9_:.]*`.
pub fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// What a component implementation sees while rendering.
///
/// An element is a view of one resolved [`Node`] plus the backend rendering
/// it, so a component can render its children where it wants them. Nodes
/// rendered as children of another node also see that parent.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    node: &'a Node,
    parent: Option<&'a Node>,
    backend: &'a HtmlBackend,
}

impl<'a> Element<'a> {
    pub fn new(node: &'a Node, backend: &'a HtmlBackend) -> Self {
        Self {
            node,
            parent: None,
            backend,
        }
    }

    /// An element for `node` rendered inside `parent`.
    pub fn with_parent(
        node: &'a Node,
        parent: Option<&'a Node>,
        backend: &'a HtmlBackend,
    ) -> Self {
        Self {
            node,
            parent,
            backend,
        }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// The node whose children this node is part of, if rendered as a child.
    pub fn parent(&self) -> Option<&'a Node> {
        self.parent
    }

    /// The enclosing node's props, or an empty map at the root.
    pub fn parent_props(&self) -> Props {
        self.parent.map(|parent| parent.props().clone()).unwrap_or_default()
    }

    pub fn props(&self) -> &'a Props {
        self.node.props()
    }

    pub fn prop(&self, key: &str) -> Option<&'a Value> {
        self.node.prop(key)
    }

    /// A prop, if present and a string.
    pub fn prop_str(&self, key: &str) -> Option<&'a str> {
        self.node.prop_str(key)
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.id()
    }

    pub fn class_name(&self) -> Option<&'a str> {
        self.node.class_name()
    }

    pub fn component_type(&self) -> Option<&'a str> {
        self.node.component_type()
    }

    pub fn children(&self) -> &'a [Node] {
        self.node.children()
    }

    /// Renders every child in order and concatenates the output.
    pub fn render_children(&self) -> Result<String, RenderError> {
        self.node
            .children()
            .iter()
            .map(|child| self.backend.render_in(child, Some(self.node)))
            .collect()
    }

    /// Renders a single node with the same backend, as a child of this one.
    pub fn render_child(&self, child: &Node) -> Result<String, RenderError> {
        self.backend.render_in(child, Some(self.node))
    }

    /// Renders `node` in this element's place, under the same parent.
    pub fn render_in_place(&self, node: &Node) -> Result<String, RenderError> {
        self.backend.render_in(node, self.parent)
    }
}

/// Renders node trees to HTML strings.
///
/// Function and stateful components render themselves through an
/// [`Element`]. Tag components become plain elements whose string props are
/// attributes; markup components are minijinja templates.
///
/// # Example
///
/// ```rust
/// use pagecraft::{Backend, Builder, ComponentConfig, ComponentData, HtmlBackend, Registry};
///
/// let mut registry = Registry::new();
/// registry.register_tag("Link", "a");
///
/// let page = ComponentConfig::component("Link")
///     .with_id("home")
///     .with_prop("href", "index.html");
/// let node = Builder::new(&registry).build(&page, &ComponentData::new()).unwrap();
///
/// let html = HtmlBackend::new().render(&node).unwrap();
/// assert_eq!(html, "<a class='Link home' href='index.html'></a>");
/// ```
#[derive(Default)]
pub struct HtmlBackend {
    markup: MarkupEngine,
}

impl HtmlBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom markup engine, e.g. one with extra filters registered.
    pub fn with_markup(markup: MarkupEngine) -> Self {
        Self { markup }
    }

    pub fn markup(&self) -> &MarkupEngine {
        &self.markup
    }

    pub fn markup_mut(&mut self) -> &mut MarkupEngine {
        &mut self.markup
    }

    /// Renders one node and, depending on its implementation, its subtree.
    pub fn render_node(&self, node: &Node) -> Result<String, RenderError> {
        self.render_in(node, None)
    }

    /// Renders `node` as a child of `parent`.
    pub fn render_in(&self, node: &Node, parent: Option<&Node>) -> Result<String, RenderError> {
        let element = Element::with_parent(node, parent, self);
        match node.component() {
            ComponentImpl::Function(render) => render(&element),
            ComponentImpl::Stateful(component) => component.render(&element),
            ComponentImpl::Tag(tag) => self.render_tag(tag, &element),
            ComponentImpl::Markup(source) => {
                let children = element.render_children()?;
                self.markup.render(
                    node.component_type().unwrap_or_default(),
                    source,
                    node.props(),
                    children,
                )
            }
            ComponentImpl::NotFound(name) => {
                trace!(component_type = %name, "rendering not-found placeholder");
                Ok(format!("Could not find component '{}'", escape_html(name)))
            }
        }
    }

    fn render_tag(&self, tag: &str, element: &Element<'_>) -> Result<String, RenderError> {
        let mut html = format!("<{}", tag);
        if let Some(class_name) = element.class_name() {
            html.push_str(&format!(" class='{}'", escape_attribute(class_name)));
        }
        for (key, value) in element.props() {
            if key == CLASS_NAME || key == COMPONENT_ID {
                continue;
            }
            if !is_attribute_name(key) {
                warn!(
                    component_type = element.component_type().unwrap_or_default(),
                    attribute = %key,
                    "skipping invalid attribute name"
                );
                continue;
            }
            if let Value::String(value) = value {
                html.push_str(&format!(" {}='{}'", key, escape_attribute(value)));
            }
        }
        html.push('>');
        html.push_str(&element.render_children()?);
        html.push_str(&format!("</{}>", tag));
        Ok(html)
    }
}

impl Backend for HtmlBackend {
    fn render(&self, node: &Node) -> Result<RenderedOutput, RenderError> {
        self.render_node(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::config::{ComponentConfig, ComponentData};
    use crate::registry::Registry;
    use serde_json::json;

    fn render(registry: &Registry, page: &ComponentConfig) -> String {
        let node = Builder::new(registry).build(page, &ComponentData::new()).unwrap();
        HtmlBackend::new().render(&node).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;&#x2f;b&gt;"
        );
    }

    #[test]
    fn test_escape_attribute_encodes_whitespace() {
        assert_eq!(escape_attribute("a\nb\t<c>"), "a&#10;b&#9;&lt;c&gt;");
    }

    #[test]
    fn test_tag_renders_string_props_as_attributes() {
        let mut registry = Registry::new();
        registry.register_tag("Box", "div");
        let page = ComponentConfig::component("Box")
            .with_id("hero")
            .with_prop("title", "it's <here>")
            .with_prop("count", 3);

        assert_eq!(
            render(&registry, &page),
            "<div class='Box hero' title='it&#x27;s &lt;here&gt;'></div>"
        );
    }

    #[test]
    fn test_tag_skips_props_that_are_not_attribute_names() {
        let mut registry = Registry::new();
        registry.register_tag("Box", "div");
        let page = ComponentConfig::component("Box").with_id("hero");
        let data: ComponentData = serde_json::from_value(json!({
            "hero": { "x='' onmouseover='alert(1)' y": "v", "data-role": "banner" }
        }))
        .unwrap();
        let node = Builder::new(&registry).build(&page, &data).unwrap();

        assert_eq!(
            HtmlBackend::new().render(&node).unwrap(),
            "<div class='Box hero' data-role='banner'></div>"
        );
    }

    #[test]
    fn test_attribute_names() {
        assert!(is_attribute_name("href"));
        assert!(is_attribute_name("data-role"));
        assert!(is_attribute_name("xlink:href"));
        assert!(is_attribute_name("_x.y"));
        assert!(!is_attribute_name(""));
        assert!(!is_attribute_name("1x"));
        assert!(!is_attribute_name("a b"));
        assert!(!is_attribute_name("a='b'"));
        assert!(!is_attribute_name("a>"));
    }

    #[test]
    fn test_tag_renders_children_in_order() {
        let mut registry = Registry::new();
        registry.register_tag("List", "ul");
        registry.register_tag("Item", "li");
        let page = ComponentConfig::component("List").with_id("l").with_children([
            ComponentConfig::component("Item").with_id("a"),
            ComponentConfig::component("Item").with_id("b"),
        ]);

        assert_eq!(
            render(&registry, &page),
            "<ul class='List l'><li class='Item a'></li><li class='Item b'></li></ul>"
        );
    }

    #[test]
    fn test_not_found_message() {
        let registry = Registry::new();
        let page = ComponentConfig::component("WeirdThing").with_id("w");
        assert_eq!(render(&registry, &page), "Could not find component 'WeirdThing'");
    }

    #[test]
    fn test_error_component_for_missing_partial() {
        let registry = Registry::new();
        assert_eq!(
            render(&registry, &ComponentConfig::partial("sidebar")),
            "<p>I could not find the partial &#x27;sidebar&#x27;</p>"
        );
    }

    #[test]
    fn test_function_component_places_children() {
        let mut registry = Registry::new();
        registry.register_fn("Card", |element| {
            Ok(format!(
                "<section id='{}'>{}</section>",
                element.id().unwrap_or_default(),
                element.render_children()?
            ))
        });
        registry.register_fn("Text", |element| {
            Ok(escape_html(element.prop_str("text").unwrap_or_default()))
        });
        let page = ComponentConfig::component("Card")
            .with_id("card")
            .with_child(ComponentConfig::component("Text").with_prop("text", "a & b"));

        assert_eq!(
            render(&registry, &page),
            "<section id='card'>a &amp; b</section>"
        );
    }

    #[test]
    fn test_children_see_their_parent() {
        let mut registry = Registry::new();
        registry.register_fn("Outer", |element| element.render_children());
        registry.register_fn("Inner", |element| {
            Ok(element
                .parent()
                .and_then(Node::id)
                .unwrap_or("root")
                .to_string())
        });
        let page = ComponentConfig::component("Outer")
            .with_id("outer")
            .with_child(ComponentConfig::component("Inner").with_id("inner"));
        let standalone = ComponentConfig::component("Inner").with_id("inner");

        assert_eq!(render(&registry, &page), "outer");
        assert_eq!(render(&registry, &standalone), "root");
    }

    #[test]
    fn test_component_errors_propagate() {
        let mut registry = Registry::new();
        registry.register_fn("Broken", |_| Err(RenderError::component("Broken", "no data")));
        let node = Builder::new(&registry)
            .build(&ComponentConfig::component("Broken"), &ComponentData::new())
            .unwrap();
        let err = HtmlBackend::new().render(&node).unwrap_err();
        assert!(matches!(err, RenderError::Component { component, .. } if component == "Broken"));
    }
}
