//! Components that take props from the node they are rendered inside.

use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use super::component::{Component, ComponentImpl, ComponentInfo};
use crate::config::Props;
use crate::error::RenderError;
use crate::render::Element;

/// Maps the enclosing node's props to props for the wrapped component.
pub type ParentPropsFn = dyn Fn(&Props) -> Props + Send + Sync;

/// Wraps a component so it can inherit props from its direct parent.
///
/// At render time the parent's props go through the mapping function, and
/// every mapped prop the node does not set itself (or sets to `null`) is
/// filled in before the inner component renders. Props the node already has
/// always win. At the root of a tree the mapping sees an empty map.
pub struct PropsFromParent {
    map: Arc<ParentPropsFn>,
    inner: ComponentImpl,
}

impl PropsFromParent {
    pub fn new<F>(map: F, inner: ComponentImpl) -> Self
    where
        F: Fn(&Props) -> Props + Send + Sync + 'static,
    {
        Self {
            map: Arc::new(map),
            inner,
        }
    }

    pub fn inner(&self) -> &ComponentImpl {
        &self.inner
    }
}

impl Component for PropsFromParent {
    fn render(&self, element: &Element<'_>) -> Result<String, RenderError> {
        let inherited = (self.map)(&element.parent_props());
        let mut props = element.props().clone();
        for (key, value) in inherited {
            if props.get(&key).map_or(true, Value::is_null) {
                trace!(prop = %key, "inheriting prop from parent");
                props.insert(key, value);
            }
        }
        let node = element.node().with_component(self.inner.clone(), props);
        element.render_in_place(&node)
    }

    fn required_endpoints(&self) -> &[String] {
        self.inner.required_endpoints()
    }

    fn info(&self) -> ComponentInfo {
        self.inner.info()
    }
}

impl ComponentImpl {
    /// Wraps `inner` so it fills unset props from its parent through `map`.
    ///
    /// ```rust
    /// use pagecraft::{ComponentImpl, Props};
    ///
    /// let byline = ComponentImpl::from_parent(
    ///     |parent: &Props| {
    ///         let mut props = Props::new();
    ///         if let Some(author) = parent.get("author") {
    ///             props.insert("text".to_string(), author.clone());
    ///         }
    ///         props
    ///     },
    ///     ComponentImpl::function(|element| {
    ///         Ok(element.prop_str("text").unwrap_or_default().to_string())
    ///     }),
    /// );
    /// assert_eq!(byline.kind(), "stateful");
    /// ```
    pub fn from_parent<F>(map: F, inner: ComponentImpl) -> Self
    where
        F: Fn(&Props) -> Props + Send + Sync + 'static,
    {
        ComponentImpl::stateful(PropsFromParent::new(map, inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::config::{ComponentConfig, ComponentData};
    use crate::registry::Registry;
    use crate::render::{Backend, HtmlBackend};
    use serde_json::json;

    fn title_from_parent(parent: &Props) -> Props {
        parent
            .get("headline")
            .map(|headline| Props::from_iter([("title".to_string(), headline.clone())]))
            .unwrap_or_default()
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register_fn("Article", |element| element.render_children());
        registry.register_component(
            "Title",
            ComponentImpl::from_parent(
                title_from_parent,
                ComponentImpl::function(|element| {
                    Ok(element.prop_str("title").unwrap_or("untitled").to_string())
                }),
            ),
        );
        registry
    }

    fn render(page: &ComponentConfig) -> String {
        let registry = registry();
        let node = Builder::new(&registry).build(page, &ComponentData::new()).unwrap();
        HtmlBackend::new().render(&node).unwrap()
    }

    #[test]
    fn test_inherits_mapped_prop_from_parent() {
        let page = ComponentConfig::component("Article")
            .with_prop("headline", "Hello")
            .with_child(ComponentConfig::component("Title"));
        assert_eq!(render(&page), "Hello");
    }

    #[test]
    fn test_own_prop_wins_over_parent() {
        let page = ComponentConfig::component("Article")
            .with_prop("headline", "Hello")
            .with_child(ComponentConfig::component("Title").with_prop("title", "Mine"));
        assert_eq!(render(&page), "Mine");
    }

    #[test]
    fn test_null_prop_is_filled_from_parent() {
        let page = ComponentConfig::component("Article")
            .with_prop("headline", "Hello")
            .with_child(ComponentConfig::component("Title").with_prop("title", json!(null)));
        assert_eq!(render(&page), "Hello");
    }

    #[test]
    fn test_root_sees_no_parent() {
        assert_eq!(render(&ComponentConfig::component("Title")), "untitled");
    }

    #[test]
    fn test_only_direct_parent_is_consulted() {
        let page = ComponentConfig::component("Article")
            .with_prop("headline", "Outer")
            .with_child(
                ComponentConfig::component("Article")
                    .with_child(ComponentConfig::component("Title")),
            );
        assert_eq!(render(&page), "untitled");
    }

    #[test]
    fn test_delegates_metadata_to_inner() {
        struct Feed(Vec<String>);

        impl Component for Feed {
            fn render(&self, _element: &Element<'_>) -> Result<String, RenderError> {
                Ok(String::new())
            }

            fn required_endpoints(&self) -> &[String] {
                &self.0
            }

            fn info(&self) -> ComponentInfo {
                ComponentInfo::new("feed")
            }
        }

        let wrapped = ComponentImpl::from_parent(
            |_| Props::new(),
            ComponentImpl::stateful(Feed(vec!["posts".to_string()])),
        );
        assert_eq!(wrapped.required_endpoints(), ["posts".to_string()]);
        assert_eq!(wrapped.info().description.as_deref(), Some("feed"));
    }
}
