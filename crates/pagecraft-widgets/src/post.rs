//! Widgets for the parts of a blog post.
//!
//! Both widgets are meant to sit inside a `PostBody` and read `content` or
//! `date` from it when they have none of their own.

use pagecraft::{
    escape_attribute, escape_html, Component, ComponentImpl, ComponentInfo, Element, Props,
    RenderError,
};

fn class_attr(element: &Element<'_>) -> String {
    escape_attribute(element.class_name().unwrap_or_default())
}

fn non_empty<'a>(element: &Element<'a>, key: &str) -> Option<&'a str> {
    element.prop_str(key).filter(|value| !value.is_empty())
}

fn pick(parent: &Props, key: &str) -> Props {
    parent
        .get(key)
        .map(|value| Props::from_iter([(key.to_string(), value.clone())]))
        .unwrap_or_default()
}

/// The content of a post, rendered as html.
///
/// `content` is trusted markup; newlines become `<br />`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostContent;

impl PostContent {
    pub const TYPE: &'static str = "PostContent";
    pub const PLACEHOLDER: &'static str = "No content";

    /// The registered form: takes `content` from the parent when unset.
    pub fn component() -> ComponentImpl {
        ComponentImpl::from_parent(
            |parent| pick(parent, "content"),
            ComponentImpl::stateful(PostContent),
        )
    }
}

impl Component for PostContent {
    fn render(&self, element: &Element<'_>) -> Result<String, RenderError> {
        let content = non_empty(element, "content").unwrap_or(Self::PLACEHOLDER);
        Ok(format!(
            "<div class='{}'><div class='PostContent__content'>{}</div></div>",
            class_attr(element),
            content.replace('\n', "<br />")
        ))
    }

    fn info(&self) -> ComponentInfo {
        ComponentInfo::new("The content of a post, rendered as html. Use inside a PostBody.")
            .editable("content", "string", "The html content of a post.")
    }
}

/// The date of a post.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostDate;

impl PostDate {
    pub const TYPE: &'static str = "PostDate";
    pub const PLACEHOLDER: &'static str = "No date";

    /// The registered form: takes `date` from the parent when unset.
    pub fn component() -> ComponentImpl {
        ComponentImpl::from_parent(|parent| pick(parent, "date"), ComponentImpl::stateful(PostDate))
    }
}

impl Component for PostDate {
    fn render(&self, element: &Element<'_>) -> Result<String, RenderError> {
        let date = non_empty(element, "date").unwrap_or(Self::PLACEHOLDER);
        Ok(format!(
            "<span class='{}'>{}</span>",
            class_attr(element),
            escape_html(date)
        ))
    }

    fn info(&self) -> ComponentInfo {
        ComponentInfo::new("The date for a post. Use inside a PostBody.").editable(
            "date",
            "string",
            "The date string for the post",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft::{Backend, Builder, ComponentConfig, ComponentData, HtmlBackend, Registry};

    fn render(page: &ComponentConfig) -> String {
        let mut registry = Registry::new();
        registry.register_component(PostContent::TYPE, PostContent::component());
        registry.register_component(PostDate::TYPE, PostDate::component());
        registry.register_fn("PostBody", |element| {
            Ok(format!("<article>{}</article>", element.render_children()?))
        });
        let node = Builder::new(&registry).build(page, &ComponentData::new()).unwrap();
        HtmlBackend::new().render(&node).unwrap()
    }

    #[test]
    fn test_post_content_converts_newlines() {
        let page = ComponentConfig::component("PostContent")
            .with_id("body")
            .with_prop("content", "<em>one</em>\ntwo");
        assert_eq!(
            render(&page),
            "<div class='PostContent body'><div class='PostContent__content'><em>one</em><br />two</div></div>"
        );
    }

    #[test]
    fn test_post_content_placeholder() {
        let page = ComponentConfig::component("PostContent").with_id("body");
        assert!(render(&page).contains(">No content<"));
    }

    #[test]
    fn test_post_date() {
        let page = ComponentConfig::component("PostDate")
            .with_id("d")
            .with_prop("date", "May 4 & 5");
        assert_eq!(render(&page), "<span class='PostDate d'>May 4 &amp; 5</span>");
    }

    #[test]
    fn test_post_date_placeholder() {
        let page = ComponentConfig::component("PostDate").with_id("d");
        assert_eq!(render(&page), "<span class='PostDate d'>No date</span>");
    }

    #[test]
    fn test_post_widgets_read_from_post_body() {
        let page = ComponentConfig::component("PostBody")
            .with_id("post")
            .with_prop("content", "first\nsecond")
            .with_prop("date", "May 4")
            .with_children([
                ComponentConfig::component("PostDate").with_id("d"),
                ComponentConfig::component("PostContent").with_id("c"),
            ]);
        assert_eq!(
            render(&page),
            "<article><span class='PostDate d'>May 4</span>\
             <div class='PostContent c'><div class='PostContent__content'>first<br />second</div></div>\
             </article>"
        );
    }

    #[test]
    fn test_own_date_wins_over_post_body() {
        let page = ComponentConfig::component("PostBody")
            .with_prop("date", "May 4")
            .with_child(
                ComponentConfig::component("PostDate")
                    .with_id("d")
                    .with_prop("date", "June 1"),
            );
        assert_eq!(render(&page), "<article><span class='PostDate d'>June 1</span></article>");
    }

    #[test]
    fn test_metadata() {
        let info = PostDate.info();
        assert_eq!(info.editable_props[0].name, "date");
        assert_eq!(info.editable_props[0].prop_type, "string");
        assert!(PostContent.info().description.unwrap().contains("PostBody"));
        assert_eq!(PostDate::component().info(), info);
    }
}
