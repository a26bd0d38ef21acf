use pagecraft::{escape_attribute, escape_html, Component, ComponentInfo, Element, RenderError};

/// A block of text. The `text` prop is escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWidget;

impl TextWidget {
    pub const TYPE: &'static str = "TextWidget";
    pub const PLACEHOLDER: &'static str = "This is a text widget with no data!";
}

impl Component for TextWidget {
    fn render(&self, element: &Element<'_>) -> Result<String, RenderError> {
        let text = element
            .prop_str("text")
            .filter(|text| !text.is_empty())
            .unwrap_or(Self::PLACEHOLDER);
        Ok(format!(
            "<div class='{}'>{}</div>",
            escape_attribute(element.class_name().unwrap_or_default()),
            escape_html(text)
        ))
    }

    fn info(&self) -> ComponentInfo {
        ComponentInfo::new("A block of text or html.").editable(
            "text",
            "string",
            "The text to display.",
        )
    }
}
