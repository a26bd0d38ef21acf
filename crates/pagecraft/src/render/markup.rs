//! Minijinja-backed markup components.
//!
//! A markup component is a template source registered under a component
//! type. It renders with the node's props as top-level variables plus
//! `children`, the already rendered child markup.
//!
//! Output is HTML auto-escaped: prop values are escaped, `children` is not.
//!
//! ```rust
//! use pagecraft::MarkupEngine;
//! use serde_json::json;
//!
//! let engine = MarkupEngine::new();
//! let props = json!({ "title": "Tom & Jerry" });
//! let html = engine
//!     .render("Card", "<h2>{{ title }}</h2>{{ children }}", props.as_object().unwrap(), "<p>hi</p>".into())
//!     .unwrap();
//! assert_eq!(html, "<h2>Tom &amp; Jerry</h2><p>hi</p>");
//! ```

use std::collections::BTreeMap;

use minijinja::{AutoEscape, Environment, Value};

use super::html::escape_html;
use crate::config::Props;
use crate::error::RenderError;

/// Name under which pre-rendered child markup is exposed to templates.
pub const CHILDREN: &str = "children";

pub struct MarkupEngine {
    env: Environment<'static>,
}

impl MarkupEngine {
    /// Creates an engine with HTML auto-escaping and the default filters.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        register_filters(&mut env);
        Self { env }
    }

    /// The underlying environment, for registering filters or globals.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }

    /// Renders `source` for the component named `component_type`.
    ///
    /// A `children` prop, if present, is shadowed by the rendered children.
    pub fn render(
        &self,
        component_type: &str,
        source: &str,
        props: &Props,
        children: String,
    ) -> Result<String, RenderError> {
        let mut ctx: BTreeMap<&str, Value> = props
            .iter()
            .map(|(key, value)| (key.as_str(), Value::from_serialize(value)))
            .collect();
        ctx.insert(CHILDREN, Value::from_safe_string(children));

        self.env
            .render_str(source, &ctx)
            .map_err(|err| RenderError::Markup {
                component: component_type.to_string(),
                message: err.to_string(),
            })
    }
}

impl Default for MarkupEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers the markup filters with a minijinja environment.
///
/// - `nl`: appends a newline
/// - `nl2br`: escapes the value and turns newlines into `<br />`
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("nl", |value: Value| -> String { format!("{}\n", value) });

    env.add_filter("nl2br", |value: String| -> Value {
        Value::from_safe_string(escape_html(&value).replace('\n', "<br />"))
    });
}
