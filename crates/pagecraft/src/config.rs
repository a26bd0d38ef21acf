//! Authoring-time page descriptions.
//!
//! A page is written as nested [`ComponentConfig`] values. Each config is in
//! one of three modes:
//!
//! - a partial reference (`{"partial": "footer"}`),
//! - a template reference (`{"template": "home"}`),
//! - a concrete component (`{"componentType": "TextWidget", "props": {...}}`).
//!
//! Configs are plain JSON. Absent and empty fields are skipped when
//! serializing, and prop maps are key-ordered, so [`to_canonical_json`]
//! yields the same text for structurally equal configs.
//!
//! [`to_canonical_json`]: ComponentConfig::to_canonical_json

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prop mapping attached to a component.
pub type Props = Map<String, Value>;

/// Declarative description of one node in a page tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfig {
    /// Key into the component registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,

    /// Key into the partial registry (or the theme's `partials`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<String>,

    /// Slug resolved against the theme's `templates`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Explicit node id; derived from the config's content when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Props,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentConfig>,

    /// Fields the resolver does not understand, such as a misspelled
    /// `componentType`. Kept so diagnostics and derived ids cover the whole
    /// authored config.
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// Which of the three config modes a [`ComponentConfig`] is in.
///
/// Partial and template references take priority over `componentType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode<'a> {
    Partial(&'a str),
    Template(&'a str),
    Component,
}

impl ComponentConfig {
    /// A concrete component config of the given type.
    pub fn component(component_type: impl Into<String>) -> Self {
        Self {
            component_type: Some(component_type.into()),
            ..Self::default()
        }
    }

    /// A reference to a named partial.
    pub fn partial(name: impl Into<String>) -> Self {
        Self {
            partial: Some(name.into()),
            ..Self::default()
        }
    }

    /// A reference to a theme template.
    pub fn template(slug: impl Into<String>) -> Self {
        Self {
            template: Some(slug.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: ComponentConfig) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ComponentConfig>) -> Self {
        self.children.extend(children);
        self
    }

    /// Parses a config from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn mode(&self) -> ConfigMode<'_> {
        if let Some(name) = self.partial.as_deref() {
            ConfigMode::Partial(name)
        } else if let Some(slug) = self.template.as_deref() {
            ConfigMode::Template(slug)
        } else {
            ConfigMode::Component
        }
    }

    /// Stable textual form used for derived ids and diagnostics.
    ///
    /// Known fields come first in declaration order, then unknown fields
    /// ordered by key.
    pub fn to_canonical_json(&self) -> String {
        // String-keyed JSON values always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// External prop overrides keyed by node id.
///
/// Supplied by the caller of a build (for example content fetched for the
/// slot a designer named `"sidebar"`). Entries that are not JSON objects are
/// ignored during lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentData(Map<String, Value>);

impl ComponentData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds overrides for a node id. Returns self for chaining.
    pub fn with(mut self, id: impl Into<String>, props: Props) -> Self {
        self.insert(id, props);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, props: Props) {
        self.0.insert(id.into(), Value::Object(props));
    }

    /// Overrides for `id`, if any were supplied as an object.
    pub fn get(&self, id: &str) -> Option<&Props> {
        self.0.get(id).and_then(Value::as_object)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The whole mapping as a JSON value, as handed to components in `child_props`.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for ComponentData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Props)> for ComponentData {
    fn from_iter<I: IntoIterator<Item = (String, Props)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (id, props) in iter {
            data.insert(id, props);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_camel_case_fields() {
        let config = ComponentConfig::from_value(json!({
            "id": "helloWorld",
            "componentType": "TextWidget",
            "props": { "text": "hello world" },
            "children": [{ "partial": "footer" }]
        }))
        .unwrap();

        assert_eq!(config.id.as_deref(), Some("helloWorld"));
        assert_eq!(config.component_type.as_deref(), Some("TextWidget"));
        assert_eq!(config.props["text"], "hello world");
        assert_eq!(config.children[0].partial.as_deref(), Some("footer"));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let config = ComponentConfig::from_json("{}").unwrap();
        assert_eq!(config, ComponentConfig::default());
        assert!(config.props.is_empty());
        assert!(config.children.is_empty());
    }

    #[test]
    fn test_mode_prefers_partial_then_template() {
        let mut config = ComponentConfig::component("TextWidget");
        assert_eq!(config.mode(), ConfigMode::Component);

        config.template = Some("home".into());
        assert_eq!(config.mode(), ConfigMode::Template("home"));

        config.partial = Some("footer".into());
        assert_eq!(config.mode(), ConfigMode::Partial("footer"));
    }

    #[test]
    fn test_canonical_json_skips_empty_fields() {
        let config = ComponentConfig::component("TextWidget");
        assert_eq!(config.to_canonical_json(), r#"{"componentType":"TextWidget"}"#);
    }

    #[test]
    fn test_canonical_json_orders_props() {
        let a = ComponentConfig::component("T")
            .with_prop("b", 2)
            .with_prop("a", 1);
        let b = ComponentConfig::component("T")
            .with_prop("a", 1)
            .with_prop("b", 2);
        assert_eq!(a.to_canonical_json(), b.to_canonical_json());
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let config = ComponentConfig::from_value(json!({
            "compnentType": "TextWidget",
            "props": { "text": "hi" }
        }))
        .unwrap();

        assert_eq!(config.component_type, None);
        assert_eq!(config.extra["compnentType"], "TextWidget");
        assert_eq!(
            config.to_canonical_json(),
            r#"{"props":{"text":"hi"},"compnentType":"TextWidget"}"#
        );
    }

    #[test]
    fn test_distinct_malformed_configs_stay_distinct() {
        let misspelled = ComponentConfig::from_json(r#"{"compnentType":"TextWidget"}"#).unwrap();
        let other = ComponentConfig::from_json(r#"{"type":"Other"}"#).unwrap();
        assert_eq!(misspelled.to_canonical_json(), r#"{"compnentType":"TextWidget"}"#);
        assert_eq!(other.to_canonical_json(), r#"{"type":"Other"}"#);
    }

    #[test]
    fn test_component_data_ignores_non_object_entries() {
        let data = ComponentData::from(
            json!({ "a": { "text": "x" }, "b": "not an object" })
                .as_object()
                .unwrap()
                .clone(),
        );
        assert_eq!(data.get("a").unwrap()["text"], "x");
        assert!(data.get("b").is_none());
        assert!(data.get("c").is_none());
        assert_eq!(data.len(), 2);
    }
}
