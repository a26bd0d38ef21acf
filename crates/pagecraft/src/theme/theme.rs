//! Theme struct: a named bundle of templates, partials, and metadata.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::merge::merge_themes;
use crate::config::ComponentConfig;
use crate::error::ThemeError;

/// Key holding the slug → page config map.
pub const TEMPLATES: &str = "templates";

/// Key holding the partial name → config map.
pub const PARTIALS: &str = "partials";

/// A mapping of named theme properties to JSON values.
///
/// The resolver only interprets [`TEMPLATES`] and [`PARTIALS`]; every other
/// property (`name`, `slug`, anything an application adds) is carried along
/// untouched and takes part in [`merge`](Theme::merge).
///
/// # Example
///
/// ```rust
/// use pagecraft::Theme;
///
/// let theme = Theme::from_json(r#"{
///     "name": "Default",
///     "templates": {
///         "home": { "componentType": "TextWidget", "props": { "text": "Welcome" } }
///     }
/// }"#).unwrap();
///
/// assert_eq!(theme.name(), Some("Default"));
/// assert!(theme.templates().unwrap().contains_key("home"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    properties: Map<String, Value>,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, ThemeError> {
        match value {
            Value::Object(properties) => Ok(Self { properties }),
            other => Err(ThemeError::NotAMapping {
                found: json_kind(&other),
            }),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        let value: Value = serde_json::from_str(json).map_err(|e| ThemeError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        let value: Value = serde_yaml::from_str(yaml).map_err(|e| ThemeError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Loads a theme file. `.yaml`/`.yml` files are parsed as YAML,
    /// everything else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let parsed = if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        };

        parsed.map_err(|err| match err {
            ThemeError::Parse { message, .. } => ThemeError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Sets a property. Returns self for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Adds a template. Creates the `templates` map if needed.
    pub fn with_template(self, slug: impl Into<String>, config: &ComponentConfig) -> Self {
        self.with_entry(TEMPLATES, slug, config)
    }

    /// Adds a partial. Creates the `partials` map if needed.
    pub fn with_partial(self, name: impl Into<String>, config: &ComponentConfig) -> Self {
        self.with_entry(PARTIALS, name, config)
    }

    fn with_entry(
        mut self,
        section: &str,
        key: impl Into<String>,
        config: &ComponentConfig,
    ) -> Self {
        let entry = self
            .properties
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let (Value::Object(map), Ok(value)) = (entry, serde_json::to_value(config)) {
            map.insert(key.into(), value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Property names, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn slug(&self) -> Option<&str> {
        self.get("slug").and_then(Value::as_str)
    }

    /// The `templates` map, if the theme defines one.
    pub fn templates(&self) -> Option<&Map<String, Value>> {
        self.get(TEMPLATES).and_then(Value::as_object)
    }

    /// The `partials` map, if the theme defines one.
    pub fn partials(&self) -> Option<&Map<String, Value>> {
        self.get(PARTIALS).and_then(Value::as_object)
    }

    /// Looks up and parses a theme partial.
    ///
    /// `None` if the theme has no such partial; `Some(Err(_))` if the entry
    /// is not a valid component config.
    pub fn partial(&self, name: &str) -> Option<Result<ComponentConfig, serde_json::Error>> {
        self.partials()?
            .get(name)
            .map(|value| ComponentConfig::from_value(value.clone()))
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Merges another theme on top of this one.
    ///
    /// See [`merge_themes`] for the precedence rules.
    pub fn merge(self, other: Theme) -> Self {
        merge_themes(&self, &other)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.properties)
    }
}

impl From<Map<String, Value>> for Theme {
    fn from(properties: Map<String, Value>) -> Self {
        Self { properties }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_theme_new_is_empty() {
        let theme = Theme::new();
        assert!(theme.is_empty());
        assert_eq!(theme.len(), 0);
        assert!(theme.templates().is_none());
    }

    #[test]
    fn test_theme_from_value_requires_object() {
        let err = Theme::from_value(json!(["not", "a", "theme"])).unwrap_err();
        assert!(matches!(err, ThemeError::NotAMapping { found: "an array" }));
    }

    #[test]
    fn test_theme_from_json() {
        let theme = Theme::from_json(r#"{"name": "TestTheme", "slug": "testtheme"}"#).unwrap();
        assert_eq!(theme.name(), Some("TestTheme"));
        assert_eq!(theme.slug(), Some("testtheme"));
    }

    #[test]
    fn test_theme_from_json_invalid() {
        let err = Theme::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ThemeError::Parse { path: None, .. }));
    }

    #[test]
    fn test_theme_from_yaml() {
        let theme = Theme::from_yaml(
            r#"
            name: YamlTheme
            templates:
                home:
                    componentType: TextWidget
                    props:
                        text: hi
            "#,
        )
        .unwrap();

        assert_eq!(theme.name(), Some("YamlTheme"));
        let home = &theme.templates().unwrap()["home"];
        assert_eq!(home["componentType"], "TextWidget");
    }

    #[test]
    fn test_theme_from_file_json_and_yaml() {
        let mut json_file = NamedTempFile::with_suffix(".json").unwrap();
        write!(json_file, r#"{{"name": "FromJson"}}"#).unwrap();
        let theme = Theme::from_file(json_file.path()).unwrap();
        assert_eq!(theme.name(), Some("FromJson"));

        let mut yaml_file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(yaml_file, "name: FromYaml").unwrap();
        let theme = Theme::from_file(yaml_file.path()).unwrap();
        assert_eq!(theme.name(), Some("FromYaml"));
    }

    #[test]
    fn test_theme_from_file_parse_error_has_path() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, "{{ broken").unwrap();
        let err = Theme::from_file(file.path()).unwrap_err();
        match err {
            ThemeError::Parse { path, .. } => assert_eq!(path.as_deref(), Some(file.path())),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_theme_from_missing_file() {
        let err = Theme::from_file("/nonexistent/theme.json").unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }

    #[test]
    fn test_with_template_and_partial() {
        let theme = Theme::new()
            .with("name", "Built")
            .with_template("home", &ComponentConfig::component("TextWidget"))
            .with_partial("footer", &ComponentConfig::component("Footer"));

        assert_eq!(theme.templates().unwrap()["home"]["componentType"], "TextWidget");
        let footer = theme.partial("footer").unwrap().unwrap();
        assert_eq!(footer.component_type.as_deref(), Some("Footer"));
        assert!(theme.partial("header").is_none());
    }

    #[test]
    fn test_malformed_partial_is_reported() {
        let theme = Theme::from_value(json!({ "partials": { "bad": "nope" } })).unwrap();
        assert!(theme.partial("bad").unwrap().is_err());
    }
}
