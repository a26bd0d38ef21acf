//! Build configuration.

use serde::{Deserialize, Serialize};

/// Prefix prepended to ids derived from a config's content.
pub const DEFAULT_ID_PREFIX: &str = "ct-";

/// Slugs tried, in order, when a requested template does not exist.
pub const DEFAULT_FALLBACK_SLUGS: &[&str] = &["404", "home"];

/// Options shared by template resolution and tree building.
///
/// Deserializable so applications can keep it next to their theme files;
/// every field has a default.
///
/// ```rust
/// use pagecraft::BuildOptions;
///
/// let options: BuildOptions = serde_json::from_str(r#"{"id_prefix": "pc-"}"#).unwrap();
/// assert_eq!(options.id_prefix, "pc-");
/// assert_eq!(options.fallback_slugs, vec!["404", "home"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub id_prefix: String,
    pub fallback_slugs: Vec<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            fallback_slugs: DEFAULT_FALLBACK_SLUGS
                .iter()
                .map(|slug| slug.to_string())
                .collect(),
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_fallback_slugs<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_slugs = slugs.into_iter().map(Into::into).collect();
        self
    }
}
