//! Template resolution against a theme.
//!
//! A page may be written as `{"template": "<slug>"}`. The slug is looked up
//! in the theme's `templates` map; when it is missing, the fallback slugs
//! (`"404"`, then `"home"` by default) are tried in order. A template entry
//! may itself be an indirection (`{"template": "<other>"}`), which is
//! resolved the same way against the same theme.
//!
//! The chain of slugs actually visited is tracked. Visiting a slug twice is
//! a [`BuildError::TemplateCycle`]: `a -> b -> a` can never produce a page.

use serde_json::Value;
use tracing::{debug, trace};

use super::theme::Theme;
use crate::config::ComponentConfig;
use crate::error::BuildError;
use crate::options::DEFAULT_FALLBACK_SLUGS;

/// Resolves `slug` with the default fallback chain.
///
/// ```rust
/// use pagecraft::{resolve_template, Theme};
/// use serde_json::json;
///
/// let theme = Theme::from_value(json!({
///     "templates": {
///         "home": { "componentType": "TextWidget" },
///         "index": { "template": "home" }
///     }
/// })).unwrap();
///
/// let page = resolve_template(&theme, "index").unwrap();
/// assert_eq!(page.component_type.as_deref(), Some("TextWidget"));
///
/// // Unknown slugs fall back to "404", then "home".
/// let page = resolve_template(&theme, "missing").unwrap();
/// assert_eq!(page.component_type.as_deref(), Some("TextWidget"));
/// ```
pub fn resolve_template(theme: &Theme, slug: &str) -> Result<ComponentConfig, BuildError> {
    let fallbacks: Vec<String> = DEFAULT_FALLBACK_SLUGS
        .iter()
        .map(|slug| slug.to_string())
        .collect();
    resolve_template_with(theme, slug, &fallbacks)
}

/// Resolves `slug`, trying `fallbacks` in order when a slug is missing.
pub fn resolve_template_with(
    theme: &Theme,
    slug: &str,
    fallbacks: &[String],
) -> Result<ComponentConfig, BuildError> {
    let templates = theme.templates().ok_or_else(|| BuildError::NoTemplates {
        slug: slug.to_string(),
    })?;

    let mut visited: Vec<String> = Vec::new();
    let mut requested = slug.to_string();

    loop {
        let found = std::iter::once(requested.as_str())
            .chain(fallbacks.iter().map(String::as_str))
            .find(|candidate| templates.contains_key(*candidate))
            .ok_or_else(|| BuildError::NoTemplateFound {
                slug: slug.to_string(),
                fallbacks: fallbacks.to_vec(),
            })?;

        if found != requested {
            debug!(requested = %requested, fallback = found, "template not found, using fallback");
        }

        let seen = visited.iter().any(|slug| slug == found);
        visited.push(found.to_string());
        if seen {
            return Err(BuildError::TemplateCycle { path: visited });
        }

        let entry = &templates[found];
        match entry.get("template") {
            Some(Value::String(next)) => {
                trace!(from = found, to = %next, "following template indirection");
                requested = next.clone();
            }
            Some(other) => {
                return Err(BuildError::InvalidTemplate {
                    slug: found.to_string(),
                    message: format!("indirection must name a slug, found {}", other),
                });
            }
            None => {
                return ComponentConfig::from_value(entry.clone()).map_err(|e| {
                    BuildError::InvalidTemplate {
                        slug: found.to_string(),
                        message: e.to_string(),
                    }
                });
            }
        }
    }
}

/// Replaces a template reference with the template it names.
///
/// Configs that are not template references are returned unchanged.
pub fn expand_template(
    theme: &Theme,
    page: &ComponentConfig,
    fallbacks: &[String],
) -> Result<ComponentConfig, BuildError> {
    match page.template.as_deref() {
        Some(slug) => resolve_template_with(theme, slug, fallbacks),
        None => Ok(page.clone()),
    }
}
