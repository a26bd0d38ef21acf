//! Error types for resolving and rendering pages.
//!
//! Missing component types and missing partials are not errors: they degrade
//! to diagnostic nodes so one bad reference only affects its own subtree.
//! What remains here is fatal for a single render:
//!
//! - [`BuildError`]: configuration problems (no template map, exhausted
//!   fallback chain, malformed template) and reference cycles.
//! - [`RenderError`]: anything a backend can fail on, plus a wrapped
//!   [`BuildError`] so [`render`](crate::render()) has one error type.
//! - [`ThemeError`]: loading a theme from text or disk.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal error raised while turning a page config into a node tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A template was requested but the theme defines no `templates` map.
    #[error("no template found matching '{slug}' and no templates were defined in the theme")]
    NoTemplates { slug: String },

    /// Neither the requested slug nor any fallback slug exists.
    #[error(
        "no template found matching '{slug}' and no {} templates were defined in the theme",
        .fallbacks.join(" or ")
    )]
    NoTemplateFound {
        /// The slug that was requested.
        slug: String,
        /// The fallback slugs that were tried after it.
        fallbacks: Vec<String>,
    },

    /// A template entry exists but is not a usable component config.
    #[error("template '{slug}' is not a valid component config: {message}")]
    InvalidTemplate { slug: String, message: String },

    /// Template indirection revisited a slug.
    #[error("cycle detected in template indirection: {}", .path.join(" -> "))]
    TemplateCycle { path: Vec<String> },

    /// A partial (directly or transitively) references itself.
    #[error("cycle detected in partial expansion: {}", .path.join(" -> "))]
    PartialCycle { path: Vec<String> },

    /// Eager partial expansion hit an unknown partial name.
    #[error("no partial found matching '{name}'")]
    PartialNotFound { name: String },

    /// A partial entry exists but is not a usable component config.
    #[error("partial '{name}' is not a valid component config: {message}")]
    InvalidPartial { name: String, message: String },
}

/// Error returned by [`render`](crate::render()) and the rendering backends.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The page could not be resolved into a node tree.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A markup component's template failed to compile or render.
    #[error("markup error in component '{component}': {message}")]
    Markup { component: String, message: String },

    /// A registered component reported a failure of its own.
    #[error("component '{component}' failed to render: {message}")]
    Component { component: String, message: String },

    /// The resolved tree could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RenderError {
    /// Convenience constructor for component implementations.
    pub fn component(component: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError::Component {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// Error type for theme loading failures.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The theme file could not be read.
    #[error("failed to read theme {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The theme text is not valid JSON or YAML.
    #[error("failed to parse theme{}: {message}", source_suffix(.path))]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Error message from the parser.
        message: String,
    },

    /// The theme document parsed, but its top level is not a mapping.
    #[error("a theme must be a mapping of named properties, found {found}")]
    NotAMapping { found: &'static str },
}

fn source_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" {}", path.display()))
        .unwrap_or_default()
}
