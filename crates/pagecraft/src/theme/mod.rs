//! Themes: named bundles of templates, partials, and metadata.
//!
//! A theme is plain JSON (or YAML) with two keys the resolver understands:
//!
//! ```json
//! {
//!   "name": "Default",
//!   "templates": {
//!     "home": { "componentType": "PageLayout", "children": [{ "partial": "footer" }] },
//!     "index": { "template": "home" }
//!   },
//!   "partials": {
//!     "footer": { "componentType": "TextWidget", "props": { "text": "bye" } }
//!   }
//! }
//! ```
//!
//! ## Layering
//!
//! [`merge_themes`] layers a child theme over a parent so the child only has
//! to redeclare the templates and partials it changes.
//!
//! ## Template Lookup
//!
//! [`resolve_template`] turns a slug into a page config, following
//! indirections and the `404` → `home` fallback chain.

mod merge;
#[allow(clippy::module_inception)]
mod theme;
mod template;

pub use merge::merge_themes;
pub use template::{expand_template, resolve_template, resolve_template_with};
pub use theme::{Theme, PARTIALS, TEMPLATES};
