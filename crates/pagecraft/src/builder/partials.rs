//! Eager partial expansion.
//!
//! The [`Builder`](super::Builder) expands partials lazily while it walks a
//! tree. Tooling that wants to inspect a page with every partial inlined
//! (editors, exports) uses [`expand_partials`] instead. Unlike the builder,
//! it treats an unknown partial as an error: there is no node to degrade.

use serde_json::{Map, Value};

use crate::config::ComponentConfig;
use crate::error::BuildError;

/// Returns `config` with every partial reference replaced by its definition.
///
/// Expansion is recursive: a partial's own children may reference further
/// partials. A partial that references itself, directly or through others,
/// fails with [`BuildError::PartialCycle`].
///
/// ```rust
/// use pagecraft::{expand_partials, ComponentConfig};
/// use serde_json::json;
///
/// let partials = json!({
///     "footer": { "componentType": "TextWidget", "props": { "text": "bye" } }
/// });
/// let page = ComponentConfig::component("Page").with_child(ComponentConfig::partial("footer"));
///
/// let expanded = expand_partials(&page, partials.as_object().unwrap()).unwrap();
/// assert_eq!(expanded.children[0].component_type.as_deref(), Some("TextWidget"));
/// ```
pub fn expand_partials(
    config: &ComponentConfig,
    partials: &Map<String, Value>,
) -> Result<ComponentConfig, BuildError> {
    let mut chain = Vec::new();
    expand(config, partials, &mut chain)
}

fn expand(
    config: &ComponentConfig,
    partials: &Map<String, Value>,
    chain: &mut Vec<String>,
) -> Result<ComponentConfig, BuildError> {
    if let Some(name) = config.partial.as_deref() {
        if chain.iter().any(|entry| entry == name) {
            let mut path = chain.clone();
            path.push(name.to_string());
            return Err(BuildError::PartialCycle { path });
        }

        let definition = partials
            .get(name)
            .ok_or_else(|| BuildError::PartialNotFound {
                name: name.to_string(),
            })?;
        let definition = ComponentConfig::from_value(definition.clone()).map_err(|e| {
            BuildError::InvalidPartial {
                name: name.to_string(),
                message: e.to_string(),
            }
        })?;

        chain.push(name.to_string());
        let expanded = expand(&definition, partials, chain);
        chain.pop();
        return expanded;
    }

    let children = config
        .children
        .iter()
        .map(|child| expand(child, partials, chain))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ComponentConfig {
        children,
        ..config.clone()
    })
}
