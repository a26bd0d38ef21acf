//! The process-wide registry.
//!
//! Applications register their components and partials once at startup and
//! then render many pages. [`render`](crate::render()) reads this registry;
//! builds that need isolation (tests, several sites in one process) pass
//! their own [`Registry`] to a [`Renderer`](crate::Renderer) instead.
//!
//! ```rust
//! use pagecraft::{register_component, with_global_registry, ComponentImpl};
//!
//! register_component("Section", ComponentImpl::tag("section"));
//! assert!(with_global_registry(|registry| registry.has_component("Section")));
//! ```

use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;

use super::component::ComponentImpl;
use super::registry::Registry;
use crate::config::ComponentConfig;

static GLOBAL_REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

/// Registers (or replaces) a component in the global registry.
pub fn register_component(component_type: impl Into<String>, component: ComponentImpl) {
    update_global_registry(|registry| registry.register_component(component_type, component));
}

/// Registers (or replaces) a partial in the global registry.
pub fn register_partial(name: impl Into<String>, config: ComponentConfig) {
    update_global_registry(|registry| registry.register_partial(name, config));
}

pub fn register_partials<I, S>(partials: I)
where
    I: IntoIterator<Item = (S, ComponentConfig)>,
    S: Into<String>,
{
    update_global_registry(|registry| registry.register_partials(partials));
}

/// Runs `f` with shared access to the global registry.
pub fn with_global_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    let guard = GLOBAL_REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Runs `f` with exclusive access to the global registry.
pub fn update_global_registry<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut guard = GLOBAL_REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Restores the global registry to its initial state.
pub fn reset_global_registry() {
    update_global_registry(|registry| *registry = Registry::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ERROR_COMPONENT;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_register_and_lookup_component() {
        reset_global_registry();
        register_component("Box", ComponentImpl::tag("div"));
        let found = with_global_registry(|registry| registry.lookup_component("Box"));
        assert_eq!(found, ComponentImpl::tag("div"));
        reset_global_registry();
    }

    #[test]
    #[serial]
    fn test_register_partial_last_write_wins() {
        reset_global_registry();
        register_partial("footer", ComponentConfig::component("A"));
        register_partials([("footer", ComponentConfig::component("B"))]);
        let partial = with_global_registry(|registry| registry.lookup_partial("footer"));
        assert_eq!(partial.component_type.as_deref(), Some("B"));
        reset_global_registry();
    }

    #[test]
    #[serial]
    fn test_reset_keeps_builtins() {
        register_component("Temp", ComponentImpl::tag("span"));
        reset_global_registry();
        with_global_registry(|registry| {
            assert!(!registry.has_component("Temp"));
            assert!(registry.has_component(ERROR_COMPONENT));
        });
    }
}
