//! Component and partial registration.
//!
//! - [`ComponentImpl`]: the closed set of implementations a type name can
//!   map to (function, stateful, tag, markup, plus the `NotFound` sentinel).
//! - [`PropsFromParent`]: a wrapper filling unset props from the parent node.
//! - [`Registry`]: an explicit registry instance.
//! - The global functions ([`register_component`], [`register_partial`], ...)
//!   operate on the process-wide registry used by [`render`](crate::render()).

mod component;
mod global;
mod parent;
#[allow(clippy::module_inception)]
mod registry;

pub use component::{Component, ComponentImpl, ComponentInfo, EditableProp, RenderFn};
pub use global::{
    register_component, register_partial, register_partials, reset_global_registry,
    update_global_registry, with_global_registry,
};
pub use parent::{ParentPropsFn, PropsFromParent};
pub use registry::{
    error_config, missing_partial_config, ComponentSummary, Registry, ERROR_COMPONENT,
};
