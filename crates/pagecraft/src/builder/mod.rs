//! Config-to-node resolution.
//!
//! - [`Builder`]: walks a config tree and produces a [`Node`](crate::Node) tree
//! - [`generate_id`]: content-derived ids for anonymous configs
//! - [`compose_props`]: the three-layer prop merge
//! - [`expand_partials`]: eager partial inlining for tooling

#[allow(clippy::module_inception)]
mod builder;
mod id;
mod partials;
pub(crate) mod props;

pub use builder::Builder;
pub use id::generate_id;
pub use partials::expand_partials;
pub use props::{
    class_name, compose_props, DerivedProps, CHILD_PROPS, CLASS_NAME, COMPONENT_ID, CONTEXT,
};
