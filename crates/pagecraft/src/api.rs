//! API data injection for components that declare endpoints.
//!
//! Some components need external data (a post list, the current user) that
//! the page config cannot carry. Such a component lists the endpoints it
//! needs via [`Component::required_endpoints`](crate::Component::required_endpoints);
//! the builder then hands the node's composed props to an
//! [`ApiDataWrapper`], which returns the props the node is built with.
//!
//! Components that declare no endpoints never reach the wrapper.
//!
//! # Example
//!
//! ```rust
//! use pagecraft::api::ApiDataWrapper;
//! use pagecraft::Props;
//! use serde_json::Value;
//!
//! // Closure-based wrapper
//! let wrapper = |mut props: Props, _context: &Value, endpoints: &[String], _ty: &str| {
//!     props.insert("loaded".into(), Value::from(endpoints.len()));
//!     props
//! };
//! let props = wrapper.wrap(Props::new(), &Value::Null, &["posts".to_string()], "PostList");
//! assert_eq!(props["loaded"], 1);
//! ```

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::config::Props;

/// Augments a node's props with data from external endpoints.
///
/// Implementations must not mutate state visible to other builds; the same
/// wrapper serves every node of every page.
///
/// Builds that use the global registry ([`render`](crate::render()),
/// [`build_components_from_theme`](crate::build_components_from_theme) and
/// [`Renderer`](crate::Renderer) without its own registry) hold the
/// registry's read lock while `wrap` runs. A wrapper must not call
/// [`register_component`](crate::register_component) or any other global
/// registration function from `wrap`: it would deadlock.
pub trait ApiDataWrapper: Send + Sync {
    /// Returns the props the node is built with.
    ///
    /// `context` is the node's `context` prop; `endpoints` are the names the
    /// component declared; `component_type` is the registered type name.
    fn wrap(
        &self,
        props: Props,
        context: &Value,
        endpoints: &[String],
        component_type: &str,
    ) -> Props;
}

/// Blanket implementation for closures with the `wrap` signature.
impl<F> ApiDataWrapper for F
where
    F: Fn(Props, &Value, &[String], &str) -> Props + Send + Sync,
{
    fn wrap(
        &self,
        props: Props,
        context: &Value,
        endpoints: &[String],
        component_type: &str,
    ) -> Props {
        (self)(props, context, endpoints, component_type)
    }
}

/// A wrapper that leaves props untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoApi;

impl ApiDataWrapper for NoApi {
    fn wrap(
        &self,
        props: Props,
        _context: &Value,
        _endpoints: &[String],
        _component_type: &str,
    ) -> Props {
        props
    }
}

/// A wrapper serving canned responses, keyed by endpoint name.
///
/// Each declared endpoint with a registered response is inserted into the
/// props under the endpoint's name. Useful for previews and tests where no
/// network is available.
#[derive(Debug, Clone, Default)]
pub struct StaticApi {
    responses: HashMap<String, Value>,
}

impl StaticApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a response. Returns self for chaining.
    pub fn with_response(mut self, endpoint: impl Into<String>, response: Value) -> Self {
        self.responses.insert(endpoint.into(), response);
        self
    }
}

impl ApiDataWrapper for StaticApi {
    fn wrap(
        &self,
        mut props: Props,
        _context: &Value,
        endpoints: &[String],
        component_type: &str,
    ) -> Props {
        for endpoint in endpoints {
            match self.responses.get(endpoint) {
                Some(response) => {
                    props.insert(endpoint.clone(), response.clone());
                }
                None => debug!(endpoint = %endpoint, component_type, "no response for endpoint"),
            }
        }
        props
    }
}
