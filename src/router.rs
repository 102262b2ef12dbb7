//! The router facade.
//!
//! Normalizes route strings and request URIs (query splitting, trailing
//! slash trimming, segment splitting), delegates matching to the segment
//! trie, and resolves the handler with exact-method-then-[`ANY`] fallback.

use crate::tree::Node;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// The wildcard method: a handler registered under `ANY` is served for any
/// requested method that has no exact-method handler at the matched node.
pub const ANY: &str = "ANY";

/// Parameters carried by a lookup result, split by origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Params {
    /// Values captured from `{name}` placeholders in the matched path.
    pub url: HashMap<String, String>,
    /// Values decoded from the query string.
    pub get: HashMap<String, String>,
}

/// Outcome of a [`Router::lookup`] call.
///
/// `found_route` reflects whether every path segment matched; the handler
/// can still be absent on a found route when neither the requested method
/// nor [`ANY`] is registered at the matched node. `params.url` holds
/// whatever was captured even when the route was not found.
#[derive(Debug)]
pub struct RouteResolution<'a, H> {
    pub handler: Option<&'a H>,
    pub params: Params,
    pub found_route: bool,
}

/// URL router backed by a segment trie.
///
/// `H` is the opaque handler type: the router stores handlers at
/// registration and returns references to them from lookups, nothing more.
///
/// The route table is built by a registration phase and read afterwards:
/// finish all [`add`](Router::add) calls before the first
/// [`lookup`](Router::lookup). Lookups take `&self` and may run concurrently
/// once registration is done; concurrent registration must be serialized by
/// the caller.
#[derive(Debug)]
pub struct Router<H> {
    tree: Node<H>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self { tree: Node::new() }
    }

    /// Register a handler for a route and method.
    ///
    /// `route` is `/`-separated with a leading `/`; each segment is literal
    /// text, optionally mixing in `{name}` placeholders. One trailing `/` is
    /// ignored. Registering the bare root `"/"` (or an empty route) is a
    /// silent no-op — the engine cannot route the root path. Registering the
    /// same route and method again replaces the earlier handler.
    pub fn add(&mut self, route: &str, method: &str, handler: H) {
        let path = route.strip_suffix('/').unwrap_or(route);
        if path.is_empty() {
            debug!(route, "ignoring unroutable root registration");
            return;
        }
        let path = path.strip_prefix('/').unwrap_or(path);
        let segments: Vec<&str> = path.split('/').collect();
        debug!(route, method, "registering route");
        self.tree.add(&segments, method, handler);
    }

    /// Match a request URI and method against the registered routes.
    ///
    /// `uri` may carry a `?`-prefixed query component; it is split off and
    /// decoded into `params.get` independently of path matching. One
    /// trailing `/` is trimmed from the path. The handler is resolved from
    /// the matched node, preferring the exact method and falling back to
    /// [`ANY`].
    pub fn lookup(&self, uri: &str, method: &str) -> RouteResolution<'_, H> {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (uri, None),
        };
        let get = query.map(decode_query).unwrap_or_default();

        let path = path.strip_suffix('/').unwrap_or(path);
        if path.is_empty() {
            trace!(uri, method, "lookup on unroutable root path");
            return RouteResolution {
                handler: None,
                params: Params {
                    url: HashMap::new(),
                    get,
                },
                found_route: false,
            };
        }

        let path = path.strip_prefix('/').unwrap_or(path);
        let segments: Vec<&str> = path.split('/').collect();
        let found = self.tree.lookup(&segments);

        let handler = found
            .node
            .handler(method)
            .or_else(|| found.node.handler(ANY));
        trace!(
            uri,
            method,
            found_route = found.exact,
            has_handler = handler.is_some(),
            "lookup"
        );

        RouteResolution {
            handler,
            params: Params {
                url: found.params,
                get,
            },
            found_route: found.exact,
        }
    }
}

/// Query-string decoding collaborator: raw query substring (no leading `?`)
/// in, flat name→value map out. Undecodable input yields an empty map;
/// duplicate keys resolve to the last value.
fn decode_query(query: &str) -> HashMap<String, String> {
    serde_urlencoded::from_str(query).unwrap_or_default()
}
