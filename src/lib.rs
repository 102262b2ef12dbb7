//! # branch-router
//!
//! Segment-trie URL route matching with `{name}` path captures.
//!
//! Routes are registered as `/`-separated templates whose segments are
//! literal text, optionally mixing in `{name}` placeholders; lookups walk a
//! trie one path segment per level, capturing placeholder values along the
//! way and resolving the handler by method with an [`ANY`] wildcard
//! fallback.
//!
//! ```
//! use branch_router::Router;
//!
//! let mut router = Router::new();
//! router.add("/users/{id}/posts", "GET", "list-posts");
//!
//! let found = router.lookup("/users/42/posts?page=2", "GET");
//! assert!(found.found_route);
//! assert_eq!(found.handler, Some(&"list-posts"));
//! assert_eq!(found.params.url["id"], "42");
//! assert_eq!(found.params.get["page"], "2");
//! ```
//!
//! The router stores handlers, it never invokes them; there is no listener,
//! no request type, and no transport here. Registration and lookup are
//! separate phases: build the table first, then share the router freely —
//! lookups take `&self`.
//!
//! Known limitation: the bare root path `/` cannot be registered or matched;
//! both sides treat it as a silent miss.

pub mod pattern;
pub mod router;
pub mod tree;

pub use pattern::SegmentPattern;
pub use router::{Params, RouteResolution, Router, ANY};
pub use tree::{Node, NodeMatch};
