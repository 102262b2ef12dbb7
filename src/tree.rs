//! The segment trie.
//!
//! Each node holds its children partitioned into literal segments (exact
//! string match) and pattern segments (compiled `{name}` templates), plus a
//! map from HTTP method name to handler. Ownership is strictly tree-shaped:
//! a parent owns its children outright and the structure is acyclic by
//! construction.
//!
//! The trie is mutable while routes are registered and read-only afterwards;
//! callers must finish all [`Node::add`] calls before issuing lookups.
//! Lookups take `&self` and are safe to run concurrently once registration
//! is done.

use crate::pattern::SegmentPattern;
use std::collections::HashMap;

/// A single trie node.
///
/// The type parameter `H` is the opaque handler slot: the trie only stores
/// and returns handlers, never invokes them.
#[derive(Debug)]
pub struct Node<H> {
    literal: HashMap<String, Node<H>>,
    /// Pattern children keyed by raw template text, in registration order.
    /// Precedence among pattern siblings is order-dependent, so this stays a
    /// vector rather than a map.
    patterns: Vec<(String, Node<H>)>,
    handlers: HashMap<String, H>,
    /// Present on nodes created as pattern children; compiled once here.
    matcher: Option<SegmentPattern>,
}

/// Outcome of a trie walk.
///
/// `exact` is true iff every input segment advanced the pointer. `node` is
/// the furthest node reached — the node the walk started from if the very
/// first segment failed. `params` holds whatever was captured, even when the
/// match is not exact.
#[derive(Debug)]
pub struct NodeMatch<'a, H> {
    pub exact: bool,
    pub params: HashMap<String, String>,
    pub node: &'a Node<H>,
}

impl<H> Node<H> {
    pub fn new() -> Self {
        Self {
            literal: HashMap::new(),
            patterns: Vec::new(),
            handlers: HashMap::new(),
            matcher: None,
        }
    }

    fn with_pattern(template: &str) -> Self {
        Self {
            matcher: Some(SegmentPattern::compile(template)),
            ..Self::new()
        }
    }

    /// Register a handler at the end of a segment chain, creating nodes as
    /// needed.
    ///
    /// A segment containing `{` is treated as a pattern template and keyed by
    /// its raw text — two templates that would match the same strings are
    /// still distinct children. Registering the same chain and method again
    /// silently replaces the previous handler; handlers for other methods on
    /// the same node are untouched.
    pub fn add(&mut self, segments: &[&str], method: &str, handler: H) {
        let mut node = self;
        for &segment in segments {
            node = node.child_mut(segment);
        }
        node.handlers.insert(method.to_string(), handler);
    }

    /// The child for one route segment, created if absent.
    fn child_mut(&mut self, segment: &str) -> &mut Node<H> {
        if !segment.contains('{') {
            self.literal
                .entry(segment.to_string())
                .or_insert_with(Node::new)
        } else {
            let index = match self.patterns.iter().position(|(key, _)| key == segment) {
                Some(index) => index,
                None => {
                    self.patterns
                        .push((segment.to_string(), Node::with_pattern(segment)));
                    self.patterns.len() - 1
                }
            };
            &mut self.patterns[index].1
        }
    }

    /// Walk the trie consuming one input segment per level.
    ///
    /// For each segment a literal child is tried first, then pattern children
    /// in registration order; the first pattern that matches wins and its
    /// captures are merged into the accumulator (a name already present is
    /// overwritten). When no child matches, the pointer does not advance —
    /// but the walk does not stop: every remaining segment is still tested
    /// against the children of the node where the stall occurred. This stall
    /// behavior is part of the matching contract and is preserved exactly.
    pub fn lookup(&self, segments: &[&str]) -> NodeMatch<'_, H> {
        let mut node = self;
        let mut params = HashMap::new();
        let mut advanced = 0;

        for &segment in segments {
            let mut next = node.literal.get(segment);
            if next.is_none() {
                for (_, child) in &node.patterns {
                    let captured = child
                        .matcher
                        .as_ref()
                        .and_then(|matcher| matcher.captures(segment));
                    if let Some(captured) = captured {
                        params.extend(captured);
                        next = Some(child);
                        break;
                    }
                }
            }
            if let Some(child) = next {
                node = child;
                advanced += 1;
            }
        }

        NodeMatch {
            exact: advanced == segments.len(),
            params,
            node,
        }
    }

    /// The handler registered under `method` at this node, if any.
    pub fn handler(&self, method: &str) -> Option<&H> {
        self.handlers.get(method)
    }
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_chain_exact_match() {
        let mut root = Node::new();
        root.add(&["handler", "stringa"], "GET", 1);

        let found = root.lookup(&["handler", "stringa"]);
        assert!(found.exact);
        assert_eq!(found.node.handler("GET"), Some(&1));
        assert!(found.params.is_empty());
    }

    #[test]
    fn test_literal_child_beats_pattern_child() {
        let mut root = Node::new();
        root.add(&["{anything}"], "GET", 1);
        root.add(&["exact"], "GET", 2);

        let found = root.lookup(&["exact"]);
        assert!(found.exact);
        assert_eq!(found.node.handler("GET"), Some(&2));
        assert!(found.params.is_empty());
    }

    #[test]
    fn test_pattern_children_tried_in_registration_order() {
        let mut root = Node::new();
        root.add(&["a{first}"], "GET", 1);
        root.add(&["{second}"], "GET", 2);

        // Both templates match "abc"; the one registered first wins.
        let found = root.lookup(&["abc"]);
        assert!(found.exact);
        assert_eq!(found.node.handler("GET"), Some(&1));
        assert_eq!(found.params.get("first"), Some(&"bc".to_string()));
    }

    #[test]
    fn test_same_raw_template_reuses_child() {
        let mut root = Node::new();
        root.add(&["c{paramc}", "stringc"], "GET", 1);
        root.add(&["c{paramc}", "stringd"], "GET", 2);

        assert_eq!(root.lookup(&["cabc", "stringc"]).node.handler("GET"), Some(&1));
        assert_eq!(root.lookup(&["cabc", "stringd"]).node.handler("GET"), Some(&2));
    }

    #[test]
    fn test_distinct_templates_are_distinct_children() {
        let mut root = Node::new();
        root.add(&["{a}"], "GET", 1);
        root.add(&["{b}"], "GET", 2);

        // Both match any segment; registration order decides.
        let found = root.lookup(&["xyz"]);
        assert_eq!(found.node.handler("GET"), Some(&1));
        assert_eq!(found.params.get("a"), Some(&"xyz".to_string()));
        assert_eq!(found.params.get("b"), None);
    }

    #[test]
    fn test_same_method_overwrites_handler() {
        let mut root = Node::new();
        root.add(&["path"], "GET", 1);
        root.add(&["path"], "GET", 2);
        root.add(&["path"], "POST", 3);

        let found = root.lookup(&["path"]);
        assert_eq!(found.node.handler("GET"), Some(&2));
        assert_eq!(found.node.handler("POST"), Some(&3));
    }

    #[test]
    fn test_stall_keeps_pointer_and_partial_params() {
        let mut root = Node::new();
        root.add(&["users", "{id}", "posts"], "GET", 1);

        // "xxx" does not match any child of the "{id}" node, so the pointer
        // freezes there; "posts" is then tested against the frozen node and
        // does advance.
        let found = root.lookup(&["users", "42", "xxx", "posts"]);
        assert!(!found.exact);
        assert_eq!(found.params.get("id"), Some(&"42".to_string()));
        assert_eq!(found.node.handler("GET"), Some(&1));
    }

    #[test]
    fn test_first_segment_stall_returns_root() {
        let mut root = Node::new();
        root.add(&["known"], "GET", 1);

        let found = root.lookup(&["unknown"]);
        assert!(!found.exact);
        assert!(found.params.is_empty());
        assert!(found.node.handler("GET").is_none());
    }

    #[test]
    fn test_later_capture_overwrites_earlier_name() {
        let mut root = Node::new();
        root.add(&["{id}", "{id}"], "GET", 1);

        let found = root.lookup(&["first", "second"]);
        assert!(found.exact);
        assert_eq!(found.params.get("id"), Some(&"second".to_string()));
    }

    #[test]
    fn test_empty_input_is_exact_at_root() {
        let root: Node<u8> = Node::new();
        let found = root.lookup(&[]);
        assert!(found.exact);
        assert!(found.params.is_empty());
    }
}
