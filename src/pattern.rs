//! Segment template compilation.
//!
//! A route segment like `b{paramb}` or `d{paramA}part{paramB}extra` mixes
//! literal text with `{name}` placeholders. Each placeholder becomes a named
//! capture group matching greedily within the segment; the compiled matcher
//! is anchored at both ends so a segment must be consumed in full.

use regex::Regex;
use std::collections::HashMap;

/// A compiled segment template.
///
/// Compiled once, at trie-node creation time, and immutable afterwards.
/// There is no escaping mechanism for literal `{` or `}`; a template whose
/// generated expression fails to compile (for example an invalid capture
/// name) yields a matcher that never matches — malformed templates are a
/// caller responsibility, not detected or reported.
#[derive(Debug, Clone)]
pub struct SegmentPattern {
    source: String,
    regex: Option<Regex>,
}

impl SegmentPattern {
    /// Compile a segment template into an anchored whole-segment matcher.
    pub fn compile(template: &str) -> Self {
        let mut expr = String::from("^");
        let mut rest = template;

        while !rest.is_empty() {
            match rest.find('{') {
                None => {
                    expr.push_str(&regex::escape(rest));
                    rest = "";
                }
                Some(open) => {
                    let after = &rest[open + 1..];
                    match after.find('}') {
                        None => {
                            // Unbalanced brace: the remainder is taken literally.
                            expr.push_str(&regex::escape(rest));
                            rest = "";
                        }
                        Some(close) => {
                            expr.push_str(&regex::escape(&rest[..open]));
                            expr.push_str("(?P<");
                            expr.push_str(&after[..close]);
                            expr.push_str(">.*)");
                            rest = &after[close + 1..];
                        }
                    }
                }
            }
        }

        expr.push('$');
        Self {
            source: template.to_string(),
            regex: Regex::new(&expr).ok(),
        }
    }

    /// The raw template this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match a whole segment, returning the captured placeholder values.
    ///
    /// Captures are greedy: with multiple placeholders in one template, each
    /// capture consumes as much text as possible while the remaining literal
    /// text still matches.
    pub fn captures(&self, segment: &str) -> Option<HashMap<String, String>> {
        let regex = self.regex.as_ref()?;
        let caps = regex.captures(segment)?;

        let mut values = HashMap::new();
        for name in regex.capture_names().flatten() {
            if let Some(value) = caps.name(name) {
                values.insert(name.to_string(), value.as_str().to_string());
            }
        }
        Some(values)
    }
}
