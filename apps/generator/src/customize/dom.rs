//! Thin helpers over the kuchikiki (html5ever) tree used by the customizer.

use kuchikiki::traits::*;
use kuchikiki::NodeRef;

/// Text under these elements is never rewritten.
const INERT_TEXT_PARENTS: &[&str] = &["head", "script", "style", "noscript", "textarea", "title"];

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

pub fn parse_document(html: &str) -> NodeRef {
    kuchikiki::parse_html().one(html)
}

pub fn serialize(document: &NodeRef) -> String {
    document.to_string()
}

/// Parses an HTML snippet in body context and returns its detached top-level nodes.
pub fn parse_fragment(html: &str) -> Vec<NodeRef> {
    let wrapper = kuchikiki::parse_html().one(format!(
        "<!DOCTYPE html><html><head></head><body>{html}</body></html>"
    ));
    let Ok(body) = wrapper.select_first("body") else {
        return Vec::new();
    };

    let nodes: Vec<NodeRef> = body.as_node().children().collect();
    for node in &nodes {
        node.detach();
    }
    nodes
}

pub fn body(document: &NodeRef) -> Option<NodeRef> {
    document
        .select_first("body")
        .ok()
        .map(|b| b.as_node().clone())
}

pub fn is_element(node: &NodeRef, local_name: &str) -> bool {
    node.as_element()
        .is_some_and(|e| e.name.local.as_ref().eq_ignore_ascii_case(local_name))
}

/// Text content with whitespace runs collapsed to single spaces.
pub fn normalized_text(node: &NodeRef) -> String {
    node.text_contents()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First heading (h1–h6) in document order whose normalized text satisfies `matches`.
pub fn find_heading(document: &NodeRef, matches: impl Fn(&str) -> bool) -> Option<NodeRef> {
    document
        .select(HEADING_SELECTOR)
        .ok()?
        .map(|h| h.as_node().clone())
        .find(|h| matches(&normalized_text(h)))
}

/// Nearest enclosing `<section>`, excluding the node itself.
pub fn closest_section(node: &NodeRef) -> Option<NodeRef> {
    node.ancestors().find(|a| is_element(a, "section"))
}

/// True for text nodes that render as visible body text.
pub fn is_visible_text(node: &NodeRef) -> bool {
    node.as_text().is_some()
        && !node.ancestors().any(|a| {
            a.as_element().is_some_and(|e| {
                INERT_TEXT_PARENTS
                    .iter()
                    .any(|inert| e.name.local.as_ref().eq_ignore_ascii_case(inert))
            })
        })
}

/// Inserts `nodes` directly after `anchor`, keeping their order.
pub fn insert_all_after(anchor: &NodeRef, nodes: Vec<NodeRef>) {
    let mut cursor = anchor.clone();
    for node in nodes {
        cursor.insert_after(node.clone());
        cursor = node;
    }
}

/// Inserts `nodes` directly before `anchor`, keeping their order.
pub fn insert_all_before(anchor: &NodeRef, nodes: Vec<NodeRef>) {
    for node in nodes {
        anchor.insert_before(node);
    }
}
