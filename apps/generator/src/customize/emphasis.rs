//! Skill and experience emphasis.
//!
//! One pass builds a single matcher per scope (global skills, or skills plus the
//! terms of one experience paragraph) and wraps every match in the emphasis
//! marker. Matches are leftmost, longest term first and never overlap, so each
//! occurrence is wrapped at most once per pass. Text that is already emphasised
//! is still text, so a second pass nests a new marker inside the old one.

use std::ops::Range;

use kuchikiki::traits::*;
use kuchikiki::NodeRef;
use regex::Regex;
use tracing::{debug, warn};

use crate::customize::dom;
use crate::customize::markup::EMPHASIS_MARKER;
use crate::models::ExperienceEmphasis;

/// Case-insensitive literal matcher over a set of terms.
pub struct TermMatcher {
    regex: Regex,
}

impl TermMatcher {
    /// Builds a matcher, or `None` when no usable term remains.
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Option<Self> {
        let mut cleaned: Vec<&str> = terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .collect();
        if cleaned.is_empty() {
            return None;
        }

        // Longest first so alternation prefers "cloud infrastructure" over "cloud".
        cleaned.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        });
        cleaned.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        let alternation = cleaned
            .iter()
            .map(|term| bounded(term))
            .collect::<Vec<_>>()
            .join("|");

        match Regex::new(&format!("(?i)(?:{alternation})")) {
            Ok(regex) => Some(Self { regex }),
            Err(e) => {
                warn!("Skipping emphasis terms, matcher could not be built: {e}");
                None
            }
        }
    }

    pub fn find_spans(&self, haystack: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(haystack).map(|m| m.range()).collect()
    }
}

/// Escaped term with a word boundary on each edge that is itself a word character,
/// so `API` skips `RAPID` while `C++` still matches before a space.
fn bounded(term: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let prefix = if is_word(term.chars().next()) { r"\b" } else { "" };
    let suffix = if is_word(term.chars().last()) { r"\b" } else { "" };
    format!("{prefix}{}{suffix}", regex::escape(term))
}

/// Wraps skill occurrences across the body and experience terms inside the
/// paragraph that follows each company name. Returns the number of wraps.
pub fn apply_emphasis(
    document: &NodeRef,
    skills: &[String],
    experience: &[ExperienceEmphasis],
) -> usize {
    let Some(body) = dom::body(document) else {
        return 0;
    };

    let scopes = experience_scopes(&body, skills, experience);
    let global = TermMatcher::new(skills);
    if global.is_none() && scopes.is_empty() {
        return 0;
    }

    // Collect first: wrapping replaces the nodes being walked.
    let text_nodes: Vec<NodeRef> = body
        .descendants()
        .text_nodes()
        .map(|t| t.as_node().clone())
        .filter(dom::is_visible_text)
        .collect();

    let mut wrapped = 0;
    for node in text_nodes {
        let scoped = scopes
            .iter()
            .find(|(paragraph, _)| node.ancestors().any(|a| a == *paragraph))
            .map(|(_, matcher)| matcher);

        if let Some(matcher) = scoped.or(global.as_ref()) {
            wrapped += wrap_matches(&node, matcher);
        }
    }
    wrapped
}

/// Target paragraph and merged matcher for each usable experience entry.
fn experience_scopes(
    body: &NodeRef,
    skills: &[String],
    experience: &[ExperienceEmphasis],
) -> Vec<(NodeRef, TermMatcher)> {
    let mut per_paragraph: Vec<(NodeRef, Vec<String>)> = Vec::new();

    for entry in experience {
        if entry.company.trim().is_empty() || entry.highlight.is_empty() {
            continue;
        }
        let Some(paragraph) = paragraph_after(body, &entry.company) else {
            debug!("No paragraph follows company '{}'", entry.company);
            continue;
        };

        match per_paragraph.iter_mut().find(|(p, _)| *p == paragraph) {
            Some((_, terms)) => terms.extend(entry.highlight.iter().cloned()),
            None => per_paragraph.push((paragraph, entry.highlight.clone())),
        }
    }

    per_paragraph
        .into_iter()
        .filter_map(|(paragraph, mut terms)| {
            terms.extend(skills.iter().cloned());
            TermMatcher::new(&terms).map(|m| (paragraph, m))
        })
        .collect()
}

/// First `<p>` after the first visible mention of `company`, in document order.
fn paragraph_after(body: &NodeRef, company: &str) -> Option<NodeRef> {
    let needle = company.trim().to_lowercase();
    let mut seen = false;

    for node in body.inclusive_descendants() {
        if !seen {
            let mentions = node
                .as_text()
                .is_some_and(|t| t.borrow().to_lowercase().contains(&needle));
            seen = mentions && dom::is_visible_text(&node);
        } else if dom::is_element(&node, "p") {
            return Some(node);
        }
    }
    None
}

/// Splits one text node around its matches. Returns the number of wraps.
fn wrap_matches(node: &NodeRef, matcher: &TermMatcher) -> usize {
    let Some(content) = node.as_text().map(|t| t.borrow().clone()) else {
        return 0;
    };
    let spans = matcher.find_spans(&content);
    if spans.is_empty() {
        return 0;
    }

    let mut cursor = 0;
    for span in &spans {
        if span.start > cursor {
            node.insert_before(NodeRef::new_text(&content[cursor..span.start]));
        }
        node.insert_before(marker(&content[span.clone()]));
        cursor = span.end;
    }
    if cursor < content.len() {
        node.insert_before(NodeRef::new_text(&content[cursor..]));
    }
    node.detach();

    spans.len()
}

fn marker(matched: &str) -> NodeRef {
    match dom::parse_fragment(EMPHASIS_MARKER).into_iter().next() {
        Some(strong) => {
            strong.append(NodeRef::new_text(matched));
            strong
        }
        None => NodeRef::new_text(matched),
    }
}
