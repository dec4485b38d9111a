//! References synthesis: builds the `# REFERENCES` block from the configured
//! categories and puts it where the template expects it.

use kuchikiki::NodeRef;

use crate::customize::{dom, markup};
use crate::models::{Reference, References};

/// Where the synthesized block ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Replaced the template's own references section.
    Replaced,
    /// Inserted before the "Fork this resume at" paragraph.
    BeforeForkLink,
    /// Appended to `<main>`, or `<body>` when there is no `<main>`.
    Appended,
}

const FORK_LINK_PREFIX: &str = "fork this resume at";

/// Which reference kinds a category renders; everything else is skipped.
#[derive(Clone, Copy)]
enum Category {
    Internal,
    Professional,
    Portfolio,
    Academic,
}

impl Category {
    fn available_default(self) -> &'static str {
        match self {
            Category::Internal => markup::DEFAULT_INTERNAL_AVAILABLE,
            Category::Professional => markup::DEFAULT_PROFESSIONAL_AVAILABLE,
            Category::Academic => markup::DEFAULT_ACADEMIC_AVAILABLE,
            Category::Portfolio => "",
        }
    }

    fn render(self, reference: &Reference) -> Option<String> {
        match (self, reference) {
            (Category::Portfolio, Reference::Page(link)) => Some(markup::link_entry(link, false)),
            (Category::Portfolio, Reference::Github(link)) => Some(markup::link_entry(link, true)),
            (Category::Portfolio, _) => None,
            (_, Reference::Person(person)) => Some(markup::person_entry(person)),
            (_, Reference::Available { message }) => Some(markup::available_entry(
                message.as_deref().unwrap_or(self.available_default()),
            )),
            _ => None,
        }
    }
}

/// Renders the full references block. Categories appear as internal,
/// professional, portfolio, academic; empty ones are omitted.
pub fn build_references_html(references: &References, company: Option<&str>) -> String {
    let internal_title = format!("References at {}", company.unwrap_or("the company"));
    let categories = [
        (Category::Internal, internal_title.as_str(), &references.internal),
        (Category::Professional, "Professional References", &references.professional),
        (Category::Portfolio, "Portfolio & Code Samples", &references.portfolio),
        (Category::Academic, "Academic References", &references.academic),
    ];

    let mut inner = String::new();
    for (category, title, entries) in categories {
        if entries.is_empty() {
            continue;
        }
        let rendered: String = entries.iter().filter_map(|r| category.render(r)).collect();
        inner.push_str(&markup::category_section(title, &rendered));
    }

    if !references.hide_contact_section {
        inner.push_str(&markup::contact_section());
    }

    markup::references_block(&inner)
}

/// Replaces the template's references section, or inserts the block before the
/// fork link, or appends it to the main content.
pub fn apply_references(
    document: &NodeRef,
    references: &References,
    company: Option<&str>,
) -> Option<Placement> {
    let block = dom::parse_fragment(&build_references_html(references, company));

    let existing = dom::find_heading(document, |text| {
        text.eq_ignore_ascii_case(markup::REFERENCES_HEADING)
    })
    .and_then(|heading| dom::closest_section(&heading));

    if let Some(section) = existing {
        dom::insert_all_before(&section, block);
        section.detach();
        return Some(Placement::Replaced);
    }

    if let Some(fork) = fork_link_paragraph(document) {
        dom::insert_all_before(&fork, block);
        return Some(Placement::BeforeForkLink);
    }

    let container = document
        .select_first("main")
        .ok()
        .map(|m| m.as_node().clone())
        .or_else(|| dom::body(document))?;
    for node in block {
        container.append(node);
    }
    Some(Placement::Appended)
}

fn fork_link_paragraph(document: &NodeRef) -> Option<NodeRef> {
    document
        .select("p")
        .ok()?
        .map(|p| p.as_node().clone())
        .find(|p| dom::normalized_text(p).to_lowercase().starts_with(FORK_LINK_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinkReference, PersonReference};

    fn jane() -> Reference {
        Reference::Person(PersonReference {
            name: "Jane Doe".to_string(),
            email: Some("jane@x.com".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_professional_person_with_contact_paragraph() {
        let refs = References {
            professional: vec![jane()],
            ..Default::default()
        };
        let html = build_references_html(&refs, None);
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("jane@x.com"));
        assert!(html.contains("Professional References"));
        assert!(html.contains("Contact for References"));
        assert!(!html.contains("Portfolio &amp; Code Samples"));
        assert!(!html.contains("Academic References"));
    }

    #[test]
    fn test_hidden_contact_paragraph() {
        let refs = References {
            professional: vec![jane()],
            hide_contact_section: true,
            ..Default::default()
        };
        let html = build_references_html(&refs, None);
        assert!(html.contains("Jane Doe"));
        assert!(!html.contains("Contact for References"));
    }

    #[test]
    fn test_no_categories_still_offers_contact() {
        let html = build_references_html(&References::default(), None);
        assert!(html.contains("# REFERENCES"));
        assert!(html.contains("Contact for References"));
    }

    #[test]
    fn test_category_order_and_available_defaults() {
        let refs = References {
            academic: vec![Reference::Available { message: None }],
            portfolio: vec![
                Reference::Github(LinkReference {
                    url: "https://github.com/example/tool".to_string(),
                    name: "tool".to_string(),
                    ..Default::default()
                }),
                jane(),
            ],
            professional: vec![Reference::Available {
                message: Some("Ask me.".to_string()),
            }],
            internal: vec![Reference::Unsupported, jane()],
            hide_contact_section: true,
        };
        let html = build_references_html(&refs, Some("LEGO Group"));

        let internal = html.find("References at LEGO Group").unwrap();
        let professional = html.find("Professional References").unwrap();
        let portfolio = html.find("Portfolio &amp; Code Samples").unwrap();
        let academic = html.find("Academic References").unwrap();
        assert!(internal < professional && professional < portfolio && portfolio < academic);

        assert!(html.contains("Ask me."));
        assert!(html.contains(markup::DEFAULT_ACADEMIC_AVAILABLE));
        assert_eq!(html.matches("Jane Doe").count(), 1, "people are skipped in portfolio");
    }

    const WITH_SECTION: &str = r#"<body><main>
<section id="skills"><div><h2># SKILLS</h2></div></section>
<section id="refs"><div><h2># REFERENCES</h2><p>Available on request.</p></div></section>
<p>Fork this resume at <a href="https://github.com/x">GitHub</a></p>
</main></body>"#;

    #[test]
    fn test_replaces_existing_section() {
        let doc = dom::parse_document(WITH_SECTION);
        let refs = References {
            professional: vec![jane()],
            ..Default::default()
        };
        assert_eq!(apply_references(&doc, &refs, None), Some(Placement::Replaced));

        let html = dom::serialize(&doc);
        assert!(!html.contains("Available on request."));
        assert!(!html.contains("id=\"refs\""));
        assert_eq!(html.matches("# REFERENCES").count(), 1);
        assert!(html.find("Jane Doe").unwrap() < html.find("Fork this resume").unwrap());
    }

    #[test]
    fn test_inserts_before_fork_link_when_missing() {
        let doc = dom::parse_document(WITH_SECTION);
        crate::customize::sections::remove_sections(&doc, &["REFERENCES".to_string()]);

        let placement = apply_references(&doc, &References::default(), None);
        assert_eq!(placement, Some(Placement::BeforeForkLink));

        let html = dom::serialize(&doc);
        let block = html.find("# REFERENCES").unwrap();
        assert!(html.find("# SKILLS").unwrap() < block);
        assert!(block < html.find("Fork this resume").unwrap());
    }

    #[test]
    fn test_appends_without_anchor() {
        let doc = dom::parse_document("<body><p>Only text</p></body>");
        let placement = apply_references(&doc, &References::default(), None);
        assert_eq!(placement, Some(Placement::Appended));
        let html = dom::serialize(&doc);
        assert!(html.find("Only text").unwrap() < html.find("# REFERENCES").unwrap());
    }
}
