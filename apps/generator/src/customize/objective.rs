//! Objective injection: a "Why I'm applying" section after the about block.

use kuchikiki::NodeRef;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::customize::{dom, markup};
use crate::models::{Customizations, Reference};

pub const DEFAULT_OBJECTIVE: &str = "I'm excited about the {{jobTitle}} role at {{companyName}}. \
I'd love to bring my experience with {{keySkills}} to help tackle challenges and contribute to \
the team's success.";

pub const DEFAULT_JOB_TITLE: &str = "Software Engineer";

pub const DEFAULT_KEY_SKILLS: &str = "cloud infrastructure, full-stack development, and DevOps";

/// Heading prefix that marks the about block.
const ABOUT_HEADING_PREFIX: &str = "# about";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("placeholder pattern is valid"));

/// Fills `{{token}}` placeholders. Unknown tokens are left as written.
///
/// Known tokens: `jobTitle`, `companyName`, `keySkills` and
/// `internal.<i>.name|title|company` from the internal reference list.
pub fn interpolate(
    template: &str,
    job_title: Option<&str>,
    company: &str,
    key_skills: Option<&str>,
    internal: &[Reference],
) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let token = &caps[1];
            let value = match token {
                "jobTitle" => Some(job_title.unwrap_or(DEFAULT_JOB_TITLE).to_string()),
                "companyName" => Some(company.to_string()),
                "keySkills" => Some(key_skills.unwrap_or(DEFAULT_KEY_SKILLS).to_string()),
                _ => internal_field(token, internal),
            };
            value.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolves `internal.<i>.<field>`. An index past the list stays unresolved;
/// a missing field or a non-person entry resolves to the empty string.
fn internal_field(token: &str, internal: &[Reference]) -> Option<String> {
    let mut parts = token.split('.');
    let (Some("internal"), Some(index), Some(field), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let entry = internal.get(index.parse::<usize>().ok()?)?;

    let person = match entry {
        Reference::Person(p) => p,
        _ => return Some(String::new()),
    };
    let value = match field {
        "name" => Some(person.name.as_str()),
        "title" => person.title.as_deref(),
        "company" => person.company.as_deref(),
        _ => return None,
    };
    Some(value.unwrap_or_default().to_string())
}

/// Inserts the objective section after the section holding the about heading.
/// Returns false (and leaves the document alone) when there is no anchor.
pub fn inject_objective(
    document: &NodeRef,
    job_title: Option<&str>,
    customizations: &Customizations,
) -> bool {
    let Some(company) = customizations.company_name.as_deref() else {
        return false;
    };

    let Some(anchor) = dom::find_heading(document, |text| {
        text.to_lowercase().starts_with(ABOUT_HEADING_PREFIX)
    })
    .and_then(|heading| dom::closest_section(&heading)) else {
        debug!("No about section found; objective not inserted");
        return false;
    };

    let internal = customizations
        .references
        .as_ref()
        .map(|r| r.internal.as_slice())
        .unwrap_or_default();
    let objective = interpolate(
        customizations
            .custom_objective
            .as_deref()
            .unwrap_or(DEFAULT_OBJECTIVE),
        job_title,
        company,
        customizations.key_skills.as_deref(),
        internal,
    );

    dom::insert_all_after(
        &anchor,
        dom::parse_fragment(&markup::objective_section(company, &objective)),
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonReference, References};

    fn jane() -> Reference {
        Reference::Person(PersonReference {
            name: "Jane Doe".to_string(),
            title: Some("Staff Engineer".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_default_objective_uses_fallbacks() {
        let text = interpolate(DEFAULT_OBJECTIVE, None, "LEGO Group", None, &[]);
        assert!(text.contains("the Software Engineer role at LEGO Group"));
        assert!(text.contains(DEFAULT_KEY_SKILLS));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_placeholders_allow_inner_whitespace() {
        let text = interpolate("{{ jobTitle }} at {{companyName  }}", Some("SRE"), "Acme", None, &[]);
        assert_eq!(text, "SRE at Acme");
    }

    #[test]
    fn test_internal_reference_placeholders() {
        let internal = vec![jane(), Reference::Available { message: None }];
        let text = interpolate(
            "{{internal.0.name}} ({{internal.0.title}}{{internal.0.company}}) {{internal.1.name}}|{{internal.5.name}}",
            None,
            "Acme",
            None,
            &internal,
        );
        assert_eq!(text, "Jane Doe (Staff Engineer) |{{internal.5.name}}");
    }

    #[test]
    fn test_unknown_tokens_left_alone() {
        let text = interpolate("{{salary}} {{internal.0.shoeSize}}", None, "Acme", None, &[jane()]);
        assert_eq!(text, "{{salary}} {{internal.0.shoeSize}}");
    }

    const TEMPLATE: &str = r#"<body><main>
<section id="about"><div><h2># ABOUT ME</h2><section><p>Hi</p></section></div></section>
<section id="experience"><div><h2># EXPERIENCE</h2></div></section>
</main></body>"#;

    #[test]
    fn test_objective_inserted_after_about_section() {
        let doc = dom::parse_document(TEMPLATE);
        let c = Customizations {
            company_name: Some("LEGO Group".to_string()),
            custom_objective: Some("Join {{companyName}} with {{internal.0.name}}".to_string()),
            references: Some(References {
                internal: vec![jane()],
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(inject_objective(&doc, Some("Cloud Engineer"), &c));
        let html = dom::serialize(&doc);

        let about = html.find("id=\"about\"").unwrap();
        let objective = html.find("Why I'm applying to LEGO Group").unwrap();
        let experience = html.find("id=\"experience\"").unwrap();
        assert!(about < objective && objective < experience);
        assert!(html.contains("Join LEGO Group with Jane Doe"));
    }

    #[test]
    fn test_no_company_or_no_anchor_is_a_no_op() {
        let doc = dom::parse_document(TEMPLATE);
        assert!(!inject_objective(&doc, None, &Customizations::default()));

        let doc = dom::parse_document("<body><p>No headings</p></body>");
        let c = Customizations {
            company_name: Some("Acme".to_string()),
            ..Default::default()
        };
        assert!(!inject_objective(&doc, None, &c));
        assert!(!dom::serialize(&doc).contains("Why I'm applying"));
    }
}
