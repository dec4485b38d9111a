//! Content Customizer — tailors the base résumé for one application.
//!
//! Flow: parse → remove sections → emphasis (skills + experience) →
//!       objective → references → serialize.
//!
//! Runs once per generation against a parsed tree. The served page is the
//! output of this module; the browser never rewrites content.

pub mod dom;
pub mod emphasis;
pub mod markup;
pub mod objective;
pub mod references;
pub mod sections;

use crate::models::ResumeConfig;

pub use references::Placement;

/// What a customization pass actually changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomizationReport {
    pub sections_removed: usize,
    pub terms_emphasized: usize,
    pub objective_inserted: bool,
    pub references: Option<Placement>,
}

#[derive(Debug, Clone)]
pub struct TailoredDocument {
    pub html: String,
    pub report: CustomizationReport,
}

/// Applies the configuration's customizations to `template`.
///
/// Never fails: anything that does not match the template is skipped. With no
/// (or empty) customizations the template comes back byte-for-byte.
pub fn customize(template: &str, config: &ResumeConfig) -> TailoredDocument {
    let Some(c) = config.customizations.as_ref().filter(|c| !c.is_empty()) else {
        return TailoredDocument {
            html: template.to_string(),
            report: CustomizationReport::default(),
        };
    };

    let document = dom::parse_document(template);
    let job_title = config.job_title.as_deref();

    let sections_removed = sections::remove_sections(&document, &c.remove_sections);
    let terms_emphasized =
        emphasis::apply_emphasis(&document, &c.highlight_skills, &c.emphasize_experience);
    let objective_inserted = objective::inject_objective(&document, job_title, c);
    let references = c.references.as_ref().and_then(|refs| {
        references::apply_references(&document, refs, c.company_name.as_deref())
    });

    TailoredDocument {
        html: dom::serialize(&document),
        report: CustomizationReport {
            sections_removed,
            terms_emphasized,
            objective_inserted,
            references,
        },
    }
}
