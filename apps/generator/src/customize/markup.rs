//! HTML snippets inserted by the customizer.
//!
//! Class names follow the template's terminal theme. Every value taken from a
//! configuration is escaped here; callers pass raw strings.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::models::{LinkReference, PersonReference};

pub const EMPHASIS_MARKER: &str = r#"<strong class="text-terminal-yellow"></strong>"#;

pub const REFERENCES_HEADING: &str = "# REFERENCES";

const HEADING_CLASS: &str = "text-lg font-bold text-terminal-cyan leading-snugish";

pub const DEFAULT_PROFESSIONAL_AVAILABLE: &str = "Professional references are available upon request. \
I can provide contacts from current and previous employers, colleagues, and project stakeholders \
who can speak to my technical abilities, work ethic, and collaborative skills.";

pub const DEFAULT_INTERNAL_AVAILABLE: &str =
    "Additional internal contacts are available upon request.";

pub const DEFAULT_ACADEMIC_AVAILABLE: &str = "Academic references are available upon request.";

/// Section placed after the about block. `objective` is plain text.
pub fn objective_section(company: &str, objective: &str) -> String {
    format!(
        r#"<section class="mb-4.5 break-inside-avoid">
  <header>
    <h3 class="{HEADING_CLASS}">Why I'm applying to {}</h3>
  </header>
  <p class="mt-2.1">{}</p>
</section>"#,
        text(company),
        text(objective.trim())
    )
}

/// Outer `# REFERENCES` block wrapping the already-rendered category sections.
pub fn references_block(categories: &str) -> String {
    format!(
        r#"<section class="mt-8 first:mt-0">
  <div class="break-inside-avoid">
    <h2 class="mb-4 font-bold tracking-widest text-sm2 text-terminal-yellow italic print:font-normal">{REFERENCES_HEADING}</h2>
{categories}
  </div>
</section>"#
    )
}

pub fn category_section(title: &str, entries: &str) -> String {
    format!(
        r#"    <section class="mb-4.5 break-inside-avoid">
      <header>
        <h3 class="{HEADING_CLASS}">{}</h3>
      </header>
{entries}
    </section>
"#,
        text(title)
    )
}

pub fn person_entry(person: &PersonReference) -> String {
    let mut lines = vec![format!(
        r#"<strong class="text-terminal-cyan">{}</strong>"#,
        text(&person.name)
    )];
    if let Some(title) = &person.title {
        lines.push(format!("<br />{}", text(title)));
    }
    if let Some(affiliation) = person.affiliation() {
        lines.push(format!("<br />{}", text(affiliation)));
    }
    if let Some(email) = &person.email {
        lines.push(format!("<br />📧 {}", text(email)));
    }
    if let Some(phone) = &person.phone {
        lines.push(format!("<br />📞 {}", text(phone)));
    }
    if let Some(linkedin) = &person.linkedin {
        lines.push(format!(
            r#"<br />🔗 <a href="{}" class="main-link">{}</a>"#,
            attr(linkedin),
            text(linkedin)
        ));
    }

    let note = person
        .note
        .as_deref()
        .map(|n| format!(r#"<p class="text-sm text-gray-600 mt-1">{}</p>"#, text(n)))
        .unwrap_or_default();

    format!(
        r#"      <div class="mt-2.1 mb-3">
        <p class="leading-normal text-md text-terminal-white">{}</p>{note}
      </div>
"#,
        lines.join("\n          ")
    )
}

pub fn available_entry(message: &str) -> String {
    format!(
        "      <p class=\"leading-normal text-md text-terminal-white mt-2.1\">{}</p>\n",
        text(message)
    )
}

/// Portfolio link. GitHub entries get a folder glyph and always open in a new tab.
pub fn link_entry(link: &LinkReference, github: bool) -> String {
    let target = if github || link.url.starts_with("http") {
        r#" target="_blank""#
    } else {
        ""
    };
    let glyph = if github { "📂 " } else { "" };
    let description = link
        .description
        .as_deref()
        .map(|d| format!(" - {}", text(d)))
        .unwrap_or_default();
    let stars = link
        .stars
        .as_ref()
        .map(|s| format!(" (⭐ {} stars)", text(&s.to_string())))
        .unwrap_or_default();

    format!(
        r#"      <div class="mt-2.1">
        <p class="leading-normal text-md main-link">
          <a href="{}" class="group"{target}>{glyph}{}
            <span class="inline-block text-terminal-green print:text-black font-normal">↗</span>
          </a>{description}{stars}
        </p>
      </div>
"#,
        attr(&link.url),
        text(&link.name)
    )
}

pub fn contact_section() -> String {
    format!(
        r#"    <section class="mb-4.5 break-inside-avoid">
      <header>
        <h3 class="{HEADING_CLASS}">Contact for References</h3>
      </header>
      <p class="leading-normal text-md text-terminal-white mt-2.1">
        Please feel free to reach out via email or LinkedIn to request additional references
        tailored to the role and responsibilities you're considering me for.
      </p>
    </section>
"#
    )
}
