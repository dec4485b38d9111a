use kuchikiki::NodeRef;
use tracing::debug;

use crate::customize::dom;

/// Removes, for each name, the first section whose heading reads `# <name>`.
/// Matching ignores case and collapses whitespace. Returns the number removed.
pub fn remove_sections(document: &NodeRef, names: &[String]) -> usize {
    let mut removed = 0;

    for name in names {
        let wanted = format!("# {}", name.split_whitespace().collect::<Vec<_>>().join(" "));
        let section = dom::find_heading(document, |text| text.eq_ignore_ascii_case(&wanted))
            .and_then(|heading| dom::closest_section(&heading));

        match section {
            Some(section) => {
                section.detach();
                removed += 1;
            }
            None => debug!("Section '{name}' not found; nothing removed"),
        }
    }
    removed
}
