use serde::{Deserialize, Serialize};

use crate::models::references::References;

/// One named tailoring record, loaded from `<configs-dir>/<name>.yaml`.
///
/// Every field is optional: a missing key means "leave the template alone".
/// Unknown keys (e.g. the legacy `pdfOptions` block) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeConfig {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub customizations: Option<Customizations>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customizations {
    #[serde(default)]
    pub company_name: Option<String>,
    /// Free-text focus line, interpolated as `{{keySkills}}`.
    #[serde(default)]
    pub key_skills: Option<String>,
    /// Replaces the default objective paragraph. Supports `{{token}}` placeholders.
    #[serde(default)]
    pub custom_objective: Option<String>,
    #[serde(default)]
    pub highlight_skills: Vec<String>,
    #[serde(default)]
    pub emphasize_experience: Vec<ExperienceEmphasis>,
    #[serde(default)]
    pub remove_sections: Vec<String>,
    #[serde(default)]
    pub references: Option<References>,
}

impl Customizations {
    /// True when applying these customizations cannot change the document.
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.highlight_skills.is_empty()
            && self.emphasize_experience.is_empty()
            && self.remove_sections.is_empty()
            && self.references.is_none()
    }
}

/// Terms to emphasise inside the paragraph that follows `company`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEmphasis {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub highlight: Vec<String>,
}
