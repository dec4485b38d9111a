use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Reference lists for the synthesized `# REFERENCES` block.
/// An absent or empty category renders nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct References {
    #[serde(default)]
    pub professional: Vec<Reference>,
    #[serde(default)]
    pub portfolio: Vec<Reference>,
    #[serde(default)]
    pub academic: Vec<Reference>,
    /// Contacts inside the target company; also feed `{{internal.N.*}}` placeholders.
    #[serde(default)]
    pub internal: Vec<Reference>,
    #[serde(default)]
    pub hide_contact_section: bool,
}

/// A single reference, tagged by the YAML `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reference {
    Person(PersonReference),
    Available {
        #[serde(default)]
        message: Option<String>,
    },
    Page(LinkReference),
    Github(LinkReference),
    /// Any other `type` value. Skipped when rendering.
    #[serde(other)]
    Unsupported,
}

/// Text fields accept any YAML scalar, so `phone: 12345678` reads as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonReference {
    #[serde(deserialize_with = "scalar_text")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub note: Option<String>,
}

impl PersonReference {
    /// Organisation line: the company, or the institution for academic contacts.
    pub fn affiliation(&self) -> Option<&str> {
        self.company.as_deref().or(self.institution.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkReference {
    pub url: String,
    #[serde(deserialize_with = "scalar_text")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub stars: Option<StarCount>,
}

/// Star count as written in the config: `42`, `4.5` or `"1.2k"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StarCount {
    Count(u64),
    Decimal(f64),
    Label(String),
}

impl fmt::Display for StarCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarCount::Count(n) => write!(f, "{n}"),
            StarCount::Decimal(n) => write!(f, "{n}"),
            StarCount::Label(s) => f.write_str(s),
        }
    }
}

/// Any YAML scalar, kept in its written form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(String::from)
}

fn optional_scalar_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_variants_are_tagged_by_type() {
        let yaml = r#"
professional:
  - type: person
    name: Jane Doe
    email: jane@x.com
  - type: available
portfolio:
  - type: github
    url: https://github.com/example/tool
    name: tool
    stars: 120
  - type: page
    url: /projects
    name: Projects
    stars: "1.2k"
academic:
  - type: person
    name: Prof. Smith
    institution: DTU
hideContactSection: true
"#;
        let refs: References = serde_yaml::from_str(yaml).unwrap();

        assert!(refs.hide_contact_section);
        assert!(refs.internal.is_empty());
        match &refs.professional[0] {
            Reference::Person(p) => {
                assert_eq!(p.name, "Jane Doe");
                assert_eq!(p.email.as_deref(), Some("jane@x.com"));
            }
            other => panic!("expected person, got {other:?}"),
        }
        assert_eq!(refs.professional[1], Reference::Available { message: None });
        match &refs.portfolio[0] {
            Reference::Github(link) => {
                assert_eq!(link.stars.as_ref().map(|s| s.to_string()).as_deref(), Some("120"))
            }
            other => panic!("expected github, got {other:?}"),
        }
        match &refs.portfolio[1] {
            Reference::Page(link) => {
                assert_eq!(link.stars, Some(StarCount::Label("1.2k".to_string())))
            }
            other => panic!("expected page, got {other:?}"),
        }
        match &refs.academic[0] {
            Reference::Person(p) => assert_eq!(p.affiliation(), Some("DTU")),
            other => panic!("expected person, got {other:?}"),
        }
    }

    #[test]
    fn test_numeric_scalars_read_as_written() {
        let yaml = r#"
professional:
  - type: person
    name: Jane Doe
    phone: 12345678
    title: 2024
    note: ~
portfolio:
  - type: github
    url: https://github.com/example/tool
    name: 42
    stars: 4.5
"#;
        let refs: References = serde_yaml::from_str(yaml).unwrap();

        match &refs.professional[0] {
            Reference::Person(p) => {
                assert_eq!(p.phone.as_deref(), Some("12345678"));
                assert_eq!(p.title.as_deref(), Some("2024"));
                assert_eq!(p.note, None);
            }
            other => panic!("expected person, got {other:?}"),
        }
        match &refs.portfolio[0] {
            Reference::Github(link) => {
                assert_eq!(link.name, "42");
                assert_eq!(link.stars, Some(StarCount::Decimal(4.5)));
                assert_eq!(link.stars.as_ref().map(|s| s.to_string()).as_deref(), Some("4.5"));
            }
            other => panic!("expected github, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_reference_type_is_tolerated() {
        let yaml = "professional:\n  - type: carrier-pigeon\n";
        let refs: References = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(refs.professional, vec![Reference::Unsupported]);
    }

    #[test]
    fn test_affiliation_prefers_company() {
        let p = PersonReference {
            name: "A".to_string(),
            company: Some("Acme".to_string()),
            institution: Some("MIT".to_string()),
            ..Default::default()
        };
        assert_eq!(p.affiliation(), Some("Acme"));
    }
}
