use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BuilderError;
use crate::models::collections::Identified;

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Repeated entries
// ────────────────────────────────────────────────────────────────────────────

/// A work history entry. An empty `end_date` means the position is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

impl Experience {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            company: String::new(),
            position: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

impl Education {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            school: String::new(),
            degree: String::new(),
            field_of_study: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }
}

impl Default for Education {
    fn default() -> Self {
        Self::new()
    }
}

/// A certification. `expiry_date: None` means it does not expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub issue_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Certification {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            issuer: String::new(),
            issue_date: String::new(),
            expiry_date: None,
            credential_id: None,
            description: None,
        }
    }
}

impl Default for Certification {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl Project {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            start_date: String::new(),
            end_date: None,
            url: None,
            technologies: Vec::new(),
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Proficiency {
    Native,
    Fluent,
    #[default]
    Professional,
    Intermediate,
    Basic,
}

impl Proficiency {
    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Professional => "Professional",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Basic => "Basic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub proficiency: Proficiency,
}

impl Language {
    pub fn new(name: impl Into<String>, proficiency: Proficiency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            proficiency,
        }
    }
}

impl Identified for Experience {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Education {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Certification {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Project {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Language {
    fn id(&self) -> Uuid {
        self.id
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template identifier
// ────────────────────────────────────────────────────────────────────────────

/// Closed set of visual templates.
///
/// Deserialization is lenient: an unknown name maps to `Classic` with a warning.
/// `FromStr` is strict and rejects unknown names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateId {
    #[default]
    Classic,
    Modern,
    Minimalist,
    Professional,
    Accent,
    Engineering,
}

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::Classic,
        TemplateId::Modern,
        TemplateId::Minimalist,
        TemplateId::Professional,
        TemplateId::Accent,
        TemplateId::Engineering,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Modern => "modern",
            TemplateId::Minimalist => "minimalist",
            TemplateId::Professional => "professional",
            TemplateId::Accent => "accent",
            TemplateId::Engineering => "engineering",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| BuilderError::UnknownTemplate(s.to_string()))
    }
}

impl From<String> for TemplateId {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(template = %value, "Unknown template id, falling back to classic");
            TemplateId::Classic
        })
    }
}

impl From<TemplateId> for String {
    fn from(value: TemplateId) -> Self {
        value.as_str().to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate root
// ────────────────────────────────────────────────────────────────────────────

/// The whole résumé. Collections are replaced wholesale on every edit;
/// see `models::collections` for the helpers that produce the new lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub template: TemplateId,
}

impl Default for Resume {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo {
                full_name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                location: "New York, NY".to_string(),
                website: None,
                summary: "Experienced professional with a proven track record...".to_string(),
            },
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            certifications: Vec::new(),
            projects: Vec::new(),
            languages: Vec::new(),
            template: TemplateId::Classic,
        }
    }
}

impl Resume {
    pub fn with_personal_info(self, personal_info: PersonalInfo) -> Self {
        Self {
            personal_info,
            ..self
        }
    }

    pub fn with_experience(self, experience: Vec<Experience>) -> Self {
        Self { experience, ..self }
    }

    pub fn with_education(self, education: Vec<Education>) -> Self {
        Self { education, ..self }
    }

    pub fn with_skills(self, skills: Vec<String>) -> Self {
        Self { skills, ..self }
    }

    pub fn with_certifications(self, certifications: Vec<Certification>) -> Self {
        Self {
            certifications,
            ..self
        }
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        Self { projects, ..self }
    }

    pub fn with_languages(self, languages: Vec<Language>) -> Self {
        Self { languages, ..self }
    }

    pub fn with_template(self, template: TemplateId) -> Self {
        Self { template, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resume_uses_classic_and_empty_lists() {
        let resume = Resume::default();
        assert_eq!(resume.template, TemplateId::Classic);
        assert_eq!(resume.personal_info.full_name, "John Doe");
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
        assert!(resume.languages.is_empty());
    }

    #[test]
    fn test_new_entries_get_distinct_ids() {
        let a = Experience::new();
        let b = Experience::new();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_template_from_str_is_strict() {
        assert_eq!("Modern".parse::<TemplateId>().unwrap(), TemplateId::Modern);
        assert!(matches!(
            "fancy".parse::<TemplateId>(),
            Err(BuilderError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_unknown_template_deserializes_to_classic() {
        let json = r#"{ "personalInfo": { "fullName": "Ada" }, "template": "glossy" }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.template, TemplateId::Classic);
        assert_eq!(resume.personal_info.full_name, "Ada");
    }

    #[test]
    fn test_missing_template_defaults_to_classic() {
        let resume: Resume = serde_json::from_str("{}").unwrap();
        assert_eq!(resume.template, TemplateId::Classic);
    }

    #[test]
    fn test_camel_case_payload_deserializes() {
        let json = r#"{
            "personalInfo": { "fullName": "Ada Lovelace", "email": "ada@example.com" },
            "education": [{
                "id": "6f1c1b3e-4a59-4d55-9a0a-0c7f5f7d9b11",
                "school": "University of London",
                "degree": "BSc",
                "fieldOfStudy": "Mathematics",
                "startDate": "2020-01",
                "endDate": "2022-06"
            }],
            "languages": [{ "id": "7b3c2d1e-1111-4d55-9a0a-0c7f5f7d9b11", "name": "English", "proficiency": "Native" }],
            "template": "engineering"
        }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.education[0].field_of_study, "Mathematics");
        assert_eq!(resume.languages[0].proficiency, Proficiency::Native);
        assert_eq!(resume.template, TemplateId::Engineering);
    }

    #[test]
    fn test_template_serializes_lowercase() {
        let value = serde_json::to_value(TemplateId::Professional).unwrap();
        assert_eq!(value, serde_json::json!("professional"));
    }

    #[test]
    fn test_with_template_leaves_data_unchanged() {
        let resume = Resume::default().with_skills(vec!["Rust".to_string()]);
        let switched = resume.clone().with_template(TemplateId::Accent);
        assert_eq!(switched.skills, resume.skills);
        assert_eq!(switched.personal_info, resume.personal_info);
        assert_eq!(switched.template, TemplateId::Accent);
    }
}
