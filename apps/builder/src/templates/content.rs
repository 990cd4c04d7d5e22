//! Text content of a rendered résumé, built once per render.
//!
//! Both layout strategies consume the same `HeaderContent` and `SectionContent`
//! values, so they show the same sections, in the same order, with the same text.
//! Empty sections are never built, and every composite line is a filtered join,
//! so missing fields never leave stray delimiters.

use crate::models::dates::{
    format_certification_dates, format_date_range, format_project_dates,
};
use crate::models::{Certification, Education, Experience, Language, Project, Resume};
use crate::templates::style::{
    EntryLayout, SectionKind, SectionSpec, SkillsPresentation, TemplateStyle,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderContent {
    pub name: String,
    pub contact_line: Option<String>,
    pub summary: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    /// Right-aligned companion of the title; empty when unused.
    pub title_right: String,
    pub subtitle: Option<String>,
    pub meta: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Paragraph(String),
    Entries(Vec<Entry>),
    Items(Vec<String>),
    Chips(Vec<String>),
    Categories(Vec<Category>),
    Contact(Vec<ContactField>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContent {
    pub kind: SectionKind,
    pub title: &'static str,
    pub body: SectionBody,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Joins the non-blank parts with `delimiter`.
pub fn join_present(parts: &[&str], delimiter: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(delimiter)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn with_prefix(prefix: Option<&str>, text: &str) -> String {
    match prefix {
        Some(p) => format!("{p}{text}"),
        None => text.to_string(),
    }
}

/// Splits free text into trimmed, non-blank paragraphs.
fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

fn detail_lines(text: &str, bullet: Option<&str>) -> Vec<String> {
    paragraphs(text).map(|p| with_prefix(bullet, p)).collect()
}

/// Skills mentioning programming or development go first; everything else is a tool.
pub fn split_technical_skills(skills: &[String]) -> (Vec<String>, Vec<String>) {
    skills.iter().cloned().partition(|skill| {
        let lower = skill.to_lowercase();
        lower.contains("programming") || lower.contains("development")
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

pub fn header(resume: &Resume, style: &TemplateStyle) -> HeaderContent {
    let info = &resume.personal_info;
    let website = info.website.as_deref().unwrap_or("");

    let contact_line = if style.header.contact_in_section {
        None
    } else {
        let inline_website = if style.header.website.is_some() {
            ""
        } else {
            website
        };
        non_empty(join_present(
            &[&info.email, &info.phone, &info.location, inline_website],
            style.header.contact_delimiter,
        ))
    };

    HeaderContent {
        name: info.full_name.trim().to_string(),
        contact_line,
        summary: style
            .header
            .summary
            .and_then(|_| non_empty(info.summary.trim().to_string())),
        website: style
            .header
            .website
            .and_then(|_| non_empty(website.trim().to_string())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Builds the sections of `specs` in order, skipping every empty one.
pub fn build_sections(
    resume: &Resume,
    specs: &[SectionSpec],
    style: &TemplateStyle,
) -> Vec<SectionContent> {
    specs
        .iter()
        .filter_map(|spec| build_section(resume, spec, style))
        .collect()
}

/// Returns `None` when the backing collection or string is empty.
pub fn build_section(
    resume: &Resume,
    spec: &SectionSpec,
    style: &TemplateStyle,
) -> Option<SectionContent> {
    let layout = style.entry.layout;
    let bullet = style.entry.detail_bullet;
    let list_bullet = if spec.compact { style.list_bullet } else { None };

    let body = match spec.kind {
        SectionKind::Profile => {
            if style.header.summary.is_some() {
                return None;
            }
            let summary = paragraphs(&resume.personal_info.summary)
                .collect::<Vec<_>>()
                .join("\n");
            SectionBody::Paragraph(non_empty(summary)?)
        }
        SectionKind::Contact => {
            let info = &resume.personal_info;
            let fields: Vec<ContactField> = [
                ("Address", info.location.as_str()),
                ("Phone", info.phone.as_str()),
                ("Email", info.email.as_str()),
                ("Website", info.website.as_deref().unwrap_or("")),
            ]
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(label, value)| ContactField {
                label,
                value: value.trim().to_string(),
            })
            .collect();
            if fields.is_empty() {
                return None;
            }
            SectionBody::Contact(fields)
        }
        SectionKind::Experience => {
            if resume.experience.is_empty() {
                return None;
            }
            SectionBody::Entries(
                resume
                    .experience
                    .iter()
                    .map(|exp| experience_entry(exp, layout, bullet))
                    .collect(),
            )
        }
        SectionKind::Education => {
            if resume.education.is_empty() {
                return None;
            }
            SectionBody::Entries(
                resume
                    .education
                    .iter()
                    .map(|edu| education_entry(edu, layout, bullet))
                    .collect(),
            )
        }
        SectionKind::Skills => skills_body(&resume.skills, style)?,
        SectionKind::Certifications => {
            if resume.certifications.is_empty() {
                return None;
            }
            if spec.compact {
                SectionBody::Items(
                    resume
                        .certifications
                        .iter()
                        .map(|c| with_prefix(list_bullet, &certification_line(c)))
                        .collect(),
                )
            } else {
                SectionBody::Entries(
                    resume
                        .certifications
                        .iter()
                        .map(certification_entry)
                        .collect(),
                )
            }
        }
        SectionKind::Projects => {
            if resume.projects.is_empty() {
                return None;
            }
            if spec.compact {
                SectionBody::Items(
                    resume
                        .projects
                        .iter()
                        .map(|p| with_prefix(list_bullet, &project_line(p)))
                        .collect(),
                )
            } else {
                SectionBody::Entries(resume.projects.iter().map(project_entry).collect())
            }
        }
        SectionKind::Languages => {
            if resume.languages.is_empty() {
                return None;
            }
            SectionBody::Items(
                resume
                    .languages
                    .iter()
                    .map(|l| with_prefix(list_bullet, &language_line(l)))
                    .collect(),
            )
        }
    };

    Some(SectionContent {
        kind: spec.kind,
        title: spec.title,
        body,
    })
}

fn skills_body(skills: &[String], style: &TemplateStyle) -> Option<SectionBody> {
    let skills: Vec<String> = skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if skills.is_empty() {
        return None;
    }

    Some(match style.skills {
        SkillsPresentation::Inline(delimiter) => SectionBody::Paragraph(skills.join(delimiter)),
        SkillsPresentation::Chips { .. } => SectionBody::Chips(skills),
        SkillsPresentation::List => SectionBody::Items(skills),
        SkillsPresentation::Categorized => {
            let (programming, tools) = split_technical_skills(&skills);
            let categories = [("Programming", programming), ("Tools & Technologies", tools)]
                .into_iter()
                .filter(|(_, items)| !items.is_empty())
                .map(|(label, items)| Category {
                    label,
                    items: items
                        .iter()
                        .map(|s| with_prefix(style.list_bullet, s))
                        .collect(),
                })
                .collect();
            SectionBody::Categories(categories)
        }
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

fn experience_entry(exp: &Experience, layout: EntryLayout, bullet: Option<&str>) -> Entry {
    let dates = format_date_range(&exp.start_date, &exp.end_date);
    let details = detail_lines(&exp.description, bullet);

    match layout {
        EntryLayout::Stacked => Entry {
            title: exp.position.trim().to_string(),
            title_right: String::new(),
            subtitle: non_empty(join_present(&[&exp.company, &dates], " | ")),
            meta: None,
            details,
        },
        EntryLayout::Inline => Entry {
            title: join_present(&[&exp.position, &exp.company], " at "),
            title_right: String::new(),
            subtitle: non_empty(join_present(&[&dates, &exp.location], " | ")),
            meta: None,
            details,
        },
        EntryLayout::Accent => Entry {
            title: exp.position.trim().to_string(),
            title_right: String::new(),
            subtitle: non_empty(join_present(&[&exp.company, &exp.location], ", ")),
            meta: non_empty(dates),
            details,
        },
        EntryLayout::Engineering => Entry {
            title: exp.company.trim().to_string(),
            title_right: exp.location.trim().to_string(),
            subtitle: non_empty(join_present(&[&exp.position, &dates], " | ")),
            meta: None,
            details,
        },
    }
}

fn education_entry(edu: &Education, layout: EntryLayout, bullet: Option<&str>) -> Entry {
    let dates = format_date_range(&edu.start_date, &edu.end_date);
    let degree = join_present(&[&edu.degree, &edu.field_of_study], " in ");
    let details = detail_lines(&edu.description, bullet);

    let (title, subtitle, meta) = match layout {
        EntryLayout::Stacked | EntryLayout::Engineering => (
            degree,
            non_empty(join_present(&[&edu.school, &dates], " | ")),
            None,
        ),
        EntryLayout::Inline => (
            join_present(&[&degree, &edu.school], " at "),
            non_empty(dates),
            None,
        ),
        EntryLayout::Accent => (
            degree,
            non_empty(edu.school.trim().to_string()),
            non_empty(dates),
        ),
    };

    Entry {
        title,
        title_right: String::new(),
        subtitle,
        meta,
        details,
    }
}

fn certification_entry(cert: &Certification) -> Entry {
    let dates = format_certification_dates(&cert.issue_date, cert.expiry_date.as_deref());
    let mut details = Vec::new();
    if let Some(id) = cert.credential_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        details.push(format!("Credential ID: {id}"));
    }
    if let Some(description) = cert.description.as_deref() {
        details.extend(paragraphs(description).map(str::to_string));
    }

    Entry {
        title: cert.name.trim().to_string(),
        title_right: String::new(),
        subtitle: non_empty(join_present(&[&cert.issuer, &dates], " | ")),
        meta: None,
        details,
    }
}

fn certification_line(cert: &Certification) -> String {
    let dates = format_certification_dates(&cert.issue_date, cert.expiry_date.as_deref());
    let line = join_present(&[&cert.name, &cert.issuer], " - ");
    if dates.is_empty() {
        line
    } else {
        format!("{line} ({dates})")
    }
}

fn project_entry(project: &Project) -> Entry {
    let dates = format_project_dates(&project.start_date, project.end_date.as_deref());
    let mut details = Vec::new();

    let technologies = join_present(
        &project.technologies.iter().map(String::as_str).collect::<Vec<_>>(),
        ", ",
    );
    if !technologies.is_empty() {
        details.push(format!("Technologies: {technologies}"));
    }
    details.extend(paragraphs(&project.description).map(str::to_string));
    if let Some(url) = project.url.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        details.push(format!("URL: {url}"));
    }

    Entry {
        title: project.name.trim().to_string(),
        title_right: String::new(),
        subtitle: non_empty(dates),
        meta: None,
        details,
    }
}

fn project_line(project: &Project) -> String {
    let summary = paragraphs(&project.description).next().unwrap_or("");
    join_present(&[&project.name, summary], ": ")
}

fn language_line(language: &Language) -> String {
    join_present(&[&language.name, language.proficiency.label()], " - ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonalInfo, Proficiency, TemplateId};
    use crate::templates::registry::resolve;

    fn make_resume() -> Resume {
        Resume::default()
            .with_education(vec![Education {
                school: "MIT".to_string(),
                degree: "BSc".to_string(),
                field_of_study: "Computer Science".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "2022-06".to_string(),
                ..Education::new()
            }])
            .with_skills(vec!["Go".to_string(), "Rust".to_string()])
    }

    #[test]
    fn test_join_present_skips_blank_parts() {
        assert_eq!(join_present(&["a", "", "  ", "b"], " | "), "a | b");
        assert_eq!(join_present(&["", ""], " | "), "");
    }

    #[test]
    fn test_classic_scenario() {
        let resume = make_resume();
        let style = resolve(TemplateId::Classic);
        let sections = build_sections(&resume, style.sections, style);
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert!(!kinds.contains(&SectionKind::Experience));
        assert!(kinds.contains(&SectionKind::Education));

        let education = sections.iter().find(|s| s.kind == SectionKind::Education).unwrap();
        let SectionBody::Entries(entries) = &education.body else {
            panic!("education should be entries");
        };
        assert!(entries[0]
            .subtitle
            .as_deref()
            .unwrap()
            .contains("Jan 2020 - Jun 2022"));

        let skills = sections.iter().find(|s| s.kind == SectionKind::Skills).unwrap();
        assert_eq!(skills.body, SectionBody::Paragraph("Go • Rust".to_string()));
    }

    #[test]
    fn test_empty_collections_build_no_sections() {
        let resume = Resume::default().with_personal_info(PersonalInfo::default());
        for style in crate::templates::registry::all() {
            assert!(build_sections(&resume, style.sections, style).is_empty());
            assert!(build_sections(&resume, style.sidebar_sections, style).is_empty());
        }
    }

    #[test]
    fn test_missing_end_date_reads_present() {
        let resume = Resume::default().with_experience(vec![Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2021-04".to_string(),
            ..Experience::new()
        }]);
        for style in crate::templates::registry::all() {
            let sections = build_sections(&resume, style.sections, style);
            let experience = sections
                .iter()
                .find(|s| s.kind == SectionKind::Experience)
                .unwrap();
            let SectionBody::Entries(entries) = &experience.body else {
                panic!("experience should be entries");
            };
            let e = &entries[0];
            let text = format!("{:?} {:?}", e.subtitle, e.meta);
            assert!(text.contains("Apr 2021 - Present"), "{}: {text}", style.name);
        }
    }

    #[test]
    fn test_contact_line_has_no_adjacent_delimiters() {
        let mut resume = Resume::default();
        resume.personal_info.phone = String::new();
        resume.personal_info.website = Some("  ".to_string());
        for style in crate::templates::registry::all() {
            if let Some(line) = header(&resume, style).contact_line {
                let d = style.header.contact_delimiter.trim();
                let doubled = format!("{d} {d}");
                assert!(!line.contains(&doubled), "{}: {line}", style.name);
                assert!(!line.starts_with(d) && !line.ends_with(d));
            }
        }
    }

    #[test]
    fn test_technical_skills_split() {
        let skills = vec![
            "Web Development".to_string(),
            "Docker".to_string(),
            "Functional Programming".to_string(),
        ];
        let (programming, tools) = split_technical_skills(&skills);
        assert_eq!(programming, vec!["Web Development", "Functional Programming"]);
        assert_eq!(tools, vec!["Docker"]);
    }

    #[test]
    fn test_engineering_skips_empty_category() {
        let resume = Resume::default().with_skills(vec!["Docker".to_string()]);
        let style = resolve(TemplateId::Engineering);
        let sections = build_sections(&resume, style.sections, style);
        let skills = sections.iter().find(|s| s.kind == SectionKind::Skills).unwrap();
        let SectionBody::Categories(categories) = &skills.body else {
            panic!("engineering skills should be categorized");
        };
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label, "Tools & Technologies");
    }

    #[test]
    fn test_project_details() {
        let project = Project {
            name: "Layout engine".to_string(),
            description: "Paginates documents".to_string(),
            start_date: "2023-02".to_string(),
            url: Some("https://example.com".to_string()),
            ..Project::new()
        };
        let entry = project_entry(&project);
        assert_eq!(entry.subtitle.as_deref(), Some("Feb 2023"));
        assert_eq!(entry.details, vec!["Paginates documents", "URL: https://example.com"]);
    }

    #[test]
    fn test_language_line() {
        let lang = Language::new("German", Proficiency::Fluent);
        assert_eq!(language_line(&lang), "German - Fluent");
    }

    #[test]
    fn test_certification_line_without_expiry() {
        let cert = Certification {
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            issue_date: "2021-03".to_string(),
            ..Certification::new()
        };
        assert_eq!(certification_line(&cert), "CKA - CNCF (Mar 2021)");
    }
}
