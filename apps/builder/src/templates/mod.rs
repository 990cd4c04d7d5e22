// Visual templates and the renderers that lay them out.
//
// A template is a static `TemplateStyle`. `render` resolves the résumé's template,
// builds its content once, and lays it out with the selected strategy.

pub mod accent;
pub mod classic;
pub mod content;
pub mod cursor;
pub mod engineering;
pub mod flow;
pub mod minimalist;
pub mod modern;
pub mod professional;
pub mod registry;
pub mod style;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::BuilderError;
use crate::layout::Document;
use crate::models::Resume;

pub use registry::{all, resolve, resolve_name};
pub use style::TemplateStyle;

/// Which pagination engine lays the template out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Measured block tree with whole-block breaking.
    #[default]
    Flow,
    /// Fixed-advance vertical cursor with a threshold break check.
    Cursor,
}

impl LayoutStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStrategy::Flow => "flow",
            LayoutStrategy::Cursor => "cursor",
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutStrategy {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flow" => Ok(LayoutStrategy::Flow),
            "cursor" => Ok(LayoutStrategy::Cursor),
            other => Err(BuilderError::Layout(format!("unknown layout strategy '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub strategy: LayoutStrategy,
    /// Never leave a section heading as the last line of a page.
    pub orphan_control: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::Flow,
            orphan_control: true,
        }
    }
}

/// Lays out `resume` with its selected template. Pure: the same input always
/// yields the same document.
pub fn render(resume: &Resume, options: &LayoutOptions) -> Result<Document, BuilderError> {
    let style = resolve(resume.template);
    let document = match options.strategy {
        LayoutStrategy::Flow => flow::render(resume, style, options.orphan_control),
        LayoutStrategy::Cursor => cursor::render(resume, style, options.orphan_control),
    };
    document.validate()?;

    debug!(
        template = %style.id,
        strategy = %options.strategy,
        pages = document.page_count(),
        "Resume laid out"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextRun;
    use crate::models::{
        Certification, Education, Experience, Language, Proficiency, Project, TemplateId,
    };

    const STRATEGIES: [LayoutStrategy; 2] = [LayoutStrategy::Flow, LayoutStrategy::Cursor];

    fn options(strategy: LayoutStrategy) -> LayoutOptions {
        LayoutOptions {
            strategy,
            orphan_control: true,
        }
    }

    fn small_resume() -> Resume {
        Resume::default()
            .with_experience(vec![Experience {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                location: "Berlin".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "2022-06".to_string(),
                description: "Built the billing system".to_string(),
                ..Experience::new()
            }])
            .with_education(vec![Education {
                school: "MIT".to_string(),
                degree: "BSc".to_string(),
                field_of_study: "Computer Science".to_string(),
                start_date: "2016-09".to_string(),
                end_date: "2020-06".to_string(),
                ..Education::new()
            }])
            .with_skills(vec!["Go".to_string(), "Rust".to_string()])
    }

    fn long_resume() -> Resume {
        let experience = (1..=12)
            .map(|i| Experience {
                company: format!("Company {i:02}"),
                position: format!("Role {i:02}"),
                location: "Remote".to_string(),
                start_date: "2015-01".to_string(),
                description: format!(
                    "Led team {i:02} through a long migration of legacy services\nShipped release {i:02}"
                ),
                ..Experience::new()
            })
            .collect();
        let projects = (1..=4)
            .map(|i| Project {
                name: format!("Project {i}"),
                description: "A tool for laying out documents".to_string(),
                technologies: vec!["Rust".to_string(), "PDF".to_string()],
                start_date: "2022-01".to_string(),
                ..Project::new()
            })
            .collect();
        small_resume()
            .with_experience(experience)
            .with_projects(projects)
            .with_certifications(vec![Certification {
                name: "CKA".to_string(),
                issuer: "CNCF".to_string(),
                issue_date: "2021-03".to_string(),
                ..Certification::new()
            }])
            .with_languages(vec![Language::new("German", Proficiency::Fluent)])
    }

    fn heading_texts(style: &TemplateStyle) -> Vec<String> {
        style
            .all_sections()
            .map(|s| style.heading.text.transform(s.title))
            .collect()
    }

    fn headings(document: &Document, style: &TemplateStyle) -> Vec<String> {
        let titles = heading_texts(style);
        document
            .text_runs()
            .filter(|r| titles.contains(&r.text))
            .map(|r| r.text.clone())
            .collect()
    }

    fn page_of(document: &Document, needle: &str) -> Option<usize> {
        document
            .pages
            .iter()
            .position(|p| p.text_runs().any(|r| r.text.contains(needle)))
    }

    #[test]
    fn test_render_is_deterministic() {
        let resume = long_resume();
        for id in TemplateId::ALL {
            for strategy in STRATEGIES {
                let resume = resume.clone().with_template(id);
                let first = render(&resume, &options(strategy)).unwrap();
                let second = render(&resume, &options(strategy)).unwrap();
                assert_eq!(first, second, "{id} {strategy}");
            }
        }
    }

    #[test]
    fn test_strategies_emit_same_headings() {
        for id in TemplateId::ALL {
            let resume = small_resume().with_template(id);
            let style = resolve(id);
            let flow = render(&resume, &options(LayoutStrategy::Flow)).unwrap();
            let cursor = render(&resume, &options(LayoutStrategy::Cursor)).unwrap();
            assert_eq!(flow.page_count(), 1, "{id}");
            assert_eq!(cursor.page_count(), 1, "{id}");
            let expected = headings(&flow, style);
            assert!(!expected.is_empty());
            assert_eq!(expected, headings(&cursor, style), "{id}");
        }
    }

    #[test]
    fn test_long_resume_overflows_in_every_template() {
        let resume = long_resume();
        for id in TemplateId::ALL {
            for strategy in STRATEGIES {
                let document = render(&resume.clone().with_template(id), &options(strategy)).unwrap();
                assert!(document.page_count() >= 2, "{id} {strategy}");
            }
        }
    }

    #[test]
    fn test_flow_never_splits_entries() {
        let resume = long_resume();
        for id in TemplateId::ALL {
            let document =
                render(&resume.clone().with_template(id), &options(LayoutStrategy::Flow)).unwrap();
            for i in 1..=12 {
                let role = page_of(&document, &format!("Role {i:02}"));
                assert!(role.is_some(), "{id}: role {i}");
                assert_eq!(role, page_of(&document, &format!("Company {i:02}")), "{id}: {i}");
                assert_eq!(role, page_of(&document, &format!("release {i:02}")), "{id}: {i}");
            }
        }
    }

    #[test]
    fn test_headings_are_never_orphaned() {
        let resume = long_resume();
        for id in TemplateId::ALL {
            let style = resolve(id);
            let titles = heading_texts(style);
            for strategy in STRATEGIES {
                let document = render(&resume.clone().with_template(id), &options(strategy)).unwrap();
                for (index, page) in document.pages.iter().enumerate() {
                    let runs: Vec<&TextRun> = page.text_runs().collect();
                    for heading in runs.iter().filter(|r| titles.contains(&r.text)) {
                        // Something from the same column must follow on the same page.
                        let followed = runs.iter().any(|r| {
                            !titles.contains(&r.text)
                                && r.baseline > heading.baseline
                                && (r.x - heading.x).abs() < 60.0
                        });
                        assert!(followed, "{id} {strategy}: '{}' orphaned on page {}", heading.text, index + 1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_switching_template_keeps_data() {
        let resume = long_resume();
        for id in TemplateId::ALL {
            let switched = resume.clone().with_template(id);
            assert_eq!(switched.template, id);
            assert_eq!(switched.with_template(resume.template), resume);
        }
    }

    #[test]
    fn test_hidden_sections_are_not_rendered() {
        let resume = long_resume().with_template(TemplateId::Professional);
        let document = render(&resume, &LayoutOptions::default()).unwrap();
        let text = document.plain_text();
        assert!(!text.contains("Project 1"));
        assert!(!text.contains("CKA"));
        assert!(text.contains("Role 01"));
    }

    #[test]
    fn test_layout_strategy_parse() {
        assert_eq!("Cursor".parse::<LayoutStrategy>().unwrap(), LayoutStrategy::Cursor);
        assert_eq!(" flow ".parse::<LayoutStrategy>().unwrap(), LayoutStrategy::Flow);
        assert!("grid".parse::<LayoutStrategy>().is_err());
    }
}
