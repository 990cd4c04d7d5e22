//! Template descriptors.
//!
//! A template is data: fonts, palette, arrangement, section order and entry
//! formatting. The two shared renderers (`templates::flow`, `templates::cursor`)
//! interpret a `TemplateStyle`; no template carries its own layout code.

use crate::layout::{CursorMetrics, FontFamily, Rgb, TextStyle};
use crate::models::TemplateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Profile,
    Contact,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Languages,
}

/// One section slot: what it shows, under which heading, and whether its entries
/// collapse to single lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpec {
    pub kind: SectionKind,
    pub title: &'static str,
    pub compact: bool,
}

impl SectionSpec {
    pub const fn full(kind: SectionKind, title: &'static str) -> Self {
        Self {
            kind,
            title,
            compact: false,
        }
    }

    pub const fn compact(kind: SectionKind, title: &'static str) -> Self {
        Self {
            kind,
            title,
            compact: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arrangement {
    SingleColumn,
    /// A side column next to the main column. All lengths in points.
    Sidebar {
        /// Left edge of the shaded area; 0 bleeds to the page edge.
        inset: f32,
        width: f32,
        padding: f32,
        /// Space between the shaded area and the main column.
        gutter: f32,
        background: Rgb,
        /// The name header sits in the sidebar instead of the main column.
        holds_header: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderStyle {
    pub name: TextStyle,
    pub contact: TextStyle,
    pub contact_delimiter: &'static str,
    /// Render the summary inside the header instead of a Profile section.
    pub summary: Option<TextStyle>,
    /// Render the website on its own line instead of in the contact line.
    pub website: Option<TextStyle>,
    /// Omit the contact line; sidebar templates show contact as a section.
    pub contact_in_section: bool,
    /// Label each field of a contact section ("Phone", "Email", ...).
    pub contact_labels: bool,
    pub border: Option<(f32, Rgb)>,
    pub margin_bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingStyle {
    pub text: TextStyle,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Bottom border: thickness and color.
    pub underline: Option<(f32, Rgb)>,
    /// Filled band behind the title.
    pub band: Option<Rgb>,
}

/// How the fields of an experience or education entry map onto its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLayout {
    /// Position, then `company | dates`.
    Stacked,
    /// `Position at Company`, then `dates | location`.
    Inline,
    /// Position, then italic `company, location`, then dates.
    Accent,
    /// Company with location right-aligned, then `position | dates`.
    Engineering,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryStyle {
    pub layout: EntryLayout,
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub meta: TextStyle,
    pub body: TextStyle,
    /// Left inset for detail lines.
    pub indent: f32,
    /// Prefix for description lines, e.g. `"• "`.
    pub detail_bullet: Option<&'static str>,
    pub gap_after: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillsPresentation {
    /// One paragraph joined with the delimiter.
    Inline(&'static str),
    /// Flex-wrapped chips, each optionally prefixed.
    Chips {
        prefix: Option<&'static str>,
        text: TextStyle,
        background: Option<Rgb>,
    },
    /// One skill per line.
    List,
    /// Programming vs. tools, each under its own label.
    Categorized,
}

/// Parameters for the cursor strategy. Sizes in points, lengths in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSpec {
    pub metrics: CursorMetrics,
    pub sidebar: Option<CursorSidebar>,
    pub name_size: f32,
    pub contact_size: f32,
    pub heading_size: f32,
    pub title_size: f32,
    pub body_size: f32,
    pub heading_rule: bool,
    pub header_gap: f32,
    pub entry_gap: f32,
    pub section_gap: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSidebar {
    pub shade_x: f32,
    pub shade_width: f32,
    pub content_x: f32,
    pub content_width: f32,
    pub start_y: f32,
    pub main_x: f32,
    pub background: Rgb,
}

impl CursorSpec {
    /// Shared rhythm of the single-column cursor templates.
    pub const fn standard(heading_rule: bool) -> Self {
        Self {
            metrics: CursorMetrics {
                top_margin: 20.0,
                bottom_threshold: 280.0,
                side_margin: 20.0,
                text_padding: 4.0,
                wrapped_padding: 2.0,
                paragraph_gap: 2.0,
                rule_advance: 5.0,
            },
            sidebar: None,
            name_size: 18.0,
            contact_size: 10.0,
            heading_size: 12.0,
            title_size: 11.0,
            body_size: 10.0,
            heading_rule,
            header_gap: 5.0,
            entry_gap: 8.0,
            section_gap: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text: Rgb,
    pub muted: Rgb,
}

/// Immutable description of one visual template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateStyle {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub family: FontFamily,
    pub palette: Palette,
    /// Page margin in points.
    pub page_margin: f32,
    pub arrangement: Arrangement,
    pub header: HeaderStyle,
    pub heading: HeadingStyle,
    pub entry: EntryStyle,
    pub skills: SkillsPresentation,
    /// Sections of the main column, in display order.
    pub sections: &'static [SectionSpec],
    /// Sections of the side column, in display order. Empty for single-column templates.
    pub sidebar_sections: &'static [SectionSpec],
    pub list_bullet: Option<&'static str>,
    pub cursor: CursorSpec,
}

impl TemplateStyle {
    /// Every section slot, side column first when it holds the header.
    pub fn all_sections(&self) -> impl Iterator<Item = &'static SectionSpec> {
        let (first, second) = match self.arrangement {
            Arrangement::Sidebar {
                holds_header: true, ..
            } => (self.sidebar_sections, self.sections),
            _ => (self.sections, self.sidebar_sections),
        };
        first.iter().chain(second.iter())
    }
}
