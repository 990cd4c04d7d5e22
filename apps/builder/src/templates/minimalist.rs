//! Minimalist: a 30% shaded side column holding the name, contact and skills.
//! Certifications, projects and languages are not shown.

use crate::layout::{CursorMetrics, FontFamily, FontSpec, Rgb, TextStyle};
use crate::models::TemplateId;
use crate::templates::style::{
    Arrangement, CursorSidebar, CursorSpec, EntryLayout, EntryStyle, HeaderStyle, HeadingStyle,
    Palette, SectionKind, SectionSpec, SkillsPresentation, TemplateStyle,
};

const FAMILY: FontFamily = FontFamily::Helvetica;
const INK: Rgb = Rgb::BLACK;
const MUTED: Rgb = Rgb::from_hex(0x666666);
const SIDEBAR: Rgb = Rgb::from_hex(0xf6f6f6);

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::full(SectionKind::Profile, "Profile"),
    SectionSpec::full(SectionKind::Experience, "Experience"),
    SectionSpec::full(SectionKind::Education, "Education"),
];

const SIDEBAR_SECTIONS: &[SectionSpec] = &[
    SectionSpec::full(SectionKind::Contact, "Contact"),
    SectionSpec::full(SectionKind::Skills, "Skills"),
];

pub static STYLE: TemplateStyle = TemplateStyle {
    id: TemplateId::Minimalist,
    name: "Minimalist",
    description: "Clean two-column layout",
    family: FAMILY,
    palette: Palette {
        text: INK,
        muted: MUTED,
    },
    page_margin: 40.0,
    arrangement: Arrangement::Sidebar {
        inset: 40.0,
        width: 154.5,
        padding: 20.0,
        gutter: 20.0,
        background: SIDEBAR,
        holds_header: true,
    },
    header: HeaderStyle {
        name: TextStyle::new(FontSpec::bold(FAMILY), 24.0, INK),
        contact: TextStyle::new(FontSpec::regular(FAMILY), 10.0, INK),
        contact_delimiter: " | ",
        summary: None,
        website: None,
        contact_in_section: true,
        contact_labels: false,
        border: None,
        margin_bottom: 10.0,
    },
    heading: HeadingStyle {
        text: TextStyle::new(FontSpec::bold(FAMILY), 14.0, INK),
        margin_top: 15.0,
        margin_bottom: 10.0,
        underline: None,
        band: None,
    },
    entry: EntryStyle {
        layout: EntryLayout::Stacked,
        title: TextStyle::new(FontSpec::bold(FAMILY), 12.0, INK),
        subtitle: TextStyle::new(FontSpec::regular(FAMILY), 10.0, MUTED),
        meta: TextStyle::new(FontSpec::regular(FAMILY), 10.0, MUTED),
        body: TextStyle::new(FontSpec::regular(FAMILY), 10.0, INK).with_line_height(1.4),
        indent: 0.0,
        detail_bullet: None,
        gap_after: 15.0,
    },
    skills: SkillsPresentation::List,
    sections: SECTIONS,
    sidebar_sections: SIDEBAR_SECTIONS,
    list_bullet: None,
    cursor: CursorSpec {
        metrics: CursorMetrics {
            top_margin: 20.0,
            bottom_threshold: 280.0,
            side_margin: 20.0,
            text_padding: 4.0,
            wrapped_padding: 2.0,
            paragraph_gap: 2.0,
            rule_advance: 5.0,
        },
        sidebar: Some(CursorSidebar {
            shade_x: 14.0,
            shade_width: 54.0,
            content_x: 21.0,
            content_width: 40.0,
            start_y: 20.0,
            main_x: 75.0,
            background: SIDEBAR,
        }),
        name_size: 20.0,
        contact_size: 10.0,
        heading_size: 14.0,
        title_size: 12.0,
        body_size: 10.0,
        heading_rule: false,
        header_gap: 5.0,
        entry_gap: 8.0,
        section_gap: 10.0,
    },
};
