//! Modern: sans-serif, full-bleed shaded sidebar with contact details and skills.

use crate::layout::{CursorMetrics, FontFamily, FontSpec, Rgb, TextStyle};
use crate::models::TemplateId;
use crate::templates::style::{
    Arrangement, CursorSidebar, CursorSpec, EntryLayout, EntryStyle, HeaderStyle, HeadingStyle,
    Palette, SectionKind, SectionSpec, SkillsPresentation, TemplateStyle,
};

const FAMILY: FontFamily = FontFamily::Helvetica;
const INK: Rgb = Rgb::from_hex(0x333333);
const MUTED: Rgb = Rgb::from_hex(0x555555);
const TITLE: Rgb = Rgb::from_hex(0x222222);
const SIDEBAR: Rgb = Rgb::new(249, 249, 249);

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::full(SectionKind::Profile, "Profile"),
    SectionSpec::full(SectionKind::Experience, "Employment History"),
    SectionSpec::full(SectionKind::Education, "Education"),
    SectionSpec::full(SectionKind::Certifications, "Certifications"),
    SectionSpec::full(SectionKind::Projects, "Projects"),
];

const SIDEBAR_SECTIONS: &[SectionSpec] = &[
    SectionSpec::full(SectionKind::Contact, "Details"),
    SectionSpec::full(SectionKind::Skills, "Skills"),
    SectionSpec::full(SectionKind::Languages, "Languages"),
];

pub static STYLE: TemplateStyle = TemplateStyle {
    id: TemplateId::Modern,
    name: "Modern",
    description: "Contemporary design with sidebar",
    family: FAMILY,
    palette: Palette {
        text: INK,
        muted: MUTED,
    },
    page_margin: 40.0,
    arrangement: Arrangement::Sidebar {
        inset: 0.0,
        width: 184.0,
        padding: 20.0,
        gutter: 28.0,
        background: SIDEBAR,
        holds_header: false,
    },
    header: HeaderStyle {
        name: TextStyle::new(FontSpec::bold(FAMILY), 24.0, TITLE),
        contact: TextStyle::new(FontSpec::regular(FAMILY), 9.0, INK),
        contact_delimiter: " | ",
        summary: None,
        website: None,
        contact_in_section: true,
        contact_labels: true,
        border: None,
        margin_bottom: 10.0,
    },
    heading: HeadingStyle {
        text: TextStyle::new(FontSpec::bold(FAMILY), 14.0, TITLE).upper(),
        margin_top: 20.0,
        margin_bottom: 10.0,
        underline: Some((1.0, Rgb::from_hex(0xdddddd))),
        band: None,
    },
    entry: EntryStyle {
        layout: EntryLayout::Inline,
        title: TextStyle::new(FontSpec::bold(FAMILY), 12.0, TITLE),
        subtitle: TextStyle::new(FontSpec::regular(FAMILY), 10.0, MUTED),
        meta: TextStyle::new(FontSpec::regular(FAMILY), 10.0, MUTED),
        body: TextStyle::new(FontSpec::regular(FAMILY), 10.0, INK).with_line_height(1.5),
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
            shade_x: 0.0,
            shade_width: 65.0,
            content_x: 10.0,
            content_width: 50.0,
            start_y: 50.0,
            main_x: 95.0,
            background: SIDEBAR,
        }),
        name_size: 24.0,
        contact_size: 9.0,
        heading_size: 16.0,
        title_size: 12.0,
        body_size: 10.0,
        heading_rule: false,
        header_gap: 6.0,
        entry_gap: 10.0,
        section_gap: 10.0,
    },
};
