//! Accent: green headings and chips on a single column.

use crate::layout::{FontFamily, FontSpec, Rgb, TextStyle};
use crate::models::TemplateId;
use crate::templates::style::{
    Arrangement, CursorSpec, EntryLayout, EntryStyle, HeaderStyle, HeadingStyle, Palette,
    SectionKind, SectionSpec, SkillsPresentation, TemplateStyle,
};

const FAMILY: FontFamily = FontFamily::Helvetica;
const GREEN: Rgb = Rgb::from_hex(0x2E7D32);
const INK: Rgb = Rgb::from_hex(0x333333);
const MUTED: Rgb = Rgb::from_hex(0x555555);

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::full(SectionKind::Profile, "Profile"),
    SectionSpec::full(SectionKind::Experience, "Work Experience"),
    SectionSpec::full(SectionKind::Education, "Education"),
    SectionSpec::full(SectionKind::Skills, "Skills"),
    SectionSpec::compact(SectionKind::Certifications, "Certifications"),
    SectionSpec::full(SectionKind::Projects, "Projects"),
    SectionSpec::full(SectionKind::Languages, "Languages"),
];

pub static STYLE: TemplateStyle = TemplateStyle {
    id: TemplateId::Accent,
    name: "Accent",
    description: "Modern with color accents",
    family: FAMILY,
    palette: Palette {
        text: INK,
        muted: MUTED,
    },
    page_margin: 40.0,
    arrangement: Arrangement::SingleColumn,
    header: HeaderStyle {
        name: TextStyle::new(FontSpec::bold(FAMILY), 26.0, GREEN),
        contact: TextStyle::new(FontSpec::regular(FAMILY), 10.0, MUTED),
        contact_delimiter: " | ",
        summary: None,
        website: None,
        contact_in_section: false,
        contact_labels: false,
        border: None,
        margin_bottom: 15.0,
    },
    heading: HeadingStyle {
        text: TextStyle::new(FontSpec::bold(FAMILY), 14.0, GREEN),
        margin_top: 15.0,
        margin_bottom: 8.0,
        underline: Some((1.0, GREEN)),
        band: None,
    },
    entry: EntryStyle {
        layout: EntryLayout::Accent,
        title: TextStyle::new(FontSpec::bold(FAMILY), 12.0, INK),
        subtitle: TextStyle::new(FontSpec::italic(FAMILY), 11.0, MUTED),
        meta: TextStyle::new(FontSpec::regular(FAMILY), 10.0, Rgb::from_hex(0x777777)),
        body: TextStyle::new(FontSpec::regular(FAMILY), 10.0, INK).with_line_height(1.4),
        indent: 0.0,
        detail_bullet: None,
        gap_after: 12.0,
    },
    skills: SkillsPresentation::Chips {
        prefix: Some("\u{2022} "),
        text: TextStyle::new(FontSpec::regular(FAMILY), 10.0, GREEN),
        background: None,
    },
    sections: SECTIONS,
    sidebar_sections: &[],
    list_bullet: None,
    cursor: CursorSpec::standard(true),
};
