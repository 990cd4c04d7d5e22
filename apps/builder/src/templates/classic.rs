//! Classic: serif, single column, centered header over a heavy rule.

use crate::layout::{FontFamily, FontSpec, Rgb, TextStyle};
use crate::models::TemplateId;
use crate::templates::style::{
    Arrangement, CursorSpec, EntryLayout, EntryStyle, HeaderStyle, HeadingStyle, Palette,
    SectionKind, SectionSpec, SkillsPresentation, TemplateStyle,
};

const FAMILY: FontFamily = FontFamily::Times;
const INK: Rgb = Rgb::from_hex(0x232323);
const MUTED: Rgb = Rgb::from_hex(0x666666);

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::full(SectionKind::Profile, "Profile"),
    SectionSpec::full(SectionKind::Experience, "Professional Experience"),
    SectionSpec::full(SectionKind::Education, "Education"),
    SectionSpec::full(SectionKind::Skills, "Skills"),
    SectionSpec::full(SectionKind::Certifications, "Certifications"),
    SectionSpec::full(SectionKind::Projects, "Projects"),
    SectionSpec::full(SectionKind::Languages, "Languages"),
];

pub static STYLE: TemplateStyle = TemplateStyle {
    id: TemplateId::Classic,
    name: "Classic",
    description: "Traditional layout with centered header",
    family: FAMILY,
    palette: Palette {
        text: INK,
        muted: MUTED,
    },
    page_margin: 50.0,
    arrangement: Arrangement::SingleColumn,
    header: HeaderStyle {
        name: TextStyle::new(FontSpec::bold(FAMILY), 24.0, INK).centered().upper(),
        contact: TextStyle::new(FontSpec::regular(FAMILY), 10.0, MUTED).centered(),
        contact_delimiter: " | ",
        summary: None,
        website: None,
        contact_in_section: false,
        contact_labels: false,
        border: Some((2.0, INK)),
        margin_bottom: 20.0,
    },
    heading: HeadingStyle {
        text: TextStyle::new(FontSpec::bold(FAMILY), 14.0, INK).upper(),
        margin_top: 20.0,
        margin_bottom: 10.0,
        underline: None,
        band: None,
    },
    entry: EntryStyle {
        layout: EntryLayout::Stacked,
        title: TextStyle::new(FontSpec::bold(FAMILY), 12.0, INK),
        subtitle: TextStyle::new(FontSpec::italic(FAMILY), 10.0, MUTED),
        meta: TextStyle::new(FontSpec::regular(FAMILY), 10.0, MUTED),
        body: TextStyle::new(FontSpec::regular(FAMILY), 10.0, INK).with_line_height(1.4),
        indent: 15.0,
        detail_bullet: Some("\u{2022} "),
        gap_after: 15.0,
    },
    skills: SkillsPresentation::Inline(" \u{2022} "),
    sections: SECTIONS,
    sidebar_sections: &[],
    list_bullet: None,
    cursor: CursorSpec::standard(true),
};

