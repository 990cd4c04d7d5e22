//! Engineering: centered header, banded section titles, categorized technical skills.

use crate::layout::{FontFamily, FontSpec, Rgb, TextStyle};
use crate::models::TemplateId;
use crate::templates::style::{
    Arrangement, CursorSpec, EntryLayout, EntryStyle, HeaderStyle, HeadingStyle, Palette,
    SectionKind, SectionSpec, SkillsPresentation, TemplateStyle,
};

const FAMILY: FontFamily = FontFamily::Helvetica;
const STEEL: Rgb = Rgb::from_hex(0x2B4562);
const INK: Rgb = Rgb::from_hex(0x333333);
const MUTED: Rgb = Rgb::from_hex(0x666666);
const BAND: Rgb = Rgb::from_hex(0xF5F5F5);

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::full(SectionKind::Experience, "Professional Experience"),
    SectionSpec::full(SectionKind::Skills, "Technical Skills"),
    SectionSpec::full(SectionKind::Education, "Education"),
    SectionSpec::compact(SectionKind::Certifications, "Certifications"),
    SectionSpec::compact(SectionKind::Projects, "Projects"),
    SectionSpec::compact(SectionKind::Languages, "Languages"),
];

pub static STYLE: TemplateStyle = TemplateStyle {
    id: TemplateId::Engineering,
    name: "Engineering",
    description: "Technical with highlight bar",
    family: FAMILY,
    palette: Palette {
        text: INK,
        muted: MUTED,
    },
    page_margin: 45.0,
    arrangement: Arrangement::SingleColumn,
    header: HeaderStyle {
        name: TextStyle::new(FontSpec::bold(FAMILY), 20.0, STEEL).centered(),
        contact: TextStyle::new(FontSpec::regular(FAMILY), 10.0, INK).centered(),
        contact_delimiter: " | ",
        summary: Some(TextStyle::new(FontSpec::regular(FAMILY), 11.0, MUTED).centered()),
        website: Some(TextStyle::new(FontSpec::regular(FAMILY), 10.0, STEEL).centered()),
        contact_in_section: false,
        contact_labels: false,
        border: Some((2.0, STEEL)),
        margin_bottom: 15.0,
    },
    heading: HeadingStyle {
        text: TextStyle::new(FontSpec::bold(FAMILY), 12.0, STEEL),
        margin_top: 12.0,
        margin_bottom: 8.0,
        underline: None,
        band: Some(BAND),
    },
    entry: EntryStyle {
        layout: EntryLayout::Engineering,
        title: TextStyle::new(FontSpec::bold(FAMILY), 11.0, INK),
        subtitle: TextStyle::new(FontSpec::italic(FAMILY), 10.0, Rgb::from_hex(0x444444)),
        meta: TextStyle::new(FontSpec::regular(FAMILY), 10.0, MUTED),
        body: TextStyle::new(FontSpec::regular(FAMILY), 10.0, INK).with_line_height(1.4),
        indent: 10.0,
        detail_bullet: Some("\u{2022} "),
        gap_after: 10.0,
    },
    skills: SkillsPresentation::Categorized,
    sections: SECTIONS,
    sidebar_sections: &[],
    list_bullet: Some("\u{2022} "),
    cursor: CursorSpec::standard(false),
};
