//! Professional: navy accents, summary inside the header, skills as chips.
//! Only experience, education and skills are shown.

use crate::layout::{FontFamily, FontSpec, Rgb, TextStyle};
use crate::models::TemplateId;
use crate::templates::style::{
    Arrangement, CursorSpec, EntryLayout, EntryStyle, HeaderStyle, HeadingStyle, Palette,
    SectionKind, SectionSpec, SkillsPresentation, TemplateStyle,
};

const FAMILY: FontFamily = FontFamily::Helvetica;
const NAVY: Rgb = Rgb::from_hex(0x1a365d);
const SLATE: Rgb = Rgb::from_hex(0x4a5568);
const INK: Rgb = Rgb::from_hex(0x2d3748);

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::full(SectionKind::Experience, "Professional Experience"),
    SectionSpec::full(SectionKind::Education, "Education"),
    SectionSpec::full(SectionKind::Skills, "Skills"),
];

pub static STYLE: TemplateStyle = TemplateStyle {
    id: TemplateId::Professional,
    name: "Professional",
    description: "Traditional with blue accents",
    family: FAMILY,
    palette: Palette {
        text: INK,
        muted: SLATE,
    },
    page_margin: 50.0,
    arrangement: Arrangement::SingleColumn,
    header: HeaderStyle {
        name: TextStyle::new(FontSpec::bold(FAMILY), 24.0, NAVY),
        contact: TextStyle::new(FontSpec::regular(FAMILY), 12.0, SLATE),
        contact_delimiter: " | ",
        summary: Some(TextStyle::new(FontSpec::regular(FAMILY), 11.0, SLATE).with_line_height(1.4)),
        website: None,
        contact_in_section: false,
        contact_labels: false,
        border: None,
        margin_bottom: 20.0,
    },
    heading: HeadingStyle {
        text: TextStyle::new(FontSpec::bold(FAMILY), 16.0, NAVY),
        margin_top: 20.0,
        margin_bottom: 10.0,
        underline: Some((1.0, Rgb::from_hex(0xcbd5e0))),
        band: None,
    },
    entry: EntryStyle {
        layout: EntryLayout::Stacked,
        title: TextStyle::new(FontSpec::bold(FAMILY), 12.0, INK),
        subtitle: TextStyle::new(FontSpec::regular(FAMILY), 10.0, SLATE),
        meta: TextStyle::new(FontSpec::regular(FAMILY), 10.0, SLATE),
        body: TextStyle::new(FontSpec::regular(FAMILY), 10.0, INK).with_line_height(1.4),
        indent: 0.0,
        detail_bullet: None,
        gap_after: 15.0,
    },
    skills: SkillsPresentation::Chips {
        prefix: None,
        text: TextStyle::new(FontSpec::regular(FAMILY), 10.0, INK),
        background: Some(Rgb::from_hex(0xf7fafc)),
    },
    sections: SECTIONS,
    sidebar_sections: &[],
    list_bullet: None,
    cursor: CursorSpec::standard(true),
};
