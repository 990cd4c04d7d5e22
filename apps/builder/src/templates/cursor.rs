//! Cursor renderer: emits the same header and sections as the flow renderer,
//! line by line, on a `CursorCanvas`.

use crate::layout::{
    Align, ColumnId, CursorCanvas, CursorColumn, Document, FontSpec, Pen, RuleStyle, TextStyle,
    MM_TO_PT,
};
use crate::layout::cursor::PAGE_WIDTH_MM;
use crate::models::Resume;
use crate::templates::content::{self, HeaderContent, SectionBody, SectionContent};
use crate::templates::flow::document_title;
use crate::templates::style::{Arrangement, TemplateStyle};

const FIRST: ColumnId = ColumnId(0);
const SECOND: ColumnId = ColumnId(1);

/// Pens derived from a template for the cursor's fixed size ladder.
struct Pens {
    name: Pen,
    contact: Pen,
    heading: Pen,
    title: Pen,
    subtitle: Pen,
    body: Pen,
    label: Pen,
}

impl Pens {
    fn for_style(style: &TemplateStyle) -> Self {
        let spec = &style.cursor;
        let family = style.family;
        let pen = |text: &TextStyle, size: f32| {
            let pen = Pen::new(text.font, size, text.color);
            if text.align == Align::Center {
                pen.centered()
            } else {
                pen
            }
        };

        Self {
            name: pen(&style.header.name, spec.name_size),
            contact: pen(&style.header.contact, spec.contact_size),
            heading: Pen::new(FontSpec::bold(family), spec.heading_size, style.heading.text.color),
            title: Pen::new(FontSpec::bold(family), spec.title_size, style.entry.title.color),
            subtitle: Pen::new(style.entry.subtitle.font, spec.body_size, style.entry.subtitle.color),
            body: Pen::new(FontSpec::regular(family), spec.body_size, style.palette.text),
            label: Pen::new(FontSpec::bold(family), spec.body_size, style.palette.text),
        }
    }
}

pub fn render(resume: &Resume, style: &TemplateStyle, orphan_control: bool) -> Document {
    let spec = &style.cursor;
    let metrics = spec.metrics;
    let pens = Pens::for_style(style);

    let header = content::header(resume, style);
    let main = content::build_sections(resume, style.sections, style);
    let side = content::build_sections(resume, style.sidebar_sections, style);

    let holds_header = matches!(
        style.arrangement,
        Arrangement::Sidebar {
            holds_header: true,
            ..
        }
    );

    let mut canvas = match spec.sidebar {
        Some(sidebar) => {
            let main_column = CursorColumn {
                x: sidebar.main_x,
                width: PAGE_WIDTH_MM - sidebar.main_x - metrics.side_margin,
                start_y: metrics.top_margin,
            };
            let side_column = CursorColumn {
                x: sidebar.content_x,
                width: sidebar.content_width,
                start_y: sidebar.start_y,
            };
            // Header column first, matching the flow renderer's emission order.
            let columns = if holds_header {
                [side_column, main_column]
            } else {
                [main_column, side_column]
            };
            let mut canvas = CursorCanvas::with_columns(metrics, orphan_control, &columns);
            canvas.add_background(sidebar.shade_x, sidebar.shade_width, sidebar.background);
            canvas
        }
        None => CursorCanvas::new(metrics, orphan_control),
    };

    draw_header(&mut canvas, FIRST, &header, style, &pens);

    if spec.sidebar.is_some() {
        // Each column keeps its own sections; the first column also holds the header.
        let (first, second) = if holds_header { (&side, &main) } else { (&main, &side) };
        draw_sections(&mut canvas, FIRST, first, style, &pens);
        draw_sections(&mut canvas, SECOND, second, style, &pens);
    } else {
        let mut sections = main;
        sections.extend(side);
        draw_sections(&mut canvas, FIRST, &sections, style, &pens);
    }

    canvas.finish(&document_title(resume))
}

fn draw_header(
    canvas: &mut CursorCanvas,
    column: ColumnId,
    header: &HeaderContent,
    style: &TemplateStyle,
    pens: &Pens,
) {
    let hs = &style.header;
    canvas.wrapped(column, &hs.name.transform(&header.name), pens.name);

    if let (Some(summary), Some(text)) = (&header.summary, hs.summary) {
        let pen = Pen {
            color: text.color,
            ..pens.body
        };
        let pen = if text.align == Align::Center { pen.centered() } else { pen };
        canvas.wrapped(column, summary, pen);
    }
    if let Some(line) = &header.contact_line {
        canvas.wrapped(column, line, pens.contact);
    }
    if let (Some(website), Some(text)) = (&header.website, hs.website) {
        let pen = Pen {
            color: text.color,
            ..pens.contact
        };
        canvas.text(column, website, pen);
    }
    if let Some((width, color)) = hs.border {
        canvas.rule(
            column,
            RuleStyle {
                thickness: width,
                color,
            },
        );
    }
    canvas.gap(column, style.cursor.header_gap);
}

fn draw_sections(
    canvas: &mut CursorCanvas,
    column: ColumnId,
    sections: &[SectionContent],
    style: &TemplateStyle,
    pens: &Pens,
) {
    let heading = &style.heading;
    let rule = match heading.underline {
        Some((thickness, color)) => Some(RuleStyle { thickness, color }),
        None if style.cursor.heading_rule => Some(RuleStyle {
            thickness: 0.5,
            color: style.palette.muted,
        }),
        None => None,
    };

    for section in sections {
        canvas.heading(
            column,
            &heading.text.transform(section.title),
            pens.heading,
            rule,
            heading.band,
            pens.body,
        );
        draw_body(canvas, column, &section.body, style, pens);
        canvas.gap(column, style.cursor.section_gap);
    }
}

fn draw_body(
    canvas: &mut CursorCanvas,
    column: ColumnId,
    body: &SectionBody,
    style: &TemplateStyle,
    pens: &Pens,
) {
    let indent_mm = style.entry.indent / MM_TO_PT;
    match body {
        SectionBody::Paragraph(text) => canvas.wrapped(column, text, pens.body),
        SectionBody::Entries(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    canvas.gap(column, style.cursor.entry_gap);
                }
                if entry.title_right.is_empty() {
                    canvas.text(column, &entry.title, pens.title);
                } else {
                    canvas.split(column, &entry.title, pens.title, &entry.title_right, pens.subtitle);
                }
                if let Some(subtitle) = &entry.subtitle {
                    canvas.text(column, subtitle, pens.subtitle);
                }
                if let Some(meta) = &entry.meta {
                    canvas.text(column, meta, pens.body);
                }
                for detail in &entry.details {
                    canvas.wrapped_indented(column, detail, pens.body, indent_mm);
                }
            }
        }
        SectionBody::Items(items) => {
            for item in items {
                canvas.wrapped(column, item, pens.body);
            }
        }
        SectionBody::Chips(items) => canvas.wrapped(column, &items.join(" \u{2022} "), pens.body),
        SectionBody::Categories(categories) => {
            for category in categories {
                canvas.text(column, category.label, pens.label);
                for item in &category.items {
                    canvas.wrapped(column, item, pens.body);
                }
            }
        }
        SectionBody::Contact(fields) => {
            for field in fields {
                if style.header.contact_labels {
                    canvas.text(column, field.label, pens.label);
                }
                canvas.wrapped(column, &field.value, pens.body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::get_metrics;
    use crate::layout::DrawOp;
    use crate::models::{Experience, TemplateId};
    use crate::templates::registry::resolve;

    #[test]
    fn test_name_is_first_text() {
        for id in TemplateId::ALL {
            let style = resolve(id);
            let document = render(&Resume::default(), style, true);
            let first = document.text_runs().next().unwrap();
            assert_eq!(first.text, style.header.name.transform("John Doe"), "{id}");
        }
    }

    #[test]
    fn test_sidebar_background_on_every_page() {
        let style = resolve(TemplateId::Modern);
        let skills = (0..120).map(|i| format!("Skill number {i}")).collect();
        let resume = Resume::default().with_skills(skills);
        let document = render(&resume, style, true);
        assert!(document.page_count() > 1);
        for page in &document.pages {
            assert!(matches!(page.ops.first(), Some(DrawOp::Rect(_))));
        }
    }

    #[test]
    fn test_long_entry_lines_stay_inside_margins() {
        let experience = Experience {
            position: "Senior Staff Software Engineer, Platform".to_string(),
            company: "International Business Machines Corporation".to_string(),
            location: "Armonk, New York, United States".to_string(),
            start_date: "2018-04".to_string(),
            description: "Led the migration of billing services".to_string(),
            ..Experience::new()
        };
        let resume = Resume::default().with_experience(vec![experience]);
        let right_edge = (PAGE_WIDTH_MM - 20.0) * MM_TO_PT + 0.01;

        for id in TemplateId::ALL {
            let document = render(&resume, resolve(id), true);
            for run in document.text_runs() {
                let end = run.x + get_metrics(&run.font).text_width(&run.text, run.size);
                assert!(run.x >= 0.0 && end <= right_edge, "{id}: '{}' ends at {end}", run.text);
            }
        }
    }

    #[test]
    fn test_single_column_has_no_background() {
        let document = render(&Resume::default(), resolve(TemplateId::Classic), true);
        assert!(document.pages[0].ops.iter().all(|op| !matches!(op, DrawOp::Rect(_))));
    }
}
