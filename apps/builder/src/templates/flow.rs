//! Flow renderer: turns a template descriptor and résumé content into a block
//! tree and hands it to the `FlowEngine`.

use crate::layout::{
    Block, ChipStyle, Column, ColumnBackground, Document, Edges, FlowEngine, PageLayout,
    PageSize, TextStyle,
};
use crate::models::Resume;
use crate::templates::content::{
    self, Entry, HeaderContent, SectionBody, SectionContent,
};
use crate::templates::style::{Arrangement, SkillsPresentation, TemplateStyle};

/// Space between a label and the line it introduces.
const LINE_GAP: f32 = 2.0;
/// Space above the detail lines of an entry.
const DETAIL_GAP: f32 = 4.0;
/// Space below the header text when it carries a bottom border.
const BORDER_PADDING: f32 = 10.0;

pub fn render(resume: &Resume, style: &TemplateStyle, orphan_control: bool) -> Document {
    let layout = page_layout(resume, style);
    FlowEngine::new(orphan_control).paginate(&layout, &document_title(resume))
}

pub(crate) fn document_title(resume: &Resume) -> String {
    let name = resume.personal_info.full_name.trim();
    if name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{name} - Resume")
    }
}

/// Arranges header and sections into the template's columns.
pub fn page_layout(resume: &Resume, style: &TemplateStyle) -> PageLayout {
    let page = PageSize::A4;
    let margin = style.page_margin;
    let header = header_block(&content::header(resume, style), style);
    let main = section_blocks(&content::build_sections(resume, style.sections, style), style);

    match style.arrangement {
        Arrangement::SingleColumn => {
            let mut blocks = vec![header];
            blocks.extend(main);
            PageLayout::single_column(page, margin, blocks)
        }
        Arrangement::Sidebar {
            inset,
            width,
            padding,
            gutter,
            background,
            holds_header,
        } => {
            let side = section_blocks(
                &content::build_sections(resume, style.sidebar_sections, style),
                style,
            );
            let main_x = inset + width + gutter;
            let (main_blocks, side_blocks) = if holds_header {
                (main, prepend(header, side))
            } else {
                (prepend(header, main), side)
            };

            let main_column = Column {
                x: main_x,
                width: page.width - main_x - margin,
                top: margin,
                bottom: page.height - margin,
                blocks: main_blocks,
                background: None,
            };
            let side_column = Column {
                x: inset + padding,
                width: width - 2.0 * padding,
                top: margin,
                bottom: page.height - margin,
                blocks: side_blocks,
                background: Some(ColumnBackground {
                    x: inset,
                    width,
                    color: background,
                }),
            };

            // The column holding the name goes first so it is emitted first.
            let columns = if holds_header {
                vec![side_column, main_column]
            } else {
                vec![main_column, side_column]
            };
            PageLayout { page, columns }
        }
    }
}

fn prepend(first: Block, rest: Vec<Block>) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(rest.len() + 1);
    blocks.push(first);
    blocks.extend(rest);
    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn header_block(header: &HeaderContent, style: &TemplateStyle) -> Block {
    let hs = &style.header;
    let mut children = vec![Block::text(header.name.clone(), hs.name)];

    if let (Some(summary), Some(text)) = (&header.summary, hs.summary) {
        children.push(Block::text(summary.clone(), text).margins(6.0, 0.0));
    }
    if let Some(line) = &header.contact_line {
        children.push(Block::text(line.clone(), hs.contact).margins(4.0, 0.0));
    }
    if let (Some(website), Some(text)) = (&header.website, hs.website) {
        children.push(Block::text(website.clone(), text).margins(4.0, 0.0));
    }

    let block = Block::group(children).margins(0.0, hs.margin_bottom);
    match hs.border {
        Some((width, color)) => block
            .padding(Edges {
                bottom: BORDER_PADDING,
                ..Edges::ZERO
            })
            .border_bottom(width, color),
        None => block,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn section_blocks(sections: &[SectionContent], style: &TemplateStyle) -> Vec<Block> {
    sections
        .iter()
        .map(|section| {
            let mut children = vec![heading_block(section.title, style)];
            children.extend(body_blocks(&section.body, style));
            Block::group(children)
        })
        .collect()
}

fn heading_block(title: &str, style: &TemplateStyle) -> Block {
    let heading = &style.heading;
    let mut block = Block::text(title, heading.text).margins(heading.margin_top, heading.margin_bottom);
    if let Some((width, color)) = heading.underline {
        block = block
            .padding(Edges {
                bottom: 4.0,
                ..Edges::ZERO
            })
            .border_bottom(width, color);
    }
    if let Some(color) = heading.band {
        block = block.background(color).padding(Edges::symmetric(4.0, 8.0));
    }
    block.keep_with_next()
}

fn body_blocks(body: &SectionBody, style: &TemplateStyle) -> Vec<Block> {
    let entry = &style.entry;
    match body {
        SectionBody::Paragraph(text) => vec![Block::text(text.clone(), entry.body)],
        SectionBody::Entries(entries) => entries.iter().map(|e| entry_block(e, style)).collect(),
        SectionBody::Items(items) => items
            .iter()
            .map(|item| Block::text(item.clone(), entry.body).margins(0.0, LINE_GAP))
            .collect(),
        SectionBody::Chips(items) => vec![chips_block(items, style)],
        SectionBody::Categories(categories) => categories
            .iter()
            .map(|category| {
                let mut children = vec![Block::text(category.label, label_style(style))
                    .margins(0.0, LINE_GAP)
                    .keep_with_next()];
                children.extend(
                    category
                        .items
                        .iter()
                        .map(|item| Block::text(item.clone(), entry.body).margins(0.0, LINE_GAP)),
                );
                Block::group(children).margins(0.0, DETAIL_GAP)
            })
            .collect(),
        SectionBody::Contact(fields) => fields
            .iter()
            .map(|field| {
                let value = Block::text(field.value.clone(), entry.body);
                if style.header.contact_labels {
                    Block::group(vec![
                        Block::text(field.label, label_style(style)),
                        value.margins(LINE_GAP, 0.0),
                    ])
                    .keep_together()
                    .margins(0.0, DETAIL_GAP * 2.0)
                } else {
                    value.margins(0.0, DETAIL_GAP)
                }
            })
            .collect(),
    }
}

/// Bold body text for category and contact labels.
fn label_style(style: &TemplateStyle) -> TextStyle {
    TextStyle {
        font: style.entry.title.font,
        ..style.entry.body
    }
}

fn chips_block(items: &[String], style: &TemplateStyle) -> Block {
    let (prefix, text, background) = match style.skills {
        SkillsPresentation::Chips {
            prefix,
            text,
            background,
        } => (prefix, text, background),
        _ => (None, style.entry.body, None),
    };
    let labels = items
        .iter()
        .map(|item| format!("{}{item}", prefix.unwrap_or("")))
        .collect();
    let chip = ChipStyle {
        padding: if background.is_some() {
            Edges::symmetric(3.0, 8.0)
        } else {
            Edges::symmetric(1.0, 0.0)
        },
        background,
        gap: 6.0,
    };
    Block::chips(labels, text, chip)
}

/// One experience, education, certification or project; never split across pages
/// when it fits on one.
fn entry_block(entry: &Entry, style: &TemplateStyle) -> Block {
    let es = &style.entry;
    let mut children = Vec::new();

    if !entry.title.is_empty() || !entry.title_right.is_empty() {
        if entry.title_right.is_empty() {
            children.push(Block::text(entry.title.clone(), es.title));
        } else {
            children.push(Block::split(
                entry.title.clone(),
                es.title,
                entry.title_right.clone(),
                es.meta,
            ));
        }
    }
    if let Some(subtitle) = &entry.subtitle {
        children.push(Block::text(subtitle.clone(), es.subtitle).margins(LINE_GAP, 0.0));
    }
    if let Some(meta) = &entry.meta {
        children.push(Block::text(meta.clone(), es.meta).margins(LINE_GAP, 0.0));
    }
    for (i, detail) in entry.details.iter().enumerate() {
        let top = if i == 0 { DETAIL_GAP } else { LINE_GAP };
        children.push(
            Block::text(detail.clone(), es.body)
                .margins(top, 0.0)
                .padding(Edges {
                    left: es.indent,
                    ..Edges::ZERO
                }),
        );
    }

    Block::group(children)
        .keep_together()
        .margins(0.0, es.gap_after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::block::BlockKind;
    use crate::models::{Experience, TemplateId};
    use crate::templates::registry::resolve;

    #[test]
    fn test_sidebar_header_column_comes_first() {
        let resume = Resume::default();
        let layout = page_layout(&resume, resolve(TemplateId::Minimalist));
        assert_eq!(layout.columns.len(), 2);
        assert!(layout.columns[0].background.is_some());
        assert!(layout.columns[0].x < layout.columns[1].x);

        let layout = page_layout(&resume, resolve(TemplateId::Modern));
        assert!(layout.columns[0].background.is_none());
        assert!(layout.columns[1].x < layout.columns[0].x);
    }

    #[test]
    fn test_columns_stay_on_the_page() {
        let resume = Resume::default();
        for id in TemplateId::ALL {
            let layout = page_layout(&resume, resolve(id));
            for column in &layout.columns {
                assert!(column.x >= 0.0 && column.width > 0.0, "{id}");
                assert!(column.x + column.width <= layout.page.width, "{id}");
            }
        }
    }

    #[test]
    fn test_headings_keep_with_next() {
        let resume = Resume::default().with_experience(vec![Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            ..Experience::new()
        }]);
        let layout = page_layout(&resume, resolve(TemplateId::Classic));
        let sections = &layout.columns[0].blocks[1..];
        assert!(!sections.is_empty());
        for section in sections {
            let BlockKind::Group(children) = &section.kind else {
                panic!("sections are groups");
            };
            assert!(children[0].keep_with_next);
            assert!(children.len() >= 2);
        }
    }

    #[test]
    fn test_entries_are_kept_together() {
        let entry = Entry {
            title: "Engineer".to_string(),
            title_right: String::new(),
            subtitle: Some("Acme | Jan 2020 - Present".to_string()),
            meta: None,
            details: vec!["Built things".to_string()],
        };
        let block = entry_block(&entry, resolve(TemplateId::Classic));
        assert!(block.keep_together);
        let BlockKind::Group(children) = &block.kind else {
            panic!("entries are groups");
        };
        assert_eq!(children.len(), 3);
    }

    #[test]
    fn test_document_title_uses_name() {
        assert_eq!(document_title(&Resume::default()), "John Doe - Resume");
        let mut resume = Resume::default();
        resume.personal_info.full_name = "  ".to_string();
        assert_eq!(document_title(&resume), "Resume");
    }
}
