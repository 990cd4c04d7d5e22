//! PDF serialization of a laid-out `Document`.
//!
//! Text uses the base-14 Type1 fonts with WinAnsi encoding, so no font program is
//! embedded. The writer emits no timestamps: the same document always produces the
//! same bytes.

use bytes::Bytes;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

use crate::errors::BuilderError;
use crate::layout::{Document, DrawOp, FilledRect, FontSpec, Rgb, Stroke, TextRun};

/// Allocates object ids in write order.
struct RefAllocator(i32);

impl RefAllocator {
    fn next(&mut self) -> Ref {
        self.0 += 1;
        Ref::new(self.0)
    }
}

/// Resource name of a font, `F0`..`F7` in `FontSpec::ALL` order.
fn font_name(font: &FontSpec) -> Option<String> {
    FontSpec::ALL
        .iter()
        .position(|f| f == font)
        .map(|index| format!("F{index}"))
}

/// Serializes every page of `document` into one PDF file.
pub fn write_pdf(document: &Document) -> Result<Bytes, BuilderError> {
    document.validate()?;

    let mut alloc = RefAllocator(0);
    let catalog_id = alloc.next();
    let tree_id = alloc.next();
    let info_id = alloc.next();
    let font_ids: Vec<Ref> = FontSpec::ALL.iter().map(|_| alloc.next()).collect();
    let page_ids: Vec<(Ref, Ref)> = document
        .pages
        .iter()
        .map(|_| (alloc.next(), alloc.next()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page, _)| *page))
        .count(page_ids.len() as i32);
    pdf.document_info(info_id)
        .title(TextStr(&document.title))
        .producer(TextStr(concat!("resume-builder ", env!("CARGO_PKG_VERSION"))));

    for (font, id) in FontSpec::ALL.iter().zip(&font_ids) {
        pdf.type1_font(*id)
            .base_font(Name(font.pdf_base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let size = document.page_size;
    let media_box = Rect::new(0.0, 0.0, size.width, size.height);
    let names: Vec<String> = (0..FontSpec::ALL.len()).map(|i| format!("F{i}")).collect();

    for (page, (page_id, content_id)) in document.pages.iter().zip(&page_ids) {
        let content = page_content(&page.ops, size.height)?;
        pdf.stream(*content_id, &content);

        let mut pdf_page = pdf.page(*page_id);
        pdf_page.media_box(media_box);
        pdf_page.parent(tree_id);
        pdf_page.contents(*content_id);
        let mut resources = pdf_page.resources();
        let mut fonts = resources.fonts();
        for (name, id) in names.iter().zip(&font_ids) {
            fonts.pair(Name(name.as_bytes()), *id);
        }
        fonts.finish();
        resources.finish();
        pdf_page.finish();
    }

    let bytes = pdf.finish();
    debug!(
        pages = document.page_count(),
        bytes = bytes.len(),
        "PDF serialized"
    );
    Ok(Bytes::from(bytes))
}

/// Content stream for one page. Input is y-down from the top; PDF is y-up.
fn page_content(ops: &[DrawOp], page_height: f32) -> Result<Vec<u8>, BuilderError> {
    let mut content = Content::new();
    for op in ops {
        match op {
            DrawOp::Rect(rect) => fill_rect(&mut content, rect, page_height),
            DrawOp::Line(stroke) => stroke_line(&mut content, stroke, page_height),
            DrawOp::Text(run) => show_text(&mut content, run, page_height)?,
        }
    }
    Ok(content.finish())
}

fn set_fill(content: &mut Content, color: Rgb) {
    let [r, g, b] = color.to_unit();
    content.set_fill_rgb(r, g, b);
}

fn fill_rect(content: &mut Content, rect: &FilledRect, page_height: f32) {
    set_fill(content, rect.color);
    content.rect(rect.x, page_height - rect.y - rect.height, rect.width, rect.height);
    content.fill_nonzero();
}

fn stroke_line(content: &mut Content, stroke: &Stroke, page_height: f32) {
    let [r, g, b] = stroke.color.to_unit();
    content.set_stroke_rgb(r, g, b);
    content.set_line_width(stroke.width);
    content.move_to(stroke.x1, page_height - stroke.y1);
    content.line_to(stroke.x2, page_height - stroke.y2);
    content.stroke();
}

fn show_text(content: &mut Content, run: &TextRun, page_height: f32) -> Result<(), BuilderError> {
    let name = font_name(&run.font)
        .ok_or_else(|| BuilderError::Pdf(format!("no font resource for {:?}", run.font)))?;
    let encoded = encode_win_ansi(&run.text);

    set_fill(content, run.color);
    content.begin_text();
    content.set_font(Name(name.as_bytes()), run.size);
    content.next_line(run.x, page_height - run.baseline);
    content.show(Str(&encoded));
    content.end_text();
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Maps text to WinAnsi (CP1252) bytes; unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}
