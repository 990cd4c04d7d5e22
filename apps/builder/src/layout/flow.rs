//! Flow-based pagination of a block tree.
//!
//! # Breaking rules
//! - Content breaks only at block boundaries, or between the lines / chip rows of a
//!   single block when that block alone is taller than a page's content area.
//! - A leaf block that does not fit the remaining space but fits a fresh page moves whole.
//! - A `keep_together` group that fits a fresh page moves whole; otherwise it splits
//!   between its children.
//! - With orphan control, a `keep_with_next` block moves to the next page unless it
//!   fits together with the leading unit of its next sibling.
//! - Top margins are dropped at the top of a page.
//!
//! Each column of a `PageLayout` flows independently; the document has as many
//! pages as its longest column.

use tracing::debug;

use crate::layout::block::{Block, BlockKind, BoxStyle, ChipStyle, Column, PageLayout};
use crate::layout::document::{Document, DrawOp, FilledRect, Stroke, TextRun};
use crate::layout::font_metrics::get_metrics;
use crate::layout::style::{Align, TextStyle};
use crate::layout::wrap::wrap_text;

/// Tolerance for floating-point fit checks.
const EPSILON: f32 = 0.01;
/// Baseline position within the em box, as a fraction of font size.
const ASCENT_RATIO: f32 = 0.78;
/// Minimum space between the left and right halves of a split line.
const SPLIT_GAP: f32 = 12.0;

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct FlowEngine {
    pub orphan_control: bool,
}

impl Default for FlowEngine {
    fn default() -> Self {
        Self {
            orphan_control: true,
        }
    }
}

impl FlowEngine {
    pub fn new(orphan_control: bool) -> Self {
        Self { orphan_control }
    }

    /// Lays out every column of `layout` and merges them into a document.
    pub fn paginate(&self, layout: &PageLayout, title: &str) -> Document {
        let backgrounds: Vec<FilledRect> = layout
            .columns
            .iter()
            .filter_map(|c| c.background)
            .map(|bg| FilledRect {
                x: bg.x,
                y: 0.0,
                width: bg.width,
                height: layout.page.height,
                color: bg.color,
            })
            .collect();

        let columns = layout
            .columns
            .iter()
            .map(|column| self.flow_column(column))
            .collect();

        let document = Document::from_columns(title, layout.page, &backgrounds, columns);
        debug!(
            pages = document.page_count(),
            columns = layout.columns.len(),
            "Flow pagination complete"
        );
        document
    }

    fn flow_column(&self, column: &Column) -> Vec<Vec<DrawOp>> {
        let mut cursor = ColumnCursor::new(column);
        self.place_blocks(&mut cursor, &column.blocks);
        cursor.pages
    }

    fn place_blocks(&self, cursor: &mut ColumnCursor, blocks: &[Block]) {
        for (i, block) in blocks.iter().enumerate() {
            if self.orphan_control && block.keep_with_next && !cursor.fresh {
                if let Some(next) = blocks.get(i + 1) {
                    self.keep_with(cursor, block, next);
                }
            }
            self.place(cursor, block);
        }
    }

    /// Breaks before `block` when it would otherwise end the page without `next`'s lead.
    fn keep_with(&self, cursor: &mut ColumnCursor, block: &Block, next: &Block) {
        let own = self.content_height(block, cursor.width) + block.frame.margin_bottom;
        let lead = self.lead_height(next, cursor.width, cursor.capacity());
        let needed = cursor.top_margin(block.frame.margin_top) + own + lead;

        if !cursor.fits(needed) && own + lead <= cursor.capacity() {
            debug!(page = cursor.pages.len(), "Keeping block with its successor");
            cursor.new_page();
        }
    }

    fn place(&self, cursor: &mut ColumnCursor, block: &Block) {
        match &block.kind {
            BlockKind::Spacer(height) => {
                if !cursor.fresh {
                    cursor.y += height;
                }
            }
            BlockKind::Group(children) => self.place_group(cursor, block, children),
            kind => {
                let frame = &block.frame;
                let inner_x = cursor.x + frame.padding.left;
                let inner_w = cursor.width - frame.padding.left - frame.padding.right;
                let (units, spacing) = leaf_units(kind, inner_x, inner_w);
                place_units(cursor, frame, units, spacing);
            }
        }
    }

    fn place_group(&self, cursor: &mut ColumnCursor, block: &Block, children: &[Block]) {
        let frame = &block.frame;
        let height = self.content_height(block, cursor.width);

        if block.keep_together
            && !cursor.fits(cursor.top_margin(frame.margin_top) + height)
            && height <= cursor.capacity()
        {
            cursor.new_page();
        }

        cursor.y += cursor.top_margin(frame.margin_top);
        let start_page = cursor.page_index();
        let start_y = cursor.y;
        let start_op = cursor.current_ops_len();

        let (outer_x, outer_w) = (cursor.x, cursor.width);
        cursor.x += frame.padding.left;
        cursor.width -= frame.padding.left + frame.padding.right;
        cursor.y += frame.padding.top;

        self.place_blocks(cursor, children);

        cursor.x = outer_x;
        cursor.width = outer_w;
        cursor.y += frame.padding.bottom;

        if let Some(color) = frame.background {
            let end_page = cursor.page_index();
            for page in start_page..=end_page {
                let top = if page == start_page { start_y } else { cursor.top };
                let bottom = if page == end_page { cursor.y } else { cursor.bottom };
                let index = if page == start_page { start_op } else { 0 };
                cursor.insert(
                    page,
                    index,
                    DrawOp::Rect(FilledRect {
                        x: outer_x,
                        y: top,
                        width: outer_w,
                        height: bottom - top,
                        color,
                    }),
                );
            }
        }

        if let Some(border) = frame.border_bottom {
            cursor.push(DrawOp::Line(Stroke {
                x1: outer_x,
                y1: cursor.y + border.width / 2.0,
                x2: outer_x + outer_w,
                y2: cursor.y + border.width / 2.0,
                width: border.width,
                color: border.color,
            }));
            cursor.y += border.width;
        }

        cursor.fresh = false;
        cursor.y += frame.margin_bottom;
    }

    // ── Measurement ─────────────────────────────────────────────────────────

    /// Height of a block's border box (padding, content and bottom border; no margins).
    fn content_height(&self, block: &Block, width: f32) -> f32 {
        let frame = &block.frame;
        let inner_w = width - frame.padding.left - frame.padding.right;
        let inner = match &block.kind {
            BlockKind::Spacer(height) => return *height,
            BlockKind::Group(children) => children
                .iter()
                .map(|child| {
                    child.frame.margin_top
                        + self.content_height(child, inner_w)
                        + child.frame.margin_bottom
                })
                .sum(),
            kind => {
                let (units, spacing) = leaf_units(kind, 0.0, inner_w);
                units_height(&units, spacing)
            }
        };
        frame.padding.top + inner + frame.padding.bottom + border_width(frame)
    }

    /// Space the first placed unit of `block` needs, including its top margin.
    fn lead_height(&self, block: &Block, width: f32, capacity: f32) -> f32 {
        let frame = &block.frame;
        let inner_w = width - frame.padding.left - frame.padding.right;
        let full = self.content_height(block, width);

        match &block.kind {
            BlockKind::Spacer(height) => *height,
            BlockKind::Group(children) => {
                if block.keep_together && full <= capacity {
                    frame.margin_top + full
                } else {
                    let first = children
                        .first()
                        .map(|child| self.lead_height(child, inner_w, capacity))
                        .unwrap_or(0.0);
                    frame.margin_top + frame.padding.top + first
                }
            }
            kind => {
                if full <= capacity {
                    frame.margin_top + full
                } else {
                    let (units, _) = leaf_units(kind, 0.0, inner_w);
                    let first = units.first().map(|u| u.height).unwrap_or(0.0);
                    frame.margin_top + frame.padding.top + first
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Column cursor
// ────────────────────────────────────────────────────────────────────────────

struct ColumnCursor {
    x: f32,
    width: f32,
    top: f32,
    bottom: f32,
    y: f32,
    pages: Vec<Vec<DrawOp>>,
    /// Nothing with height has been placed on the current page yet.
    fresh: bool,
}

impl ColumnCursor {
    fn new(column: &Column) -> Self {
        Self {
            x: column.x,
            width: column.width,
            top: column.top,
            bottom: column.bottom,
            y: column.top,
            pages: vec![Vec::new()],
            fresh: true,
        }
    }

    fn capacity(&self) -> f32 {
        self.bottom - self.top
    }

    fn fits(&self, height: f32) -> bool {
        self.y + height <= self.bottom + EPSILON
    }

    fn top_margin(&self, margin: f32) -> f32 {
        if self.fresh {
            0.0
        } else {
            margin
        }
    }

    fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    fn current_ops_len(&self) -> usize {
        self.pages.last().map(Vec::len).unwrap_or(0)
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = self.top;
        self.fresh = true;
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    fn insert(&mut self, page: usize, index: usize, op: DrawOp) {
        if let Some(ops) = self.pages.get_mut(page) {
            let index = index.min(ops.len());
            ops.insert(index, op);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Leaf layout
// ────────────────────────────────────────────────────────────────────────────

/// An unbreakable horizontal slice of a leaf block: one text line or one chip row.
/// Op y-coordinates are relative to the unit's top edge.
struct Unit {
    height: f32,
    ops: Vec<DrawOp>,
}

fn border_width(frame: &BoxStyle) -> f32 {
    frame.border_bottom.map(|b| b.width).unwrap_or(0.0)
}

fn units_height(units: &[Unit], spacing: f32) -> f32 {
    let sum: f32 = units.iter().map(|u| u.height).sum();
    sum + spacing * units.len().saturating_sub(1) as f32
}

fn baseline_in_line(style: &TextStyle) -> f32 {
    (style.line_advance() - style.size) / 2.0 + style.size * ASCENT_RATIO
}

fn text_run(text: String, style: &TextStyle, x: f32, baseline: f32) -> DrawOp {
    DrawOp::Text(TextRun {
        x,
        baseline,
        text,
        font: style.font,
        size: style.size,
        color: style.color,
    })
}

fn aligned_x(line: &str, style: &TextStyle, x: f32, width: f32) -> f32 {
    let line_w = get_metrics(&style.font).text_width(line, style.size);
    match style.align {
        Align::Left => x,
        Align::Center => x + (width - line_w) / 2.0,
        Align::Right => x + width - line_w,
    }
}

/// Lays out a leaf block into units at content-box position `x` and `width`.
/// Returns the units and the vertical spacing between them.
fn leaf_units(kind: &BlockKind, x: f32, width: f32) -> (Vec<Unit>, f32) {
    match kind {
        BlockKind::Text { text, style } => {
            let text = style.transform(text);
            let units = wrap_text(&text, &style.font, style.size, width)
                .into_iter()
                .map(|line| {
                    let line_x = aligned_x(&line, style, x, width);
                    Unit {
                        height: style.line_advance(),
                        ops: vec![text_run(line, style, line_x, baseline_in_line(style))],
                    }
                })
                .collect();
            (units, 0.0)
        }
        BlockKind::Split {
            left,
            left_style,
            right,
            right_style,
        } => (
            vec![split_unit(left, left_style, right, right_style, x, width)],
            0.0,
        ),
        BlockKind::Chips { items, style, chip } => (chip_rows(items, style, chip, x, width), chip.gap),
        BlockKind::Rule { thickness, color } => (
            vec![Unit {
                height: *thickness,
                ops: vec![DrawOp::Line(Stroke {
                    x1: x,
                    y1: thickness / 2.0,
                    x2: x + width,
                    y2: thickness / 2.0,
                    width: *thickness,
                    color: *color,
                })],
            }],
            0.0,
        ),
        BlockKind::Spacer(_) | BlockKind::Group(_) => (Vec::new(), 0.0),
    }
}

fn split_unit(
    left: &str,
    left_style: &TextStyle,
    right: &str,
    right_style: &TextStyle,
    x: f32,
    width: f32,
) -> Unit {
    let left = left_style.transform(left);
    let right = right_style.transform(right);
    let right_w = get_metrics(&right_style.font).text_width(&right, right_style.size);

    let left_width = if right.is_empty() {
        width
    } else {
        (width - right_w - SPLIT_GAP).max(width * 0.3)
    };
    let lines = wrap_text(&left, &left_style.font, left_style.size, left_width);

    let left_adv = left_style.line_advance();
    let first_baseline = baseline_in_line(left_style);
    let mut ops: Vec<DrawOp> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| text_run(line.clone(), left_style, x, i as f32 * left_adv + first_baseline))
        .collect();

    let mut height = lines.len() as f32 * left_adv;
    if !right.is_empty() {
        let baseline = if lines.is_empty() {
            baseline_in_line(right_style)
        } else {
            first_baseline
        };
        height = height.max(right_style.line_advance());
        ops.push(text_run(right, right_style, x + width - right_w, baseline));
    }

    Unit { height, ops }
}

fn chip_rows(items: &[String], style: &TextStyle, chip: &ChipStyle, x: f32, width: f32) -> Vec<Unit> {
    let metrics = get_metrics(&style.font);
    let row_height = chip.padding.top + style.line_advance() + chip.padding.bottom;

    let mut rows: Vec<Vec<(String, f32)>> = Vec::new();
    let mut row: Vec<(String, f32)> = Vec::new();
    let mut row_w = 0.0_f32;

    for item in items {
        let label = style.transform(item);
        let chip_w = (metrics.text_width(&label, style.size) + chip.padding.left + chip.padding.right)
            .min(width);
        let gap = if row.is_empty() { 0.0 } else { chip.gap };
        if !row.is_empty() && row_w + gap + chip_w > width + EPSILON {
            rows.push(std::mem::take(&mut row));
            row_w = 0.0;
        }
        row_w += if row.is_empty() { 0.0 } else { chip.gap } + chip_w;
        row.push((label, chip_w));
    }
    if !row.is_empty() {
        rows.push(row);
    }

    rows.into_iter()
        .map(|row| {
            let mut ops = Vec::with_capacity(row.len() * 2);
            let mut chip_x = x;
            for (label, chip_w) in row {
                if let Some(color) = chip.background {
                    ops.push(DrawOp::Rect(FilledRect {
                        x: chip_x,
                        y: 0.0,
                        width: chip_w,
                        height: row_height,
                        color,
                    }));
                }
                ops.push(text_run(
                    label,
                    style,
                    chip_x + chip.padding.left,
                    chip.padding.top + baseline_in_line(style),
                ));
                chip_x += chip_w + chip.gap;
            }
            Unit {
                height: row_height,
                ops,
            }
        })
        .collect()
}

fn shifted(op: DrawOp, dy: f32) -> DrawOp {
    match op {
        DrawOp::Text(mut run) => {
            run.baseline += dy;
            DrawOp::Text(run)
        }
        DrawOp::Rect(mut rect) => {
            rect.y += dy;
            DrawOp::Rect(rect)
        }
        DrawOp::Line(mut line) => {
            line.y1 += dy;
            line.y2 += dy;
            DrawOp::Line(line)
        }
    }
}

/// Places a leaf block's units, whole when possible and unit by unit otherwise.
fn place_units(cursor: &mut ColumnCursor, frame: &BoxStyle, units: Vec<Unit>, spacing: f32) {
    let border = border_width(frame);
    let height = frame.padding.top + units_height(&units, spacing) + frame.padding.bottom + border;

    if !cursor.fits(cursor.top_margin(frame.margin_top) + height) && height <= cursor.capacity() {
        cursor.new_page();
    }
    let whole = cursor.fits(cursor.top_margin(frame.margin_top) + height);

    cursor.y += cursor.top_margin(frame.margin_top);
    let top = cursor.y;

    if whole {
        if let Some(color) = frame.background {
            cursor.push(DrawOp::Rect(FilledRect {
                x: cursor.x,
                y: top,
                width: cursor.width,
                height: height - border,
                color,
            }));
        }
    }

    let mut y = top + frame.padding.top;
    for (i, unit) in units.into_iter().enumerate() {
        if i > 0 {
            y += spacing;
        }
        if !whole && y + unit.height > cursor.bottom + EPSILON && y > cursor.top + EPSILON {
            cursor.new_page();
            y = cursor.top;
        }
        if !whole {
            if let Some(color) = frame.background {
                cursor.push(DrawOp::Rect(FilledRect {
                    x: cursor.x,
                    y,
                    width: cursor.width,
                    height: unit.height,
                    color,
                }));
            }
        }
        for op in unit.ops {
            cursor.push(shifted(op, y));
        }
        y += unit.height;
        cursor.fresh = false;
    }
    y += frame.padding.bottom;

    if let Some(b) = frame.border_bottom {
        cursor.push(DrawOp::Line(Stroke {
            x1: cursor.x,
            y1: y + b.width / 2.0,
            x2: cursor.x + cursor.width,
            y2: y + b.width / 2.0,
            width: b.width,
            color: b.color,
        }));
        y += b.width;
    }

    if height > 0.0 {
        cursor.fresh = false;
    }
    cursor.y = y + frame.margin_bottom;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::block::ColumnBackground;
    use crate::layout::style::{Edges, FontFamily, FontSpec, PageSize, Rgb};

    fn body() -> TextStyle {
        TextStyle::new(FontSpec::regular(FontFamily::Helvetica), 10.0, Rgb::BLACK)
    }

    fn heading(text: &str) -> Block {
        Block::text(text, TextStyle::new(FontSpec::bold(FontFamily::Helvetica), 14.0, Rgb::BLACK))
            .margins(20.0, 10.0)
            .keep_with_next()
    }

    fn entry(label: &str, lines: usize) -> Block {
        let mut children = vec![Block::text(label, body())];
        for i in 0..lines {
            children.push(Block::text(format!("{label} detail {i}"), body()));
        }
        Block::group(children).margins(0.0, 10.0).keep_together()
    }

    fn page_of(doc: &Document, needle: &str) -> Vec<usize> {
        doc.pages
            .iter()
            .enumerate()
            .filter(|(_, p)| p.text_runs().any(|r| r.text.contains(needle)))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_short_content_single_page() {
        let layout = PageLayout::single_column(PageSize::A4, 50.0, vec![heading("Skills"), entry("Rust", 2)]);
        let doc = FlowEngine::default().paginate(&layout, "t");
        assert_eq!(doc.page_count(), 1);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_overflow_creates_pages_without_splitting_entries() {
        let mut blocks = vec![heading("Experience")];
        for i in 0..30 {
            blocks.push(entry(&format!("Entry{i:02}"), 4));
        }
        let layout = PageLayout::single_column(PageSize::A4, 50.0, blocks);
        let doc = FlowEngine::default().paginate(&layout, "t");
        assert!(doc.page_count() >= 2);
        for i in 0..30 {
            let pages = page_of(&doc, &format!("Entry{i:02}"));
            assert!(
                pages.windows(2).all(|w| w[0] == w[1]),
                "entry {i} split across pages {pages:?}"
            );
        }
    }

    #[test]
    fn test_content_stays_inside_bounds() {
        let blocks: Vec<Block> = (0..40).map(|i| entry(&format!("Item{i}"), 3)).collect();
        let layout = PageLayout::single_column(PageSize::A4, 40.0, blocks);
        let doc = FlowEngine::default().paginate(&layout, "t");
        for run in doc.text_runs() {
            assert!(run.baseline <= PageSize::A4.height - 40.0 + 1.0);
            assert!(run.baseline >= 40.0);
        }
    }

    #[test]
    fn test_oversized_text_splits_by_line() {
        let long = "word ".repeat(4000);
        let layout = PageLayout::single_column(PageSize::A4, 50.0, vec![Block::text(long, body())]);
        let doc = FlowEngine::default().paginate(&layout, "t");
        assert!(doc.page_count() >= 2);
        assert!(doc.pages.iter().all(|p| p.text_runs().count() > 0));
    }

    #[test]
    fn test_heading_not_orphaned() {
        // Fill most of the page, then a heading followed by a tall entry.
        let blocks = vec![
            Block::text("x", body()).margins(0.0, 680.0),
            heading("Education"),
            entry("School", 6),
        ];
        let layout = PageLayout::single_column(PageSize::A4, 50.0, blocks);

        let doc = FlowEngine::new(true).paginate(&layout, "t");
        assert_eq!(page_of(&doc, "Education"), page_of(&doc, "School detail 0"));

        let loose = FlowEngine::new(false).paginate(&layout, "t");
        assert_ne!(page_of(&loose, "Education"), page_of(&loose, "School detail 0"));
    }

    #[test]
    fn test_top_margin_dropped_on_fresh_page() {
        let layout = PageLayout::single_column(PageSize::A4, 50.0, vec![heading("Profile")]);
        let doc = FlowEngine::default().paginate(&layout, "t");
        let run = doc.text_runs().next().unwrap();
        assert!(run.baseline < 50.0 + 14.0 * 1.2, "baseline {} includes margin", run.baseline);
    }

    #[test]
    fn test_columns_flow_independently() {
        let page = PageSize::A4;
        let tall: Vec<Block> = (0..40).map(|i| entry(&format!("Main{i}"), 3)).collect();
        let layout = PageLayout {
            page,
            columns: vec![
                Column {
                    x: 20.0,
                    width: 150.0,
                    top: 40.0,
                    bottom: page.height - 40.0,
                    blocks: vec![Block::text("Sidebar", body())],
                    background: Some(ColumnBackground {
                        x: 0.0,
                        width: 180.0,
                        color: Rgb::new(249, 249, 249),
                    }),
                },
                Column {
                    x: 200.0,
                    width: 355.0,
                    top: 40.0,
                    bottom: page.height - 40.0,
                    blocks: tall,
                    background: None,
                },
            ],
        };
        let doc = FlowEngine::default().paginate(&layout, "t");
        assert!(doc.page_count() >= 2);
        for page in &doc.pages {
            assert!(matches!(page.ops.first(), Some(DrawOp::Rect(r)) if r.height == PageSize::A4.height));
        }
        assert_eq!(page_of(&doc, "Sidebar"), vec![0]);
    }

    #[test]
    fn test_chips_wrap_into_rows() {
        let chip = ChipStyle {
            padding: Edges::symmetric(2.0, 6.0),
            background: Some(Rgb::from_hex(0xf7fafc)),
            gap: 4.0,
        };
        let items: Vec<String> = (0..30).map(|i| format!("Skill {i}")).collect();
        let layout = PageLayout::single_column(
            PageSize::A4,
            50.0,
            vec![Block::chips(items, body(), chip)],
        );
        let doc = FlowEngine::default().paginate(&layout, "t");
        let baselines: std::collections::BTreeSet<i32> =
            doc.text_runs().map(|r| r.baseline.round() as i32).collect();
        assert!(baselines.len() > 1, "chips should wrap onto several rows");
    }

    #[test]
    fn test_split_right_text_is_right_aligned() {
        let layout = PageLayout::single_column(
            PageSize::A4,
            50.0,
            vec![Block::split("Acme Corp", body(), "Berlin", body())],
        );
        let doc = FlowEngine::default().paginate(&layout, "t");
        let runs: Vec<&TextRun> = doc.text_runs().collect();
        assert_eq!(runs.len(), 2);
        let right_w = get_metrics(&body().font).text_width("Berlin", 10.0);
        assert!((runs[1].x + right_w - (PageSize::A4.width - 50.0)).abs() < 0.01);
        assert_eq!(runs[0].baseline, runs[1].baseline);
    }

    #[test]
    fn test_pagination_deterministic() {
        let blocks: Vec<Block> = (0..25).map(|i| entry(&format!("E{i}"), 3)).collect();
        let layout = PageLayout::single_column(PageSize::A4, 45.0, blocks);
        let engine = FlowEngine::default();
        assert_eq!(engine.paginate(&layout, "t"), engine.paginate(&layout, "t"));
    }
}
