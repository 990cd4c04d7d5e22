//! Manual cursor-based layout.
//!
//! A `CursorCanvas` keeps one vertical cursor per column, in millimetres on a
//! 210×297 page. Every emission draws at the cursor and then advances it by
//! `font_size / 2 + padding`. Before every draw the canvas checks whether the
//! cursor has passed `bottom_threshold` and, if so, starts a new page for that
//! column. Output is converted to points as it is emitted, so the result is the
//! same `Document` type the flow engine produces.

use tracing::debug;

use crate::layout::document::{Document, DrawOp, FilledRect, Stroke, TextRun};
use crate::layout::font_metrics::get_metrics;
use crate::layout::style::{Align, FontSpec, PageSize, Rgb, MM_TO_PT};
use crate::layout::wrap::wrap_text;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Minimum space between the two sides of a split line.
const SPLIT_GAP_MM: f32 = 4.0;

/// Vertical rhythm of the canvas, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorMetrics {
    pub top_margin: f32,
    pub bottom_threshold: f32,
    pub side_margin: f32,
    /// Added after a single line.
    pub text_padding: f32,
    /// Added after each line of a wrapped block.
    pub wrapped_padding: f32,
    /// Added once after a wrapped block.
    pub paragraph_gap: f32,
    pub rule_advance: f32,
}

impl Default for CursorMetrics {
    fn default() -> Self {
        Self {
            top_margin: 20.0,
            bottom_threshold: 280.0,
            side_margin: 20.0,
            text_padding: 4.0,
            wrapped_padding: 2.0,
            paragraph_gap: 2.0,
            rule_advance: 5.0,
        }
    }
}

/// Font, size (pt) and color for one emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub font: FontSpec,
    pub size: f32,
    pub color: Rgb,
    pub align: Align,
}

impl Pen {
    pub const fn new(font: FontSpec, size: f32, color: Rgb) -> Self {
        Self {
            font,
            size,
            color,
            align: Align::Left,
        }
    }

    pub const fn centered(self) -> Self {
        Self {
            align: Align::Center,
            ..self
        }
    }

    /// Cursor advance in mm for a line drawn with this pen.
    fn advance(&self, padding: f32) -> f32 {
        self.size / 2.0 + padding
    }
}

/// Underline drawn under a heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleStyle {
    /// Stroke width in points.
    pub thickness: f32,
    pub color: Rgb,
}

/// Horizontal extent of a column and where its cursor starts on the first page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorColumn {
    pub x: f32,
    pub width: f32,
    pub start_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(pub usize);

struct ColumnState {
    spec: CursorColumn,
    y: f32,
    pages: Vec<Vec<DrawOp>>,
}

pub struct CursorCanvas {
    metrics: CursorMetrics,
    orphan_control: bool,
    columns: Vec<ColumnState>,
    backgrounds: Vec<FilledRect>,
}

impl CursorCanvas {
    /// A canvas with a single full-width column inside the side margins.
    pub fn new(metrics: CursorMetrics, orphan_control: bool) -> Self {
        let main = CursorColumn {
            x: metrics.side_margin,
            width: PAGE_WIDTH_MM - 2.0 * metrics.side_margin,
            start_y: metrics.top_margin,
        };
        Self::with_columns(metrics, orphan_control, &[main])
    }

    pub fn with_columns(metrics: CursorMetrics, orphan_control: bool, columns: &[CursorColumn]) -> Self {
        Self {
            metrics,
            orphan_control,
            columns: columns
                .iter()
                .map(|spec| ColumnState {
                    spec: *spec,
                    y: spec.start_y,
                    pages: vec![Vec::new()],
                })
                .collect(),
            backgrounds: Vec::new(),
        }
    }

    /// Paints a full-height band on every page, e.g. a sidebar.
    pub fn add_background(&mut self, x_mm: f32, width_mm: f32, color: Rgb) {
        self.backgrounds.push(FilledRect {
            x: x_mm * MM_TO_PT,
            y: 0.0,
            width: width_mm * MM_TO_PT,
            height: PAGE_HEIGHT_MM * MM_TO_PT,
            color,
        });
    }

    pub fn cursor(&self, column: ColumnId) -> f32 {
        self.columns.get(column.0).map(|c| c.y).unwrap_or(0.0)
    }

    // ── Emissions ───────────────────────────────────────────────────────────

    /// Draws one line of text and advances by `size / 2 + text_padding`.
    ///
    /// Text wider than the column falls back to `wrapped`.
    pub fn text(&mut self, column: ColumnId, text: &str, pen: Pen) {
        if text.trim().is_empty() {
            return;
        }
        let Some(width) = self.column_width(column) else {
            return;
        };
        let lines = wrap_text(text, &pen.font, pen.size, width * MM_TO_PT);
        match lines.as_slice() {
            [line] => {
                self.break_if_needed(column);
                self.draw_line(column, line, pen);
                let advance = pen.advance(self.metrics.text_padding);
                self.advance(column, advance);
            }
            _ => self.emit_wrapped(column, &lines, pen, 0.0),
        }
    }

    /// Wraps `text` to the column width; every line is checked and advanced on its own.
    pub fn wrapped(&mut self, column: ColumnId, text: &str, pen: Pen) {
        self.wrapped_indented(column, text, pen, 0.0);
    }

    /// As `wrapped`, with every line inset by `indent_mm`.
    pub fn wrapped_indented(&mut self, column: ColumnId, text: &str, pen: Pen, indent_mm: f32) {
        let Some(width) = self.column_width(column) else {
            return;
        };
        let lines = wrap_text(text, &pen.font, pen.size, (width - indent_mm) * MM_TO_PT);
        self.emit_wrapped(column, &lines, pen, indent_mm);
    }

    /// Left text and right-aligned text on one line.
    ///
    /// The left side wraps to the room the right side leaves; its continuation
    /// lines advance like a wrapped block.
    pub fn split(&mut self, column: ColumnId, left: &str, left_pen: Pen, right: &str, right_pen: Pen) {
        let Some(width) = self.column_width(column) else {
            return;
        };
        let right_mm = get_metrics(&right_pen.font).text_width(right, right_pen.size) / MM_TO_PT;
        let left_width = if right.is_empty() {
            width
        } else {
            (width - right_mm - SPLIT_GAP_MM).max(width * 0.3)
        };
        let lines = wrap_text(left, &left_pen.font, left_pen.size, left_width * MM_TO_PT);

        self.break_if_needed(column);
        if let Some(first) = lines.first() {
            self.draw_line(column, first, left_pen);
        }
        if !right.is_empty() {
            self.draw_right(column, right, right_pen);
        }
        if lines.len() <= 1 {
            let advance = left_pen.advance(self.metrics.text_padding);
            self.advance(column, advance);
            return;
        }

        let advance = left_pen.advance(self.metrics.wrapped_padding);
        self.advance(column, advance);
        self.emit_wrapped(column, &lines[1..], left_pen, 0.0);
    }

    /// A section heading, optionally underlined and optionally on a filled band.
    ///
    /// With orphan control the heading reserves room for itself, its rule and one
    /// line of `body` so it never ends a page.
    pub fn heading(
        &mut self,
        column: ColumnId,
        text: &str,
        pen: Pen,
        rule: Option<RuleStyle>,
        band: Option<Rgb>,
        body: Pen,
    ) {
        if self.orphan_control {
            let reserve = pen.advance(self.metrics.text_padding)
                + rule.map(|_| self.metrics.rule_advance).unwrap_or(0.0)
                + body.advance(self.metrics.text_padding);
            let threshold = self.metrics.bottom_threshold;
            let needs_break = self
                .columns
                .get(column.0)
                .map(|c| c.y + reserve > threshold && c.y > self.first_y(c))
                .unwrap_or(false);
            if needs_break {
                debug!(column = column.0, "Heading moved to keep it with its content");
                self.new_page(column);
            }
        }

        self.break_if_needed(column);
        if let Some(color) = band {
            self.band(column, pen, color);
        }
        self.draw_line(column, text, pen);
        let advance = pen.advance(self.metrics.text_padding);
        self.advance(column, advance);

        if let Some(rule) = rule {
            self.rule(column, rule);
        }
    }

    /// Horizontal rule across the column; advances by `rule_advance`.
    pub fn rule(&mut self, column: ColumnId, rule: RuleStyle) {
        self.break_if_needed(column);
        let advance = self.metrics.rule_advance;
        if let Some(col) = self.columns.get_mut(column.0) {
            let y = col.y * MM_TO_PT;
            push(
                col,
                DrawOp::Line(Stroke {
                    x1: col.spec.x * MM_TO_PT,
                    y1: y,
                    x2: (col.spec.x + col.spec.width) * MM_TO_PT,
                    y2: y,
                    width: rule.thickness,
                    color: rule.color,
                }),
            );
        }
        self.advance(column, advance);
    }

    /// Blank vertical space; never draws and never breaks.
    pub fn gap(&mut self, column: ColumnId, mm: f32) {
        self.advance(column, mm);
    }

    /// Finishes the canvas, merging columns and painting backgrounds on every page.
    pub fn finish(self, title: &str) -> Document {
        let columns = self.columns.into_iter().map(|c| c.pages).collect();
        let document = Document::from_columns(title, PageSize::A4, &self.backgrounds, columns);
        debug!(pages = document.page_count(), "Cursor layout complete");
        document
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn column_width(&self, column: ColumnId) -> Option<f32> {
        self.columns.get(column.0).map(|c| c.spec.width)
    }

    /// Pre-wrapped lines: each is checked and advanced on its own, then one paragraph gap.
    fn emit_wrapped(&mut self, column: ColumnId, lines: &[String], pen: Pen, indent_mm: f32) {
        if lines.is_empty() {
            return;
        }
        for line in lines {
            self.break_if_needed(column);
            self.draw_line_at(column, line, pen, indent_mm);
            let advance = pen.advance(self.metrics.wrapped_padding);
            self.advance(column, advance);
        }
        let gap = self.metrics.paragraph_gap;
        self.advance(column, gap);
    }

    fn first_y(&self, column: &ColumnState) -> f32 {
        if column.pages.len() == 1 {
            column.spec.start_y
        } else {
            self.metrics.top_margin
        }
    }

    fn break_if_needed(&mut self, column: ColumnId) {
        let threshold = self.metrics.bottom_threshold;
        if self
            .columns
            .get(column.0)
            .map(|c| c.y > threshold)
            .unwrap_or(false)
        {
            self.new_page(column);
        }
    }

    fn new_page(&mut self, column: ColumnId) {
        let top = self.metrics.top_margin;
        if let Some(col) = self.columns.get_mut(column.0) {
            col.pages.push(Vec::new());
            col.y = top;
        }
    }

    fn advance(&mut self, column: ColumnId, mm: f32) {
        if let Some(col) = self.columns.get_mut(column.0) {
            col.y += mm;
        }
    }

    fn draw_line(&mut self, column: ColumnId, text: &str, pen: Pen) {
        self.draw_line_at(column, text, pen, 0.0);
    }

    fn draw_line_at(&mut self, column: ColumnId, text: &str, pen: Pen, indent_mm: f32) {
        if let Some(col) = self.columns.get_mut(column.0) {
            let width_pt = get_metrics(&pen.font).text_width(text, pen.size);
            let left = (col.spec.x + indent_mm) * MM_TO_PT;
            let span = (col.spec.width - indent_mm) * MM_TO_PT;
            let x = match pen.align {
                Align::Left => left,
                Align::Center => left + (span - width_pt) / 2.0,
                Align::Right => left + span - width_pt,
            };
            let baseline = col.y * MM_TO_PT;
            push(
                col,
                DrawOp::Text(TextRun {
                    x,
                    baseline,
                    text: text.to_string(),
                    font: pen.font,
                    size: pen.size,
                    color: pen.color,
                }),
            );
        }
    }

    fn draw_right(&mut self, column: ColumnId, text: &str, pen: Pen) {
        self.draw_line(column, text, Pen {
            align: Align::Right,
            ..pen
        });
    }

    fn band(&mut self, column: ColumnId, pen: Pen, color: Rgb) {
        if let Some(col) = self.columns.get_mut(column.0) {
            // Band spans the cap height plus a little air above and below the baseline.
            let height_mm = pen.size * 0.35 + 3.0;
            let top = col.y - pen.size * 0.35 - 1.5;
            push(
                col,
                DrawOp::Rect(FilledRect {
                    x: col.spec.x * MM_TO_PT,
                    y: top * MM_TO_PT,
                    width: col.spec.width * MM_TO_PT,
                    height: height_mm * MM_TO_PT,
                    color,
                }),
            );
        }
    }
}

fn push(column: &mut ColumnState, op: DrawOp) {
    if let Some(page) = column.pages.last_mut() {
        page.push(op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::style::FontFamily;

    const MAIN: ColumnId = ColumnId(0);

    fn body() -> Pen {
        Pen::new(FontSpec::regular(FontFamily::Helvetica), 10.0, Rgb::BLACK)
    }

    fn head() -> Pen {
        Pen::new(FontSpec::bold(FontFamily::Helvetica), 16.0, Rgb::BLACK)
    }

    fn rule() -> RuleStyle {
        RuleStyle {
            thickness: 0.5,
            color: Rgb::BLACK,
        }
    }

    #[test]
    fn test_text_advances_by_half_size_plus_padding() {
        let mut canvas = CursorCanvas::new(CursorMetrics::default(), true);
        canvas.text(MAIN, "John Doe", Pen::new(FontSpec::bold(FontFamily::Helvetica), 24.0, Rgb::BLACK));
        assert!((canvas.cursor(MAIN) - (20.0 + 12.0 + 4.0)).abs() < 1e-4);
    }

    #[test]
    fn test_wrapped_lines_use_wrapped_padding() {
        let mut canvas = CursorCanvas::new(CursorMetrics::default(), true);
        canvas.wrapped(MAIN, "short", body());
        // one line: 5 + 2, then the paragraph gap of 2
        assert!((canvas.cursor(MAIN) - (20.0 + 7.0 + 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_break_when_cursor_passes_threshold() {
        let mut canvas = CursorCanvas::new(CursorMetrics::default(), true);
        for i in 0..40 {
            canvas.text(MAIN, &format!("line {i}"), body());
        }
        let doc = canvas.finish("t");
        assert!(doc.page_count() >= 2);
        let limit = 289.0 * MM_TO_PT;
        for run in doc.text_runs() {
            assert!(run.baseline <= limit, "baseline {} past page bottom", run.baseline);
        }
        assert!(doc.pages[1]
            .text_runs()
            .next()
            .map(|r| (r.baseline - 20.0 * MM_TO_PT).abs() < 1e-3)
            .unwrap_or(false));
    }

    #[test]
    fn test_heading_reserves_room_for_body_line() {
        let mut canvas = CursorCanvas::new(CursorMetrics::default(), true);
        canvas.gap(MAIN, 255.0);
        canvas.heading(MAIN, "Education", head(), Some(rule()), None, body());
        canvas.text(MAIN, "University", body());
        let doc = canvas.finish("t");
        assert_eq!(doc.page_count(), 2);
        let second: Vec<&str> = doc.pages[1].text_runs().map(|r| r.text.as_str()).collect();
        assert_eq!(second, vec!["Education", "University"]);
    }

    #[test]
    fn test_heading_without_orphan_control_uses_line_check() {
        let mut canvas = CursorCanvas::new(CursorMetrics::default(), false);
        canvas.gap(MAIN, 255.0);
        canvas.heading(MAIN, "Education", head(), Some(rule()), None, body());
        canvas.text(MAIN, "University", body());
        let doc = canvas.finish("t");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].text_runs().count(), 1);
    }

    #[test]
    fn test_long_text_wraps_inside_column() {
        let columns = [CursorColumn {
            x: 95.0,
            width: 95.0,
            start_y: 20.0,
        }];
        let mut canvas = CursorCanvas::with_columns(CursorMetrics::default(), true, &columns);
        let title = "Senior Staff Software Engineer, Platform at International Business Machines Corporation";
        canvas.text(MAIN, title, head());
        canvas.split(MAIN, title, body(), "Armonk, NY", body());
        let doc = canvas.finish("t");

        let right_edge = 190.0 * MM_TO_PT + 0.01;
        let runs: Vec<_> = doc.text_runs().collect();
        assert!(runs.len() > 3);
        for run in &runs {
            let end = run.x + get_metrics(&run.font).text_width(&run.text, run.size);
            assert!(end <= right_edge, "'{}' ends at {end}", run.text);
        }
        let location = runs.iter().find(|r| r.text == "Armonk, NY").unwrap();
        let first_left = runs.iter().find(|r| r.text.starts_with("Senior") && r.size == 10.0).unwrap();
        assert_eq!(location.baseline, first_left.baseline);
    }

    #[test]
    fn test_sidebar_column_paginates_independently() {
        let metrics = CursorMetrics::default();
        let columns = [
            CursorColumn {
                x: 10.0,
                width: 55.0,
                start_y: 50.0,
            },
            CursorColumn {
                x: 95.0,
                width: 95.0,
                start_y: 20.0,
            },
        ];
        let mut canvas = CursorCanvas::with_columns(metrics, true, &columns);
        canvas.add_background(0.0, 65.0, Rgb::new(249, 249, 249));
        canvas.text(ColumnId(0), "Contact", body());
        for i in 0..60 {
            canvas.text(ColumnId(1), &format!("main {i}"), body());
        }
        let doc = canvas.finish("t");
        assert!(doc.page_count() >= 2);
        for page in &doc.pages {
            assert!(matches!(page.ops.first(), Some(DrawOp::Rect(_))));
        }
        let sidebar_first = doc.pages[0].text_runs().next().unwrap();
        assert_eq!(sidebar_first.text, "Contact");
        assert!((sidebar_first.baseline - 50.0 * MM_TO_PT).abs() < 1e-3);
    }
}
