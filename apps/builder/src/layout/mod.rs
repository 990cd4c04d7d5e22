// Pagination engine: text measurement, wrapping, and the two layout strategies.
// Both strategies produce a `Document` of positioned draw ops in points.

pub mod block;
pub mod cursor;
pub mod document;
pub mod flow;
pub mod font_metrics;
pub mod style;
pub mod wrap;

// Re-export the public API consumed by the template renderers and the pipeline.
pub use block::{Block, BoxStyle, ChipStyle, Column, ColumnBackground, PageLayout};
pub use cursor::{ColumnId, CursorCanvas, CursorColumn, CursorMetrics, Pen, RuleStyle};
pub use document::{Document, DrawOp, FilledRect, Page, Stroke, TextRun};
pub use flow::FlowEngine;
pub use style::{
    Align, Edges, FontFamily, FontSpec, FontVariant, PageSize, Rgb, TextStyle, MM_TO_PT,
};
