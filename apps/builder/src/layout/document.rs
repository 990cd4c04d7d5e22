//! The paginated output of both layout strategies.
//!
//! A `Document` is plain positioned drawing operations: PDF serialization and
//! rasterization consume it without knowing which engine produced it.
//! Coordinates are points from the top-left corner of the page.

use serde::Serialize;

use crate::errors::BuilderError;
use crate::layout::style::{FontSpec, PageSize, Rgb};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    /// Baseline position, measured from the top of the page.
    pub baseline: f32,
    pub text: String,
    pub font: FontSpec,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilledRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Text(TextRun),
    Rect(FilledRect),
    Line(Stroke),
}

/// One fixed-size page. Ops are painted in order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub page_size: PageSize,
    pub pages: Vec<Page>,
}

impl Document {
    /// Merges independently paginated columns into pages.
    ///
    /// Page count is the longest column; `backgrounds` are painted first on every page,
    /// then each column's ops in column order.
    pub fn from_columns(
        title: impl Into<String>,
        page_size: PageSize,
        backgrounds: &[FilledRect],
        columns: Vec<Vec<Vec<DrawOp>>>,
    ) -> Self {
        let page_count = columns.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let mut columns: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();

        let pages = (0..page_count)
            .map(|_| {
                let mut ops: Vec<DrawOp> = backgrounds.iter().cloned().map(DrawOp::Rect).collect();
                for column in columns.iter_mut() {
                    if let Some(column_ops) = column.next() {
                        ops.extend(column_ops);
                    }
                }
                Page { ops }
            })
            .collect();

        Self {
            title: title.into(),
            page_size,
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text runs in page order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|p| p.text_runs())
    }

    /// Concatenated text of every run, one run per line.
    pub fn plain_text(&self) -> String {
        self.text_runs()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rejects malformed intermediate state before it reaches an output stage.
    pub fn validate(&self) -> Result<(), BuilderError> {
        if self.pages.is_empty() {
            return Err(BuilderError::Layout("document has no pages".to_string()));
        }
        if !(self.page_size.width.is_finite() && self.page_size.height.is_finite())
            || self.page_size.width <= 0.0
            || self.page_size.height <= 0.0
        {
            return Err(BuilderError::Layout(format!(
                "invalid page size {}x{}",
                self.page_size.width, self.page_size.height
            )));
        }

        for (index, page) in self.pages.iter().enumerate() {
            for op in &page.ops {
                let finite = match op {
                    DrawOp::Text(t) => t.x.is_finite() && t.baseline.is_finite() && t.size.is_finite(),
                    DrawOp::Rect(r) => [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite()),
                    DrawOp::Line(l) => [l.x1, l.y1, l.x2, l.y2, l.width]
                        .iter()
                        .all(|v| v.is_finite()),
                };
                if !finite {
                    return Err(BuilderError::Layout(format!(
                        "non-finite coordinate on page {}",
                        index + 1
                    )));
                }
            }
        }
        Ok(())
    }
}
