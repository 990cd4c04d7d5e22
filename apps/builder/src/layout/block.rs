//! Declarative block tree consumed by the flow engine.
//!
//! Renderers describe content as styled blocks of unbounded height; the flow
//! engine measures, wraps and breaks them into pages.

use crate::layout::style::{Edges, PageSize, Rgb, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Rgb,
}

/// Box-model attributes every block carries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxStyle {
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub padding: Edges,
    pub background: Option<Rgb>,
    pub border_bottom: Option<Border>,
}

/// Per-chip styling for flex-wrapped chip rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipStyle {
    pub padding: Edges,
    pub background: Option<Rgb>,
    /// Horizontal and vertical space between chips.
    pub gap: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Text {
        text: String,
        style: TextStyle,
    },
    /// Left text plus right-aligned text sharing the first line.
    Split {
        left: String,
        left_style: TextStyle,
        right: String,
        right_style: TextStyle,
    },
    Chips {
        items: Vec<String>,
        style: TextStyle,
        chip: ChipStyle,
    },
    Rule {
        thickness: f32,
        color: Rgb,
    },
    Spacer(f32),
    Group(Vec<Block>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub frame: BoxStyle,
    /// Must share a page with the leading unit of the following sibling.
    pub keep_with_next: bool,
    /// Groups only: move whole to a fresh page rather than split, when it fits one.
    pub keep_together: bool,
}

impl Block {
    fn from_kind(kind: BlockKind) -> Self {
        Self {
            kind,
            frame: BoxStyle::default(),
            keep_with_next: false,
            keep_together: false,
        }
    }

    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self::from_kind(BlockKind::Text {
            text: text.into(),
            style,
        })
    }

    pub fn split(
        left: impl Into<String>,
        left_style: TextStyle,
        right: impl Into<String>,
        right_style: TextStyle,
    ) -> Self {
        Self::from_kind(BlockKind::Split {
            left: left.into(),
            left_style,
            right: right.into(),
            right_style,
        })
    }

    pub fn chips(items: Vec<String>, style: TextStyle, chip: ChipStyle) -> Self {
        Self::from_kind(BlockKind::Chips { items, style, chip })
    }

    pub fn rule(thickness: f32, color: Rgb) -> Self {
        Self::from_kind(BlockKind::Rule { thickness, color })
    }

    pub fn spacer(height: f32) -> Self {
        Self::from_kind(BlockKind::Spacer(height))
    }

    pub fn group(children: Vec<Block>) -> Self {
        Self::from_kind(BlockKind::Group(children))
    }

    pub fn with_frame(self, frame: BoxStyle) -> Self {
        Self { frame, ..self }
    }

    pub fn margins(mut self, top: f32, bottom: f32) -> Self {
        self.frame.margin_top = top;
        self.frame.margin_bottom = bottom;
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.frame.padding = padding;
        self
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.frame.background = Some(color);
        self
    }

    pub fn border_bottom(mut self, width: f32, color: Rgb) -> Self {
        self.frame.border_bottom = Some(Border { width, color });
        self
    }

    pub fn keep_with_next(self) -> Self {
        Self {
            keep_with_next: true,
            ..self
        }
    }

    pub fn keep_together(self) -> Self {
        Self {
            keep_together: true,
            ..self
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page arrangement
// ────────────────────────────────────────────────────────────────────────────

/// A background painted over the full page height on every page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBackground {
    pub x: f32,
    pub width: f32,
    pub color: Rgb,
}

/// A vertical strip of the page that flows independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub x: f32,
    pub width: f32,
    pub top: f32,
    pub bottom: f32,
    pub blocks: Vec<Block>,
    pub background: Option<ColumnBackground>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page: PageSize,
    pub columns: Vec<Column>,
}

impl PageLayout {
    /// One column inset by `margin` on every side.
    pub fn single_column(page: PageSize, margin: f32, blocks: Vec<Block>) -> Self {
        Self {
            page,
            columns: vec![Column {
                x: margin,
                width: page.width - 2.0 * margin,
                top: margin,
                bottom: page.height - margin,
                blocks,
                background: None,
            }],
        }
    }
}
