//! Page images for the live preview.
//!
//! Text is "greeked": each run becomes a bar of its measured width at x-height.
//! Backgrounds and rules are painted as they appear in the document.

use bytes::Bytes;
use serde::Serialize;
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};
use tracing::debug;

use crate::errors::BuilderError;
use crate::layout::font_metrics::get_metrics;
use crate::layout::{Document, DrawOp, Page, PageSize, Rgb};

/// Display aspect ratio of an A4 page, height over width.
pub const A4_ASPECT: f32 = 297.0 / 210.0;
/// x-height as a fraction of font size.
const X_HEIGHT: f32 = 0.52;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewPage {
    /// 1-based.
    pub number: usize,
    pub width_px: u32,
    pub height_px: u32,
    #[serde(skip)]
    pub png: Bytes,
}

/// How large a page is shown in the preview container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayGeometry {
    pub container_width: f32,
    pub page_width: f32,
    pub page_height: f32,
    /// Display pixels per document point.
    pub scale: f32,
}

impl DisplayGeometry {
    /// Pages fill the container width and keep the 210:297 ratio.
    pub fn from_container(container_width: f32) -> Self {
        let width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        Self {
            container_width: width,
            page_width: width,
            page_height: width * A4_ASPECT,
            scale: width / PageSize::A4.width,
        }
    }
}

/// Rasterizes every page at `scale` pixels per point.
pub fn rasterize(document: &Document, scale: f32) -> Result<Vec<PreviewPage>, BuilderError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(BuilderError::Raster(format!("invalid scale {scale}")));
    }
    document.validate()?;

    let width_px = (document.page_size.width * scale).round() as u32;
    let height_px = (document.page_size.height * scale).round() as u32;

    let pages = document
        .pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let png = render_page(page, width_px, height_px, scale)?;
            Ok(PreviewPage {
                number: index + 1,
                width_px,
                height_px,
                png,
            })
        })
        .collect::<Result<Vec<_>, BuilderError>>()?;

    debug!(pages = pages.len(), width_px, height_px, "Pages rasterized");
    Ok(pages)
}

fn render_page(page: &Page, width: u32, height: u32, scale: f32) -> Result<Bytes, BuilderError> {
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| BuilderError::Raster(format!("cannot allocate {width}x{height} pixmap")))?;
    pixmap.fill(Color::WHITE);

    for op in &page.ops {
        let (x, y, w, h, color) = match op {
            DrawOp::Rect(r) => (r.x, r.y, r.width, r.height, r.color),
            DrawOp::Line(l) => {
                // Rules are horizontal or vertical; paint their bounding box.
                let x = l.x1.min(l.x2);
                let y = l.y1.min(l.y2) - l.width / 2.0;
                let w = (l.x2 - l.x1).abs().max(l.width);
                let h = (l.y2 - l.y1).abs().max(l.width);
                (x, y, w, h, l.color)
            }
            DrawOp::Text(t) => {
                let w = get_metrics(&t.font).text_width(&t.text, t.size);
                let h = t.size * X_HEIGHT;
                (t.x, t.baseline - h, w, h, t.color)
            }
        };
        fill(&mut pixmap, x * scale, y * scale, w * scale, h * scale, color);
    }

    pixmap
        .encode_png()
        .map(Bytes::from)
        .map_err(|e| BuilderError::Raster(format!("PNG encoding failed: {e}")))
}

fn fill(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
    // Degenerate shapes have no pixels to paint.
    let Some(rect) = Rect::from_xywh(x, y, w, h) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FilledRect, FontFamily, FontSpec, TextRun};

    fn document() -> Document {
        Document {
            title: "Preview".to_string(),
            page_size: PageSize::A4,
            pages: vec![
                Page {
                    ops: vec![
                        DrawOp::Rect(FilledRect {
                            x: 0.0,
                            y: 0.0,
                            width: 184.0,
                            height: 842.0,
                            color: Rgb::new(249, 249, 249),
                        }),
                        DrawOp::Text(TextRun {
                            x: 40.0,
                            baseline: 60.0,
                            text: "John Doe".to_string(),
                            font: FontSpec::bold(FontFamily::Helvetica),
                            size: 24.0,
                            color: Rgb::BLACK,
                        }),
                    ],
                },
                Page { ops: Vec::new() },
            ],
        }
    }

    #[test]
    fn test_page_size_follows_scale() {
        let pages = rasterize(&document(), 1.5).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].width_px, 893);
        assert_eq!(pages[0].height_px, 1263);
        assert_eq!(pages[1].number, 2);
    }

    #[test]
    fn test_output_is_png() {
        let pages = rasterize(&document(), 0.5).unwrap();
        assert!(pages[0].png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_rasterize_is_deterministic() {
        let a = rasterize(&document(), 1.0).unwrap();
        let b = rasterize(&document(), 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_scale_is_rejected() {
        assert!(matches!(rasterize(&document(), 0.0), Err(BuilderError::Raster(_))));
    }

    #[test]
    fn test_display_geometry_keeps_aspect() {
        let geometry = DisplayGeometry::from_container(420.0);
        assert_eq!(geometry.page_width, 420.0);
        assert!((geometry.page_height - 594.0).abs() < 1e-3);
        assert!((geometry.scale - 420.0 / 595.0).abs() < 1e-6);
        assert_eq!(DisplayGeometry::from_container(-5.0).page_height, 0.0);
    }
}
