//! Visual primitives shared by the block tree, the cursor canvas and the output stages.
//!
//! All lengths are PDF points (1/72 in) with a top-left origin unless noted.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Color
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a 24-bit `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Components scaled to 0.0..=1.0, as PDF color operators expect.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fonts
// ────────────────────────────────────────────────────────────────────────────

/// The two base-14 families the templates use. No font files are embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    Helvetica,
    Times,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontVariant {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: FontFamily,
    pub variant: FontVariant,
}

impl FontSpec {
    pub const fn new(family: FontFamily, variant: FontVariant) -> Self {
        Self { family, variant }
    }

    pub const fn regular(family: FontFamily) -> Self {
        Self::new(family, FontVariant::Regular)
    }

    pub const fn bold(family: FontFamily) -> Self {
        Self::new(family, FontVariant::Bold)
    }

    pub const fn italic(family: FontFamily) -> Self {
        Self::new(family, FontVariant::Italic)
    }

    /// PostScript name of the matching base-14 font.
    pub fn pdf_base_font(&self) -> &'static str {
        match (self.family, self.variant) {
            (FontFamily::Helvetica, FontVariant::Regular) => "Helvetica",
            (FontFamily::Helvetica, FontVariant::Bold) => "Helvetica-Bold",
            (FontFamily::Helvetica, FontVariant::Italic) => "Helvetica-Oblique",
            (FontFamily::Helvetica, FontVariant::BoldItalic) => "Helvetica-BoldOblique",
            (FontFamily::Times, FontVariant::Regular) => "Times-Roman",
            (FontFamily::Times, FontVariant::Bold) => "Times-Bold",
            (FontFamily::Times, FontVariant::Italic) => "Times-Italic",
            (FontFamily::Times, FontVariant::BoldItalic) => "Times-BoldItalic",
        }
    }

    pub const ALL: [FontSpec; 8] = [
        FontSpec::new(FontFamily::Helvetica, FontVariant::Regular),
        FontSpec::new(FontFamily::Helvetica, FontVariant::Bold),
        FontSpec::new(FontFamily::Helvetica, FontVariant::Italic),
        FontSpec::new(FontFamily::Helvetica, FontVariant::BoldItalic),
        FontSpec::new(FontFamily::Times, FontVariant::Regular),
        FontSpec::new(FontFamily::Times, FontVariant::Bold),
        FontSpec::new(FontFamily::Times, FontVariant::Italic),
        FontSpec::new(FontFamily::Times, FontVariant::BoldItalic),
    ];
}

// ────────────────────────────────────────────────────────────────────────────
// Text styling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontSpec,
    pub size: f32,
    pub color: Rgb,
    pub align: Align,
    /// Multiple of `size`.
    pub line_height: f32,
    pub uppercase: bool,
}

impl TextStyle {
    pub const fn new(font: FontSpec, size: f32, color: Rgb) -> Self {
        Self {
            font,
            size,
            color,
            align: Align::Left,
            line_height: 1.2,
            uppercase: false,
        }
    }

    pub const fn centered(self) -> Self {
        Self {
            align: Align::Center,
            ..self
        }
    }

    pub const fn upper(self) -> Self {
        Self {
            uppercase: true,
            ..self
        }
    }

    pub const fn with_line_height(self, line_height: f32) -> Self {
        Self {
            line_height,
            ..self
        }
    }

    pub fn line_advance(&self) -> f32 {
        self.size * self.line_height
    }

    /// Applies the uppercase transform when the style asks for it.
    pub fn transform(&self, text: &str) -> String {
        if self.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Box model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const ZERO: Edges = Edges::all(0.0);

    pub const fn all(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };
}

pub const MM_TO_PT: f32 = 72.0 / 25.4;
