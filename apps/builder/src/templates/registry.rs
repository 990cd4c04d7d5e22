//! Template lookup. Every `TemplateId` resolves to exactly one static descriptor.

use tracing::warn;

use crate::models::TemplateId;
use crate::templates::style::TemplateStyle;
use crate::templates::{accent, classic, engineering, minimalist, modern, professional};

/// Selector order: classic, modern, minimalist, professional, accent, engineering.
static TEMPLATES: [&TemplateStyle; 6] = [
    &classic::STYLE,
    &modern::STYLE,
    &minimalist::STYLE,
    &professional::STYLE,
    &accent::STYLE,
    &engineering::STYLE,
];

pub fn resolve(id: TemplateId) -> &'static TemplateStyle {
    match id {
        TemplateId::Classic => &classic::STYLE,
        TemplateId::Modern => &modern::STYLE,
        TemplateId::Minimalist => &minimalist::STYLE,
        TemplateId::Professional => &professional::STYLE,
        TemplateId::Accent => &accent::STYLE,
        TemplateId::Engineering => &engineering::STYLE,
    }
}

/// Resolves a selector value; anything unrecognised falls back to classic.
pub fn resolve_name(name: &str) -> &'static TemplateStyle {
    match name.parse::<TemplateId>() {
        Ok(id) => resolve(id),
        Err(_) => {
            warn!(template = %name, "Unknown template, falling back to classic");
            &classic::STYLE
        }
    }
}

pub fn all() -> &'static [&'static TemplateStyle] {
    &TEMPLATES
}
