//! Résumé layout and pagination engine.
//!
//! A `Resume` value is laid out with one of six templates into a paginated
//! `Document`, which feeds a debounced raster preview and an on-demand PDF export.

pub mod config;
pub mod errors;
pub mod layout;
pub mod models;
pub mod pipeline;
pub mod templates;

pub use errors::{BuilderError, UserNotice};
pub use layout::Document;
pub use models::{Resume, TemplateId};
pub use templates::{render, LayoutOptions, LayoutStrategy};
