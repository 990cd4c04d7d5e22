use serde::Serialize;
use thiserror::Error;

/// Library-level error type.
/// Preview-path errors stay inside the pipeline; download-path errors are surfaced
/// to the user through `to_notice`.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("PDF serialization error: {0}")]
    Pdf(String),

    #[error("Rasterization error: {0}")]
    Raster(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Preview pipeline stopped")]
    PipelineClosed,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// User-facing feedback for an explicit action (the download button).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserNotice {
    pub code: &'static str,
    pub message: String,
}

impl BuilderError {
    /// Maps the error to a stable code plus a message safe to show in the UI.
    /// Internal detail is logged, never shown.
    pub fn to_notice(&self) -> UserNotice {
        let (code, message) = match self {
            BuilderError::Layout(msg) => {
                tracing::error!("Layout error: {msg}");
                (
                    "LAYOUT_ERROR",
                    "The resume could not be laid out".to_string(),
                )
            }
            BuilderError::Pdf(msg) => {
                tracing::error!("PDF error: {msg}");
                (
                    "PDF_ERROR",
                    "The PDF file could not be generated".to_string(),
                )
            }
            BuilderError::Raster(msg) => {
                tracing::error!("Raster error: {msg}");
                (
                    "RASTER_ERROR",
                    "The preview could not be drawn".to_string(),
                )
            }
            BuilderError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (
                    "IO_ERROR",
                    "The file could not be saved".to_string(),
                )
            }
            BuilderError::UnknownTemplate(name) => (
                "UNKNOWN_TEMPLATE",
                format!("Template '{name}' does not exist"),
            ),
            BuilderError::PipelineClosed => (
                "PIPELINE_CLOSED",
                "The preview is no longer running".to_string(),
            ),
            BuilderError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        UserNotice { code, message }
    }
}
