// Output stages: live preview (raster) and explicit download (PDF).
// Both consume the same laid-out `Document`.

pub mod download;
pub mod pdf;
pub mod preview;
pub mod raster;

pub use download::{download_file_name, export_pdf, save_download, DownloadArtifact};
pub use pdf::write_pdf;
pub use preview::{
    spawn_preview, spawn_preview_with, LayoutRenderer, PreviewConfig, PreviewHandle,
    PreviewRenderer, PreviewState, RenderedPreview,
};
pub use raster::{rasterize, DisplayGeometry, PreviewPage};
