//! Explicit PDF export.
//!
//! Rendering and serialization run on the blocking pool. The file is written to a
//! temporary file in the target directory and persisted under its final name, so
//! a reader never sees a partially written PDF.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use bytes::Bytes;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::BuilderError;
use crate::models::Resume;
use crate::pipeline::pdf::write_pdf;
use crate::templates::{self, LayoutOptions};

#[derive(Debug, Clone, Serialize)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub path: PathBuf,
    #[serde(skip)]
    pub bytes: Bytes,
    pub page_count: usize,
}

/// `"{fullName}_Resume.pdf"` with whitespace runs collapsed to `_`. Path
/// separators, control characters and characters Windows rejects are removed.
pub fn download_file_name(full_name: &str) -> String {
    let cleaned: String = full_name
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = stem.trim_matches('.');

    if stem.is_empty() {
        "Resume.pdf".to_string()
    } else {
        format!("{stem}_Resume.pdf")
    }
}

/// Renders `resume` and serializes every page into one PDF.
pub fn export_pdf(resume: &Resume, options: &LayoutOptions) -> Result<(Bytes, usize), BuilderError> {
    let document = templates::render(resume, options)?;
    let bytes = write_pdf(&document)?;
    Ok((bytes, document.page_count()))
}

/// Renders, serializes and atomically writes the PDF into `dir`.
pub async fn save_download(
    resume: Resume,
    options: LayoutOptions,
    dir: impl AsRef<Path>,
) -> Result<DownloadArtifact, BuilderError> {
    let dir = dir.as_ref().to_path_buf();

    // CPU-bound layout plus blocking file I/O.
    let artifact = tokio::task::spawn_blocking(move || write_artifact(&resume, &options, &dir))
        .await
        .map_err(|e| BuilderError::Internal(anyhow!("spawn_blocking failed in download: {e}")))??;

    info!(
        file = %artifact.file_name,
        pages = artifact.page_count,
        bytes = artifact.bytes.len(),
        "Download written"
    );
    Ok(artifact)
}

fn write_artifact(
    resume: &Resume,
    options: &LayoutOptions,
    dir: &Path,
) -> Result<DownloadArtifact, BuilderError> {
    let (bytes, page_count) = export_pdf(resume, options)?;
    let file_name = download_file_name(&resume.personal_info.full_name);
    let path = dir.join(&file_name);

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(&path).map_err(|e| BuilderError::Io(e.error))?;

    Ok(DownloadArtifact {
        file_name,
        path,
        bytes,
        page_count,
    })
}
