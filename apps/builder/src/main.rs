use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_builder::config::Config;
use resume_builder::models::Resume;
use resume_builder::pipeline::{save_download, spawn_preview};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    let layout = config.layout();
    info!(
        strategy = %layout.strategy,
        orphan_control = layout.orphan_control,
        "Layout options"
    );

    let resume = Resume::default();

    // Drive one edit through the preview pipeline and wait for it to settle
    let preview = spawn_preview(config.preview(), layout);
    let mut state = preview.subscribe();
    preview.submit(resume.clone()).await?;
    let settled = state
        .wait_for(|s| s.renders_completed > 0 || s.last_error.is_some())
        .await
        .context("Preview pipeline stopped before the first render")?
        .clone();
    match &settled.last_error {
        Some(error) => warn!(error = %error, "Preview render failed"),
        None => info!(
            pages = settled.pages.len(),
            width = settled.display.page_width,
            height = settled.display.page_height,
            "Preview ready"
        ),
    }
    preview.shutdown().await?;

    // Explicit download
    match save_download(resume, layout, &config.output_dir).await {
        Ok(artifact) => info!(
            path = %artifact.path.display(),
            pages = artifact.page_count,
            "Resume exported"
        ),
        Err(e) => {
            let notice = e.to_notice();
            anyhow::bail!("{}: {}", notice.code, notice.message);
        }
    }

    Ok(())
}
