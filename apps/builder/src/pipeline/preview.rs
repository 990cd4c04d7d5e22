//! Debounced live preview.
//!
//! A single supervisor task owns the preview state. Every submitted résumé bumps
//! the generation and restarts the debounce timer; when the timer fires, the
//! latest snapshot is rendered on the blocking pool. Results whose generation is
//! no longer the latest are dropped, so once edits settle the preview never shows
//! content older than the last edit.
//!
//! # Concurrency
//! - Commands arrive over an `mpsc` channel; state is published through `watch`.
//! - Render jobs run in `spawn_blocking` and report back over an unbounded channel.
//! - A failed render keeps the previously shown pages and records `last_error`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::errors::BuilderError;
use crate::layout::Document;
use crate::models::Resume;
use crate::pipeline::raster::{rasterize, DisplayGeometry, PreviewPage};
use crate::templates::{self, LayoutOptions};

/// Commands queued before the supervisor drains them.
const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewConfig {
    pub debounce: Duration,
    /// Raster pixels per point.
    pub base_scale: f32,
    /// Initial container width in display pixels.
    pub container_width: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            base_scale: 1.5,
            container_width: 800.0,
        }
    }
}

/// What the preview surface shows right now.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewState {
    pub loading: bool,
    pub pages: Arc<[PreviewPage]>,
    #[serde(skip)]
    pub document: Option<Arc<Document>>,
    pub display: DisplayGeometry,
    /// Generation of the latest submitted edit.
    pub generation: u64,
    pub renders_completed: u64,
    pub renders_superseded: u64,
    pub last_error: Option<String>,
}

impl PreviewState {
    fn new(display: DisplayGeometry) -> Self {
        Self {
            loading: false,
            pages: Arc::from(Vec::new()),
            document: None,
            display,
            generation: 0,
            renders_completed: 0,
            renders_superseded: 0,
            last_error: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering seam
// ────────────────────────────────────────────────────────────────────────────

/// Output of one preview render.
#[derive(Debug)]
pub struct RenderedPreview {
    pub document: Document,
    pub pages: Vec<PreviewPage>,
}

/// Produces preview pages from a résumé snapshot. Runs on the blocking pool.
pub trait PreviewRenderer: Send + Sync + 'static {
    fn render(&self, resume: &Resume, scale: f32) -> Result<RenderedPreview, BuilderError>;
}

/// Lays the résumé out with its template and rasterizes every page.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutRenderer {
    pub options: LayoutOptions,
}

impl PreviewRenderer for LayoutRenderer {
    fn render(&self, resume: &Resume, scale: f32) -> Result<RenderedPreview, BuilderError> {
        let document = templates::render(resume, &self.options)?;
        let pages = rasterize(&document, scale)?;
        Ok(RenderedPreview { document, pages })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handle
// ────────────────────────────────────────────────────────────────────────────

enum Command {
    Submit(Box<Resume>),
    Resize(f32),
    Shutdown,
}

/// Client side of the preview pipeline.
pub struct PreviewHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<PreviewState>,
    task: JoinHandle<()>,
}

impl PreviewHandle {
    /// Schedules a regeneration with `resume` as the latest snapshot.
    pub async fn submit(&self, resume: Resume) -> Result<(), BuilderError> {
        self.send(Command::Submit(Box::new(resume))).await
    }

    /// Re-derives the display geometry; the document is not regenerated.
    pub async fn resize(&self, container_width: f32) -> Result<(), BuilderError> {
        self.send(Command::Resize(container_width)).await
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.state.clone()
    }

    pub fn current(&self) -> PreviewState {
        self.state.borrow().clone()
    }

    /// Stops the supervisor. In-flight renders finish on the blocking pool and
    /// their results are discarded.
    pub async fn shutdown(self) -> Result<(), BuilderError> {
        // The supervisor may already be gone; joining below reports that.
        let _ = self.commands.send(Command::Shutdown).await;
        self.task
            .await
            .map_err(|e| BuilderError::Internal(anyhow!("preview supervisor failed: {e}")))
    }

    async fn send(&self, command: Command) -> Result<(), BuilderError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| BuilderError::PipelineClosed)
    }
}

/// Starts a preview supervisor that lays out with `options`.
pub fn spawn_preview(config: PreviewConfig, options: LayoutOptions) -> PreviewHandle {
    spawn_preview_with(config, Arc::new(LayoutRenderer { options }))
}

/// Starts a preview supervisor around a custom renderer.
pub fn spawn_preview_with(
    config: PreviewConfig,
    renderer: Arc<dyn PreviewRenderer>,
) -> PreviewHandle {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let initial = PreviewState::new(DisplayGeometry::from_container(config.container_width));
    let (state_tx, state_rx) = watch::channel(initial);

    let supervisor = Supervisor {
        config,
        renderer,
        state: state_tx,
        latest_generation: 0,
    };
    let task = tokio::spawn(supervisor.run(command_rx));

    PreviewHandle {
        commands: command_tx,
        state: state_rx,
        task,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Supervisor
// ────────────────────────────────────────────────────────────────────────────

struct JobResult {
    generation: u64,
    outcome: Result<RenderedPreview, BuilderError>,
}

struct Supervisor {
    config: PreviewConfig,
    renderer: Arc<dyn PreviewRenderer>,
    state: watch::Sender<PreviewState>,
    latest_generation: u64,
}

impl Supervisor {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let (result_tx, mut results) = mpsc::unbounded_channel::<JobResult>();
        let mut pending: Option<Resume> = None;

        let debounce = sleep(self.config.debounce);
        tokio::pin!(debounce);

        info!(
            debounce_ms = self.config.debounce.as_millis() as u64,
            scale = self.config.base_scale,
            "Preview supervisor started"
        );

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Submit(resume)) => {
                        self.latest_generation += 1;
                        let generation = self.latest_generation;
                        pending = Some(*resume);
                        debounce.as_mut().reset(Instant::now() + self.config.debounce);
                        self.state.send_modify(|s| s.generation = generation);
                        debug!(generation, "Edit received, debounce restarted");
                    }
                    Some(Command::Resize(width)) => {
                        let geometry = DisplayGeometry::from_container(width);
                        self.state.send_modify(|s| s.display = geometry);
                        debug!(container_width = geometry.container_width, "Preview resized");
                    }
                    Some(Command::Shutdown) | None => break,
                },
                () = &mut debounce, if pending.is_some() => {
                    if let Some(resume) = pending.take() {
                        self.start_job(resume, result_tx.clone());
                    }
                }
                Some(result) = results.recv() => self.finish_job(result),
            }
        }

        info!(generation = self.latest_generation, "Preview supervisor stopped");
    }

    fn start_job(&self, resume: Resume, results: mpsc::UnboundedSender<JobResult>) {
        let generation = self.latest_generation;
        let renderer = Arc::clone(&self.renderer);
        let scale = self.config.base_scale;
        self.state.send_modify(|s| s.loading = true);
        debug!(generation, "Render started");

        tokio::spawn(async move {
            // CPU-bound layout and rasterization; keep it off the async workers.
            let outcome = tokio::task::spawn_blocking(move || renderer.render(&resume, scale))
                .await
                .map_err(|e| BuilderError::Internal(anyhow!("spawn_blocking failed in preview render: {e}")))
                .and_then(|outcome| outcome);

            if results.send(JobResult { generation, outcome }).is_err() {
                debug!(generation, "Preview supervisor gone, render result dropped");
            }
        });
    }

    fn finish_job(&self, result: JobResult) {
        let JobResult { generation, outcome } = result;

        if generation != self.latest_generation {
            // Dropping the outcome releases the superseded document and bitmaps.
            drop(outcome);
            self.state.send_modify(|s| s.renders_superseded += 1);
            debug!(generation, latest = self.latest_generation, "Superseded render dropped");
            return;
        }

        match outcome {
            Ok(rendered) => {
                let pages = rendered.pages.len();
                self.state.send_modify(|s| {
                    s.pages = Arc::from(rendered.pages);
                    s.document = Some(Arc::new(rendered.document));
                    s.loading = false;
                    s.renders_completed += 1;
                    s.last_error = None;
                });
                info!(generation, pages, "Preview updated");
            }
            Err(e) => {
                warn!(generation, error = %e, "Preview render failed, keeping previous pages");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.last_error = Some(e.to_string());
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc as std_mpsc;
    use std::sync::Mutex;

    use crate::models::PersonalInfo;

    fn named(name: &str) -> Resume {
        Resume::default().with_personal_info(PersonalInfo {
            full_name: name.to_string(),
            ..PersonalInfo::default()
        })
    }

    fn config() -> PreviewConfig {
        PreviewConfig {
            base_scale: 0.25,
            ..PreviewConfig::default()
        }
    }

    /// Holds renders of "Slow" until released, and fails renders of "Fail".
    struct ScriptedRenderer {
        gate: Mutex<std_mpsc::Receiver<()>>,
    }

    impl PreviewRenderer for ScriptedRenderer {
        fn render(&self, resume: &Resume, scale: f32) -> Result<RenderedPreview, BuilderError> {
            match resume.personal_info.full_name.as_str() {
                "Slow" => {
                    let gate = self
                        .gate
                        .lock()
                        .map_err(|_| BuilderError::Layout("gate poisoned".to_string()))?;
                    let _ = gate.recv();
                }
                "Fail" => return Err(BuilderError::Layout("scripted failure".to_string())),
                _ => {}
            }
            LayoutRenderer::default().render(resume, scale)
        }
    }

    fn scripted() -> (Arc<ScriptedRenderer>, std_mpsc::Sender<()>) {
        let (tx, rx) = std_mpsc::channel();
        (
            Arc::new(ScriptedRenderer {
                gate: Mutex::new(rx),
            }),
            tx,
        )
    }

    fn title(state: &PreviewState) -> Option<String> {
        state.document.as_ref().map(|d| d.title.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_render_once_with_final_data() {
        let handle = spawn_preview(config(), LayoutOptions::default());
        let mut rx = handle.subscribe();

        handle.submit(named("First")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        handle.submit(named("Second")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        handle.submit(named("Third")).await.unwrap();

        let state = rx
            .wait_for(|s| s.renders_completed >= 1)
            .await
            .unwrap()
            .clone();
        assert_eq!(title(&state).as_deref(), Some("Third - Resume"));
        assert_eq!(state.generation, 3);
        assert!(!state.loading);
        assert!(!state.pages.is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        let settled = handle.current();
        assert_eq!(settled.renders_completed, 1);
        assert_eq!(settled.renders_superseded, 0);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_render_before_debounce() {
        let handle = spawn_preview(config(), LayoutOptions::default());
        handle.submit(named("Early")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;

        let state = handle.current();
        assert_eq!(state.renders_completed, 0);
        assert!(!state.loading);
        assert!(state.pages.is_empty());

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_render_is_superseded() {
        let (renderer, release) = scripted();
        let handle = spawn_preview_with(config(), renderer);
        let mut rx = handle.subscribe();

        handle.submit(named("Slow")).await.unwrap();
        rx.wait_for(|s| s.loading).await.unwrap();

        handle.submit(named("Fast")).await.unwrap();
        rx.wait_for(|s| s.generation == 2).await.unwrap();
        release.send(()).unwrap();

        let state = rx
            .wait_for(|s| s.renders_completed == 1 && s.renders_superseded == 1)
            .await
            .unwrap()
            .clone();
        assert_eq!(title(&state).as_deref(), Some("Fast - Resume"));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_render_keeps_previous_pages() {
        let (renderer, _release) = scripted();
        let handle = spawn_preview_with(config(), renderer);
        let mut rx = handle.subscribe();

        handle.submit(named("Good")).await.unwrap();
        let before = rx
            .wait_for(|s| s.renders_completed == 1)
            .await
            .unwrap()
            .clone();

        handle.submit(named("Fail")).await.unwrap();
        let after = rx
            .wait_for(|s| s.last_error.is_some())
            .await
            .unwrap()
            .clone();

        assert!(Arc::ptr_eq(&before.pages, &after.pages));
        assert_eq!(title(&after).as_deref(), Some("Good - Resume"));
        assert!(!after.loading);
        assert!(after.last_error.unwrap().contains("scripted failure"));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_keeps_pages_and_generation() {
        let handle = spawn_preview(config(), LayoutOptions::default());
        let mut rx = handle.subscribe();

        handle.submit(named("Sized")).await.unwrap();
        let before = rx
            .wait_for(|s| s.renders_completed == 1)
            .await
            .unwrap()
            .clone();

        handle.resize(420.0).await.unwrap();
        let after = rx
            .wait_for(|s| s.display.container_width == 420.0)
            .await
            .unwrap()
            .clone();

        assert_eq!(after.generation, before.generation);
        assert_eq!(after.renders_completed, 1);
        assert!(Arc::ptr_eq(&before.pages, &after.pages));
        assert!((after.display.page_height - 594.0).abs() < 1e-3);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_serializes_page_summaries() {
        let handle = spawn_preview(config(), LayoutOptions::default());
        let mut rx = handle.subscribe();

        handle.submit(named("Serialized")).await.unwrap();
        let state = rx
            .wait_for(|s| s.renders_completed == 1)
            .await
            .unwrap()
            .clone();

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["pages"][0]["number"], 1);
        assert!(json["pages"][0].get("png").is_none());
        assert!(json.get("document").is_none());
        assert_eq!(json["generation"], 1);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_after_shutdown_fails() {
        let handle = spawn_preview(config(), LayoutOptions::default());
        let commands = handle.commands.clone();
        handle.shutdown().await.unwrap();
        assert!(commands.send(Command::Resize(10.0)).await.is_err());
    }
}
