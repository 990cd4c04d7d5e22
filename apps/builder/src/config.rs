use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::pipeline::PreviewConfig;
use crate::templates::{LayoutOptions, LayoutStrategy};

/// Application configuration loaded from environment variables.
/// Every key has a default; a value that is present but malformed is an error.
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub debounce_ms: u64,
    pub preview_scale: f32,
    pub container_width: f32,
    pub layout_strategy: LayoutStrategy,
    pub orphan_control: bool,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rust_log: "info".to_string(),
            debounce_ms: 500,
            preview_scale: 1.5,
            container_width: 800.0,
            layout_strategy: LayoutStrategy::Flow,
            orphan_control: true,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let preview_scale: f32 = parse_or("PREVIEW_SCALE", &lookup, defaults.preview_scale)?;
        if !(preview_scale.is_finite() && preview_scale > 0.0) {
            anyhow::bail!("PREVIEW_SCALE must be a positive number, got {preview_scale}");
        }
        let container_width: f32 =
            parse_or("PREVIEW_CONTAINER_WIDTH", &lookup, defaults.container_width)?;
        if !(container_width.is_finite() && container_width >= 0.0) {
            anyhow::bail!("PREVIEW_CONTAINER_WIDTH must be a non-negative number, got {container_width}");
        }

        Ok(Config {
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            debounce_ms: parse_or("PREVIEW_DEBOUNCE_MS", &lookup, defaults.debounce_ms)?,
            preview_scale,
            container_width,
            layout_strategy: parse_or("LAYOUT_STRATEGY", &lookup, defaults.layout_strategy)?,
            orphan_control: parse_or("ORPHAN_CONTROL", &lookup, defaults.orphan_control)?,
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        })
    }

    pub fn preview(&self) -> PreviewConfig {
        PreviewConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            base_scale: self.preview_scale,
            container_width: self.container_width,
        }
    }

    pub fn layout(&self) -> LayoutOptions {
        LayoutOptions {
            strategy: self.layout_strategy,
            orphan_control: self.orphan_control,
        }
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
