//! TUI 2048 (workspace facade crate).
//!
//! Re-exports the workspace crates under `tui_2048::{core,input,term,types}`
//! and holds the application pieces the binary needs: configuration, save
//! file storage, and logging setup.

pub mod config;
pub mod storage;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Send `tracing` output to `path`.
///
/// The terminal is in raw alternate-screen mode while playing, so logs never
/// go to stdout. Filtering follows `RUST_LOG`, defaulting to `info`. Fails if a
/// global subscriber is already installed.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing the log subscriber")
}
